use std::cmp::Ordering;

use proptest::prelude::*;

use super::*;

#[test]
fn parent_and_child_round_trip() {
	let path = Path::from([0, 2, 1]);
	assert_eq!(path.parent().unwrap(), Path::from([0, 2]));
	assert_eq!(path.parent().unwrap().child(1), path);
	assert_eq!(Path::root().parent(), Err(AddressError::RootHasNoParent));
}

#[test]
fn sibling_steps() {
	let path = Path::from([3, 1]);
	assert_eq!(path.next().unwrap(), Path::from([3, 2]));
	assert_eq!(path.previous().unwrap(), Path::from([3, 0]));
	assert!(path.has_previous());

	let first = Path::from([3, 0]);
	assert!(!first.has_previous());
	assert_eq!(first.previous(), Err(AddressError::NoSibling { path: first.clone() }));
	assert!(Path::root().next().is_err());
}

#[test]
fn ancestry() {
	let outer = Path::from([1]);
	let inner = Path::from([1, 0, 4]);
	assert!(outer.is_ancestor(&inner));
	assert!(inner.is_descendant(&outer));
	assert!(!inner.is_ancestor(&outer));
	assert!(!outer.is_ancestor(&outer));
	assert!(inner.starts_with(&outer));
	assert!(outer.starts_with(&outer));
	assert!(Path::root().is_ancestor(&outer));
}

#[test]
fn ends_before_only_at_own_depth() {
	let path = Path::from([0, 1]);
	assert!(path.ends_before(&Path::from([0, 2])));
	assert!(path.ends_before(&Path::from([0, 2, 5])));
	assert!(!path.ends_before(&Path::from([0, 1, 3])));
	assert!(!path.ends_before(&Path::from([1])));
	assert!(!path.ends_before(&Path::from([0, 0])));
}

#[test]
fn siblings_share_parent() {
	assert!(Path::from([2, 0]).is_sibling(&Path::from([2, 3])));
	assert!(!Path::from([2, 0]).is_sibling(&Path::from([2, 0])));
	assert!(!Path::from([2, 0]).is_sibling(&Path::from([1, 0])));
	assert!(!Path::root().is_sibling(&Path::root()));
}

#[test]
fn document_order() {
	assert_eq!(Path::from([0]).compare(&Path::from([0, 0])), Ordering::Less);
	assert_eq!(Path::from([0, 5]).compare(&Path::from([1])), Ordering::Less);
	assert_eq!(Path::from([2, 1]).compare(&Path::from([2, 0, 9])), Ordering::Greater);
	assert_eq!(Path::from([1, 1]).compare(&Path::from([1, 1])), Ordering::Equal);
}

#[test]
fn common_prefix_and_ancestors() {
	let a = Path::from([0, 1, 2]);
	let b = Path::from([0, 1, 5, 0]);
	assert_eq!(a.common(&b), Path::from([0, 1]));
	let ancestors: Vec<_> = a.ancestors().collect();
	assert_eq!(ancestors, vec![Path::root(), Path::from([0]), Path::from([0, 1])]);
}

#[test]
fn join_and_suffix() {
	let path = Path::from([4, 2, 7]);
	assert_eq!(path.suffix(1), &[2, 7]);
	assert_eq!(Path::from([1]).join(path.suffix(1)), Path::from([1, 2, 7]));
	assert_eq!(path.suffix(9), &[] as &[usize]);
}

proptest! {
	/// A parent always sorts before its children and shares their prefix.
	#[test]
	fn prop_parent_precedes_child(indices in proptest::collection::vec(0usize..8, 1..6)) {
		let path = Path::new(indices);
		let parent = path.parent().unwrap();
		prop_assert!(parent < path);
		prop_assert!(parent.is_ancestor(&path));
		prop_assert_eq!(path.common(&parent), parent);
	}

	/// `next` then `previous` returns to the starting sibling.
	#[test]
	fn prop_next_previous_inverse(indices in proptest::collection::vec(0usize..8, 1..6)) {
		let path = Path::new(indices);
		let back = path.next().unwrap().previous().unwrap();
		prop_assert_eq!(back, path);
	}
}
