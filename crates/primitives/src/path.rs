use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

use crate::error::{AddressError, Result};

#[cfg(test)]
mod tests;

/// Sibling indices from the document root down to a node.
///
/// The empty path addresses the root itself. The derived ordering is
/// document order: a path sorts before all of its descendants, and siblings
/// sort by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(SmallVec<[usize; 8]>);

impl Path {
	/// The root path (no indices).
	pub fn root() -> Self {
		Self(SmallVec::new())
	}

	/// Builds a path from a sequence of indices.
	pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
		Self(indices.into_iter().collect())
	}

	/// Returns the indices as a slice.
	#[inline]
	pub fn as_slice(&self) -> &[usize] {
		&self.0
	}

	/// Returns the number of indices (the node's depth below the root).
	#[inline]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true for the root path.
	#[inline]
	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	/// Same as [`Path::is_root`].
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.is_root()
	}

	/// Returns the last index, or `None` for the root.
	#[inline]
	pub fn last(&self) -> Option<usize> {
		self.0.last().copied()
	}

	/// Returns the index at `depth`, if the path is that deep.
	#[inline]
	pub fn get(&self, depth: usize) -> Option<usize> {
		self.0.get(depth).copied()
	}

	/// Returns the parent path.
	pub fn parent(&self) -> Result<Path> {
		if self.is_root() {
			return Err(AddressError::RootHasNoParent);
		}
		Ok(Self(self.0[..self.0.len() - 1].into()))
	}

	/// Returns the path of the child at `index`.
	pub fn child(&self, index: usize) -> Path {
		let mut indices = self.0.clone();
		indices.push(index);
		Self(indices)
	}

	/// Returns this path with its last index replaced.
	pub fn with_last(&self, index: usize) -> Result<Path> {
		if self.is_root() {
			return Err(AddressError::RootHasNoParent);
		}
		let mut indices = self.0.clone();
		let last = indices.len() - 1;
		indices[last] = index;
		Ok(Self(indices))
	}

	/// Returns the path of the following sibling.
	///
	/// Whether that sibling exists is a question for the tree; this only
	/// refuses to step from the root.
	pub fn next(&self) -> Result<Path> {
		match self.last() {
			Some(last) => self.with_last(last + 1),
			None => Err(AddressError::NoSibling { path: self.clone() }),
		}
	}

	/// Returns the path of the preceding sibling.
	pub fn previous(&self) -> Result<Path> {
		match self.last() {
			Some(last) if last > 0 => self.with_last(last - 1),
			_ => Err(AddressError::NoSibling { path: self.clone() }),
		}
	}

	/// Returns true when a preceding sibling index exists.
	#[inline]
	pub fn has_previous(&self) -> bool {
		self.last().is_some_and(|last| last > 0)
	}

	/// Returns true when this path strictly contains `other` (a proper prefix).
	pub fn is_ancestor(&self, other: &Path) -> bool {
		self.len() < other.len() && other.0.starts_with(&self.0)
	}

	/// Returns true when `other` strictly contains this path.
	pub fn is_descendant(&self, other: &Path) -> bool {
		other.is_ancestor(self)
	}

	/// Returns true when this path equals `other` or lies below it.
	pub fn starts_with(&self, other: &Path) -> bool {
		self.0.starts_with(&other.0)
	}

	/// Returns true when both paths share a parent and differ.
	pub fn is_sibling(&self, other: &Path) -> bool {
		!self.is_root()
			&& self.len() == other.len()
			&& self.0[..self.len() - 1] == other.0[..other.len() - 1]
			&& self != other
	}

	/// Returns true when this path ends before `other` at this path's depth.
	///
	/// `[0, 1]` ends before `[0, 2]` and before `[0, 2, 5]`, but not before
	/// `[0, 1, 3]` (a descendant) or `[1]` (shallower).
	pub fn ends_before(&self, other: &Path) -> bool {
		let Some(last) = self.last() else {
			return false;
		};
		let depth = self.len() - 1;
		other.len() > depth && self.0[..depth] == other.0[..depth] && last < other.0[depth]
	}

	/// Returns the longest shared prefix of both paths.
	pub fn common(&self, other: &Path) -> Path {
		Self(
			self.0
				.iter()
				.zip(other.0.iter())
				.take_while(|(a, b)| a == b)
				.map(|(a, _)| *a)
				.collect(),
		)
	}

	/// Returns every proper ancestor, root first.
	pub fn ancestors(&self) -> impl Iterator<Item = Path> + '_ {
		(0..self.len()).map(|depth| Self(self.0[..depth].into()))
	}

	/// Total document order.
	pub fn compare(&self, other: &Path) -> Ordering {
		self.cmp(other)
	}

	/// Overwrites the index at `depth`; out-of-range depths are ignored.
	pub fn set_index(&mut self, depth: usize, index: usize) {
		if let Some(slot) = self.0.get_mut(depth) {
			*slot = index;
		}
	}

	/// Returns this path extended by `tail`.
	pub fn join(&self, tail: &[usize]) -> Path {
		let mut indices = self.0.clone();
		indices.extend_from_slice(tail);
		Self(indices)
	}

	/// Returns the indices below `depth`.
	pub fn suffix(&self, depth: usize) -> &[usize] {
		self.0.get(depth..).unwrap_or(&[])
	}
}

impl<const N: usize> From<[usize; N]> for Path {
	fn from(indices: [usize; N]) -> Self {
		Self::new(indices)
	}
}

impl From<&[usize]> for Path {
	fn from(indices: &[usize]) -> Self {
		Self(indices.into())
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}", self.as_slice())
	}
}
