//! Structural invariant checks.
//!
//! [`check`] scans a whole document and reports every shape the normalizer
//! should never leave behind. Hosts can run it after loading untrusted
//! content; the test suite runs it after every command.

use std::fmt;

use strata_primitives::Path;

use crate::document::Document;
use crate::node::{ElementKind, Node, PLACEHOLDER};

/// A broken structural rule, with the offending node's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
	/// A list child that is not a list item.
	ListChild { path: Path },
	/// A list item with no children.
	EmptyListItem { path: Path },
	/// A list item opening with text, an inline element or a table.
	ListItemHead { path: Path },
	/// A list item child after the first that is not a list.
	ListItemTail { path: Path },
	/// A card missing a sentinel at either end, or holding one elsewhere.
	CardSentinels { path: Path },
	/// A sentinel whose content is not exactly the placeholder.
	SentinelContent { path: Path },
	/// The root has no children.
	EmptyRoot,
	/// A list, table, row or blockquote with no children.
	EmptyContainer { path: Path },
}

impl fmt::Display for Violation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ListChild { path } => write!(f, "list child at {path} is not a list item"),
			Self::EmptyListItem { path } => write!(f, "list item at {path} is empty"),
			Self::ListItemHead { path } => write!(f, "list item at {path} does not open with a block"),
			Self::ListItemTail { path } => write!(f, "list item child at {path} is not a nested list"),
			Self::CardSentinels { path } => write!(f, "card at {path} has misplaced sentinels"),
			Self::SentinelContent { path } => write!(f, "sentinel at {path} lost its placeholder"),
			Self::EmptyRoot => f.write_str("document has no blocks"),
			Self::EmptyContainer { path } => write!(f, "container at {path} is empty"),
		}
	}
}

/// Returns every violation in `document`, in document order.
pub fn check(document: &Document) -> Vec<Violation> {
	let mut violations = Vec::new();
	if document.is_empty() {
		violations.push(Violation::EmptyRoot);
	}
	for (path, node) in document.descendants() {
		let Node::Element(element) = node else {
			continue;
		};
		let children = &element.children;
		match &element.kind {
			kind if kind.is_list() => {
				for (index, child) in children.iter().enumerate() {
					if !child.is(ElementKind::is_list_item) {
						violations.push(Violation::ListChild { path: path.child(index) });
					}
				}
			}
			ElementKind::ListItem { .. } => match children.first() {
				None => violations.push(Violation::EmptyListItem { path: path.clone() }),
				Some(first) => {
					let opens_with_block = first.is(|kind| kind.is_block() && !matches!(kind, ElementKind::Table));
					if !opens_with_block {
						violations.push(Violation::ListItemHead { path: path.clone() });
					}
					for (index, child) in children.iter().enumerate().skip(1) {
						if !child.is(ElementKind::is_list) {
							violations.push(Violation::ListItemTail { path: path.child(index) });
						}
					}
				}
			},
			ElementKind::Card => {
				let last = children.len().saturating_sub(1);
				let well_formed = children.len() >= 3
					&& children.iter().enumerate().all(|(index, child)| match child.kind() {
						Some(ElementKind::CardBefore) => index == 0,
						Some(ElementKind::CardAfter) => index == last,
						_ => index != 0 && index != last,
					});
				if !well_formed {
					violations.push(Violation::CardSentinels { path: path.clone() });
				}
			}
			kind if kind.is_card_sentinel() => {
				let placeholder = matches!(
					children.as_slice(),
					[Node::Text(leaf)] if leaf.text == PLACEHOLDER && leaf.marks.is_empty()
				);
				if !placeholder {
					violations.push(Violation::SentinelContent { path: path.clone() });
				}
			}
			_ => {}
		}
		if element.kind.is_removable_when_empty() && children.is_empty() {
			violations.push(Violation::EmptyContainer { path });
		}
	}
	violations
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn default_document_is_clean() {
		assert_eq!(check(&Document::default()), Vec::new());
	}

	#[test]
	fn reports_bad_list_shapes() {
		let document = Document::new(vec![Node::bulleted_list(vec![
			Node::paragraph("stray"),
			Node::list_item(vec![]),
			Node::list_item(vec![Node::paragraph("ok"), Node::paragraph("tail")]),
		])]);
		assert_eq!(
			check(&document),
			vec![
				Violation::ListChild { path: Path::from([0, 0]) },
				Violation::EmptyListItem { path: Path::from([0, 1]) },
				Violation::ListItemTail { path: Path::from([0, 2, 1]) },
			]
		);
	}

	#[test]
	fn reports_card_and_container_shapes() {
		let mut card = Node::card(vec![Node::paragraph("body")]);
		if let Node::Element(element) = &mut card {
			element.children.pop();
		}
		let document = Document::new(vec![card, Node::blockquote(vec![])]);
		assert_eq!(
			check(&document),
			vec![
				Violation::CardSentinels { path: Path::from([0]) },
				Violation::EmptyContainer { path: Path::from([1]) },
			]
		);
		assert_eq!(check(&Document::new(vec![])), vec![Violation::EmptyRoot]);
	}
}
