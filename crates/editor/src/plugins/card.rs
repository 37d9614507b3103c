//! Card containment.
//!
//! A card brackets its content between a `card-before` and a `card-after`
//! sentinel. Sentinels hold only the zero-width placeholder: typing into
//! `card-before` is refused, typing into `card-after` lands in a new
//! paragraph after the card, and removing `card-after` removes the card.

use strata_primitives::{Path, Point};
use tracing::debug;

use super::{Intercept, Plugin};
use crate::editor::Editor;
use crate::error::Result;
use crate::node::{Element, ElementKind, Node, PLACEHOLDER, Text};
use crate::operation::{Operation, Property};


/// Keeps cards atomic and their sentinels intact.
#[derive(Debug, Default, Clone, Copy)]
pub struct CardPlugin;

/// True when a card has no content worth keeping.
///
/// Media, attachments, link cards and schema widgets count as content even
/// though they carry no text.
pub(crate) fn is_card_empty(card: &Element) -> bool {
	card.children
		.iter()
		.filter(|child| !child.is(ElementKind::is_card_sentinel))
		.all(|child| {
			!child.is(|kind| kind.is_media() || matches!(kind, ElementKind::LinkCard { .. } | ElementKind::Schema))
				&& child.string().trim().is_empty()
		})
}

fn content_count(card: &Element) -> usize {
	card.children
		.iter()
		.filter(|child| !child.is(ElementKind::is_card_sentinel))
		.count()
}

impl CardPlugin {
	fn remove_card(editor: &mut Editor, card: &Path) -> Result<Intercept> {
		debug!(%card, "removing card");
		let node = editor.node_cloned(card)?;
		editor.apply_unintercepted(Operation::RemoveNode {
			path: card.clone(),
			node,
		})?;
		Ok(Intercept::Handled)
	}

	fn intercept_remove(editor: &mut Editor, path: &Path, node: &Node) -> Result<Intercept> {
		match node.kind() {
			Some(ElementKind::Card) => return Ok(Intercept::PassThrough),
			Some(ElementKind::CardAfter) => {
				let card = path.parent()?;
				if editor.document().kind(&card) == Some(&ElementKind::Card) {
					return Self::remove_card(editor, &card);
				}
				return Ok(Intercept::PassThrough);
			}
			Some(ElementKind::CardBefore) => {
				debug!(%path, "refusing to remove card-before");
				return Ok(Intercept::Handled);
			}
			_ => {}
		}

		let parent = path.parent()?;
		match editor.document().kind(&parent) {
			Some(kind) if kind.is_card_sentinel() => {
				debug!(%path, "refusing to remove sentinel placeholder");
				Ok(Intercept::Handled)
			}
			Some(ElementKind::Card) if content_count(editor.document().element(&parent)?) <= 1 => {
				Self::remove_card(editor, &parent)
			}
			_ => Ok(Intercept::PassThrough),
		}
	}

	fn intercept_insert_text(editor: &mut Editor, path: &Path, text: &str) -> Result<Intercept> {
		let parent = path.parent()?;
		match editor.document().kind(&parent) {
			Some(ElementKind::CardBefore) => {
				debug!(%path, "refusing text in card-before");
				Ok(Intercept::Handled)
			}
			Some(ElementKind::CardAfter) => {
				let card = parent.parent()?;
				if editor.document().kind(&card) != Some(&ElementKind::Card) {
					return Ok(Intercept::Handled);
				}
				let paragraph = card.next()?;
				debug!(%card, to = %paragraph, "redirecting card-after text to a new paragraph");
				editor.apply(Operation::InsertNode {
					path: paragraph.clone(),
					node: Node::paragraph(text),
				})?;
				editor.select_point(Point::new(paragraph.child(0), text.chars().count()))?;
				Ok(Intercept::Handled)
			}
			_ => Ok(Intercept::PassThrough),
		}
	}

	fn intercept_insert_node(editor: &mut Editor, path: &Path, node: &Node) -> Result<Intercept> {
		let parent = path.parent()?;
		match editor.document().kind(&parent) {
			Some(ElementKind::CardBefore) => {
				debug!(%path, "refusing node in card-before");
				Ok(Intercept::Handled)
			}
			Some(ElementKind::CardAfter) => {
				let card = parent.parent()?;
				let target = if editor.document().kind(&card) == Some(&ElementKind::Card) {
					card.next()?
				} else {
					parent
				};
				debug!(to = %target, "redirecting card-after insertion");
				editor.apply(Operation::InsertNode {
					path: target,
					node: node.clone(),
				})?;
				Ok(Intercept::Handled)
			}
			_ => Ok(Intercept::PassThrough),
		}
	}

	fn in_sentinel(editor: &Editor, leaf: &Path) -> bool {
		leaf.parent()
			.is_ok_and(|parent| editor.document().kind(&parent).is_some_and(ElementKind::is_card_sentinel))
	}

	fn normalize_card(editor: &mut Editor, path: &Path) -> Result<bool> {
		let card = editor.document().element(path)?;
		if content_count(card) == 0 {
			debug!(%path, "removing card without content");
			Self::remove_card(editor, path)?;
			return Ok(true);
		}

		let last = card.children.len() - 1;
		let misplaced = card.children.iter().enumerate().position(|(index, child)| match child.kind() {
			Some(ElementKind::CardBefore) => index != 0,
			Some(ElementKind::CardAfter) => index != last,
			_ => false,
		});
		if let Some(index) = misplaced {
			debug!(%path, index, "removing misplaced sentinel");
			let child = path.child(index);
			let node = editor.node_cloned(&child)?;
			editor.apply_unintercepted(Operation::RemoveNode { path: child, node })?;
			return Ok(true);
		}

		if !card.children[0].is(|kind| *kind == ElementKind::CardBefore) {
			debug!(%path, "restoring card-before");
			editor.apply_unintercepted(Operation::InsertNode {
				path: path.child(0),
				node: Node::sentinel(ElementKind::CardBefore),
			})?;
			return Ok(true);
		}
		if !card.children[last].is(|kind| *kind == ElementKind::CardAfter) {
			debug!(%path, "restoring card-after");
			editor.apply_unintercepted(Operation::InsertNode {
				path: path.child(last + 1),
				node: Node::sentinel(ElementKind::CardAfter),
			})?;
			return Ok(true);
		}
		Ok(false)
	}

	fn normalize_sentinel(editor: &mut Editor, path: &Path) -> Result<bool> {
		let in_card = editor.document().parent_kind(path) == Some(&ElementKind::Card);
		let sentinel = editor.document().element(path)?;
		if !in_card {
			debug!(%path, "removing sentinel outside a card");
			let node = Node::Element(sentinel.clone());
			editor.apply_unintercepted(Operation::RemoveNode {
				path: path.clone(),
				node,
			})?;
			return Ok(true);
		}

		let count = sentinel.children.len();
		if count > 1 {
			let extra = path.child(count - 1);
			let node = sentinel.children[count - 1].clone();
			debug!(path = %extra, "trimming sentinel");
			editor.apply_unintercepted(Operation::RemoveNode { path: extra, node })?;
			return Ok(true);
		}
		match sentinel.children.first() {
			Some(Node::Element(element)) => {
				let node = Node::Element(element.clone());
				editor.apply_unintercepted(Operation::RemoveNode {
					path: path.child(0),
					node,
				})?;
				editor.apply_unintercepted(Operation::InsertNode {
					path: path.child(0),
					node: Text::new(PLACEHOLDER).into(),
				})?;
				Ok(true)
			}
			Some(Node::Text(leaf)) if leaf.text != PLACEHOLDER || !leaf.marks.is_empty() || leaf.trigger.is_some() => {
				debug!(%path, "restoring sentinel placeholder");
				editor.apply_unintercepted(Operation::SetNode {
					path: path.child(0),
					properties: vec![
						Property::Text(PLACEHOLDER.into()),
						Property::Marks(Default::default()),
						Property::Trigger(None),
					],
				})?;
				Ok(true)
			}
			_ => Ok(false),
		}
	}
}

impl Plugin for CardPlugin {
	fn name(&self) -> &'static str {
		"card"
	}

	fn intercept(&self, editor: &mut Editor, op: &Operation) -> Result<Intercept> {
		match op {
			Operation::RemoveNode { path, node } => Self::intercept_remove(editor, path, node),
			Operation::InsertText { path, text, .. } => Self::intercept_insert_text(editor, path, text),
			Operation::InsertNode { path, node } => Self::intercept_insert_node(editor, path, node),
			Operation::SplitNode { path, .. } => {
				let atomic = editor
					.document()
					.kind(path)
					.is_some_and(|kind| matches!(kind, ElementKind::Card) || kind.is_card_sentinel());
				if atomic || Self::in_sentinel(editor, path) {
					debug!(%path, "refusing to split card");
					return Ok(Intercept::Handled);
				}
				Ok(Intercept::PassThrough)
			}
			Operation::RemoveText { path, .. } if Self::in_sentinel(editor, path) => {
				debug!(%path, "refusing to delete sentinel placeholder");
				Ok(Intercept::Handled)
			}
			_ => Ok(Intercept::PassThrough),
		}
	}

	/// Drops a card whose content a text edit just emptied.
	fn after_apply(&self, editor: &mut Editor, op: &Operation) -> Result<()> {
		let path = match op {
			Operation::InsertText { path, .. } | Operation::RemoveText { path, .. } => path,
			Operation::SetNode { path, properties } if properties.iter().any(|p| matches!(p, Property::Text(_))) => path,
			_ => return Ok(()),
		};
		let Some(card) = editor.document().above(path, |kind| matches!(kind, ElementKind::Card)) else {
			return Ok(());
		};
		if is_card_empty(editor.document().element(&card)?) {
			debug!(%card, "text edit emptied card");
			Self::remove_card(editor, &card)?;
		}
		Ok(())
	}

	fn normalize_node(&self, editor: &mut Editor, path: &Path) -> Result<bool> {
		match editor.document().kind(path) {
			Some(ElementKind::Card) => Self::normalize_card(editor, path),
			Some(kind) if kind.is_card_sentinel() => Self::normalize_sentinel(editor, path),
			_ => Ok(false),
		}
	}

	fn delete_backward(&self, editor: &mut Editor) -> Result<bool> {
		let Some(caret) = editor.selection().map(|range| range.focus.clone()) else {
			return Ok(false);
		};
		let Ok(parent) = caret.path.parent() else {
			return Ok(false);
		};
		match editor.document().kind(&parent) {
			Some(ElementKind::CardBefore) => {
				debug!("backspace in card-before swallowed");
				Ok(true)
			}
			Some(ElementKind::CardAfter) => {
				debug!(sentinel = %parent, "backspace in card-after removes card");
				editor.remove_node(&parent)?;
				Ok(true)
			}
			_ => Ok(false),
		}
	}
}
