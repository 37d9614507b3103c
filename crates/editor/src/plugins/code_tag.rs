//! Inline code and tag containment.
//!
//! A tag is a text leaf marked [`Marks::TAG`] (typed with a trigger such as
//! `#`). Emptying a tag leaves a one-space placeholder tag rather than
//! dropping it; a second trailing space steps out of the tag. Tag leaves,
//! inline code and code blocks never split.

use strata_primitives::{Path, Point};
use tracing::debug;

use super::{Intercept, Plugin};
use crate::editor::Editor;
use crate::error::Result;
use crate::node::{ElementKind, Marks, Node, Text};
use crate::operation::{Operation, Property};


#[derive(Debug, Default, Clone, Copy)]
pub struct CodeTagPlugin;

fn is_blank(text: &str) -> bool {
	text.trim().is_empty()
}

impl CodeTagPlugin {
	fn intercept_remove_text(editor: &mut Editor, path: &Path, removed: &str) -> Result<Intercept> {
		let Ok(leaf) = editor.document().text(path) else {
			return Ok(Intercept::PassThrough);
		};
		if !leaf.is_tag() {
			return Ok(Intercept::PassThrough);
		}
		let marks = leaf.marks;
		if is_blank(&leaf.text) {
			debug!(%path, "demoting blank tag");
			editor.apply_unintercepted(Operation::SetNode {
				path: path.clone(),
				properties: vec![
					Property::Marks(marks - Marks::TAG - Marks::CODE),
					Property::Text(" ".into()),
					Property::Trigger(None),
				],
			})?;
			return Ok(Intercept::Handled);
		}
		if leaf.text == removed {
			debug!(%path, "emptied tag keeps a placeholder space");
			editor.apply_unintercepted(Operation::SetNode {
				path: path.clone(),
				properties: vec![
					Property::Marks(marks | Marks::TAG | Marks::CODE),
					Property::Text(" ".into()),
				],
			})?;
			editor.select_point(Point::new(path.clone(), 1))?;
			return Ok(Intercept::Handled);
		}
		Ok(Intercept::PassThrough)
	}

	fn intercept_insert_text(editor: &mut Editor, path: &Path, text: &str) -> Result<Intercept> {
		let Ok(leaf) = editor.document().text(path) else {
			return Ok(Intercept::PassThrough);
		};
		if !leaf.is_tag() {
			return Ok(Intercept::PassThrough);
		}
		let at_end = editor
			.selection()
			.is_some_and(|range| range.focus.path == *path && range.focus.offset == leaf.char_len());
		if text == " " && at_end && leaf.text.ends_with(' ') {
			let next = path.next()?;
			debug!(%path, "second trailing space leaves the tag");
			editor.apply(Operation::InsertNode {
				path: next.clone(),
				node: Text::new(" ").into(),
			})?;
			editor.select_point(Point::new(next, 1))?;
			return Ok(Intercept::Handled);
		}
		if !is_blank(text) && is_blank(&leaf.text) {
			let marks = leaf.marks | Marks::TAG | Marks::CODE;
			debug!(%path, "typing into blank tag replaces it");
			editor.apply_unintercepted(Operation::SetNode {
				path: path.clone(),
				properties: vec![Property::Marks(marks), Property::Text(text.to_owned())],
			})?;
			editor.select_point(Point::new(path.clone(), text.chars().count()))?;
			return Ok(Intercept::Handled);
		}
		Ok(Intercept::PassThrough)
	}

	fn refuses_split(editor: &Editor, path: &Path) -> bool {
		match editor.document().node(path) {
			Ok(Node::Text(leaf)) => {
				leaf.marks.intersects(Marks::TAG | Marks::CODE)
					|| editor
						.document()
						.parent_kind(path)
						.is_some_and(|kind| matches!(kind, ElementKind::CodeBlock { .. }))
			}
			Ok(Node::Element(element)) => matches!(element.kind, ElementKind::CodeBlock { .. }),
			Err(_) => false,
		}
	}
}

impl Plugin for CodeTagPlugin {
	fn name(&self) -> &'static str {
		"code-tag"
	}

	fn intercept(&self, editor: &mut Editor, op: &Operation) -> Result<Intercept> {
		match op {
			Operation::RemoveText { path, text, .. } => Self::intercept_remove_text(editor, path, text),
			Operation::InsertText { path, text, .. } => Self::intercept_insert_text(editor, path, text),
			Operation::SplitNode { path, .. } if Self::refuses_split(editor, path) => {
				debug!(%path, "refusing to split code or tag");
				Ok(Intercept::Handled)
			}
			_ => Ok(Intercept::PassThrough),
		}
	}

	fn delete_backward(&self, editor: &mut Editor) -> Result<bool> {
		let Some(caret) = editor.selection().map(|range| range.focus.clone()) else {
			return Ok(false);
		};
		let document = editor.document();
		let Ok(leaf) = document.text(&caret.path) else {
			return Ok(false);
		};

		if caret.offset <= 1
			&& let Some((previous, node)) = document.previous_sibling(&caret.path)
			&& node.as_text().is_some_and(Text::is_tag)
		{
			if !is_blank(&leaf.text) && caret.offset > 0 {
				return Ok(false);
			}
			debug!(tag = %previous, "backspace after tag removes it");
			editor.remove_node(&previous)?;
			return Ok(true);
		}

		if leaf.is_tag() && is_blank(&leaf.text) && caret.offset == 0 {
			let text = match &leaf.trigger {
				Some(trigger) => leaf.text.replacen(trigger.as_str(), "", 1),
				None => leaf.text.clone(),
			};
			let marks = leaf.marks - Marks::TAG - Marks::CODE;
			debug!(path = %caret.path, "backspace at blank tag demotes it");
			editor.set_properties(
				&caret.path,
				vec![Property::Marks(marks), Property::Text(text), Property::Trigger(None)],
			)?;
			return Ok(true);
		}
		Ok(false)
	}
}
