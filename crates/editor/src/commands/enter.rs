use strata_primitives::{KeyEvent, Point};
use tracing::debug;

use crate::editor::Editor;
use crate::error::Result;
use crate::node::{Element, ElementKind, Node};


/// Enter inside list items.
///
/// Other blocks are left to the host's own block split.
#[derive(Debug)]
pub struct EnterKey<'a> {
	editor: &'a mut Editor,
}

impl<'a> EnterKey<'a> {
	pub fn new(editor: &'a mut Editor) -> Self {
		Self { editor }
	}

	/// Handles the keystroke. Returns true when a new list item was opened.
	pub fn run(&mut self, event: &mut KeyEvent) -> Result<bool> {
		let Some(range) = self.editor.selection().cloned() else {
			return Ok(false);
		};
		event.prevent_default();
		if !event.modifiers.is_empty() || !range.is_collapsed() {
			return Ok(false);
		}
		let caret = range.focus;
		let document = self.editor.document();
		let Ok(paragraph) = caret.path.parent() else {
			return Ok(false);
		};
		if !document.kind(&paragraph).is_some_and(ElementKind::is_paragraph) {
			return Ok(false);
		}
		let item = paragraph.parent()?;
		let Some(ElementKind::ListItem { checked }) = document.kind(&item).cloned() else {
			return Ok(false);
		};
		let checked = checked.map(|_| false);
		let at_start = caret == document.start(&paragraph)?;

		self.editor.transact(|editor| {
			if at_start {
				debug!(%item, "enter at item start opens an item before it");
				let fresh = Node::element(ElementKind::ListItem { checked }, vec![Node::empty_paragraph()]);
				editor.insert_node(fresh, &item)?;
				editor.select_point(Point::new(item.child(0).child(0), 0))?;
				return Ok(true);
			}

			if editor.split_node(&paragraph, &caret)?.is_none() {
				debug!(%paragraph, "enter split refused");
				return Ok(false);
			}
			let fresh = item.next()?;
			debug!(%item, to = %fresh, "enter splits list item");
			editor.insert_node(Element::empty(ElementKind::ListItem { checked }).into(), &fresh)?;
			editor.move_node(&item.child(1), &fresh.child(0))?;
			let start = editor.document().start(&fresh)?;
			editor.select_point(start)?;
			Ok(true)
		})
	}
}
