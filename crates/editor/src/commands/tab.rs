use strata_primitives::{KeyEvent, Path, Point, Range};
use tracing::debug;

use super::list;
use crate::editor::Editor;
use crate::error::Result;
use crate::node::ElementKind;


/// Tab and Shift-Tab.
///
/// Moves between table cells, indents and outdents list items, and
/// otherwise inserts or removes a literal indent.
#[derive(Debug)]
pub struct TabKey<'a> {
	editor: &'a mut Editor,
}

impl<'a> TabKey<'a> {
	pub fn new(editor: &'a mut Editor) -> Self {
		Self { editor }
	}

	/// Handles the keystroke. Does nothing, and leaves `event` alone, when
	/// there is no selection.
	pub fn run(&mut self, event: &mut KeyEvent) -> Result<()> {
		let Some(range) = self.editor.selection().cloned() else {
			return Ok(());
		};
		event.prevent_default();
		let shift = event.shift_key();
		self.editor.transact(|editor| {
			if range.is_collapsed() {
				collapsed(editor, &range.focus, shift)
			} else {
				expanded(editor, &range, shift)
			}
		})
	}
}

fn collapsed(editor: &mut Editor, caret: &Point, shift: bool) -> Result<()> {
	let document = editor.document();
	if let Some(cell) = document.above(&caret.path, |kind| matches!(kind, ElementKind::TableCell))
		&& let Some(target) = neighbour_cell(editor, &cell, shift)
	{
		let end = editor.document().end(&target)?;
		debug!(from = %cell, to = %target, shift, "tab moves between cells");
		return editor.select_point(end);
	}

	if let Ok(block) = caret.path.parent()
		&& document.kind(&block).is_some_and(ElementKind::is_paragraph)
		&& document.parent_kind(&block).is_some_and(ElementKind::is_list_item)
	{
		let item = block.parent()?;
		let moved = if shift {
			list::outdent(editor, &item)?
		} else {
			list::indent(editor, &item)?
		};
		debug!(%item, shift, moved = ?moved, "tab in list item");
		return Ok(());
	}

	let indent = editor.config().tab.indent.clone();
	if !shift {
		debug!("tab inserts indent");
		return editor.insert_text(&indent);
	}
	let leaf = editor.document().text(&caret.path)?;
	if leaf.text.starts_with(indent.as_str()) {
		debug!(path = %caret.path, "shift-tab removes leading indent");
		editor.remove_text(&caret.path, 0, indent.chars().count())?;
	}
	Ok(())
}

/// The cell Tab (or Shift-Tab) moves to, wrapping across rows.
fn neighbour_cell(editor: &Editor, cell: &Path, shift: bool) -> Option<Path> {
	let document = editor.document();
	let row = cell.parent().ok()?;
	if shift {
		if let Ok(previous) = cell.previous() {
			return Some(previous);
		}
		let previous_row = row.previous().ok()?;
		let cells = document.children_at(&previous_row).ok()?.len();
		return cells.checked_sub(1).map(|last| previous_row.child(last));
	}
	if document.has_next(cell) {
		return cell.next().ok();
	}
	let next_row = row.next().ok()?;
	document.has_path(&next_row.child(0)).then(|| next_row.child(0))
}
