//! Backspace.
//!
//! Structural cases are decided here; anything not claimed falls back to the
//! host's character deletion (see [`Editor::delete_backward`]).

use strata_primitives::{Path, Point, Range};
use tracing::debug;

use super::list;
use crate::editor::Editor;
use crate::error::Result;
use crate::node::{ElementKind, Marks, Node};
use crate::operation::Property;

#[cfg(test)]
mod tests;

/// Marks cleared from a stray one-character leaf.
const STYLE_MARKS: Marks = Marks::BOLD
	.union(Marks::ITALIC)
	.union(Marks::STRIKETHROUGH)
	.union(Marks::UNDERLINE)
	.union(Marks::CODE);

/// Backspace over the editor's current selection.
#[derive(Debug)]
pub struct BackspaceKey<'a> {
	editor: &'a mut Editor,
}

impl<'a> BackspaceKey<'a> {
	pub fn new(editor: &'a mut Editor) -> Self {
		Self { editor }
	}

	/// Handles the keystroke. Returns true when the host must not run its
	/// own deletion.
	pub fn run(&mut self) -> Result<bool> {
		let Some(range) = self.editor.selection().cloned() else {
			return Ok(false);
		};
		if self.whole_document(&range)? {
			return Ok(true);
		}
		if !range.is_collapsed() {
			return Ok(false);
		}
		let caret = range.focus;
		let Ok(block) = caret.path.parent() else {
			return Ok(false);
		};
		if block.is_root() {
			return Ok(false);
		}
		let Some(kind) = self.editor.document().kind(&block).cloned() else {
			return Ok(false);
		};
		let in_list_item = self.editor.document().parent_kind(&block).is_some_and(ElementKind::is_list_item);

		self.editor.transact(|editor| {
			if !kind.is_paragraph() && !in_list_item {
				clear_style(editor, &caret)?;
			}
			match kind {
				ElementKind::Heading { .. } if editor.document().string(&block)?.is_empty() => {
					debug!(%block, "backspace in empty heading");
					editor.set_properties(&block, vec![Property::Kind(ElementKind::Paragraph)])?;
					return Ok(true);
				}
				ElementKind::Media { .. } | ElementKind::Attachment { .. } => {
					debug!(%block, "backspace removes media");
					editor.insert_node(Node::empty_paragraph(), &block)?;
					editor.remove_node(&block.next()?)?;
					editor.select_point(Point::new(block.child(0), 0))?;
					return Ok(true);
				}
				ElementKind::Paragraph if in_list_item => return list_item(editor, &block, &caret),
				ElementKind::TableCell if caret.offset == 0 && !caret.path.has_previous() => {
					debug!(cell = %block, "backspace at table cell start swallowed");
					return Ok(true);
				}
				_ => {}
			}
			if caret.offset != 0 {
				return Ok(false);
			}
			if let Some((previous, node)) = editor.document().previous_sibling(&caret.path)
				&& node.is(|kind| matches!(kind, ElementKind::Break))
			{
				debug!(%previous, "backspace removes line break");
				editor.remove_node(&previous)?;
				return Ok(true);
			}
			if kind.is_paragraph() {
				return paragraph_start(editor, &block, &caret);
			}
			Ok(false)
		})
	}

	/// Whole-document selection: replace everything with one empty paragraph.
	fn whole_document(&mut self, range: &Range) -> Result<bool> {
		let document = self.editor.document();
		let (start, end) = range.edges();
		if range.is_collapsed() || *start != document.start(&Path::root())? || *end != document.end(&Path::root())? {
			return Ok(false);
		}
		debug!("backspace over whole document");
		self.editor.delete_all()?;
		Ok(true)
	}
}

/// Drops style marks from a one-character leaf about to be deleted.
fn clear_style(editor: &mut Editor, caret: &Point) -> Result<()> {
	let leaf = editor.document().text(&caret.path)?;
	if leaf.char_len() == 1 && leaf.marks.intersects(STYLE_MARKS) {
		let marks = leaf.marks - STYLE_MARKS;
		debug!(path = %caret.path, "clearing marks on stray leaf");
		editor.set_properties(&caret.path, vec![Property::Marks(marks)])?;
	}
	Ok(())
}

/// Backspace in a paragraph directly inside a list item.
fn list_item(editor: &mut Editor, paragraph: &Path, caret: &Point) -> Result<bool> {
	let item = paragraph.parent()?;
	let list = item.parent()?;
	let item_node = editor.document().element(&item)?;
	let empty = item_node.children.len() == 1
		&& item_node.children[0].is(ElementKind::is_paragraph)
		&& item_node.children[0].string().trim().is_empty();

	if empty {
		let index = item.last().unwrap_or(0);
		let count = editor.document().children_at(&list)?.len();
		debug!(%item, index, count, "backspace removes empty list item");
		for following in (index + 1..count).rev() {
			editor.remove_node(&list.child(following))?;
		}
		editor.remove_node(&item)?;

		let at = if editor.document().children_at(&list)?.is_empty() {
			editor.remove_node(&list)?;
			list
		} else {
			list.next()?
		};
		editor.insert_node(Node::empty_paragraph(), &at)?;
		editor.select_point(Point::new(at.child(0), 0))?;
		return Ok(true);
	}

	if caret.offset != 0 || caret.path != editor.document().first_leaf(paragraph)? {
		return Ok(false);
	}
	match list::outdent(editor, &item)? {
		Some(to) => {
			debug!(%item, %to, "backspace outdents list item");
			Ok(true)
		}
		None => Ok(false),
	}
}

/// Backspace at the start of a paragraph, relative to what precedes it.
fn paragraph_start(editor: &mut Editor, paragraph: &Path, caret: &Point) -> Result<bool> {
	let document = editor.document();
	let text = document.string(paragraph)?;

	if let Some((previous, node)) = document.previous_sibling(paragraph) {
		match node.kind() {
			Some(ElementKind::Table | ElementKind::CodeBlock { .. }) => {
				let is_code = matches!(node.kind(), Some(ElementKind::CodeBlock { .. }));
				let end = document.end(&previous)?;
				let last_line = document.text(&end.path)?.text.rsplit('\n').next().unwrap_or_default();
				if !last_line.is_empty() {
					debug!(%previous, "backspace moves into preceding block");
					editor.select_point(end)?;
					return Ok(true);
				}
				let inline: Vec<Node> = document.element(paragraph)?.children.clone();
				debug!(%previous, "backspace merges paragraph into preceding block");
				editor.remove_node(paragraph)?;
				if !text.is_empty() {
					if is_code {
						editor.insert_text_at(&end, &text)?;
					} else {
						editor.insert_nodes(inline, &end.path.next()?, false)?;
					}
				}
				editor.select_point(end)?;
				return Ok(true);
			}
			Some(kind) if kind.is_media() => {
				debug!(%previous, "backspace selects preceding media");
				if text.is_empty() {
					editor.remove_node(paragraph)?;
				}
				let start = editor.document().start(&previous)?;
				editor.select_point(start)?;
				return Ok(true);
			}
			_ => return Ok(false),
		}
	}

	// Only the very first position of the document unwraps or deletes.
	if caret.path.has_previous() || document.previous_leaf(&caret.path).is_some() {
		return Ok(false);
	}
	let parent = paragraph.parent()?;
	if parent.is_root() {
		let deletable = document
			.next_sibling(paragraph)
			.is_some_and(|(_, next)| !next.is(|kind| matches!(kind, ElementKind::Hr)));
		if deletable {
			debug!(%paragraph, "backspace removes leading paragraph");
			editor.remove_node(paragraph)?;
			return Ok(true);
		}
		return Ok(false);
	}
	if !document.kind(&parent).is_some_and(|kind| matches!(kind, ElementKind::Blockquote)) {
		return Ok(false);
	}

	let inline = document.element(paragraph)?.children.clone();
	let has_next = document.has_next(paragraph);
	debug!(%paragraph, quote = %parent, "backspace unwraps paragraph from blockquote");
	if has_next {
		editor.remove_node(paragraph)?;
	} else {
		editor.remove_node(&parent)?;
	}
	editor.insert_node(Node::element(ElementKind::Paragraph, inline), &parent)?;
	let start = editor.document().start(&parent)?;
	editor.select_point(start)?;
	Ok(true)
}
