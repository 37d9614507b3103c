//! Indent and outdent for list items, shared by Tab and Backspace.

use strata_primitives::Path;
use tracing::debug;

use crate::editor::Editor;
use crate::error::Result;
use crate::node::{Element, ElementKind, ListKind};

/// Kind and task flag of the list at `list`.
fn list_shape(editor: &Editor, list: &Path) -> Option<(ListKind, bool)> {
	match editor.document().kind(list)? {
		ElementKind::List { kind, task } => Some((*kind, *task)),
		ElementKind::LegacyList { order } => Some((ListKind::from_order(*order), false)),
		_ => None,
	}
}

/// Moves the item at `item` to the end of its previous sibling's sublist,
/// creating that sublist when the previous item has none.
///
/// Returns the item's new path, or `None` when there is no previous item.
pub(crate) fn indent(editor: &mut Editor, item: &Path) -> Result<Option<Path>> {
	let Ok(previous) = item.previous() else {
		return Ok(None);
	};
	let list = item.parent()?;
	let Some((kind, task)) = list_shape(editor, &list) else {
		return Ok(None);
	};
	let Ok(previous_item) = editor.document().element(&previous) else {
		return Ok(None);
	};
	if !previous_item.kind.is_list_item() {
		return Ok(None);
	}
	let len = previous_item.children.len();
	let sublist = previous_item
		.children
		.last()
		.filter(|child| child.is(ElementKind::is_list))
		.map(|child| child.children().len());

	editor.transact(|editor| match sublist {
		Some(count) => {
			let target = previous.child(len - 1).child(count);
			debug!(%item, to = %target, "indent into existing sublist");
			editor.move_node(item, &target)?;
			Ok(Some(target))
		}
		None => {
			debug!(%item, ?kind, "indent into new sublist");
			editor.wrap_node(ElementKind::List { kind, task }, item)?;
			let target = previous.child(len);
			editor.move_node(item, &target)?;
			Ok(Some(target.child(0)))
		}
	})
}

/// Moves the item at `item` out of its nested list so it follows the list
/// item that owned that list. Items after it in the nested list move along
/// as its own sublist, and a list left empty is removed.
///
/// Returns the item's new path, or `None` when the list is not nested.
pub(crate) fn outdent(editor: &mut Editor, item: &Path) -> Result<Option<Path>> {
	let list = item.parent()?;
	if list.is_root() {
		return Ok(None);
	}
	let owner = list.parent()?;
	if !editor.document().kind(&owner).is_some_and(ElementKind::is_list_item) {
		return Ok(None);
	}
	let Some((kind, task)) = list_shape(editor, &list) else {
		return Ok(None);
	};
	let index = item.last().unwrap_or(0);
	let siblings = editor.document().children_at(&list)?.len();
	let following = siblings - index - 1;
	let item_node = editor.document().element(item)?;
	let item_len = item_node.children.len();
	let sublist = item_node
		.children
		.last()
		.filter(|child| child.is(ElementKind::is_list))
		.map(|child| child.children().len());

	editor.transact(|editor| {
		if following > 0 {
			let (target, start) = match sublist {
				Some(count) => (item.child(item_len - 1), count),
				None => {
					let target = item.child(item_len);
					editor.insert_node(Element::empty(ElementKind::List { kind, task }).into(), &target)?;
					(target, 0)
				}
			};
			debug!(%item, following, "carrying following items into the outdented item");
			for offset in 0..following {
				editor.move_node(&list.child(index + 1), &target.child(start + offset))?;
			}
		}

		let destination = owner.next()?;
		debug!(%item, to = %destination, "outdent");
		editor.move_node(item, &destination)?;
		if editor.document().children_at(&list)?.is_empty() {
			editor.remove_node(&list)?;
		}
		Ok(Some(destination))
	})
}
