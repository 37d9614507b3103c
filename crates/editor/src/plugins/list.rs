//! List shape rules.
//!
//! Lists hold only list items. A list item opens with one block (normally a
//! paragraph) and may follow it with nested lists, nothing else. Legacy
//! lists carrying a boolean order flag are migrated to the current kind.

use strata_primitives::Path;
use tracing::debug;

use super::{Intercept, Plugin};
use crate::editor::Editor;
use crate::error::Result;
use crate::node::{Element, ElementKind, ListKind, Node};
use crate::operation::{Operation, Property};

#[cfg(test)]
mod tests;

/// Enforces list and list-item shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListPlugin;

impl Plugin for ListPlugin {
	fn name(&self) -> &'static str {
		"list"
	}

	/// Blocks inserted straight into a list arrive wrapped in a list item.
	fn intercept(&self, editor: &mut Editor, op: &Operation) -> Result<Intercept> {
		let Operation::InsertNode { path, node } = op else {
			return Ok(Intercept::PassThrough);
		};
		let Node::Element(element) = node else {
			return Ok(Intercept::PassThrough);
		};
		if element.children.is_empty() || element.kind.is_list() || element.kind.is_list_item() {
			return Ok(Intercept::PassThrough);
		}
		if !editor.document().parent_kind(path).is_some_and(ElementKind::is_list) {
			return Ok(Intercept::PassThrough);
		}
		Ok(Intercept::Rewritten(Operation::InsertNode {
			path: path.clone(),
			node: Node::list_item(vec![node.clone()]),
		}))
	}

	fn normalize_node(&self, editor: &mut Editor, path: &Path) -> Result<bool> {
		let Some(kind) = editor.document().kind(path).cloned() else {
			return Ok(false);
		};
		match kind {
			ElementKind::LegacyList { order } => {
				let kind = ListKind::from_order(order);
				debug!(%path, ?kind, "migrating legacy list");
				editor.apply_unintercepted(Operation::SetNode {
					path: path.clone(),
					properties: vec![Property::Kind(ElementKind::List { kind, task: false })],
				})?;
				Ok(true)
			}
			ElementKind::List { .. } => normalize_list(editor, path),
			ElementKind::ListItem { .. } => normalize_item(editor, path),
			_ => Ok(false),
		}
	}
}

/// Kind for a list synthesized under `item`: the enclosing list's kind when
/// there is one, otherwise the configured default.
fn enclosing_kind(editor: &Editor, item: &Path) -> ListKind {
	match editor.document().parent_kind(item) {
		Some(ElementKind::List { kind, .. }) => *kind,
		Some(ElementKind::LegacyList { order }) => ListKind::from_order(*order),
		_ => editor.config().lists.default_kind,
	}
}

fn normalize_list(editor: &mut Editor, path: &Path) -> Result<bool> {
	let children = editor.document().children_at(path)?;
	let Some(index) = children.iter().position(|child| !child.is(ElementKind::is_list_item)) else {
		return Ok(false);
	};
	let child = path.child(index);
	if children[index].is_text() {
		debug!(path = %child, "wrapping bare text in a list item");
		editor.wrap_unintercepted(ElementKind::ListItem { checked: None }, &child)?;
	} else {
		debug!(path = %child, "retyping list child to list item");
		editor.apply_unintercepted(Operation::SetNode {
			path: child,
			properties: vec![Property::Kind(ElementKind::ListItem { checked: None })],
		})?;
	}
	Ok(true)
}

fn is_inline_content(node: &Node) -> bool {
	node.is_text() || node.is(ElementKind::is_inline)
}

fn normalize_item(editor: &mut Editor, path: &Path) -> Result<bool> {
	let children = editor.document().children_at(path)?;

	let Some(first) = children.first() else {
		debug!(%path, "filling empty list item");
		editor.apply_unintercepted(Operation::InsertNode {
			path: path.child(0),
			node: Node::empty_paragraph(),
		})?;
		return Ok(true);
	};
	if is_inline_content(first) {
		let run = children.iter().take_while(|child| is_inline_content(child)).count();
		debug!(%path, run, "wrapping leading inline content in a paragraph");
		wrap_run(editor, path, 0, run, ElementKind::Paragraph)?;
		return Ok(true);
	}
	if first.is(|kind| matches!(kind, ElementKind::Table)) {
		debug!(%path, "list item opens with a table, inserting paragraph");
		editor.apply_unintercepted(Operation::InsertNode {
			path: path.child(0),
			node: Node::empty_paragraph(),
		})?;
		return Ok(true);
	}

	for (index, child) in children.iter().enumerate().skip(1) {
		let at = path.child(index);
		if child.is(ElementKind::is_list) {
			continue;
		}
		if is_inline_content(child) {
			let previous = &children[index - 1];
			if previous.is(ElementKind::holds_inline_content) {
				let end = previous.children().len();
				debug!(path = %at, "joining stray inline content to the preceding block");
				editor.apply_unintercepted(Operation::MoveNode {
					path: at,
					new_path: path.child(index - 1).child(end),
				})?;
			} else {
				let run = children[index..].iter().take_while(|child| is_inline_content(child)).count();
				debug!(path = %at, run, "wrapping stray inline content in a paragraph");
				wrap_run(editor, path, index, run, ElementKind::Paragraph)?;
			}
			return Ok(true);
		}
		let Some(kind) = child.kind() else {
			continue;
		};
		if matches!(kind, ElementKind::Table) {
			let Some(outermost) = path.ancestors().find(|ancestor| {
				editor.document().kind(ancestor).is_some_and(ElementKind::is_list)
			}) else {
				continue;
			};
			debug!(path = %at, to = %outermost, "hoisting table out of list");
			editor.apply_unintercepted(Operation::MoveNode {
				path: at,
				new_path: outermost.next()?,
			})?;
			return Ok(true);
		}
		if kind.is_list_item() {
			let list = enclosing_kind(editor, path);
			debug!(path = %at, "nesting stray list item in a list");
			editor.wrap_unintercepted(ElementKind::List { kind: list, task: false }, &at)?;
			return Ok(true);
		}
		if kind.is_block() {
			let list = enclosing_kind(editor, path);
			debug!(path = %at, kind = kind.name(), "nesting trailing block in a sublist");
			editor.wrap_unintercepted(ElementKind::ListItem { checked: None }, &at)?;
			editor.wrap_unintercepted(ElementKind::List { kind: list, task: false }, &at)?;
			return Ok(true);
		}
	}
	Ok(false)
}

/// Moves `count` children of `parent` starting at `start` into a new element.
fn wrap_run(editor: &mut Editor, parent: &Path, start: usize, count: usize, kind: ElementKind) -> Result<()> {
	let wrapper = parent.child(start);
	editor.apply_unintercepted(Operation::InsertNode {
		path: wrapper.clone(),
		node: Element::empty(kind).into(),
	})?;
	for offset in 0..count {
		editor.apply_unintercepted(Operation::MoveNode {
			path: parent.child(start + 1),
			new_path: wrapper.child(offset),
		})?;
	}
	Ok(())
}
