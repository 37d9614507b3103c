//! Low-level tree operations.
//!
//! Every Tree Access call lowers to a sequence of [`Operation`]s. An
//! operation is the unit plugins intercept, the unit the normalizer tracks
//! dirtiness by, and the unit history observers receive.
//!
//! # Path Mapping
//!
//! Applying an operation shifts sibling indices. [`Operation::transform_path`]
//! and [`Operation::transform_point`] map an address from the tree before the
//! operation to the tree after it, the same way a changeset maps character
//! positions through an edit.

use strata_primitives::{Path, Point};

use crate::document::Document;
use crate::error::{EditorError, Result};
use crate::node::{Element, ElementKind, Marks, Node, Text};


/// A single property assignment for [`Operation::SetNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
	/// Retype an element in place; children are kept.
	Kind(ElementKind),
	/// Checkbox state of a list item.
	Checked(Option<bool>),
	/// Replace a leaf's text.
	Text(String),
	/// Replace a leaf's marks.
	Marks(Marks),
	/// Replace a leaf's tag trigger.
	Trigger(Option<String>),
}

impl Property {
	/// Name used in logs and errors.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Kind(_) => "kind",
			Self::Checked(_) => "checked",
			Self::Text(_) => "text",
			Self::Marks(_) => "marks",
			Self::Trigger(_) => "trigger",
		}
	}
}

/// Keys accepted by [`crate::Editor::unset_properties`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
	Checked,
	/// The boolean `order` flag of a legacy list.
	LegacyOrder,
	/// A code block's language.
	Language,
	Marks,
	Trigger,
}

/// An atomic change to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
	/// Insert `node` so that it ends up at `path`.
	InsertNode { path: Path, node: Node },
	/// Remove the node at `path`; `node` is the removed subtree.
	RemoveNode { path: Path, node: Node },
	/// Remove the node at `path`, then insert it at `new_path`, which is
	/// interpreted in the tree after the removal.
	MoveNode { path: Path, new_path: Path },
	/// Split the node at `path` before child (or character) `position`; the
	/// right half becomes the following sibling.
	SplitNode { path: Path, position: usize },
	/// Insert `text` into the leaf at `path` at character `offset`.
	InsertText { path: Path, offset: usize, text: String },
	/// Remove `text` from the leaf at `path` starting at character `offset`.
	RemoveText { path: Path, offset: usize, text: String },
	/// Assign properties to the node at `path`.
	SetNode { path: Path, properties: Vec<Property> },
}

impl Operation {
	/// Short operation name for logs.
	pub fn name(&self) -> &'static str {
		match self {
			Self::InsertNode { .. } => "insert_node",
			Self::RemoveNode { .. } => "remove_node",
			Self::MoveNode { .. } => "move_node",
			Self::SplitNode { .. } => "split_node",
			Self::InsertText { .. } => "insert_text",
			Self::RemoveText { .. } => "remove_text",
			Self::SetNode { .. } => "set_node",
		}
	}

	/// The path the operation acts on (the source path for moves).
	pub fn path(&self) -> &Path {
		match self {
			Self::InsertNode { path, .. }
			| Self::RemoveNode { path, .. }
			| Self::MoveNode { path, .. }
			| Self::SplitNode { path, .. }
			| Self::InsertText { path, .. }
			| Self::RemoveText { path, .. }
			| Self::SetNode { path, .. } => path,
		}
	}

	/// Maps a path from before this operation to after it.
	///
	/// Returns `None` when the addressed node was removed.
	pub fn transform_path(&self, path: &Path) -> Option<Path> {
		match self {
			Self::InsertNode { path: at, .. } => Some(shift_for_insert(at, path)),
			Self::RemoveNode { path: at, .. } => shift_for_remove(at, path),
			Self::SplitNode { path: at, position } => {
				let mut out = path.clone();
				if at.ends_before(path) {
					bump(&mut out, at.len() - 1, 1);
				} else if at.is_ancestor(path) {
					let depth = at.len();
					let index = path.get(depth).unwrap_or(0);
					if index >= *position {
						bump(&mut out, depth - 1, 1);
						out.set_index(depth, index - position);
					}
				}
				Some(out)
			}
			Self::MoveNode { path: from, new_path } => {
				if path.starts_with(from) {
					return Some(new_path.join(path.suffix(from.len())));
				}
				let removed = shift_for_remove(from, path)?;
				Some(shift_for_insert(new_path, &removed))
			}
			Self::InsertText { .. } | Self::RemoveText { .. } | Self::SetNode { .. } => Some(path.clone()),
		}
	}

	/// Maps a caret from before this operation to after it.
	///
	/// Carets at an insertion or split point move forward with the new content.
	pub fn transform_point(&self, point: &Point) -> Option<Point> {
		match self {
			Self::InsertText { path, offset, text } if *path == point.path && *offset <= point.offset => {
				Some(Point::new(point.path.clone(), point.offset + text.chars().count()))
			}
			Self::RemoveText { path, offset, text } if *path == point.path && *offset <= point.offset => {
				let removed = text.chars().count().min(point.offset - offset);
				Some(Point::new(point.path.clone(), point.offset - removed))
			}
			Self::SplitNode { path, position } if *path == point.path && *position <= point.offset => {
				let next = path.next().ok()?;
				Some(Point::new(next, point.offset - position))
			}
			_ => Some(Point::new(self.transform_path(&point.path)?, point.offset)),
		}
	}

	/// Paths whose subtrees need normalizing after this operation, expressed
	/// in the tree after it.
	pub fn dirty_paths(&self) -> Vec<Path> {
		let mut out = Vec::new();
		match self {
			Self::InsertText { path, .. } | Self::RemoveText { path, .. } | Self::SetNode { path, .. } => {
				out.extend(path.ancestors());
				out.push(path.clone());
			}
			Self::InsertNode { path, node } => {
				out.extend(path.ancestors());
				out.push(path.clone());
				push_descendants(node, path, &mut out);
			}
			Self::RemoveNode { path, .. } => {
				out.extend(path.ancestors());
			}
			Self::SplitNode { path, .. } => {
				out.extend(path.ancestors());
				out.push(path.clone());
				if let Ok(next) = path.next() {
					out.push(next);
				}
			}
			Self::MoveNode { path, new_path } => {
				for ancestor in path.ancestors() {
					if let Some(mapped) = self.transform_path(&ancestor) {
						out.push(mapped);
					}
				}
				out.extend(new_path.ancestors());
				out.push(new_path.clone());
			}
		}
		out
	}

	/// Applies the operation to `document`.
	///
	/// On error the document is unchanged.
	pub(crate) fn apply_to(&self, document: &mut Document) -> Result<()> {
		match self {
			Self::InsertNode { path, node } => insert_node(document, path, node.clone()),
			Self::RemoveNode { path, .. } => remove_node(document, path).map(drop),
			Self::MoveNode { path, new_path } => {
				if path.is_ancestor(new_path) {
					return Err(EditorError::InvalidDepth { path: new_path.clone() });
				}
				let node = remove_node(document, path)?;
				if let Err(err) = insert_node(document, new_path, node.clone()) {
					insert_node(document, path, node)?;
					return Err(err);
				}
				Ok(())
			}
			Self::SplitNode { path, position } => split_node(document, path, *position),
			Self::InsertText { path, offset, text } => {
				let leaf = text_mut(document, path)?;
				let byte = byte_offset(leaf, path, *offset)?;
				leaf.text.insert_str(byte, text);
				Ok(())
			}
			Self::RemoveText { path, offset, text } => {
				let leaf = text_mut(document, path)?;
				let start = byte_offset(leaf, path, *offset)?;
				let end = byte_offset(leaf, path, offset + text.chars().count())?;
				leaf.text.replace_range(start..end, "");
				Ok(())
			}
			Self::SetNode { path, properties } => set_node(document, path, properties),
		}
	}
}

fn bump(path: &mut Path, depth: usize, by: usize) {
	if let Some(index) = path.get(depth) {
		path.set_index(depth, index + by);
	}
}

fn shift_for_insert(at: &Path, path: &Path) -> Path {
	let mut out = path.clone();
	if !at.is_root() && (path.starts_with(at) || at.ends_before(path)) {
		bump(&mut out, at.len() - 1, 1);
	}
	out
}

fn shift_for_remove(at: &Path, path: &Path) -> Option<Path> {
	if path.starts_with(at) {
		return None;
	}
	let mut out = path.clone();
	if at.ends_before(path) {
		let depth = at.len() - 1;
		let index = path.get(depth).unwrap_or(0);
		out.set_index(depth, index.saturating_sub(1));
	}
	Some(out)
}

fn push_descendants(node: &Node, path: &Path, out: &mut Vec<Path>) {
	for (index, child) in node.children().iter().enumerate() {
		let child_path = path.child(index);
		out.push(child_path.clone());
		push_descendants(child, &child_path, out);
	}
}

fn insert_node(document: &mut Document, path: &Path, node: Node) -> Result<()> {
	let (parent, index) = split_path(path)?;
	let siblings = document
		.children_at_mut(&parent)
		.map_err(|_| EditorError::PathNotFound { path: path.clone() })?;
	if index > siblings.len() {
		return Err(EditorError::PathNotFound { path: path.clone() });
	}
	siblings.insert(index, node);
	Ok(())
}

fn remove_node(document: &mut Document, path: &Path) -> Result<Node> {
	let (parent, index) = split_path(path)?;
	let siblings = document
		.children_at_mut(&parent)
		.map_err(|_| EditorError::PathNotFound { path: path.clone() })?;
	if index >= siblings.len() {
		return Err(EditorError::PathNotFound { path: path.clone() });
	}
	Ok(siblings.remove(index))
}

fn split_node(document: &mut Document, path: &Path, position: usize) -> Result<()> {
	let (parent, index) = split_path(path)?;
	let right = match document.node_mut(path)? {
		Node::Text(leaf) => {
			let byte = byte_offset(leaf, path, position)?;
			let tail = leaf.text.split_off(byte);
			Node::Text(Text {
				text: tail,
				marks: leaf.marks,
				trigger: leaf.trigger.clone(),
			})
		}
		Node::Element(element) => {
			if position > element.children.len() {
				return Err(EditorError::OffsetOutOfRange {
					path: path.clone(),
					offset: position,
					len: element.children.len(),
				});
			}
			let tail = element.children.split_off(position);
			Node::Element(Element::new(element.kind.clone(), tail))
		}
	};
	document.children_at_mut(&parent)?.insert(index + 1, right);
	Ok(())
}

fn set_node(document: &mut Document, path: &Path, properties: &[Property]) -> Result<()> {
	let node = document.node(path)?;
	for property in properties {
		let fits = match (property, node) {
			(Property::Kind(_), Node::Element(_)) => true,
			(Property::Checked(_), Node::Element(element)) => element.kind.is_list_item(),
			(Property::Text(_) | Property::Marks(_) | Property::Trigger(_), Node::Text(_)) => true,
			_ => false,
		};
		if !fits {
			return Err(EditorError::PropertyMismatch {
				path: path.clone(),
				property: property.name(),
			});
		}
	}

	let node = document.node_mut(path)?;
	for property in properties {
		match (property, &mut *node) {
			(Property::Kind(kind), Node::Element(element)) => element.kind = kind.clone(),
			(Property::Checked(checked), Node::Element(element)) => {
				if let ElementKind::ListItem { checked: slot } = &mut element.kind {
					*slot = *checked;
				}
			}
			(Property::Text(text), Node::Text(leaf)) => leaf.text = text.clone(),
			(Property::Marks(marks), Node::Text(leaf)) => leaf.marks = *marks,
			(Property::Trigger(trigger), Node::Text(leaf)) => leaf.trigger = trigger.clone(),
			_ => {}
		}
	}
	Ok(())
}

fn split_path(path: &Path) -> Result<(Path, usize)> {
	let index = path.last().ok_or_else(|| EditorError::InvalidDepth { path: path.clone() })?;
	Ok((path.parent()?, index))
}

fn text_mut<'a>(document: &'a mut Document, path: &Path) -> Result<&'a mut Text> {
	document
		.node_mut(path)?
		.as_text_mut()
		.ok_or_else(|| EditorError::NotAText { path: path.clone() })
}

fn byte_offset(leaf: &Text, path: &Path, offset: usize) -> Result<usize> {
	let len = leaf.char_len();
	if offset > len {
		return Err(EditorError::OffsetOutOfRange {
			path: path.clone(),
			offset,
			len,
		});
	}
	Ok(leaf.text.char_indices().nth(offset).map_or(leaf.text.len(), |(byte, _)| byte))
}
