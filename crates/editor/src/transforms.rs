//! Tree Access transforms.
//!
//! Each transform lowers to one or more [`Operation`]s sent through
//! [`Editor::apply`], so plugins see every step. Multi-step transforms run in
//! a transaction: they either complete or leave the tree as it was.
//!
//! Paths handed back are valid until the next structural call.

use strata_primitives::{Path, Point, Range};
use tracing::{debug, trace};

use crate::editor::Editor;
use crate::error::{EditorError, Result};
use crate::node::{Element, ElementKind, Marks, Node};
use crate::operation::{Operation, Property, PropertyKey};


impl Editor {
	/// Inserts `nodes` as consecutive siblings starting at `at`.
	///
	/// With `select`, the caret moves to the end of the last inserted node.
	/// Returns the path of the first inserted node.
	pub fn insert_nodes(&mut self, nodes: Vec<Node>, at: &Path, select: bool) -> Result<Path> {
		let parent = at.parent()?;
		let index = at.last().unwrap_or(0);
		let len = self.document().children_at(&parent)?.len();
		if index > len {
			return Err(EditorError::PathNotFound { path: at.clone() });
		}

		self.transact(|editor| {
			let mut path = at.clone();
			let mut last = None;
			for node in nodes {
				editor.apply(Operation::InsertNode {
					path: path.clone(),
					node,
				})?;
				last = Some(path.clone());
				path = path.next()?;
			}
			if select
				&& let Some(last) = last
				&& let Ok(end) = editor.document().end(&last)
			{
				editor.select_point(end)?;
			}
			Ok(at.clone())
		})
	}

	/// Inserts a single node at `at` without touching the selection.
	pub fn insert_node(&mut self, node: Node, at: &Path) -> Result<Path> {
		self.insert_nodes(vec![node], at, false)
	}

	/// Removes the node at `at`.
	pub fn remove_node(&mut self, at: &Path) -> Result<()> {
		let node = self.node_cloned(at)?;
		self.apply(Operation::RemoveNode { path: at.clone(), node })
	}

	pub fn set_properties(&mut self, at: &Path, properties: Vec<Property>) -> Result<()> {
		self.document().node(at)?;
		self.apply(Operation::SetNode {
			path: at.clone(),
			properties,
		})
	}

	/// Clears optional properties on the node at `at`.
	pub fn unset_properties(&mut self, at: &Path, keys: &[PropertyKey]) -> Result<()> {
		let node = self.document().node(at)?;
		let mismatch = |property| EditorError::PropertyMismatch {
			path: at.clone(),
			property,
		};
		let mut properties = Vec::with_capacity(keys.len());
		for key in keys {
			let property = match (key, node.kind()) {
				(PropertyKey::Checked, _) => Property::Checked(None),
				(PropertyKey::Marks, _) => Property::Marks(Marks::empty()),
				(PropertyKey::Trigger, _) => Property::Trigger(None),
				(PropertyKey::LegacyOrder, Some(ElementKind::LegacyList { .. })) => {
					Property::Kind(ElementKind::LegacyList { order: None })
				}
				(PropertyKey::LegacyOrder, _) => return Err(mismatch("order")),
				(PropertyKey::Language, Some(ElementKind::CodeBlock { render_as_html, .. })) => {
					Property::Kind(ElementKind::CodeBlock {
						language: None,
						render_as_html: *render_as_html,
					})
				}
				(PropertyKey::Language, _) => return Err(mismatch("language")),
			};
			properties.push(property);
		}
		self.apply(Operation::SetNode {
			path: at.clone(),
			properties,
		})
	}

	/// Moves the node at `from` so it ends up at `to`, where `to` is read in
	/// the tree after `from` has been removed.
	pub fn move_node(&mut self, from: &Path, to: &Path) -> Result<()> {
		self.document().node(from)?;
		if from == to {
			return Ok(());
		}
		self.apply(Operation::MoveNode {
			path: from.clone(),
			new_path: to.clone(),
		})
	}

	/// Wraps the node at `at` in a new element of `kind`; returns the wrapper path.
	pub fn wrap_node(&mut self, kind: ElementKind, at: &Path) -> Result<Path> {
		self.document().node(at)?;
		trace!(%at, kind = kind.name(), "wrap");
		self.transact(|editor| {
			editor.apply(Operation::InsertNode {
				path: at.clone(),
				node: Element::empty(kind).into(),
			})?;
			editor.apply(Operation::MoveNode {
				path: at.next()?,
				new_path: at.child(0),
			})?;
			Ok(at.clone())
		})
	}

	/// Replaces the element at `at` with its children.
	pub fn unwrap_node(&mut self, at: &Path) -> Result<()> {
		let count = self.document().element(at)?.children.len();
		let index = at.last().unwrap_or(0);
		trace!(%at, count, "unwrap");
		self.transact(|editor| {
			for offset in 0..count {
				let wrapper = at.with_last(index + offset)?;
				editor.apply(Operation::MoveNode {
					path: wrapper.child(0),
					new_path: wrapper,
				})?;
			}
			editor.remove_node(&at.with_last(index + count)?)
		})
	}

	/// Moves the node at `at` out of its parent to become the parent's
	/// sibling, splitting the parent when `at` is a middle child.
	///
	/// An emptied parent is removed. Returns the node's new path.
	pub fn lift_node(&mut self, at: &Path) -> Result<Path> {
		let parent = at.parent()?;
		if parent.is_root() {
			return Err(EditorError::InvalidDepth { path: at.clone() });
		}
		let count = self.document().children_at(&parent)?.len();
		let index = at.last().unwrap_or(0);
		debug!(%at, index, count, "lift");

		self.transact(|editor| {
			if count == 1 {
				editor.move_node(at, &parent.next()?)?;
				editor.remove_node(&parent)?;
				Ok(parent.clone())
			} else if index == 0 {
				editor.move_node(at, &parent)?;
				Ok(parent.clone())
			} else if index + 1 == count {
				editor.move_node(at, &parent.next()?)?;
				parent.next().map_err(Into::into)
			} else {
				editor.apply(Operation::SplitNode {
					path: parent.clone(),
					position: index + 1,
				})?;
				if editor.document().children_at(&parent)?.len() != index + 1 {
					return Err(EditorError::InvalidDepth { path: at.clone() });
				}
				editor.move_node(at, &parent.next()?)?;
				parent.next().map_err(Into::into)
			}
		})
	}

	/// Splits the tree at `point` up to and including the ancestor `at`.
	///
	/// Returns the path of the right half of `at`, or `None` when a plugin
	/// vetoed one of the splits.
	pub fn split_node(&mut self, at: &Path, point: &Point) -> Result<Option<Path>> {
		if !point.path.starts_with(at) || at.is_root() {
			return Err(EditorError::InvalidDepth { path: at.clone() });
		}
		self.document().text(&point.path)?;

		self.transact(|editor| {
			let mut target = point.path.clone();
			let mut position = point.offset;
			loop {
				let parent = target.parent()?;
				let before = editor.document().children_at(&parent)?.len();
				editor.apply(Operation::SplitNode {
					path: target.clone(),
					position,
				})?;
				if editor.document().children_at(&parent)?.len() == before {
					debug!(path = %target, "split vetoed");
					return Ok(None);
				}
				if target == *at {
					return Ok(Some(target.next()?));
				}
				position = target.last().unwrap_or(0) + 1;
				target = parent;
			}
		})
	}

	/// Inserts `text` at the caret (the start of an expanded selection).
	pub fn insert_text(&mut self, text: &str) -> Result<()> {
		let Some(range) = self.selection() else {
			return Ok(());
		};
		let point = range.start().clone();
		self.insert_text_at(&point, text)
	}

	pub fn insert_text_at(&mut self, point: &Point, text: &str) -> Result<()> {
		if text.is_empty() {
			return Ok(());
		}
		self.apply(Operation::InsertText {
			path: point.path.clone(),
			offset: point.offset,
			text: text.to_owned(),
		})
	}

	/// Removes `len` characters from the leaf at `path` starting at `offset`.
	pub fn remove_text(&mut self, path: &Path, offset: usize, len: usize) -> Result<()> {
		let leaf = self.document().text(path)?;
		let available = leaf.char_len();
		if offset + len > available {
			return Err(EditorError::OffsetOutOfRange {
				path: path.clone(),
				offset: offset + len,
				len: available,
			});
		}
		if len == 0 {
			return Ok(());
		}
		let text: String = leaf.text.chars().skip(offset).take(len).collect();
		self.apply(Operation::RemoveText {
			path: path.clone(),
			offset,
			text,
		})
	}

	/// Deletes one character before a collapsed caret.
	///
	/// Plugins get the first chance to claim the deletion. Returns false when
	/// nothing was deleted.
	pub fn delete_backward(&mut self) -> Result<bool> {
		let Some(range) = self.selection() else {
			return Ok(false);
		};
		if !range.is_collapsed() {
			return Ok(false);
		}
		self.transact(|editor| {
			for plugin in editor.plugin_chain() {
				if plugin.delete_backward(editor)? {
					trace!(plugin = plugin.name(), "delete_backward claimed");
					return Ok(true);
				}
			}
			editor.delete_char_backward()
		})
	}

	fn delete_char_backward(&mut self) -> Result<bool> {
		let Some(caret) = self.selection().map(|range| range.focus.clone()) else {
			return Ok(false);
		};
		if caret.offset > 0 {
			self.remove_text(&caret.path, caret.offset - 1, 1)?;
			return Ok(true);
		}
		let Some((previous, node)) = self.document().previous_sibling(&caret.path) else {
			return Ok(false);
		};
		let Some(len) = node.as_text().map(|leaf| leaf.char_len()).filter(|len| *len > 0) else {
			return Ok(false);
		};
		self.remove_text(&previous, len - 1, 1)?;
		Ok(true)
	}

	/// Replaces the whole document with a single empty paragraph.
	pub fn delete_all(&mut self) -> Result<()> {
		debug!("delete_all");
		self.transact(|editor| {
			for index in (0..editor.document().children().len()).rev() {
				editor.remove_node(&Path::from([index]))?;
			}
			if !editor.document().is_empty() {
				return Err(EditorError::InvalidDepth { path: Path::root() });
			}
			editor.apply(Operation::InsertNode {
				path: Path::from([0]),
				node: Node::empty_paragraph(),
			})?;
			editor.select(Range::caret([0, 0], 0))
		})
	}
}
