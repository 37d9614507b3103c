//! Core normalization rules shared by every node kind.
//!
//! Plugin rules run after these (see [`crate::Plugin::normalize_node`]).
//! Repairs here bypass plugin intercepts: a structural fix must not be
//! vetoed by the containment rules it restores.

use strata_primitives::{Path, Point, Range};
use tracing::debug;

use crate::editor::Editor;
use crate::error::Result;
use crate::node::{Element, ElementKind, Node};
use crate::operation::Operation;


impl Editor {
	/// Applies the first core rule that fires at `path`.
	pub(crate) fn normalize_core(&mut self, path: &Path) -> Result<bool> {
		if path.is_root() {
			return self.normalize_root();
		}
		let Some(element) = self.document().node(path)?.as_element() else {
			return Ok(false);
		};
		let kind = element.kind.clone();

		if element.children.is_empty() {
			if kind.is_removable_when_empty() {
				debug!(%path, kind = kind.name(), "removing empty container");
				let node = self.node_cloned(path)?;
				self.apply_unintercepted(Operation::RemoveNode {
					path: path.clone(),
					node,
				})?;
				return Ok(true);
			}
			if kind.holds_inline_content() {
				debug!(%path, kind = kind.name(), "filling empty text block");
				self.apply_unintercepted(Operation::InsertNode {
					path: path.child(0),
					node: Node::text(""),
				})?;
				return Ok(true);
			}
			return Ok(false);
		}

		if kind.holds_inline_content() {
			return self.normalize_inline_children(path);
		}
		if matches!(kind, ElementKind::Blockquote) {
			return self.wrap_stray_inline(path);
		}
		Ok(false)
	}

	fn normalize_root(&mut self) -> Result<bool> {
		if self.document().is_empty() {
			debug!("document emptied, inserting paragraph");
			self.apply_unintercepted(Operation::InsertNode {
				path: Path::from([0]),
				node: Node::empty_paragraph(),
			})?;
			return Ok(true);
		}
		self.wrap_stray_inline(&Path::root())
	}

	/// Wraps a text leaf or inline element sitting among blocks in a paragraph.
	fn wrap_stray_inline(&mut self, parent: &Path) -> Result<bool> {
		let stray = self
			.document()
			.children_at(parent)?
			.iter()
			.position(|child| child.is_text() || child.is(ElementKind::is_inline));
		let Some(index) = stray else {
			return Ok(false);
		};
		let at = parent.child(index);
		debug!(path = %at, "wrapping stray inline content in a paragraph");
		self.wrap_unintercepted(ElementKind::Paragraph, &at)?;
		Ok(true)
	}

	pub(crate) fn wrap_unintercepted(&mut self, kind: ElementKind, at: &Path) -> Result<()> {
		self.apply_unintercepted(Operation::InsertNode {
			path: at.clone(),
			node: Element::empty(kind).into(),
		})?;
		self.apply_unintercepted(Operation::MoveNode {
			path: at.next()?,
			new_path: at.child(0),
		})
	}

	fn normalize_inline_children(&mut self, path: &Path) -> Result<bool> {
		let children = self.document().children_at(path)?;

		if let Some(index) = children.iter().position(|child| child.is(ElementKind::is_block)) {
			let count = children[index].children().len();
			debug!(path = %path.child(index), count, "unwrapping block nested in text block");
			for offset in 0..count {
				let block = path.child(index + offset);
				self.apply_unintercepted(Operation::MoveNode {
					path: block.child(0),
					new_path: block,
				})?;
			}
			let emptied = path.child(index + count);
			let node = self.node_cloned(&emptied)?;
			self.apply_unintercepted(Operation::RemoveNode { path: emptied, node })?;
			return Ok(true);
		}

		for index in 1..children.len() {
			let (Some(prev), Some(cur)) = (children[index - 1].as_text(), children[index].as_text()) else {
				continue;
			};
			let prev_path = path.child(index - 1);
			let cur_path = path.child(index);
			if prev.same_format(cur) {
				let prev_len = prev.char_len();
				let text = cur.text.clone();
				let node = children[index].clone();
				debug!(path = %cur_path, "merging adjacent text leaves");
				let before = self.selection().cloned();
				if !text.is_empty() {
					self.apply_unintercepted(Operation::InsertText {
						path: prev_path.clone(),
						offset: prev_len,
						text,
					})?;
				}
				self.apply_unintercepted(Operation::RemoveNode {
					path: cur_path.clone(),
					node,
				})?;
				self.carry_selection(before, |old| {
					if old.path == prev_path {
						Some(old.clone())
					} else if old.path == cur_path {
						Some(Point::new(prev_path.clone(), prev_len + old.offset))
					} else {
						None
					}
				})?;
				return Ok(true);
			}
			if prev.text.is_empty() || cur.text.is_empty() {
				let (gone, kept, kept_offset) = if prev.text.is_empty() {
					(prev_path.clone(), prev_path.clone(), 0)
				} else {
					(cur_path.clone(), prev_path.clone(), prev.char_len())
				};
				let node = self.node_cloned(&gone)?;
				debug!(path = %gone, "removing empty text leaf");
				let before = self.selection().cloned();
				self.apply_unintercepted(Operation::RemoveNode {
					path: gone.clone(),
					node,
				})?;
				self.carry_selection(before, |old| {
					(old.path == gone).then(|| Point::new(kept.clone(), kept_offset))
				})?;
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// Re-places selection points that a repair moved somewhere unhelpful.
	///
	/// `remap` sees each point as it was before the repair and returns its
	/// new location, or `None` to keep the mapped location.
	fn carry_selection(&mut self, before: Option<Range>, remap: impl Fn(&Point) -> Option<Point>) -> Result<()> {
		let (Some(before), Some(current)) = (before, self.selection().cloned()) else {
			return Ok(());
		};
		let anchor = remap(&before.anchor).unwrap_or(current.anchor);
		let focus = remap(&before.focus).unwrap_or(current.focus);
		self.select(Range::new(anchor, focus))
	}
}
