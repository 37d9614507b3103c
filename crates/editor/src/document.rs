//! Read access over the block tree.
//!
//! [`Document`] owns the root's children. Reads resolve [`Path`]s against
//! the current tree and fail with [`EditorError::PathNotFound`] when a path no
//! longer addresses a node. Mutation goes through [`crate::Operation`]s
//! applied by the [`crate::Editor`]; nothing here mutates except the
//! crate-private helpers the operation layer uses.

use strata_primitives::{Path, Point};

use crate::error::{EditorError, Result};
use crate::node::{Element, ElementKind, Node, Text};


/// The document root and its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	children: Vec<Node>,
}

impl Default for Document {
	fn default() -> Self {
		Self::new(vec![Node::empty_paragraph()])
	}
}

impl Document {
	/// Wraps `children` as a document without normalizing them.
	pub fn new(children: Vec<Node>) -> Self {
		Self { children }
	}

	/// Top-level blocks.
	pub fn children(&self) -> &[Node] {
		&self.children
	}

	/// Consumes the document, returning its top-level blocks.
	pub fn into_children(self) -> Vec<Node> {
		self.children
	}

	/// Returns true if the root has no children.
	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// Resolves a non-root path to its node.
	pub fn node(&self, path: &Path) -> Result<&Node> {
		let (&first, rest) = path
			.as_slice()
			.split_first()
			.ok_or_else(|| EditorError::InvalidDepth { path: path.clone() })?;
		let not_found = || EditorError::PathNotFound { path: path.clone() };
		let mut node = self.children.get(first).ok_or_else(not_found)?;
		for &index in rest {
			node = node.children().get(index).ok_or_else(not_found)?;
		}
		Ok(node)
	}

	pub(crate) fn node_mut(&mut self, path: &Path) -> Result<&mut Node> {
		let (&first, rest) = path
			.as_slice()
			.split_first()
			.ok_or_else(|| EditorError::InvalidDepth { path: path.clone() })?;
		let not_found = || EditorError::PathNotFound { path: path.clone() };
		let mut node = self.children.get_mut(first).ok_or_else(not_found)?;
		for &index in rest {
			node = match node {
				Node::Element(element) => element.children.get_mut(index).ok_or_else(not_found)?,
				Node::Text(_) => return Err(not_found()),
			};
		}
		Ok(node)
	}

	/// Children of the node at `path`; the root path yields the top-level blocks.
	pub fn children_at(&self, path: &Path) -> Result<&[Node]> {
		if path.is_root() {
			return Ok(&self.children);
		}
		match self.node(path)? {
			Node::Element(element) => Ok(&element.children),
			Node::Text(_) => Err(EditorError::NotAnElement { path: path.clone() }),
		}
	}

	pub(crate) fn children_at_mut(&mut self, path: &Path) -> Result<&mut Vec<Node>> {
		if path.is_root() {
			return Ok(&mut self.children);
		}
		match self.node_mut(path)? {
			Node::Element(element) => Ok(&mut element.children),
			Node::Text(_) => Err(EditorError::NotAnElement { path: path.clone() }),
		}
	}

	/// Resolves `path` to an element.
	pub fn element(&self, path: &Path) -> Result<&Element> {
		self.node(path)?
			.as_element()
			.ok_or_else(|| EditorError::NotAnElement { path: path.clone() })
	}

	/// Resolves `path` to a text leaf.
	pub fn text(&self, path: &Path) -> Result<&Text> {
		self.node(path)?
			.as_text()
			.ok_or_else(|| EditorError::NotAText { path: path.clone() })
	}

	/// Kind of the element at `path`, if there is one.
	pub fn kind(&self, path: &Path) -> Option<&ElementKind> {
		self.node(path).ok().and_then(Node::kind)
	}

	/// Returns true if `path` resolves (the root always does).
	pub fn has_path(&self, path: &Path) -> bool {
		path.is_root() || self.node(path).is_ok()
	}

	/// Kind of the parent element; `None` when the parent is the root.
	pub fn parent_kind(&self, path: &Path) -> Option<&ElementKind> {
		let parent = path.parent().ok()?;
		self.kind(&parent)
	}

	/// Returns true if the node at `path` has a following sibling.
	pub fn has_next(&self, path: &Path) -> bool {
		path.next().is_ok_and(|next| self.has_path(&next))
	}

	/// The preceding sibling and its path.
	pub fn previous_sibling(&self, path: &Path) -> Option<(Path, &Node)> {
		let previous = path.previous().ok()?;
		let node = self.node(&previous).ok()?;
		Some((previous, node))
	}

	/// The following sibling and its path.
	pub fn next_sibling(&self, path: &Path) -> Option<(Path, &Node)> {
		let next = path.next().ok()?;
		let node = self.node(&next).ok()?;
		Some((next, node))
	}

	/// Path of the first text leaf at or below `path`.
	pub fn first_leaf(&self, path: &Path) -> Result<Path> {
		self.descend(path, |children| children.first().map(|_| 0))
	}

	/// Path of the last text leaf at or below `path`.
	pub fn last_leaf(&self, path: &Path) -> Result<Path> {
		self.descend(path, |children| children.len().checked_sub(1))
	}

	fn descend(&self, path: &Path, pick: impl Fn(&[Node]) -> Option<usize>) -> Result<Path> {
		let mut current = path.clone();
		loop {
			if !current.is_root() && self.node(&current)?.is_text() {
				return Ok(current);
			}
			let children = self.children_at(&current)?;
			let index = pick(children).ok_or_else(|| EditorError::PathNotFound {
				path: current.child(0),
			})?;
			current = current.child(index);
		}
	}

	/// First caret position at or below `path`.
	pub fn start(&self, path: &Path) -> Result<Point> {
		Ok(Point::new(self.first_leaf(path)?, 0))
	}

	/// Last caret position at or below `path`.
	pub fn end(&self, path: &Path) -> Result<Point> {
		let leaf = self.last_leaf(path)?;
		let len = self.text(&leaf)?.char_len();
		Ok(Point::new(leaf, len))
	}

	/// Visible text at or below `path`.
	pub fn string(&self, path: &Path) -> Result<String> {
		if path.is_root() {
			return Ok(self.children.iter().map(Node::string).collect());
		}
		Ok(self.node(path)?.string())
	}

	/// Nearest element at or above `path` whose kind matches.
	pub fn above(&self, path: &Path, predicate: impl Fn(&ElementKind) -> bool) -> Option<Path> {
		let mut current = path.clone();
		while !current.is_root() {
			if self.kind(&current).is_some_and(&predicate) {
				return Some(current);
			}
			current = current.parent().ok()?;
		}
		None
	}

	/// The closest text leaf before `path` in document order.
	pub fn previous_leaf(&self, path: &Path) -> Option<Path> {
		self.leaves().into_iter().rev().find(|leaf| leaf < path)
	}

	/// The closest text leaf after `path` and outside its subtree.
	pub fn next_leaf(&self, path: &Path) -> Option<Path> {
		self.leaves()
			.into_iter()
			.find(|leaf| leaf > path && !leaf.starts_with(path))
	}

	/// Every node in document order with its path.
	pub fn descendants(&self) -> Vec<(Path, &Node)> {
		fn walk<'a>(nodes: &'a [Node], prefix: &Path, out: &mut Vec<(Path, &'a Node)>) {
			for (index, node) in nodes.iter().enumerate() {
				let path = prefix.child(index);
				out.push((path.clone(), node));
				walk(node.children(), &path, out);
			}
		}
		let mut out = Vec::new();
		walk(&self.children, &Path::root(), &mut out);
		out
	}

	/// Paths of every text leaf in document order.
	pub fn leaves(&self) -> Vec<Path> {
		self.descendants()
			.into_iter()
			.filter(|(_, node)| node.is_text())
			.map(|(path, _)| path)
			.collect()
	}
}
