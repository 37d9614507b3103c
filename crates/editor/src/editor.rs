//! The editing session: document, selection, plugin chain, and transactions.
//!
//! # Applying Operations
//!
//! [`Editor::apply`] offers each [`Operation`] to the plugin chain in order.
//! A plugin may veto it ([`Intercept::Handled`]), substitute another
//! operation ([`Intercept::Rewritten`], later plugins see the substitute), or
//! let it through. Whatever survives is applied to the document, the
//! selection and the normalizer's dirty set are mapped through it, and every
//! plugin's `after_apply` hook runs.
//!
//! # Transactions
//!
//! [`Editor::transact`] batches operations. Normalization is suspended until
//! the outermost transaction returns; the tree may be transiently invalid in
//! between. A body or commit-time normalization error restores the snapshot
//! taken when the outermost transaction began. A top-level [`Editor::apply`]
//! outside any transaction behaves as a one-operation transaction.

use std::rc::Rc;

use strata_primitives::{Path, Point, Range};
use tracing::{debug, trace, warn};

use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::{EditorError, Result};
use crate::history::{Commit, HistoryObserver};
use crate::node::Node;
use crate::operation::Operation;
use crate::plugins::{self, Intercept, Plugin};


/// A path resolved under a specific editor generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StampedPath {
	pub path: Path,
	pub generation: u64,
}

/// A document plus selection, driven through plugins and transactions.
pub struct Editor {
	document: Document,
	selection: Option<Range>,
	config: EditorConfig,
	plugins: Vec<Rc<dyn Plugin>>,
	observers: Vec<Box<dyn HistoryObserver>>,
	generation: u64,
	/// Transaction nesting depth; zero means no transaction is open.
	depth: usize,
	dirty: Vec<Path>,
	pending: Vec<Operation>,
}

impl std::fmt::Debug for Editor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Editor")
			.field("document", &self.document)
			.field("selection", &self.selection)
			.field("generation", &self.generation)
			.field("plugins", &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

impl Editor {
	/// Creates an editor over `document` with the default plugin chain.
	///
	/// The document is taken as-is; call [`Editor::normalize_all`] to repair
	/// a tree from an untrusted source.
	pub fn new(document: Document) -> Self {
		Self::with_config(document, EditorConfig::default())
	}

	pub fn with_config(document: Document, config: EditorConfig) -> Self {
		Self {
			document,
			selection: None,
			config,
			plugins: plugins::default_chain(),
			observers: Vec::new(),
			generation: 0,
			depth: 0,
			dirty: Vec::new(),
			pending: Vec::new(),
		}
	}

	/// Replaces the plugin chain.
	pub fn with_plugins(mut self, plugins: Vec<Rc<dyn Plugin>>) -> Self {
		self.plugins = plugins;
		self
	}

	/// Registers a history observer.
	pub fn observe(&mut self, observer: Box<dyn HistoryObserver>) {
		self.observers.push(observer);
	}

	pub fn document(&self) -> &Document {
		&self.document
	}

	pub fn into_document(self) -> Document {
		self.document
	}

	pub fn selection(&self) -> Option<&Range> {
		self.selection.as_ref()
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/// Number of committed transactions so far.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true while a transaction is open.
	pub fn in_transaction(&self) -> bool {
		self.depth > 0
	}

	/// Stamps `path` with the current generation.
	pub fn stamp(&self, path: Path) -> StampedPath {
		StampedPath {
			path,
			generation: self.generation,
		}
	}

	/// Resolves a stamped path, failing if any transaction committed since.
	pub fn resolve(&self, stamped: &StampedPath) -> Result<Path> {
		if stamped.generation != self.generation {
			return Err(EditorError::StalePath {
				path: stamped.path.clone(),
				stamped: stamped.generation,
				current: self.generation,
			});
		}
		if !self.document.has_path(&stamped.path) {
			return Err(EditorError::PathNotFound {
				path: stamped.path.clone(),
			});
		}
		Ok(stamped.path.clone())
	}

	/// Sets the selection after checking both points land in text leaves.
	pub fn select(&mut self, range: Range) -> Result<()> {
		for point in [&range.anchor, &range.focus] {
			let leaf = self.document.text(&point.path)?;
			let len = leaf.char_len();
			if point.offset > len {
				return Err(EditorError::OffsetOutOfRange {
					path: point.path.clone(),
					offset: point.offset,
					len,
				});
			}
		}
		trace!(anchor = %range.anchor, focus = %range.focus, "select");
		self.selection = Some(range);
		Ok(())
	}

	/// Collapses the selection to `point`.
	pub fn select_point(&mut self, point: Point) -> Result<()> {
		self.select(Range::collapsed(point))
	}

	pub fn deselect(&mut self) {
		self.selection = None;
	}

	/// Runs `body` as one transaction.
	///
	/// Nested calls join the outermost transaction. Normalization and commit
	/// happen when the outermost body returns `Ok`; on `Err` the document and
	/// selection are restored to their state when it began.
	pub fn transact<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		if self.depth > 0 {
			self.depth += 1;
			let out = body(self);
			self.depth -= 1;
			return out;
		}

		let snapshot = (self.document.clone(), self.selection.clone());
		self.depth = 1;
		let out = body(self).and_then(|value| self.normalize().map(|()| value));
		self.depth = 0;

		match out {
			Ok(value) => {
				self.commit();
				Ok(value)
			}
			Err(err) => {
				let (document, selection) = snapshot;
				self.document = document;
				self.selection = selection;
				self.dirty.clear();
				let discarded = std::mem::take(&mut self.pending).len();
				debug!(%err, discarded, "transaction rolled back");
				Err(err)
			}
		}
	}

	/// Applies `op` through the plugin chain.
	pub fn apply(&mut self, op: Operation) -> Result<()> {
		if self.depth == 0 {
			return self.transact(|editor| editor.apply(op));
		}

		let mut op = op;
		let plugins = self.plugins.clone();
		for plugin in &plugins {
			match plugin.intercept(self, &op)? {
				Intercept::PassThrough => {}
				Intercept::Handled => {
					trace!(plugin = plugin.name(), op = op.name(), path = %op.path(), "intercepted");
					return Ok(());
				}
				Intercept::Rewritten(next) => {
					trace!(
						plugin = plugin.name(),
						from = op.name(),
						to = next.name(),
						path = %next.path(),
						"rewritten"
					);
					op = next;
				}
			}
		}
		self.apply_unintercepted(op)
	}

	/// Applies `op` without consulting plugin intercepts.
	///
	/// Plugins use this for their own repairs so they do not re-enter their
	/// own vetoes.
	pub(crate) fn apply_unintercepted(&mut self, op: Operation) -> Result<()> {
		if self.depth == 0 {
			return self.transact(|editor| editor.apply_unintercepted(op));
		}

		op.apply_to(&mut self.document)?;
		trace!(op = op.name(), path = %op.path(), "applied");

		let selection = self.selection.take();
		self.selection = selection.and_then(|range| self.map_range(&op, range));
		let mut dirty: Vec<Path> = self
			.dirty
			.iter()
			.filter_map(|path| op.transform_path(path))
			.collect();
		dirty.extend(op.dirty_paths());
		self.dirty = dirty;
		self.pending.push(op.clone());

		let plugins = self.plugins.clone();
		for plugin in &plugins {
			plugin.after_apply(self, &op)?;
		}
		Ok(())
	}

	fn map_range(&self, op: &Operation, range: Range) -> Option<Range> {
		let anchor = self.map_point(op, &range.anchor)?;
		let focus = self.map_point(op, &range.focus)?;
		Some(Range::new(anchor, focus))
	}

	/// Maps a caret through `op`; a caret inside removed content falls back to
	/// the end of the preceding leaf, then the start of the following one.
	fn map_point(&self, op: &Operation, point: &Point) -> Option<Point> {
		let mapped = match op.transform_point(point) {
			Some(mapped) => mapped,
			None => return self.fallback_point(op.path()),
		};
		match self.document.text(&mapped.path) {
			Ok(leaf) => {
				let offset = mapped.offset.min(leaf.char_len());
				Some(Point::new(mapped.path, offset))
			}
			Err(_) => self.fallback_point(&mapped.path),
		}
	}

	fn fallback_point(&self, gone: &Path) -> Option<Point> {
		let leaves = self.document.leaves();
		if let Some(before) = leaves.iter().rev().find(|leaf| *leaf < gone) {
			return self.document.end(before).ok();
		}
		let after = leaves.iter().find(|leaf| *leaf >= gone)?;
		self.document.start(after).ok()
	}

	/// Marks every node dirty and normalizes the whole tree.
	pub fn normalize_all(&mut self) -> Result<()> {
		self.transact(|editor| {
			let mut dirty: Vec<Path> = editor.document.descendants().into_iter().map(|(path, _)| path).collect();
			dirty.push(Path::root());
			editor.dirty.extend(dirty);
			Ok(())
		})
	}

	/// Runs the normalizer until the dirty set drains.
	fn normalize(&mut self) -> Result<()> {
		let cap = self.config.normalize.cap(self.dirty.len());
		let mut iterations = 0;
		while let Some(path) = self.pop_dirty() {
			if iterations >= cap {
				warn!(iterations, cap, %path, "normalization did not converge");
				return Err(EditorError::NormalizationLimit { iterations });
			}
			iterations += 1;
			if !self.document.has_path(&path) {
				continue;
			}
			self.normalize_path(&path)?;
		}
		Ok(())
	}

	/// Pops the deepest, last dirty path.
	fn pop_dirty(&mut self) -> Option<Path> {
		self.dirty.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
		self.dirty.dedup();
		self.dirty.pop()
	}

	/// Applies the first rule that fires at `path`.
	///
	/// A fix dirties the path again, so the remaining rules run on the
	/// repaired node in a later iteration.
	fn normalize_path(&mut self, path: &Path) -> Result<bool> {
		if self.normalize_core(path)? {
			return Ok(true);
		}
		let plugins = self.plugins.clone();
		for plugin in &plugins {
			if plugin.normalize_node(self, path)? {
				debug!(plugin = plugin.name(), %path, "normalized");
				return Ok(true);
			}
		}
		Ok(false)
	}

	fn commit(&mut self) {
		self.dirty.clear();
		let operations = std::mem::take(&mut self.pending);
		if operations.is_empty() {
			return;
		}
		self.generation += 1;
		let commit = Commit {
			generation: self.generation,
			operations,
		};
		debug!(generation = commit.generation, ops = commit.operations.len(), "transaction committed");
		for observer in &mut self.observers {
			observer.on_commit(&commit);
		}
	}

	/// Snapshot of the plugin chain, safe to iterate while mutating the editor.
	pub(crate) fn plugin_chain(&self) -> Vec<Rc<dyn Plugin>> {
		self.plugins.clone()
	}

	/// Clones the node at `path`.
	pub(crate) fn node_cloned(&self, path: &Path) -> Result<Node> {
		self.document.node(path).cloned()
	}
}
