//! Commit notifications for an external history manager.
//!
//! The editor does not implement undo. It reports each committed
//! transaction as one opaque [`Commit`] to every registered
//! [`HistoryObserver`]; the observer owns whatever undo model it wants.

use std::cell::RefCell;
use std::rc::Rc;

use crate::operation::Operation;

/// One committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
	/// Editor generation after the commit.
	pub generation: u64,
	/// Operations in application order, normalization fixes included.
	pub operations: Vec<Operation>,
}

impl Commit {
	pub fn is_empty(&self) -> bool {
		self.operations.is_empty()
	}
}

/// Receives committed transactions.
pub trait HistoryObserver {
	/// Called once per committed transaction, after normalization.
	fn on_commit(&mut self, commit: &Commit);
}

/// Observer that keeps every commit; useful for hosts that replay history
/// and for tests.
#[derive(Debug, Default)]
pub struct CommitLog {
	commits: Vec<Commit>,
}

impl CommitLog {
	pub fn commits(&self) -> &[Commit] {
		&self.commits
	}

	pub fn take(&mut self) -> Vec<Commit> {
		std::mem::take(&mut self.commits)
	}
}

impl HistoryObserver for CommitLog {
	fn on_commit(&mut self, commit: &Commit) {
		self.commits.push(commit.clone());
	}
}

impl<T: HistoryObserver> HistoryObserver for Rc<RefCell<T>> {
	fn on_commit(&mut self, commit: &Commit) {
		self.borrow_mut().on_commit(commit);
	}
}
