use thiserror::Error;

use crate::path::Path;

/// Result alias for address arithmetic.
pub type Result<T> = std::result::Result<T, AddressError>;

/// Failures of pure path navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
	/// Stepping to a sibling crossed the start (or end) of the parent's children.
	#[error("no sibling in that direction from {path}")]
	NoSibling {
		/// The path that was stepped from.
		path: Path,
	},

	/// The root path was asked for its parent or an index.
	#[error("the root path has no parent")]
	RootHasNoParent,
}
