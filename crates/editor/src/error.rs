//! Error types for tree access, normalization, and configuration.

use strata_primitives::{AddressError, Path};
use thiserror::Error;

/// Result alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Failures of tree access and normalization.
///
/// Every tree operation that returns one of these has left the document
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
	/// No node exists at the path (often a path cached across a structural edit).
	#[error("no node at path {path}")]
	PathNotFound {
		/// The path that failed to resolve.
		path: Path,
	},

	/// The path has the wrong depth for the operation (for example the root
	/// where a node is required).
	#[error("invalid depth for path {path}")]
	InvalidDepth {
		/// The offending path.
		path: Path,
	},

	/// An element was required but a text leaf was found.
	#[error("expected an element at {path}")]
	NotAnElement {
		/// The path of the text leaf.
		path: Path,
	},

	/// A text leaf was required but an element was found.
	#[error("expected a text leaf at {path}")]
	NotAText {
		/// The path of the element.
		path: Path,
	},

	/// A character offset fell outside a text leaf.
	#[error("offset {offset} out of range for leaf {path} of length {len}")]
	OffsetOutOfRange {
		/// The leaf path.
		path: Path,
		/// The requested offset.
		offset: usize,
		/// The leaf length in characters.
		len: usize,
	},

	/// A property does not apply to the node at the path.
	#[error("property `{property}` does not apply to the node at {path}")]
	PropertyMismatch {
		/// The node path.
		path: Path,
		/// The property name.
		property: &'static str,
	},

	/// A stamped path was resolved after the document moved on.
	#[error("stale path {path} from generation {stamped}, document is at {current}")]
	StalePath {
		/// The cached path.
		path: Path,
		/// Generation the path was resolved under.
		stamped: u64,
		/// Current document generation.
		current: u64,
	},

	/// Normalization did not reach a fixpoint; a plugin is fighting the normalizer.
	#[error("normalization did not converge after {iterations} iterations")]
	NormalizationLimit {
		/// Iterations spent before giving up.
		iterations: usize,
	},

	/// Path arithmetic failed.
	#[error(transparent)]
	Address(#[from] AddressError),
}

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML source could not be parsed or did not match the schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A field parsed but holds an unusable value.
	#[error("invalid value for `{field}`: {reason}")]
	Invalid {
		/// Dotted field name.
		field: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
}
