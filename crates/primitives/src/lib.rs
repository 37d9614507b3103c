//! Addressing primitives for the block tree: paths, points, ranges, and key events.
//!
//! Everything in this crate is pure. Nothing here knows about node kinds or
//! owns a document; the editor crate resolves these addresses against a tree.

/// Errors raised by address arithmetic.
pub mod error;
/// Key event and modifier types consumed by key commands.
pub mod key;
/// Index paths from the document root to a node.
pub mod path;
/// Caret locations inside text leaves.
pub mod point;
/// Anchor/focus selection ranges.
pub mod range;

pub use error::{AddressError, Result};
pub use key::{KeyEvent, Modifiers};
pub use path::Path;
pub use point::Point;
pub use range::{Direction, Range};
