use std::cmp::Ordering;
use std::fmt;

use crate::path::Path;

/// A caret location: a text leaf's path and a character offset into it.
///
/// Offsets count `char`s, not bytes. Points order by path first, then offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
	/// Path of the text leaf.
	pub path: Path,
	/// Character offset into the leaf's text.
	pub offset: usize,
}

impl Point {
	/// Creates a point at `offset` inside the leaf at `path`.
	pub fn new(path: impl Into<Path>, offset: usize) -> Self {
		Self {
			path: path.into(),
			offset,
		}
	}

	/// Total document order.
	pub fn compare(&self, other: &Point) -> Ordering {
		self.cmp(other)
	}

	/// Returns true if this point comes strictly before `other`.
	pub fn is_before(&self, other: &Point) -> bool {
		self < other
	}

	/// Returns true if this point comes strictly after `other`.
	pub fn is_after(&self, other: &Point) -> bool {
		self > other
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.path, self.offset)
	}
}
