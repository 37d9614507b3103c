use crate::path::Path;
use crate::point::Point;

/// Selection direction (anchor to focus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Focus is at or after anchor.
	Forward,
	/// Focus is before anchor.
	Backward,
}

/// A selection defined by anchor and focus points.
///
/// The anchor is the fixed end, and the focus moves during selection extension.
/// A range whose anchor equals its focus is a caret.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Range {
	/// The fixed end of the range.
	pub anchor: Point,
	/// The moving end of the range (caret position).
	pub focus: Point,
}

impl Range {
	/// Creates a new range from anchor to focus.
	pub fn new(anchor: Point, focus: Point) -> Self {
		Self { anchor, focus }
	}

	/// Creates a collapsed range (caret) at the given point.
	pub fn collapsed(point: Point) -> Self {
		Self::new(point.clone(), point)
	}

	/// Creates a caret at `offset` inside the leaf at `path`.
	pub fn caret(path: impl Into<Path>, offset: usize) -> Self {
		Self::collapsed(Point::new(path, offset))
	}

	/// Returns true if anchor equals focus.
	#[inline]
	pub fn is_collapsed(&self) -> bool {
		self.anchor == self.focus
	}

	/// Returns the direction of this range.
	#[inline]
	pub fn direction(&self) -> Direction {
		if self.focus < self.anchor {
			Direction::Backward
		} else {
			Direction::Forward
		}
	}

	/// Returns true if focus precedes anchor.
	#[inline]
	pub fn is_backward(&self) -> bool {
		self.direction() == Direction::Backward
	}

	/// Returns a new range with anchor and focus swapped.
	pub fn flip(&self) -> Self {
		Self {
			anchor: self.focus.clone(),
			focus: self.anchor.clone(),
		}
	}

	/// Returns a range with the specified direction, flipping if needed.
	pub fn with_direction(self, direction: Direction) -> Self {
		if self.direction() == direction {
			self
		} else {
			self.flip()
		}
	}

	/// Returns `(start, end)` in document order, whatever the direction.
	pub fn edges(&self) -> (&Point, &Point) {
		if self.is_backward() {
			(&self.focus, &self.anchor)
		} else {
			(&self.anchor, &self.focus)
		}
	}

	/// Returns the earlier edge.
	pub fn start(&self) -> &Point {
		self.edges().0
	}

	/// Returns the later edge.
	pub fn end(&self) -> &Point {
		self.edges().1
	}

	/// Applies a function to both anchor and focus.
	pub fn map(self, mut f: impl FnMut(Point) -> Point) -> Self {
		Self {
			anchor: f(self.anchor),
			focus: f(self.focus),
		}
	}

	/// Returns true if the point lies within the range, edges included.
	pub fn contains(&self, point: &Point) -> bool {
		let (start, end) = self.edges();
		start <= point && point <= end
	}

	/// Returns true if both edges lie at or below `path`.
	pub fn is_within(&self, path: &Path) -> bool {
		self.anchor.path.starts_with(path) && self.focus.path.starts_with(path)
	}
}
