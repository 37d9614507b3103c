//! Key event types consumed by the key commands.

/// Key modifiers held during a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Meta (Cmd) is held.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		meta: false,
	};

	/// Only Shift pressed.
	pub const SHIFT: Self = Self {
		ctrl: false,
		alt: false,
		shift: true,
		meta: false,
	};

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Meta added.
	pub fn meta(self) -> Self {
		Self { meta: true, ..self }
	}

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift && !self.meta
	}
}

/// A keystroke as seen by a key command.
///
/// Commands call [`KeyEvent::prevent_default`] when they take the keystroke
/// away from the host's default handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
	/// Modifiers held during the keystroke.
	pub modifiers: Modifiers,
	default_prevented: bool,
}

impl KeyEvent {
	/// Creates an event with the given modifiers.
	pub fn new(modifiers: Modifiers) -> Self {
		Self {
			modifiers,
			default_prevented: false,
		}
	}

	/// An unmodified keystroke.
	pub fn plain() -> Self {
		Self::new(Modifiers::NONE)
	}

	/// A keystroke with Shift held.
	pub fn shifted() -> Self {
		Self::new(Modifiers::SHIFT)
	}

	/// Returns whether Shift was held.
	#[inline]
	pub fn shift_key(&self) -> bool {
		self.modifiers.shift
	}

	/// Suppresses the host's default handling of this keystroke.
	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	/// Returns true once a handler has called [`KeyEvent::prevent_default`].
	pub fn default_prevented(&self) -> bool {
		self.default_prevented
	}
}
