//! Key commands.
//!
//! Each command borrows the editor for one keystroke, reads the selection
//! and the nodes around it, and issues its edits as a single transaction.
//! A command that does not apply to the current context is a no-op, never
//! an error; `Err` means the tree itself could not be edited.

mod backspace;
mod enter;
pub(crate) mod list;
mod tab;

pub use backspace::BackspaceKey;
pub use enter::EnterKey;
pub use tab::TabKey;
