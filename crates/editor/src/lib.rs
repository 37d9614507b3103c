#![cfg_attr(test, allow(unused_crate_dependencies))]

//! Structural editing engine for a block-tree rich-text document.
//!
//! An [`Editor`] owns a [`Document`] and a selection. Every mutation is an
//! [`Operation`] that passes through the containment [`Plugin`] chain before
//! it lands; the normalizer repairs list, card and container shapes when
//! the enclosing transaction commits. The key commands ([`BackspaceKey`],
//! [`TabKey`], [`EnterKey`]) decide what a keystroke means in context and
//! issue their edits as one transaction.

/// Key commands: Backspace, Tab/Shift-Tab, Enter.
pub mod commands;
/// TOML-backed editor configuration.
pub mod config;
/// Read access over the block tree.
pub mod document;
/// Editing session, selection, and transactions.
pub mod editor;
/// Error types.
pub mod error;
/// Commit notifications for an external undo manager.
pub mod history;
/// Structural invariant scanner.
pub mod invariants;
/// Markdown rendering for inspection and tests.
pub mod markdown;
/// Node model and builders.
pub mod node;
mod normalize;
/// Low-level tree operations.
pub mod operation;
/// Containment plugins.
pub mod plugins;
mod transforms;

pub use commands::{BackspaceKey, EnterKey, TabKey};
pub use config::{EditorConfig, ListConfig, NormalizeConfig, TabConfig};
pub use document::Document;
pub use editor::{Editor, StampedPath};
pub use error::{ConfigError, EditorError, Result};
pub use history::{Commit, CommitLog, HistoryObserver};
pub use invariants::Violation;
pub use node::{Element, ElementKind, ListKind, Marks, Node, PLACEHOLDER, Text};
pub use operation::{Operation, Property, PropertyKey};
pub use plugins::{CardPlugin, CodeTagPlugin, Intercept, LinkMediaPlugin, ListPlugin, Plugin};
pub use strata_primitives::{AddressError, Direction, KeyEvent, Modifiers, Path, Point, Range};
