//! Containment plugins.
//!
//! A plugin sits between edit intents and the tree. It can veto or rewrite
//! operations before they land, react after they land, contribute
//! normalization rules, and claim Backspace before the default character
//! deletion runs.

use std::rc::Rc;

use strata_primitives::Path;

use crate::editor::Editor;
use crate::error::Result;
use crate::operation::Operation;

mod card;
mod code_tag;
mod link_media;
mod list;

pub use card::CardPlugin;
pub use code_tag::CodeTagPlugin;
pub use link_media::LinkMediaPlugin;
pub use list::ListPlugin;

/// A plugin's verdict on an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercept {
	/// Let the operation continue down the chain.
	PassThrough,
	/// Drop the operation; the plugin has done whatever it wanted instead.
	Handled,
	/// Continue down the chain with this operation in place of the original.
	Rewritten(Operation),
}

/// Hooks into the operation pipeline.
///
/// All hooks default to doing nothing.
pub trait Plugin {
	/// Name used in logs.
	fn name(&self) -> &'static str;

	/// Inspects an operation before it is applied.
	fn intercept(&self, _editor: &mut Editor, _op: &Operation) -> Result<Intercept> {
		Ok(Intercept::PassThrough)
	}

	/// Runs after an operation has been applied.
	fn after_apply(&self, _editor: &mut Editor, _op: &Operation) -> Result<()> {
		Ok(())
	}

	/// Repairs the node at `path`. Returns true if anything changed.
	fn normalize_node(&self, _editor: &mut Editor, _path: &Path) -> Result<bool> {
		Ok(false)
	}

	/// Claims a Backspace with a collapsed selection. Returns true if handled.
	fn delete_backward(&self, _editor: &mut Editor) -> Result<bool> {
		Ok(false)
	}
}

/// The standard chain: lists, cards, link and media, code and tags.
pub fn default_chain() -> Vec<Rc<dyn Plugin>> {
	vec![
		Rc::new(ListPlugin),
		Rc::new(CardPlugin),
		Rc::new(LinkMediaPlugin),
		Rc::new(CodeTagPlugin),
	]
}
