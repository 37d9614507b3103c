//! Split guards for link cards, media and schema widgets.
//!
//! These widgets cannot be split. Pressing Enter in one instead opens an
//! empty paragraph after it.

use strata_primitives::Path;
use tracing::debug;

use super::{Intercept, Plugin};
use crate::editor::Editor;
use crate::error::Result;
use crate::node::{ElementKind, Node};
use crate::operation::Operation;


#[derive(Debug, Default, Clone, Copy)]
pub struct LinkMediaPlugin;

fn is_link_or_media(kind: &ElementKind) -> bool {
	matches!(kind, ElementKind::LinkCard { .. } | ElementKind::Media { .. })
}

impl LinkMediaPlugin {
	fn open_paragraph(editor: &mut Editor, at: Path) -> Result<Intercept> {
		debug!(%at, "opening paragraph instead of splitting");
		editor.apply(Operation::InsertNode {
			path: at.clone(),
			node: Node::empty_paragraph(),
		})?;
		if let Ok(start) = editor.document().start(&at) {
			editor.select_point(start)?;
		}
		Ok(Intercept::Handled)
	}
}

impl Plugin for LinkMediaPlugin {
	fn name(&self) -> &'static str {
		"link-media"
	}

	fn intercept(&self, editor: &mut Editor, op: &Operation) -> Result<Intercept> {
		match op {
			Operation::SplitNode { path, .. } => {
				let document = editor.document();
				if let Some(schema) = document.above(path, |kind| matches!(kind, ElementKind::Schema)) {
					return Self::open_paragraph(editor, schema.next()?);
				}
				if document.above(path, is_link_or_media).is_some()
					&& let Some(top) = path.get(0)
				{
					return Self::open_paragraph(editor, Path::from([top + 1]));
				}
				Ok(Intercept::PassThrough)
			}
			Operation::RemoveNode { path, .. } => {
				let Ok(parent) = path.parent() else {
					return Ok(Intercept::PassThrough);
				};
				if !editor
					.document()
					.kind(&parent)
					.is_some_and(|kind| matches!(kind, ElementKind::LinkCard { .. }))
				{
					return Ok(Intercept::PassThrough);
				}
				debug!(link_card = %parent, "removing link card with its child");
				let node = editor.node_cloned(&parent)?;
				editor.apply(Operation::RemoveNode { path: parent, node })?;
				Ok(Intercept::Handled)
			}
			_ => Ok(Intercept::PassThrough),
		}
	}
}
