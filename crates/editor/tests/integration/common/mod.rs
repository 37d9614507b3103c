//! Common utilities for editor integration tests.

use strata_editor::{Document, Editor, Node, Path, Point, invariants};

/// Editor over `children` with the caret at `offset` in the leaf at `path`.
pub fn editor_at(children: Vec<Node>, path: &[usize], offset: usize) -> Editor {
	let _ = tracing_subscriber::fmt::try_init();
	let mut editor = Editor::new(Document::new(children));
	editor
		.select_point(Point::new(path, offset))
		.expect("caret must land in a text leaf");
	editor
}

/// Path of the first leaf whose text is exactly `text`.
pub fn leaf_with_text(editor: &Editor, text: &str) -> Path {
	let document = editor.document();
	document
		.leaves()
		.into_iter()
		.find(|leaf| document.text(leaf).is_ok_and(|leaf| leaf.text == text))
		.unwrap_or_else(|| panic!("no leaf reads {text:?}"))
}

/// Number of lists enclosing the node at `path`.
pub fn list_depth(editor: &Editor, path: &Path) -> usize {
	path.ancestors()
		.filter(|ancestor| editor.document().kind(ancestor).is_some_and(|kind| kind.is_list()))
		.count()
}

/// Panics with every violation found in the editor's document.
#[track_caller]
pub fn assert_invariants(editor: &Editor) {
	let violations = invariants::check(editor.document());
	assert!(
		violations.is_empty(),
		"broken invariants:\n{}\n{}",
		violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"),
		strata_editor::markdown::serialize(editor.document())
	);
}
