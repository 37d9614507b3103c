//! Key command scenarios driven through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use strata_editor::markdown::serialize;
use strata_editor::{BackspaceKey, CommitLog, EnterKey, KeyEvent, Node, Range, TabKey};

use crate::common::{assert_invariants, editor_at, leaf_with_text, list_depth};

#[test]
fn backspace_in_the_only_empty_item_removes_the_list() {
	let mut editor = editor_at(vec![Node::bulleted_list(vec![Node::item("")])], &[0, 0, 0, 0], 0);
	assert!(BackspaceKey::new(&mut editor).run().unwrap());
	assert_eq!(editor.document().children(), &[Node::empty_paragraph()]);
	assert_invariants(&editor);
}

#[test]
fn backspace_in_an_empty_middle_item_drops_the_rest_of_the_list() {
	let list = Node::bulleted_list(vec![Node::item("Item 1"), Node::item(""), Node::item("Item 3")]);
	let mut editor = editor_at(vec![list], &[0, 1, 0, 0], 0);
	assert!(BackspaceKey::new(&mut editor).run().unwrap());

	let markdown = serialize(editor.document());
	assert!(markdown.contains("Item 1"), "{markdown}");
	assert!(!markdown.contains("Item 3"), "{markdown}");
	assert_invariants(&editor);
}

#[test]
fn backspace_at_the_start_of_a_filled_item_keeps_it() {
	let mut editor = editor_at(vec![Node::bulleted_list(vec![Node::item("Item 1")])], &[0, 0, 0, 0], 0);
	assert!(!BackspaceKey::new(&mut editor).run().unwrap());
	assert!(serialize(editor.document()).contains("Item 1"));
}

#[test]
fn backspace_never_removes_an_item_with_a_sublist() {
	let list = Node::bulleted_list(vec![Node::list_item(vec![
		Node::empty_paragraph(),
		Node::bulleted_list(vec![Node::item("child")]),
	])]);
	let mut editor = editor_at(vec![list.clone()], &[0, 0, 0, 0], 0);
	assert!(!BackspaceKey::new(&mut editor).run().unwrap());
	assert_eq!(editor.document().children(), &[list]);
}

#[test]
fn collapsing_a_single_item_list_leaves_a_paragraph_in_its_place() {
	let mut editor = editor_at(
		vec![
			Node::paragraph("before"),
			Node::numbered_list(vec![Node::item("")]),
			Node::paragraph("after"),
		],
		&[1, 0, 0, 0],
		0,
	);
	assert!(BackspaceKey::new(&mut editor).run().unwrap());
	assert_eq!(
		editor.document().children(),
		&[Node::paragraph("before"), Node::empty_paragraph(), Node::paragraph("after")]
	);
	assert_eq!(editor.selection(), Some(&Range::caret([1, 0], 0)));
}

#[test]
fn shift_tab_lifts_a_nested_item_beside_its_owner() {
	let list = Node::bulleted_list(vec![Node::list_item(vec![
		Node::paragraph("Item1"),
		Node::bulleted_list(vec![Node::item("nested1"), Node::item("nested2")]),
	])]);
	let mut editor = editor_at(vec![list], &[0, 0, 1, 1, 0, 0], 0);
	let mut event = KeyEvent::shifted();
	TabKey::new(&mut editor).run(&mut event).unwrap();

	assert!(event.default_prevented());
	assert_eq!(
		editor.document().children(),
		&[Node::bulleted_list(vec![
			Node::list_item(vec![
				Node::paragraph("Item1"),
				Node::bulleted_list(vec![Node::item("nested1")]),
			]),
			Node::item("nested2"),
		])]
	);
	assert_invariants(&editor);
}

#[test]
fn enter_keeps_the_sublist_on_the_original_item() {
	let list = Node::bulleted_list(vec![Node::list_item(vec![
		Node::paragraph("Item 1 text"),
		Node::bulleted_list(vec![Node::item("Nested item")]),
	])]);
	let mut editor = editor_at(vec![list], &[0, 0, 0, 0], 6);
	assert!(EnterKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap());

	assert_eq!(
		editor.document().children(),
		&[Node::bulleted_list(vec![
			Node::list_item(vec![
				Node::paragraph("Item 1"),
				Node::bulleted_list(vec![Node::item("Nested item")]),
			]),
			Node::item(" text"),
		])]
	);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 1, 0, 0], 0)));
	assert_invariants(&editor);
}

#[test]
fn enter_at_every_offset_leaves_the_sublist_in_place() {
	let text = "split me";
	for offset in 0..=text.len() {
		let list = Node::bulleted_list(vec![Node::list_item(vec![
			Node::paragraph(text),
			Node::bulleted_list(vec![Node::item("kept")]),
		])]);
		let mut editor = editor_at(vec![list], &[0, 0, 0, 0], offset);
		EnterKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap();

		let kept = leaf_with_text(&editor, "kept");
		assert_eq!(list_depth(&editor, &kept), 2, "offset {offset}");
		let owner = editor.document().node(&kept.as_slice()[..2].into()).unwrap();
		assert_eq!(owner.children().len(), 2, "offset {offset}");
		assert_invariants(&editor);
	}
}

#[test]
fn nested_enter_shift_tab_backspace_exits_the_list() {
	let list = Node::bulleted_list(vec![Node::item("one"), Node::item("two")]);
	let mut editor = editor_at(vec![list], &[0, 1, 0, 0], 3);

	TabKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap();
	assert_eq!(list_depth(&editor, &leaf_with_text(&editor, "two")), 2);

	assert!(EnterKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap());
	assert_eq!(serialize(editor.document()), "- one\n  - two\n  - ");

	TabKey::new(&mut editor).run(&mut KeyEvent::shifted()).unwrap();
	assert_eq!(serialize(editor.document()), "- one\n  - two\n- ");

	assert!(BackspaceKey::new(&mut editor).run().unwrap());
	assert_eq!(serialize(editor.document()), "- one\n  - two\n\n");
	assert_eq!(editor.selection(), Some(&Range::caret([1, 0], 0)));
	assert_invariants(&editor);
}

#[test]
fn each_keystroke_commits_once() {
	let log = Rc::new(RefCell::new(CommitLog::default()));
	let mut editor = editor_at(
		vec![Node::bulleted_list(vec![Node::item("one"), Node::item("two")])],
		&[0, 1, 0, 0],
		1,
	);
	editor.observe(Box::new(Rc::clone(&log)));

	TabKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap();
	EnterKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap();
	assert_eq!(log.borrow().commits().len(), 2);
	assert_eq!(editor.generation(), 2);

	assert!(BackspaceKey::new(&mut editor).run().unwrap());
	assert_eq!(log.borrow().commits().len(), 3);

	editor.select_point(strata_editor::Point::new([0, 1, 0, 0], 1)).unwrap();
	assert!(!BackspaceKey::new(&mut editor).run().unwrap());
	assert_eq!(log.borrow().commits().len(), 3);
}
