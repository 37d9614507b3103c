//! Structural properties that must survive arbitrary keystroke sequences.

use proptest::prelude::*;
use strata_editor::{BackspaceKey, Document, Editor, EnterKey, KeyEvent, Node, Path, Point, TabKey};

use crate::common::{assert_invariants, editor_at, leaf_with_text, list_depth};

#[derive(Debug, Clone)]
enum Key {
	Backspace,
	Tab,
	ShiftTab,
	Enter,
	Type(char),
}

fn key() -> impl Strategy<Value = Key> {
	prop_oneof![
		3 => Just(Key::Backspace),
		2 => Just(Key::Tab),
		2 => Just(Key::ShiftTab),
		2 => Just(Key::Enter),
		1 => prop::sample::select(vec!['a', ' ', '\t']).prop_map(Key::Type),
	]
}

fn seed() -> Vec<Node> {
	vec![
		Node::heading(1, "Title"),
		Node::bulleted_list(vec![
			Node::item("one"),
			Node::list_item(vec![
				Node::paragraph("two"),
				Node::numbered_list(vec![Node::item("2a"), Node::item("")]),
			]),
			Node::item(""),
			Node::item("four"),
		]),
		Node::paragraph("plain"),
		Node::blockquote(vec![Node::paragraph("quoted"), Node::empty_paragraph()]),
		Node::code_block(Some("rust"), "let x;\n"),
		Node::empty_paragraph(),
	]
}

/// Puts the caret somewhere in the document, chosen by two seeds.
fn place_caret(editor: &mut Editor, leaf_seed: usize, offset_seed: usize) {
	let leaves = editor.document().leaves();
	let leaf = leaves[leaf_seed % leaves.len()].clone();
	let len = editor.document().text(&leaf).unwrap().char_len();
	editor.select_point(Point::new(leaf, offset_seed % (len + 1))).unwrap();
}

fn press(editor: &mut Editor, key: &Key) {
	match key {
		Key::Backspace => {
			if !BackspaceKey::new(editor).run().unwrap() {
				editor.delete_backward().unwrap();
			}
		}
		Key::Tab => TabKey::new(editor).run(&mut KeyEvent::plain()).unwrap(),
		Key::ShiftTab => TabKey::new(editor).run(&mut KeyEvent::shifted()).unwrap(),
		Key::Enter => {
			EnterKey::new(editor).run(&mut KeyEvent::plain()).unwrap();
		}
		Key::Type(c) => editor.insert_text(&c.to_string()).unwrap(),
	}
}

fn flat_list(count: usize, nested_under: Option<usize>) -> Node {
	let items = (0..count)
		.map(|index| {
			let mut children = vec![Node::paragraph(format!("item {index}"))];
			if nested_under == Some(index) {
				children.push(Node::bulleted_list(vec![Node::item(format!("child {index}"))]));
			}
			Node::list_item(children)
		})
		.collect();
	Node::bulleted_list(items)
}

/// The list item holding the leaf at `leaf`.
fn item_of(leaf: &Path) -> Path {
	leaf.as_slice()[..leaf.len() - 2].into()
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn invariants_hold_after_every_keystroke(
		steps in prop::collection::vec((0usize..64, 0usize..16, key()), 1..40)
	) {
		let _ = tracing_subscriber::fmt::try_init();
		let mut editor = Editor::new(Document::new(seed()));
		for (leaf_seed, offset_seed, key) in &steps {
			place_caret(&mut editor, *leaf_seed, *offset_seed);
			press(&mut editor, key);
			assert_invariants(&editor);
		}
	}

	#[test]
	fn indenting_the_first_item_is_a_no_op(count in 1usize..6, nested in prop::option::of(0usize..6)) {
		let list = flat_list(count, nested);
		let mut editor = editor_at(vec![list.clone()], &[0, 0, 0, 0], 0);
		TabKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap();
		prop_assert_eq!(editor.document().children(), &[list][..]);
	}

	#[test]
	fn indenting_deepens_by_exactly_one(count in 2usize..7, pick in 1usize..7, nested in any::<bool>()) {
		let index = 1 + pick % (count - 1);
		let list = flat_list(count, nested.then_some(index));
		let original = list.children()[index].clone();
		let mut editor = editor_at(vec![list], &[0, index, 0, 0], 0);

		let text = format!("item {index}");
		let before = list_depth(&editor, &leaf_with_text(&editor, &text));
		TabKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap();

		let leaf = leaf_with_text(&editor, &text);
		prop_assert_eq!(list_depth(&editor, &leaf), before + 1);
		prop_assert_eq!(editor.document().node(&item_of(&leaf)).unwrap(), &original);
		assert_invariants(&editor);
	}

	#[test]
	fn indent_then_outdent_restores_the_list(count in 2usize..7, pick in 1usize..7, nested in any::<bool>()) {
		let index = 1 + pick % (count - 1);
		let list = flat_list(count, nested.then_some(index));
		let mut editor = editor_at(vec![list.clone()], &[0, index, 0, 0], 0);
		let text = format!("item {index}");

		TabKey::new(&mut editor).run(&mut KeyEvent::plain()).unwrap();
		let leaf = leaf_with_text(&editor, &text);
		editor.select_point(Point::new(leaf, 0)).unwrap();
		TabKey::new(&mut editor).run(&mut KeyEvent::shifted()).unwrap();

		prop_assert_eq!(editor.document().children(), &[list][..]);
	}
}
