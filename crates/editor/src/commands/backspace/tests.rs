use pretty_assertions::assert_eq;

use super::*;
use crate::document::Document;

fn at(children: Vec<Node>, path: &[usize], offset: usize) -> Editor {
	let mut editor = Editor::new(Document::new(children));
	editor.select_point(Point::new(path, offset)).unwrap();
	editor
}

fn backspace(editor: &mut Editor) -> bool {
	BackspaceKey::new(editor).run().unwrap()
}

#[test]
fn no_selection_is_ignored() {
	let mut editor = Editor::new(Document::new(vec![Node::paragraph("a")]));
	assert!(!backspace(&mut editor));
}

#[test]
fn empty_heading_becomes_a_paragraph() {
	let mut editor = at(vec![Node::heading(2, "")], &[0, 0], 0);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::empty_paragraph()]);
}

#[test]
fn heading_with_text_is_left_to_the_host() {
	let mut editor = at(vec![Node::heading(1, "title")], &[0, 0], 3);
	assert!(!backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::heading(1, "title")]);
}

#[test]
fn stray_styled_character_loses_its_marks() {
	let heading = Node::element(ElementKind::Heading { level: 1 }, vec![Node::marked("x", Marks::BOLD | Marks::TAG)]);
	let mut editor = at(vec![heading], &[0, 0], 1);
	assert!(!backspace(&mut editor));
	assert_eq!(
		editor.document().children(),
		&[Node::element(ElementKind::Heading { level: 1 }, vec![Node::marked("x", Marks::TAG)])]
	);
}

#[test]
fn media_is_replaced_by_an_empty_paragraph() {
	let mut editor = at(
		vec![Node::paragraph("a"), Node::media("cat.png"), Node::paragraph("b")],
		&[1, 0],
		0,
	);
	assert!(backspace(&mut editor));
	assert_eq!(
		editor.document().children(),
		&[Node::paragraph("a"), Node::empty_paragraph(), Node::paragraph("b")]
	);
	assert_eq!(editor.selection(), Some(&Range::caret([1, 0], 0)));
}

#[test]
fn attachment_is_replaced_too() {
	let mut editor = at(vec![Node::attachment("f.pdf", "f")], &[0, 0], 0);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::empty_paragraph()]);
}

#[test]
fn line_break_before_the_caret_is_removed() {
	let paragraph = Node::element(
		ElementKind::Paragraph,
		vec![Node::text("a"), Node::line_break(), Node::text("b")],
	);
	let mut editor = at(vec![paragraph], &[0, 2], 0);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::paragraph("ab")]);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 0], 1)));
}

#[test]
fn mid_text_is_left_to_the_host() {
	let mut editor = at(vec![Node::paragraph("abc")], &[0, 0], 2);
	assert!(!backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::paragraph("abc")]);
}

#[test]
fn empty_last_item_leaves_the_list() {
	let mut editor = at(
		vec![Node::bulleted_list(vec![Node::item("a"), Node::item("")])],
		&[0, 1, 0, 0],
		0,
	);
	assert!(backspace(&mut editor));
	assert_eq!(
		editor.document().children(),
		&[Node::bulleted_list(vec![Node::item("a")]), Node::empty_paragraph()]
	);
	assert_eq!(editor.selection(), Some(&Range::caret([1, 0], 0)));
}

#[test]
fn empty_only_item_replaces_the_list() {
	let mut editor = at(vec![Node::numbered_list(vec![Node::item(" ")])], &[0, 0, 0, 0], 1);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::empty_paragraph()]);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 0], 0)));
}

#[test]
fn nested_item_start_outdents() {
	let mut editor = at(
		vec![Node::bulleted_list(vec![Node::list_item(vec![
			Node::paragraph("a"),
			Node::bulleted_list(vec![Node::item("b")]),
		])])],
		&[0, 0, 1, 0, 0, 0],
		0,
	);
	assert!(backspace(&mut editor));
	assert_eq!(
		editor.document().children(),
		&[Node::bulleted_list(vec![Node::item("a"), Node::item("b")])]
	);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 1, 0, 0], 0)));
}

#[test]
fn top_level_item_start_keeps_its_text() {
	let list = Node::bulleted_list(vec![Node::item("a"), Node::item("b")]);
	let mut editor = at(vec![list.clone()], &[0, 1, 0, 0], 0);
	assert!(!backspace(&mut editor));
	assert_eq!(editor.document().children(), &[list]);
}

#[test]
fn table_cell_start_is_swallowed() {
	let table = Node::table([["a", "b"]]);
	let mut editor = at(vec![table.clone()], &[0, 0, 1, 0], 0);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[table]);
}

#[test]
fn paragraph_after_code_moves_into_a_nonblank_last_line() {
	let mut editor = at(vec![Node::code_block(None, "x"), Node::paragraph("y")], &[1, 0], 0);
	assert!(backspace(&mut editor));
	assert_eq!(
		editor.document().children(),
		&[Node::code_block(None, "x"), Node::paragraph("y")]
	);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 0], 1)));
}

#[test]
fn paragraph_after_code_merges_into_a_blank_last_line() {
	let mut editor = at(vec![Node::code_block(None, "x\n"), Node::paragraph("y")], &[1, 0], 0);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::code_block(None, "x\ny")]);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 0], 2)));
}

#[test]
fn empty_paragraph_after_media_selects_the_media() {
	let mut editor = at(vec![Node::media("a.png"), Node::empty_paragraph()], &[1, 0], 0);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::media("a.png")]);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 0], 0)));
}

#[test]
fn leading_paragraph_is_removed_when_something_follows() {
	let mut editor = at(vec![Node::empty_paragraph(), Node::paragraph("b")], &[0, 0], 0);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::paragraph("b")]);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 0], 0)));
}

#[test]
fn leading_paragraph_before_a_rule_stays() {
	let mut editor = at(vec![Node::empty_paragraph(), Node::hr()], &[0, 0], 0);
	assert!(!backspace(&mut editor));

	let mut editor = at(vec![Node::empty_paragraph()], &[0, 0], 0);
	assert!(!backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::empty_paragraph()]);
}

#[test]
fn only_paragraph_in_a_quote_unwraps_it() {
	let mut editor = at(vec![Node::blockquote(vec![Node::paragraph("q")])], &[0, 0, 0], 0);
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::paragraph("q")]);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 0], 0)));
}

#[test]
fn first_paragraph_of_a_quote_moves_out_before_it() {
	let mut editor = at(
		vec![Node::blockquote(vec![Node::paragraph("q"), Node::paragraph("r")])],
		&[0, 0, 0],
		0,
	);
	assert!(backspace(&mut editor));
	assert_eq!(
		editor.document().children(),
		&[Node::paragraph("q"), Node::blockquote(vec![Node::paragraph("r")])]
	);
}

#[test]
fn quote_after_other_content_is_left_to_the_host() {
	let document = vec![Node::paragraph("x"), Node::blockquote(vec![Node::paragraph("q")])];
	let mut editor = at(document.clone(), &[1, 0, 0], 0);
	assert!(!backspace(&mut editor));
	assert_eq!(editor.document().children(), &document[..]);
	assert_eq!(editor.selection(), Some(&Range::caret([1, 0, 0], 0)));
}

#[test]
fn whole_document_selection_clears_everything() {
	let mut editor = Editor::new(Document::new(vec![Node::heading(1, "ab"), Node::paragraph("cd")]));
	editor
		.select(Range::new(Point::new([0, 0], 0), Point::new([1, 0], 2)))
		.unwrap();
	assert!(backspace(&mut editor));
	assert_eq!(editor.document().children(), &[Node::empty_paragraph()]);
	assert_eq!(editor.selection(), Some(&Range::caret([0, 0], 0)));
}

#[test]
fn partial_range_is_left_to_the_host() {
	let mut editor = Editor::new(Document::new(vec![Node::paragraph("ab"), Node::paragraph("cd")]));
	editor
		.select(Range::new(Point::new([0, 0], 1), Point::new([1, 0], 2)))
		.unwrap();
	assert!(!backspace(&mut editor));
	assert_eq!(editor.document().children().len(), 2);
}
