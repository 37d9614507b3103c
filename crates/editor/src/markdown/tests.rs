use pretty_assertions::assert_eq;

use super::*;

fn render(children: Vec<Node>) -> String {
	serialize(&Document::new(children))
}

#[test]
fn headings_and_paragraphs() {
	assert_eq!(
		render(vec![Node::heading(2, "Title"), Node::paragraph("body")]),
		"## Title\n\nbody"
	);
}

#[test]
fn marks_wrap_their_text() {
	let paragraph = Node::element(
		ElementKind::Paragraph,
		vec![
			Node::marked("b", Marks::BOLD),
			Node::text(" "),
			Node::marked("i", Marks::ITALIC),
			Node::text(" "),
			Node::marked("c", Marks::CODE),
			Node::text(" "),
			Node::marked("s", Marks::STRIKETHROUGH),
		],
	);
	assert_eq!(render(vec![paragraph]), "**b** *i* `c` ~~s~~");
}

#[test]
fn tags_print_raw() {
	let tag = Text {
		text: "#todo".into(),
		marks: Marks::TAG | Marks::CODE,
		trigger: Some("#".into()),
	};
	let paragraph = Node::element(ElementKind::Paragraph, vec![Node::text("see "), tag.into()]);
	assert_eq!(render(vec![paragraph]), "see #todo");
}

#[test]
fn nested_lists_indent() {
	let list = Node::bulleted_list(vec![
		Node::item("a"),
		Node::list_item(vec![
			Node::paragraph("b"),
			Node::numbered_list(vec![Node::item("c"), Node::item("d")]),
		]),
	]);
	assert_eq!(render(vec![list]), "- a\n- b\n  1. c\n  2. d");
}

#[test]
fn task_items_carry_checkboxes() {
	let list = Node::element(
		ElementKind::List {
			kind: ListKind::Unordered,
			task: true,
		},
		vec![
			Node::element(ElementKind::ListItem { checked: Some(true) }, vec![Node::paragraph("x")]),
			Node::item("y"),
		],
	);
	assert_eq!(render(vec![list]), "- [x] x\n- [ ] y");
}

#[test]
fn extra_item_blocks_are_indented() {
	let list = Node::bulleted_list(vec![Node::list_item(vec![Node::paragraph("a"), Node::paragraph("b")])]);
	assert_eq!(render(vec![list]), "- a\n  b");
}

#[test]
fn blockquotes_prefix_every_line() {
	let quote = Node::blockquote(vec![Node::paragraph("a"), Node::paragraph("b")]);
	assert_eq!(render(vec![quote]), "> a\n>\n> b");
}

#[test]
fn code_blocks_are_fenced() {
	assert_eq!(
		render(vec![Node::code_block(Some("rust"), "let x;\nlet y;")]),
		"```rust\nlet x;\nlet y;\n```"
	);
	assert_eq!(render(vec![Node::code_block(None, "plain")]), "```\nplain\n```");
}

#[test]
fn tables_render_as_pipes() {
	let table = Node::table([["a", "b|c"], ["1", "2"]]);
	assert_eq!(render(vec![table]), "| a | b\\|c |\n| --- | --- |\n| 1 | 2 |");
}

#[test]
fn widgets_and_voids() {
	let document = vec![
		Node::card(vec![Node::paragraph("inside")]),
		Node::link_card("https://a.test"),
		Node::media("cat.png"),
		Node::attachment("f.pdf", "f"),
		Node::hr(),
	];
	assert_eq!(
		render(document),
		"inside\n\n<https://a.test>\n\n![](cat.png)\n\n[f](f.pdf)\n\n---"
	);
}

#[test]
fn line_breaks_inside_paragraphs() {
	let paragraph = Node::element(
		ElementKind::Paragraph,
		vec![Node::text("a"), Node::line_break(), Node::text("b")],
	);
	assert_eq!(render(vec![paragraph]), "a\nb");
}
