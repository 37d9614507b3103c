use pretty_assertions::assert_eq;

use super::*;
use crate::config::{EditorConfig, ListConfig};
use crate::document::Document;
use crate::node::Text;

fn normalized(children: Vec<Node>) -> Vec<Node> {
	let mut editor = Editor::new(Document::new(children));
	editor.normalize_all().unwrap();
	editor.into_document().into_children()
}

#[test]
fn legacy_list_is_migrated() {
	let legacy = Node::element(ElementKind::LegacyList { order: Some(true) }, vec![Node::item("one")]);
	assert_eq!(normalized(vec![legacy]), vec![Node::numbered_list(vec![Node::item("one")])]);
}

#[test]
fn non_item_child_is_retyped_in_place() {
	let list = Node::bulleted_list(vec![Node::item("a"), Node::paragraph("b")]);
	assert_eq!(
		normalized(vec![list]),
		vec![Node::bulleted_list(vec![Node::item("a"), Node::item("b")])]
	);
}

#[test]
fn bare_text_in_list_gets_an_item() {
	let list = Node::bulleted_list(vec![Node::text("loose")]);
	assert_eq!(normalized(vec![list]), vec![Node::bulleted_list(vec![Node::item("loose")])]);
}

#[test]
fn empty_item_gets_a_paragraph() {
	let list = Node::bulleted_list(vec![Node::list_item(vec![])]);
	assert_eq!(normalized(vec![list]), vec![Node::bulleted_list(vec![Node::item("")])]);
}

#[test]
fn table_leaves_the_list() {
	let table = Node::table([["a", "b"]]);
	let list = Node::bulleted_list(vec![Node::list_item(vec![table.clone()])]);
	assert_eq!(
		normalized(vec![list]),
		vec![Node::bulleted_list(vec![Node::item("")]), table]
	);
}

#[test]
fn trailing_block_moves_into_a_sublist_of_the_same_kind() {
	let list = Node::numbered_list(vec![Node::list_item(vec![Node::paragraph("a"), Node::paragraph("b")])]);
	assert_eq!(
		normalized(vec![list]),
		vec![Node::numbered_list(vec![Node::list_item(vec![
			Node::paragraph("a"),
			Node::numbered_list(vec![Node::item("b")]),
		])])]
	);
}

#[test]
fn stray_inline_joins_the_leading_paragraph() {
	let list = Node::bulleted_list(vec![Node::list_item(vec![Node::paragraph("a"), Text::new("b").into()])]);
	assert_eq!(normalized(vec![list]), vec![Node::bulleted_list(vec![Node::item("ab")])]);
}

#[test]
fn synthesized_list_without_enclosing_list_uses_configured_kind() {
	let config = EditorConfig {
		lists: ListConfig {
			default_kind: ListKind::Ordered,
		},
		..EditorConfig::default()
	};
	let item = Node::list_item(vec![Node::paragraph("a"), Node::paragraph("b")]);
	let mut editor = Editor::with_config(Document::new(vec![item]), config);
	editor.normalize_all().unwrap();
	assert_eq!(
		editor.document().children(),
		&[Node::list_item(vec![
			Node::paragraph("a"),
			Node::numbered_list(vec![Node::item("b")]),
		])]
	);
}

#[test]
fn block_inserted_into_a_list_arrives_in_an_item() {
	let mut editor = Editor::new(Document::new(vec![Node::bulleted_list(vec![Node::item("a")])]));
	editor.insert_node(Node::paragraph("b"), &Path::from([0, 1])).unwrap();
	assert_eq!(
		editor.document().children(),
		&[Node::bulleted_list(vec![Node::item("a"), Node::item("b")])]
	);
}
