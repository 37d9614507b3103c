//! Markdown rendering of a [`Document`].
//!
//! The output is for reading and asserting on, not for round-tripping:
//! there is no parser, and widgets without a markdown form render as
//! plain links or not at all.

use crate::document::Document;
use crate::node::{Element, ElementKind, ListKind, Marks, Node, PLACEHOLDER, Text};

#[cfg(test)]
mod tests;

/// Renders `document` as markdown, blocks separated by a blank line.
pub fn serialize(document: &Document) -> String {
	blocks(document.children())
}

fn blocks(nodes: &[Node]) -> String {
	nodes.iter().map(block).collect::<Vec<_>>().join("\n\n")
}

fn block(node: &Node) -> String {
	let element = match node {
		Node::Text(text) => return leaf(text),
		Node::Element(element) => element,
	};
	match &element.kind {
		ElementKind::Paragraph
		| ElementKind::TableCell
		| ElementKind::TableRow
		| ElementKind::CardBefore
		| ElementKind::CardAfter => inline(&element.children),
		ElementKind::Heading { level } => {
			format!("{} {}", "#".repeat(usize::from(*level)), inline(&element.children))
		}
		ElementKind::List { kind, task } => list(element, *kind, *task, 0),
		ElementKind::LegacyList { order } => list(element, ListKind::from_order(*order), false, 0),
		ElementKind::ListItem { .. } => {
			let mut out = String::new();
			list_item(&mut out, element, "- ", false, 0);
			out
		}
		ElementKind::Blockquote => quote(&blocks(&element.children)),
		ElementKind::CodeBlock { language, .. } => {
			let code: String = element.children.iter().map(Node::string).collect();
			format!("```{}\n{code}\n```", language.as_deref().unwrap_or_default())
		}
		ElementKind::Table => table(element),
		ElementKind::Card => {
			let content: Vec<Node> = element
				.children
				.iter()
				.filter(|child| !child.is(ElementKind::is_card_sentinel))
				.cloned()
				.collect();
			blocks(&content)
		}
		ElementKind::LinkCard { url } => format!("<{url}>"),
		ElementKind::Schema => String::new(),
		ElementKind::Media { url } => format!("![]({url})"),
		ElementKind::Attachment { url, name } => format!("[{name}]({url})"),
		ElementKind::Hr => "---".to_owned(),
		ElementKind::Break => "\n".to_owned(),
	}
}

fn inline(nodes: &[Node]) -> String {
	nodes
		.iter()
		.map(|node| match node {
			Node::Text(text) => leaf(text),
			Node::Element(element) if matches!(element.kind, ElementKind::Break) => "\n".to_owned(),
			Node::Element(element) => inline(&element.children),
		})
		.collect()
}

fn leaf(text: &Text) -> String {
	let content: String = text.text.chars().filter(|c| !PLACEHOLDER.contains(*c)).collect();
	if content.is_empty() || text.is_tag() {
		return content;
	}
	let mut out = content;
	for (mark, fence) in [
		(Marks::CODE, "`"),
		(Marks::STRIKETHROUGH, "~~"),
		(Marks::ITALIC, "*"),
		(Marks::BOLD, "**"),
	] {
		if text.marks.contains(mark) {
			out = format!("{fence}{out}{fence}");
		}
	}
	out
}

fn list(element: &Element, kind: ListKind, task: bool, depth: usize) -> String {
	let mut out = String::new();
	for (index, item) in element.children.iter().enumerate() {
		if index > 0 {
			out.push('\n');
		}
		let marker = match kind {
			ListKind::Ordered => format!("{}. ", index + 1),
			ListKind::Unordered => "- ".to_owned(),
		};
		match item {
			Node::Element(item) => list_item(&mut out, item, &marker, task, depth),
			Node::Text(text) => {
				out.push_str(&"  ".repeat(depth));
				out.push_str(&marker);
				out.push_str(&leaf(text));
			}
		}
	}
	out
}

fn list_item(out: &mut String, item: &Element, marker: &str, task: bool, depth: usize) {
	let indent = "  ".repeat(depth);
	out.push_str(&indent);
	out.push_str(marker);
	let checked = match item.kind {
		ElementKind::ListItem { checked } => checked,
		_ => None,
	};
	if task || checked.is_some() {
		out.push_str(if checked == Some(true) { "[x] " } else { "[ ] " });
	}

	let mut children = item.children.iter();
	if let Some(first) = children.next() {
		out.push_str(&block(first));
	}
	for child in children {
		out.push('\n');
		let shape = match child.kind() {
			Some(ElementKind::List { kind, task }) => Some((*kind, *task)),
			Some(ElementKind::LegacyList { order }) => Some((ListKind::from_order(*order), false)),
			_ => None,
		};
		match (shape, child.as_element()) {
			(Some((kind, task)), Some(nested)) => out.push_str(&list(nested, kind, task, depth + 1)),
			_ => {
				let nested = "  ".repeat(depth + 1);
				let lines: Vec<String> = block(child).lines().map(|line| format!("{nested}{line}")).collect();
				out.push_str(&lines.join("\n"));
			}
		}
	}
}

fn quote(content: &str) -> String {
	content
		.lines()
		.map(|line| if line.is_empty() { ">".to_owned() } else { format!("> {line}") })
		.collect::<Vec<_>>()
		.join("\n")
}

fn table(element: &Element) -> String {
	let mut lines = Vec::with_capacity(element.children.len() + 1);
	for (index, row) in element.children.iter().enumerate() {
		let cells: Vec<String> = row.children().iter().map(|cell| inline(cell.children()).replace('|', "\\|")).collect();
		lines.push(format!("| {} |", cells.join(" | ")));
		if index == 0 {
			lines.push(format!("|{}", " --- |".repeat(cells.len().max(1))));
		}
	}
	lines.join("\n")
}
