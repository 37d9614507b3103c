//! Shorthand constructors for well-formed nodes.

use super::{Element, ElementKind, ListKind, Marks, Node, PLACEHOLDER, Text};

impl Node {
	/// A plain text leaf.
	pub fn text(text: impl Into<String>) -> Self {
		Text::new(text).into()
	}

	/// A text leaf with marks.
	pub fn marked(text: impl Into<String>, marks: Marks) -> Self {
		Text::with_marks(text, marks).into()
	}

	/// An element with the given children.
	pub fn element(kind: ElementKind, children: Vec<Node>) -> Self {
		Element::new(kind, children).into()
	}

	/// A paragraph holding one plain leaf.
	pub fn paragraph(text: impl Into<String>) -> Self {
		Self::element(ElementKind::Paragraph, vec![Self::text(text)])
	}

	/// An empty paragraph, the canonical empty block.
	pub fn empty_paragraph() -> Self {
		Self::paragraph("")
	}

	pub fn heading(level: u8, text: impl Into<String>) -> Self {
		Self::element(ElementKind::Heading { level }, vec![Self::text(text)])
	}

	pub fn list(kind: ListKind, items: Vec<Node>) -> Self {
		Self::element(ElementKind::List { kind, task: false }, items)
	}

	pub fn bulleted_list(items: Vec<Node>) -> Self {
		Self::list(ListKind::Unordered, items)
	}

	pub fn numbered_list(items: Vec<Node>) -> Self {
		Self::list(ListKind::Ordered, items)
	}

	/// A list item with explicit children.
	pub fn list_item(children: Vec<Node>) -> Self {
		Self::element(ElementKind::ListItem { checked: None }, children)
	}

	/// A list item holding a single paragraph.
	pub fn item(text: impl Into<String>) -> Self {
		Self::list_item(vec![Self::paragraph(text)])
	}

	pub fn blockquote(children: Vec<Node>) -> Self {
		Self::element(ElementKind::Blockquote, children)
	}

	pub fn code_block(language: Option<&str>, code: impl Into<String>) -> Self {
		Self::element(
			ElementKind::CodeBlock {
				language: language.map(str::to_owned),
				render_as_html: false,
			},
			vec![Self::text(code)],
		)
	}

	/// A table whose rows hold plain-text cells.
	pub fn table<R, C>(rows: R) -> Self
	where
		R: IntoIterator<Item = C>,
		C: IntoIterator,
		C::Item: Into<String>,
	{
		let rows = rows
			.into_iter()
			.map(|row| {
				let cells = row
					.into_iter()
					.map(|cell| Self::element(ElementKind::TableCell, vec![Self::text(cell)]))
					.collect();
				Self::element(ElementKind::TableRow, cells)
			})
			.collect();
		Self::element(ElementKind::Table, rows)
	}

	/// A card bracketing `content` with its two sentinels.
	pub fn card(content: Vec<Node>) -> Self {
		let mut children = Vec::with_capacity(content.len() + 2);
		children.push(Self::sentinel(ElementKind::CardBefore));
		children.extend(content);
		children.push(Self::sentinel(ElementKind::CardAfter));
		Self::element(ElementKind::Card, children)
	}

	/// A card sentinel holding the zero-width placeholder.
	pub fn sentinel(kind: ElementKind) -> Self {
		Self::element(kind, vec![Self::text(PLACEHOLDER)])
	}

	pub fn link_card(url: impl Into<String>) -> Self {
		Self::void(ElementKind::LinkCard { url: url.into() })
	}

	pub fn schema() -> Self {
		Self::void(ElementKind::Schema)
	}

	pub fn media(url: impl Into<String>) -> Self {
		Self::void(ElementKind::Media { url: url.into() })
	}

	pub fn attachment(url: impl Into<String>, name: impl Into<String>) -> Self {
		Self::void(ElementKind::Attachment {
			url: url.into(),
			name: name.into(),
		})
	}

	pub fn hr() -> Self {
		Self::void(ElementKind::Hr)
	}

	pub fn line_break() -> Self {
		Self::void(ElementKind::Break)
	}

	/// An element holding a single empty leaf so a caret can rest in it.
	fn void(kind: ElementKind) -> Self {
		Self::element(kind, vec![Self::text("")])
	}
}
