//! Block tree node model.
//!
//! A document is an ordered forest of [`Node`]s. Every node is either an
//! [`Element`] (a tagged [`ElementKind`] owning ordered children) or a
//! [`Text`] leaf (a run of characters plus a flat set of [`Marks`]).

use bitflags::bitflags;
use serde::Deserialize;

mod build;

/// Zero-width placeholder held by card sentinels.
pub const PLACEHOLDER: &str = "\u{FEFF}";

bitflags! {
	/// Inline formatting carried by a text leaf.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Marks: u16 {
		const BOLD = 1 << 0;
		const ITALIC = 1 << 1;
		const STRIKETHROUGH = 1 << 2;
		const UNDERLINE = 1 << 3;
		/// Inline code.
		const CODE = 1 << 4;
		/// An inline tag token (typed with a trigger such as `#` or `@`).
		const TAG = 1 << 5;
	}
}

/// Ordered or unordered list flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
	/// Numbered list.
	Ordered,
	/// Bulleted list.
	#[default]
	Unordered,
}

impl ListKind {
	/// Maps the legacy boolean `order` flag onto a list kind.
	pub fn from_order(order: Option<bool>) -> Self {
		if order.unwrap_or(false) { Self::Ordered } else { Self::Unordered }
	}
}

/// The closed set of element kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
	Paragraph,
	Heading {
		/// Heading level, 1 through 4.
		level: u8,
	},
	List {
		kind: ListKind,
		/// Whether items render with checkboxes.
		task: bool,
	},
	/// Pre-migration list shape carrying a boolean order flag.
	LegacyList {
		order: Option<bool>,
	},
	ListItem {
		checked: Option<bool>,
	},
	Table,
	TableRow,
	TableCell,
	Blockquote,
	CodeBlock {
		language: Option<String>,
		render_as_html: bool,
	},
	Card,
	CardBefore,
	CardAfter,
	LinkCard {
		url: String,
	},
	/// Structured form widget; atomic like a card but without sentinels.
	Schema,
	Media {
		url: String,
	},
	Attachment {
		url: String,
		name: String,
	},
	Hr,
	Break,
}

impl ElementKind {
	/// Stable lowercase name used in logs and serialized output.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Paragraph => "paragraph",
			Self::Heading { .. } => "heading",
			Self::List {
				kind: ListKind::Ordered,
				..
			} => "numbered-list",
			Self::List {
				kind: ListKind::Unordered,
				..
			} => "bulleted-list",
			Self::LegacyList { .. } => "list",
			Self::ListItem { .. } => "list-item",
			Self::Table => "table",
			Self::TableRow => "table-row",
			Self::TableCell => "table-cell",
			Self::Blockquote => "blockquote",
			Self::CodeBlock { .. } => "code",
			Self::Card => "card",
			Self::CardBefore => "card-before",
			Self::CardAfter => "card-after",
			Self::LinkCard { .. } => "link-card",
			Self::Schema => "schema",
			Self::Media { .. } => "media",
			Self::Attachment { .. } => "attach",
			Self::Hr => "hr",
			Self::Break => "break",
		}
	}

	/// Lists in either the current or the legacy shape.
	pub fn is_list(&self) -> bool {
		matches!(self, Self::List { .. } | Self::LegacyList { .. })
	}

	pub fn is_list_item(&self) -> bool {
		matches!(self, Self::ListItem { .. })
	}

	pub fn is_paragraph(&self) -> bool {
		matches!(self, Self::Paragraph)
	}

	pub fn is_card_sentinel(&self) -> bool {
		matches!(self, Self::CardBefore | Self::CardAfter)
	}

	/// Media and attachments: removable as a unit, no editable text.
	pub fn is_media(&self) -> bool {
		matches!(self, Self::Media { .. } | Self::Attachment { .. })
	}

	/// Elements with no editable text of their own.
	pub fn is_void(&self) -> bool {
		matches!(
			self,
			Self::Media { .. } | Self::Attachment { .. } | Self::Hr | Self::Break
		)
	}

	/// Elements that flow inside a text block rather than stacking as blocks.
	pub fn is_inline(&self) -> bool {
		matches!(self, Self::Break)
	}

	/// Elements that may stand on their own in a block position.
	pub fn is_block(&self) -> bool {
		!matches!(
			self,
			Self::Break | Self::CardBefore | Self::CardAfter | Self::TableRow | Self::TableCell
		)
	}

	/// Elements whose children are text leaves and inline elements.
	pub fn holds_inline_content(&self) -> bool {
		matches!(
			self,
			Self::Paragraph
				| Self::Heading { .. }
				| Self::TableCell
				| Self::CodeBlock { .. }
				| Self::CardBefore
				| Self::CardAfter
				| Self::Media { .. }
				| Self::Attachment { .. }
				| Self::Hr
				| Self::Break
		)
	}

	/// Block containers that must not survive with zero children.
	pub fn is_removable_when_empty(&self) -> bool {
		matches!(
			self,
			Self::List { .. } | Self::LegacyList { .. } | Self::Table | Self::TableRow | Self::Blockquote
		)
	}

	/// Subtrees that must never be split into two siblings.
	pub fn is_atomic(&self) -> bool {
		matches!(
			self,
			Self::CodeBlock { .. } | Self::Card | Self::CardBefore | Self::CardAfter
		)
	}
}

/// An inner node: a kind plus its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	pub kind: ElementKind,
	pub children: Vec<Node>,
}

impl Element {
	pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
		Self { kind, children }
	}

	/// An element of `kind` with no children yet.
	pub fn empty(kind: ElementKind) -> Self {
		Self::new(kind, Vec::new())
	}
}

/// A text leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
	pub text: String,
	pub marks: Marks,
	/// Characters that opened a tag (for example `#`), kept so demoting the
	/// tag can strip them again.
	pub trigger: Option<String>,
}

impl Text {
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Self::default()
		}
	}

	pub fn with_marks(text: impl Into<String>, marks: Marks) -> Self {
		Self {
			text: text.into(),
			marks,
			trigger: None,
		}
	}

	/// Length in characters.
	pub fn char_len(&self) -> usize {
		self.text.chars().count()
	}

	pub fn is_tag(&self) -> bool {
		self.marks.contains(Marks::TAG)
	}

	/// Text and formatting are compatible for merging into one leaf.
	pub fn same_format(&self, other: &Text) -> bool {
		self.marks == other.marks && self.trigger == other.trigger
	}
}

/// A node of the block tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	Element(Element),
	Text(Text),
}

impl Node {
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(element) => Some(element),
			Self::Text(_) => None,
		}
	}

	pub fn as_element_mut(&mut self) -> Option<&mut Element> {
		match self {
			Self::Element(element) => Some(element),
			Self::Text(_) => None,
		}
	}

	pub fn as_text(&self) -> Option<&Text> {
		match self {
			Self::Text(text) => Some(text),
			Self::Element(_) => None,
		}
	}

	pub fn as_text_mut(&mut self) -> Option<&mut Text> {
		match self {
			Self::Text(text) => Some(text),
			Self::Element(_) => None,
		}
	}

	/// The element kind, or `None` for a text leaf.
	pub fn kind(&self) -> Option<&ElementKind> {
		self.as_element().map(|element| &element.kind)
	}

	/// Returns true if this is an element matching `predicate`.
	pub fn is(&self, predicate: impl FnOnce(&ElementKind) -> bool) -> bool {
		self.kind().is_some_and(predicate)
	}

	pub fn is_text(&self) -> bool {
		matches!(self, Self::Text(_))
	}

	/// Children of an element; a text leaf has none.
	pub fn children(&self) -> &[Node] {
		match self {
			Self::Element(element) => &element.children,
			Self::Text(_) => &[],
		}
	}

	/// Concatenated text of the subtree, without sentinel placeholders.
	pub fn string(&self) -> String {
		let mut out = String::new();
		self.collect_string(&mut out);
		out
	}

	fn collect_string(&self, out: &mut String) {
		match self {
			Self::Text(text) => out.extend(text.text.chars().filter(|c| *c != '\u{FEFF}')),
			Self::Element(element) => {
				for child in &element.children {
					child.collect_string(out);
				}
			}
		}
	}

	/// True when the subtree carries no visible text.
	pub fn is_text_empty(&self) -> bool {
		self.string().is_empty()
	}

	/// Number of nodes in the subtree, this one included.
	pub fn subtree_len(&self) -> usize {
		1 + self.children().iter().map(Node::subtree_len).sum::<usize>()
	}
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<Text> for Node {
	fn from(text: Text) -> Self {
		Self::Text(text)
	}
}
