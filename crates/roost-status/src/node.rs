//! Block and inline nodes

use url::Url;

/// Top-level structural unit of a status body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// A run of inline content
    Paragraph(Vec<Inline>),
    /// A quote; recursively nestable. A quote written without explicit
    /// paragraph markup holds exactly one implicit paragraph.
    Quote(Vec<Block>),
    /// Verbatim text; never whitespace-normalized
    CodeBlock(String),
}

impl Block {
    /// Check if this is a paragraph
    #[inline]
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Get the inline run if this is a paragraph
    #[inline]
    pub fn as_paragraph(&self) -> Option<&[Inline]> {
        match self {
            Block::Paragraph(inlines) => Some(inlines),
            _ => None,
        }
    }

    /// Get the child blocks if this is a quote
    #[inline]
    pub fn as_quote(&self) -> Option<&[Block]> {
        match self {
            Block::Quote(children) => Some(children),
            _ => None,
        }
    }

    /// Get the raw text if this is a code block
    #[inline]
    pub fn as_code_block(&self) -> Option<&str> {
        match self {
            Block::CodeBlock(text) => Some(text),
            _ => None,
        }
    }
}

/// Content within a paragraph or inline container.
///
/// Wrapper variants nest freely (e.g. `Strong` containing `Emphasis`);
/// text inside them is already whitespace-normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inline {
    /// A normalized text run
    Text(String),
    /// An explicit line break
    LineBreak,
    /// Inline code span
    Code(Vec<Inline>),
    /// Bold
    Strong(Vec<Inline>),
    /// Italic
    Emphasis(Vec<Inline>),
    /// Underline
    Underline(Vec<Inline>),
    /// Strikethrough
    Strikethrough(Vec<Inline>),
    /// Subscript
    Subscript(Vec<Inline>),
    /// Superscript
    Superscript(Vec<Inline>),
    /// A hyperlink, possibly marking a mention of another account
    Link {
        /// Resolved link target
        target: Url,
        /// Raw entity identifier carried by mention markup, unvalidated;
        /// resolving it against a directory is the caller's concern
        mention: Option<String>,
        /// Wrapped inline content
        children: Vec<Inline>,
    },
}

impl Inline {
    /// Create a text run
    pub fn text(content: impl Into<String>) -> Self {
        Inline::Text(content.into())
    }

    /// Check if this is a text run
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Inline::Text(_))
    }

    /// Get the text content if this is a text run
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Inline::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the link target if this is a link
    #[inline]
    pub fn as_link(&self) -> Option<&Url> {
        match self {
            Inline::Link { target, .. } => Some(target),
            _ => None,
        }
    }
}
