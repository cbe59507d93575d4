//! Status body parser
//!
//! Consumes tag events from the reader, drives the whitespace collapser and
//! assembles the document model in one pass. Open/close events are not
//! guaranteed to be balanced, so the builder keeps explicit frame stacks
//! instead of recursing: a stack of open inline lists (paragraphs, styled
//! spans, anchors) above a permanent root inline frame, and a stack of open
//! quote block lists above the root block list.
//!
//! Anything outside the whitelist is dropped, never rejected: unknown tags
//! contribute only their character data, stray end tags are ignored, and a
//! link without a resolvable target dissolves into its children.

use roost_status::{Block, Document, Inline};
use url::Url;

use crate::reader::{self, AttrList, MarkupHandler};
use crate::whitespace::{self, WhitespaceState};

/// Parse a status body into a document.
///
/// Never fails: whatever structure can be assembled from the input is
/// returned, down to an empty document for empty input. Bare text without
/// any block markup comes back as a single implicit paragraph.
pub fn parse(html: &str) -> Document {
    tracing::debug!("parsing status body ({} bytes)", html.len());
    let mut builder = ContentBuilder::new();
    reader::read_markup(html, &mut builder);
    let doc = builder.finish();
    tracing::debug!("parsed {} top-level blocks", doc.blocks().len());
    doc
}

/// The tag whitelist as a closed set; everything else falls into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagClass {
    Paragraph,
    Quote,
    Code,
    Break,
    Span(SpanKind),
    Anchor,
    Other,
}

/// Inline wrapper kinds. The server treats `strong`/`em`/`del` as synonyms
/// for `b`/`i`/`s`, so they classify identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Strong,
    Emphasis,
    Underline,
    Strikethrough,
    Code,
    Subscript,
    Superscript,
}

fn classify(name: &str) -> TagClass {
    match name {
        "p" => TagClass::Paragraph,
        "blockquote" => TagClass::Quote,
        "pre" => TagClass::Code,
        "br" => TagClass::Break,
        "b" | "strong" => TagClass::Span(SpanKind::Strong),
        "i" | "em" => TagClass::Span(SpanKind::Emphasis),
        "u" => TagClass::Span(SpanKind::Underline),
        "s" | "del" => TagClass::Span(SpanKind::Strikethrough),
        "code" => TagClass::Span(SpanKind::Code),
        "sub" => TagClass::Span(SpanKind::Subscript),
        "sup" => TagClass::Span(SpanKind::Superscript),
        "a" => TagClass::Anchor,
        _ => TagClass::Other,
    }
}

impl SpanKind {
    fn wrap(self, children: Vec<Inline>) -> Inline {
        match self {
            SpanKind::Strong => Inline::Strong(children),
            SpanKind::Emphasis => Inline::Emphasis(children),
            SpanKind::Underline => Inline::Underline(children),
            SpanKind::Strikethrough => Inline::Strikethrough(children),
            SpanKind::Code => Inline::Code(children),
            SpanKind::Subscript => Inline::Subscript(children),
            SpanKind::Superscript => Inline::Superscript(children),
        }
    }
}

/// A currently-open, not-yet-finalized inline list.
#[derive(Debug)]
struct InlineFrame {
    kind: FrameKind,
    children: Vec<Inline>,
}

impl InlineFrame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }
}

#[derive(Debug)]
enum FrameKind {
    /// An open `<p>`
    Paragraph,
    /// An open inline wrapper; the closing tag picks the node type
    Span,
    /// An open `<a>` with whatever its attributes carried
    Anchor {
        target: Option<Url>,
        mention: Option<String>,
    },
}

struct ContentBuilder {
    /// Inline content with no open frame above it. Pending quote content
    /// lands here; at extraction it only survives if no block was built.
    root_inline: Vec<Inline>,
    /// Open paragraph/span/anchor frames, innermost last
    frames: Vec<InlineFrame>,
    /// Finished top-level blocks
    root_blocks: Vec<Block>,
    /// Open quote block lists, innermost last
    quotes: Vec<Vec<Block>>,
    /// `<pre>` nesting depth; while non-zero all text goes to `code_text`
    code_depth: usize,
    code_text: String,
    ws: WhitespaceState,
}

impl ContentBuilder {
    fn new() -> Self {
        Self {
            root_inline: Vec::new(),
            frames: Vec::new(),
            root_blocks: Vec::new(),
            quotes: Vec::new(),
            code_depth: 0,
            code_text: String::new(),
            ws: WhitespaceState::default(),
        }
    }

    fn top_inlines(&mut self) -> &mut Vec<Inline> {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root_inline,
        }
    }

    fn top_blocks(&mut self) -> &mut Vec<Block> {
        match self.quotes.last_mut() {
            Some(quote) => quote,
            None => &mut self.root_blocks,
        }
    }

    /// Append an inline node, merging adjacent text runs.
    fn push_inline(&mut self, node: Inline) {
        let inlines = self.top_inlines();
        match (inlines.last_mut(), node) {
            (Some(Inline::Text(prev)), Inline::Text(next)) => prev.push_str(&next),
            (_, node) => inlines.push(node),
        }
    }

    /// Splice open span/anchor frames into their parents, leaving at most an
    /// open paragraph frame. Their wrapping tag never closed, so the content
    /// is kept unwrapped.
    fn unwind_spans(&mut self) {
        while self
            .frames
            .last()
            .is_some_and(|f| !matches!(f.kind, FrameKind::Paragraph))
        {
            if let Some(frame) = self.frames.pop() {
                for node in frame.children {
                    self.push_inline(node);
                }
            }
        }
    }

    /// Finalize the open paragraph, if one is open. Pending root-frame
    /// content is never finalized here: it belongs to a quote still being
    /// assembled, or stays pending for extraction.
    fn close_paragraph(&mut self) {
        self.unwind_spans();
        if self
            .frames
            .last()
            .is_some_and(|f| matches!(f.kind, FrameKind::Paragraph))
        {
            if let Some(frame) = self.frames.pop() {
                self.top_blocks().push(Block::Paragraph(frame.children));
            }
        }
    }

    fn close_quote(&mut self) {
        let Some(mut quote_blocks) = self.quotes.pop() else {
            return;
        };
        if quote_blocks.is_empty() {
            // No explicit paragraph markup inside: whatever inline content is
            // pending becomes the quote's single implicit paragraph.
            self.unwind_spans();
            let pending = std::mem::take(self.top_inlines());
            quote_blocks.push(Block::Paragraph(pending));
        }
        self.top_blocks().push(Block::Quote(quote_blocks));
    }

    fn close_inline(&mut self, ended_by: TagClass) {
        let open_span = self
            .frames
            .last()
            .is_some_and(|f| !matches!(f.kind, FrameKind::Paragraph));
        if !open_span {
            // Unbalanced close with no open inline frame: ignore.
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match (ended_by, frame.kind) {
            // A captured target makes a link; without one the markup is
            // dropped and the content kept.
            (
                TagClass::Anchor,
                FrameKind::Anchor {
                    target: Some(target),
                    mention,
                },
            ) => self.push_inline(Inline::Link {
                target,
                mention,
                children: frame.children,
            }),
            (TagClass::Anchor, _) => {
                for node in frame.children {
                    self.push_inline(node);
                }
            }
            (TagClass::Span(kind), _) => self.push_inline(kind.wrap(frame.children)),
            _ => {}
        }
    }

    fn finish(mut self) -> Document {
        // The stream may end with structures still open; finalize them
        // bottom-up so truncated input degrades to the closed form.
        if self.code_depth > 0 {
            self.code_depth = 0;
            let text = std::mem::take(&mut self.code_text);
            self.top_blocks().push(Block::CodeBlock(text));
        }
        self.close_paragraph();
        while !self.quotes.is_empty() {
            self.close_quote();
        }
        if !self.root_blocks.is_empty() {
            return Document::new(self.root_blocks);
        }
        if !self.root_inline.is_empty() {
            // Bare inline content with no block wrapper at all.
            return Document::new(vec![Block::Paragraph(self.root_inline)]);
        }
        Document::new(Vec::new())
    }
}

impl MarkupHandler for ContentBuilder {
    fn start_element(&mut self, name: &str, attrs: &AttrList) {
        let class = classify(name);
        if self.code_depth > 0 {
            // Inside a code block only the fence itself matters; nested
            // markup contributes its raw text and nothing else.
            if class == TagClass::Code {
                self.code_depth += 1;
            }
            return;
        }
        match class {
            TagClass::Paragraph => {
                self.close_paragraph();
                self.frames.push(InlineFrame::new(FrameKind::Paragraph));
                self.ws.arm();
            }
            TagClass::Quote => {
                self.close_paragraph();
                self.quotes.push(Vec::new());
                self.ws.arm();
            }
            TagClass::Code => {
                self.code_depth = 1;
                // Stripping resumes on whatever follows the block.
                self.ws.arm();
            }
            TagClass::Break => {
                self.push_inline(Inline::LineBreak);
                self.ws.arm();
            }
            TagClass::Span(_) => {
                self.frames.push(InlineFrame::new(FrameKind::Span));
            }
            TagClass::Anchor => {
                let target = attrs.get("href").and_then(|href| Url::parse(href).ok());
                let mention = attrs
                    .get("class")
                    .filter(|classes| {
                        classes.split_ascii_whitespace().any(|c| c == "mention")
                    })
                    .and_then(|_| attrs.get("data-user"))
                    .map(str::to_owned);
                self.frames
                    .push(InlineFrame::new(FrameKind::Anchor { target, mention }));
            }
            TagClass::Other => {
                tracing::trace!(tag = name, "ignoring tag outside the whitelist");
            }
        }
    }

    fn end_element(&mut self, name: &str) {
        let class = classify(name);
        if self.code_depth > 0 {
            if class == TagClass::Code {
                self.code_depth -= 1;
                if self.code_depth == 0 {
                    let text = std::mem::take(&mut self.code_text);
                    self.top_blocks().push(Block::CodeBlock(text));
                }
            }
            return;
        }
        match class {
            TagClass::Paragraph => self.close_paragraph(),
            TagClass::Quote => self.close_quote(),
            TagClass::Span(_) | TagClass::Anchor => self.close_inline(class),
            // Stray `</pre>` outside a code block, `</br>`, or an unknown
            // end tag: nothing to do.
            TagClass::Code | TagClass::Break | TagClass::Other => {}
        }
    }

    fn text(&mut self, data: &str) {
        if self.code_depth > 0 {
            self.code_text.push_str(data);
            return;
        }
        let collapsed = whitespace::collapse(data, &mut self.ws);
        if collapsed.is_empty() {
            return;
        }
        self.push_inline(Inline::Text(collapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_paragraph() {
        let doc = parse("<p>Hello</p>");
        assert_eq!(doc, Document::plain("Hello"));
    }

    #[test]
    fn mention_link_carries_identifier() {
        let doc = parse(
            r#"<p><a href="https://example.social/@alice" class="u-url mention" data-user="42">@alice</a></p>"#,
        );
        let Some(Block::Paragraph(inlines)) = doc.blocks().first() else {
            panic!("expected a paragraph");
        };
        let Some(Inline::Link {
            target, mention, ..
        }) = inlines.first()
        else {
            panic!("expected a link");
        };
        assert_eq!(target.as_str(), "https://example.social/@alice");
        assert_eq!(mention.as_deref(), Some("42"));
    }

    #[test]
    fn mention_class_without_identifier_stays_plain_link() {
        let doc = parse(r#"<p><a href="https://example.com/" class="mention">x</a></p>"#);
        let Some(Block::Paragraph(inlines)) = doc.blocks().first() else {
            panic!("expected a paragraph");
        };
        assert!(matches!(
            inlines.first(),
            Some(Inline::Link { mention: None, .. })
        ));
    }

    #[test]
    fn unknown_tags_are_transparent() {
        let doc = parse(r#"<p><span class="invisible">https://</span>example</p>"#);
        assert_eq!(doc, Document::plain("https://example"));
    }
}
