//! Round-trip serializer
//!
//! Deterministic, indented rendering of a document back into the restricted
//! vocabulary. This exists for tests and debugging: round-trip assertions
//! compare parsed structure by exact rendered shape. It does not escape text
//! and makes no attempt to reproduce input byte-for-byte.

use roost_status::{Block, Document, Inline};

/// Render `doc` as indented restricted HTML, one block tag per line, two
/// spaces of indentation per nesting level.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        write_block(&mut out, block, 0);
    }
    out
}

fn write_block(out: &mut String, block: &Block, depth: usize) {
    match block {
        Block::Paragraph(inlines) => {
            push_indent(out, depth);
            out.push_str("<p>\n");
            push_indent(out, depth + 1);
            write_inlines(out, inlines, depth + 1);
            out.push('\n');
            push_indent(out, depth);
            out.push_str("</p>\n");
        }
        Block::Quote(children) => {
            push_indent(out, depth);
            out.push_str("<blockquote>\n");
            for child in children {
                write_block(out, child, depth + 1);
            }
            push_indent(out, depth);
            out.push_str("</blockquote>\n");
        }
        Block::CodeBlock(text) => {
            // Verbatim content stays on one unindented line.
            out.push_str("<pre>");
            out.push_str(text);
            out.push_str("</pre>\n");
        }
    }
}

fn write_inlines(out: &mut String, inlines: &[Inline], depth: usize) {
    for inline in inlines {
        write_inline(out, inline, depth);
    }
}

fn write_inline(out: &mut String, inline: &Inline, depth: usize) {
    match inline {
        Inline::Text(text) => out.push_str(text),
        Inline::LineBreak => {
            out.push_str("<br>\n");
            push_indent(out, depth);
        }
        Inline::Strong(children) => write_wrapped(out, "b", children, depth),
        Inline::Emphasis(children) => write_wrapped(out, "i", children, depth),
        Inline::Underline(children) => write_wrapped(out, "u", children, depth),
        Inline::Strikethrough(children) => write_wrapped(out, "s", children, depth),
        Inline::Code(children) => write_wrapped(out, "code", children, depth),
        Inline::Subscript(children) => write_wrapped(out, "sub", children, depth),
        Inline::Superscript(children) => write_wrapped(out, "sup", children, depth),
        Inline::Link {
            target,
            mention,
            children,
        } => {
            out.push_str("<a href=\"");
            out.push_str(target.as_str());
            out.push('"');
            if let Some(id) = mention {
                out.push_str(" class=\"mention\" data-user=\"");
                out.push_str(id);
                out.push('"');
            }
            out.push('>');
            write_inlines(out, children, depth);
            out.push_str("</a>");
        }
    }
}

fn write_wrapped(out: &mut String, tag: &str, children: &[Inline], depth: usize) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    write_inlines(out, children, depth);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_status::Url;

    #[test]
    fn paragraph_renders_on_indented_line() {
        let doc = Document::plain("hello");
        assert_eq!(to_html(&doc), "<p>\n  hello\n</p>\n");
    }

    #[test]
    fn code_block_renders_unindented() {
        let doc = Document::new(vec![Block::Quote(vec![
            Block::CodeBlock("let x = 1;".into()),
        ])]);
        assert_eq!(
            to_html(&doc),
            "<blockquote>\n<pre>let x = 1;</pre>\n</blockquote>\n"
        );
    }

    #[test]
    fn mention_link_renders_marker_and_identifier() {
        let target = Url::parse("https://example.social/@alice").expect("valid url");
        let doc = Document::new(vec![Block::Paragraph(vec![Inline::Link {
            target,
            mention: Some("42".into()),
            children: vec![Inline::text("@alice")],
        }])]);
        assert_eq!(
            to_html(&doc),
            "<p>\n  <a href=\"https://example.social/@alice\" class=\"mention\" data-user=\"42\">@alice</a>\n</p>\n"
        );
    }

    #[test]
    fn nested_wrappers_render_inline() {
        let doc = Document::new(vec![Block::Paragraph(vec![Inline::Strong(vec![
            Inline::Emphasis(vec![Inline::text("x")]),
        ])])]);
        assert_eq!(to_html(&doc), "<p>\n  <b><i>x</i></b>\n</p>\n");
    }
}
