//! Serialization tests for the content model (require the `serde` feature).

#![cfg(feature = "serde")]

use roost_status::{Block, Document, Inline, Url};

#[test]
fn document_survives_json_round_trip() {
    let target = Url::parse("https://example.social/@alice").expect("valid url");
    let doc = Document::new(vec![
        Block::Paragraph(vec![
            Inline::text("hello "),
            Inline::Link {
                target,
                mention: Some("42".into()),
                children: vec![Inline::text("@alice")],
            },
            Inline::LineBreak,
            Inline::Strong(vec![Inline::text("loud")]),
        ]),
        Block::Quote(vec![Block::Paragraph(vec![Inline::text("quoted")])]),
        Block::CodeBlock("let x = 1;\n".into()),
    ]);

    let json = serde_json::to_string(&doc).expect("serialize");
    let back: Document = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(doc, back);
}
