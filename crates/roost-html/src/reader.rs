//! Tag event source
//!
//! Thin adapter over the html5ever tokenizer: walks a markup string once and
//! reports element starts, element ends and character data to a handler, in
//! document order. No tree is built here and no tag is interpreted; that is
//! the parser's job. Tokenization cannot fail - malformed fragments produce a
//! best-effort partial event stream.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5ever::Attribute;

/// Receives structural events from [`read_markup`] in document order.
pub trait MarkupHandler {
    /// An element opened. Tag names arrive lowercased.
    fn start_element(&mut self, name: &str, attrs: &AttrList);
    /// An element closed.
    fn end_element(&mut self, name: &str);
    /// A run of character data, entities already decoded. Runs may arrive
    /// split at arbitrary points.
    fn text(&mut self, data: &str);
}

/// Attribute map handed to [`MarkupHandler::start_element`].
///
/// Names are lowercase; lookup is linear, which is fine for the handful of
/// attributes the restricted vocabulary carries.
#[derive(Debug, Default)]
pub struct AttrList {
    attrs: Vec<(String, String)>,
}

impl AttrList {
    fn from_tag(attrs: &[Attribute]) -> Self {
        Self {
            attrs: attrs
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect(),
        }
    }

    /// Value of the named attribute, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Check if there are no attributes
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// Walk `html` and report its structural events to `handler`.
///
/// Doctypes, comments and tokenizer-level parse errors are swallowed;
/// whatever could be tokenized is still delivered.
pub fn read_markup<H: MarkupHandler>(html: &str, handler: &mut H) {
    let sink = HandlerSink {
        handler: RefCell::new(handler),
    };
    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&input);
    tokenizer.end();
}

struct HandlerSink<'a, H: MarkupHandler> {
    handler: RefCell<&'a mut H>,
}

impl<'a, H: MarkupHandler> TokenSink for HandlerSink<'a, H> {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(Tag {
                kind,
                name,
                attrs,
                self_closing: _,
            }) => match kind {
                TagKind::StartTag => {
                    let attrs = AttrList::from_tag(&attrs);
                    self.handler.borrow_mut().start_element(&name, &attrs);
                }
                TagKind::EndTag => self.handler.borrow_mut().end_element(&name),
            },
            Token::CharacterTokens(data) => self.handler.borrow_mut().text(&data),
            Token::ParseError(err) => {
                tracing::trace!("tokenizer recovered from: {err}");
            }
            Token::DoctypeToken(_)
            | Token::CommentToken(_)
            | Token::NullCharacterToken
            | Token::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Ev {
        Start(String),
        End(String),
        Text(String),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Ev>,
        hrefs: Vec<String>,
    }

    impl MarkupHandler for Recorder {
        fn start_element(&mut self, name: &str, attrs: &AttrList) {
            if let Some(href) = attrs.get("href") {
                self.hrefs.push(href.to_string());
            }
            self.events.push(Ev::Start(name.to_string()));
        }

        fn end_element(&mut self, name: &str) {
            self.events.push(Ev::End(name.to_string()));
        }

        fn text(&mut self, data: &str) {
            // The tokenizer may split character runs; coalesce for stable
            // assertions.
            if let Some(Ev::Text(prev)) = self.events.last_mut() {
                prev.push_str(data);
            } else {
                self.events.push(Ev::Text(data.to_string()));
            }
        }
    }

    fn record(html: &str) -> Recorder {
        let mut recorder = Recorder::default();
        read_markup(html, &mut recorder);
        recorder
    }

    fn start(name: &str) -> Ev {
        Ev::Start(name.into())
    }
    fn end(name: &str) -> Ev {
        Ev::End(name.into())
    }
    fn text(data: &str) -> Ev {
        Ev::Text(data.into())
    }

    #[test]
    fn events_arrive_in_document_order() {
        let recorder = record("<p>Hi <b>there</b></p>");
        assert_eq!(
            recorder.events,
            [
                start("p"),
                text("Hi "),
                start("b"),
                text("there"),
                end("b"),
                end("p"),
            ]
        );
    }

    #[test]
    fn tag_names_are_lowercased() {
        let recorder = record("<P>x</P>");
        assert_eq!(recorder.events, [start("p"), text("x"), end("p")]);
    }

    #[test]
    fn entities_arrive_decoded() {
        let recorder = record("<p>a &amp; b</p>");
        assert_eq!(recorder.events, [start("p"), text("a & b"), end("p")]);
    }

    #[test]
    fn attributes_are_exposed_by_lowercase_name() {
        let recorder = record(r#"<a HREF="https://example.com/x">x</a>"#);
        assert_eq!(recorder.hrefs, ["https://example.com/x"]);
    }

    #[test]
    fn truncated_markup_yields_partial_stream() {
        let recorder = record("<p>text<b");
        assert_eq!(recorder.events, [start("p"), text("text")]);
    }

    #[test]
    fn garbage_does_not_panic() {
        for html in ["", "<", "<<>>", "</", "<p <<", "<!doctype html>", "<!-- c -->"] {
            let _ = record(html);
        }
    }
}
