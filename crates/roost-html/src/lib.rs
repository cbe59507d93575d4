//! Roost restricted-HTML parser
//!
//! Converts the restricted HTML vocabulary the server emits inside status
//! bodies (paragraphs, breaks, inline styling, code, quotes, links and
//! mentions) into the [`roost_status`] document model. One streaming pass
//! over tokenizer events; malformed or unexpected markup degrades instead of
//! failing.
//!
//! ```
//! use roost_html::parse;
//!
//! let doc = parse("<p>Hello <b>world</b></p>");
//! assert_eq!(doc.blocks().len(), 1);
//! ```

mod parser;
mod reader;
mod serializer;
mod whitespace;

pub use parser::parse;
pub use reader::{AttrList, MarkupHandler, read_markup};
pub use serializer::to_html;

pub use roost_status::{Block, Document, Inline};
