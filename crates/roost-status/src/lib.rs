//! Roost status content model
//!
//! Toolkit-independent block/inline tree for rendered status bodies.
//! A document is built once per parse, owned by its caller, and compared
//! structurally; it carries no identity and no back-references.

mod document;
mod node;

pub use document::Document;
pub use node::{Block, Inline};

pub use url::Url;
