//! Example: parse a status body and dump its structure
//!
//! Takes the markup as the first argument, or reads it from stdin, falling
//! back to a built-in sample. Prints the parsed document in the serializer's
//! indented form.

use std::io::Read;

use anyhow::Result;

const SAMPLE: &str = "<p>Hello <b>fediverse</b>!<br>\
                      <a href=\"https://example.social/@alice\" class=\"u-url mention\" data-user=\"42\">@alice</a></p>\
                      <blockquote>Quoted wisdom</blockquote>\
                      <pre><code>let x = 1;</code></pre>";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let html = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            if buf.is_empty() {
                SAMPLE.to_string()
            } else {
                buf
            }
        }
    };

    let doc = roost_html::parse(&html);
    print!("{}", roost_html::to_html(&doc));
    Ok(())
}
