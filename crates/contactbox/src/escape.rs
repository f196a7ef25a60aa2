//! HTML escaping for user-supplied text.

use maud::html;

/// Escape `text` for insertion into HTML markup.
///
/// `&`, `<`, `>` and `"` are replaced by entities. This is the same escaping
/// maud applies to every value spliced into the rendered list.
#[must_use]
pub fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}
