//! HTML presentation for pastes, kept apart from the fetch operation so the
//! paste service itself has no view dependency.

use crate::models::Paste;

/// Render a paste as a standalone HTML page.
pub fn paste_page(paste: &Paste) -> String {
    let content = escape_html(&paste.content);
    let language = escape_html(&paste.language);
    let created_at = paste.created_at.format("%Y-%m-%d %H:%M:%S UTC");
    let title = escape_html(&paste.paste_id);

    let subtitle = if paste.language.is_empty() {
        format!("{created_at}")
    } else {
        format!("{language} &middot; {created_at}")
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <p>{subtitle}</p>\n\
         <pre><code>{content}</code></pre>\n\
         </body>\n\
         </html>\n"
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
