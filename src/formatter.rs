/// Link markup rendering
///
/// Link text and URL are interpolated as-is, without escaping for the
/// target dialect.

use crate::options::{FormatOptions, LinkFormat};
use crate::page_data::PageData;

pub const MAX_SELECTION_CHARS: usize = 120;
pub const ELLIPSIS: char = '…';
pub const UNKNOWN_FORMAT_ERROR: &str = "Error: Unknown format option";

/// Render the link for `data` in the dialect selected by `options`.
///
/// Algorithm:
/// 1. Trim the selection and cap it at 120 characters plus an ellipsis
/// 2. Use the selection as link text if non-empty, else the page title
/// 3. Fill in the dialect's template
///
/// An unrecognized format token renders the error sentinel instead of failing.
pub fn format_link(data: &PageData, options: &FormatOptions) -> String {
    let text = link_text(data);

    match options.link_format() {
        Ok(format) => render(format, &data.href, &text, options),
        Err(_) => UNKNOWN_FORMAT_ERROR.to_string(),
    }
}

fn render(format: LinkFormat, href: &str, text: &str, options: &FormatOptions) -> String {
    match format {
        LinkFormat::Markdown => format!("[{}]({})", text, href),
        LinkFormat::Html => format!("<a href=\"{}\">{}</a>", href, text),
        LinkFormat::Latex => format!("\\href{{{}}}{{{}}}", href, text),
        LinkFormat::Xml => format!(
            "<{link} {attr}=\"{href}\">\n  <{name}>{text}</{name}>\n</{link}>",
            link = options.link,
            attr = options.href,
            name = options.name,
            href = href,
            text = text,
        ),
    }
}

/// Text shown for the link: the (capped) selection, falling back to the title
pub fn link_text(data: &PageData) -> String {
    let selection = truncate_selection(data.selection.trim());
    if selection.is_empty() {
        data.title.clone()
    } else {
        selection
    }
}

fn truncate_selection(selection: &str) -> String {
    match selection.char_indices().nth(MAX_SELECTION_CHARS) {
        Some((cut, _)) => {
            let mut truncated = selection[..cut].to_string();
            truncated.push(ELLIPSIS);
            truncated
        }
        None => selection.to_string(),
    }
}
