//! HTML serialization of [`ListingView`] for hosts that inject markup directly.
//!
//! Escaping happens here and nowhere else: the display model carries raw names and paths.

use super::{ItemActivation, ListingView};

/// Path as written into `data-path`: backslashes become `/`.
pub fn display_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Escapes text for use in element content or a double- or single-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render_listing_html(view: &ListingView) -> String {
    let mut html = String::new();
    if view.heading.is_some() || view.back_label.is_some() {
        html.push_str("<div class=\"search-heading\">");
        if let Some(heading) = &view.heading {
            html.push_str(&format!("<h3>{}</h3>", escape_html(heading)));
        }
        if let Some(back) = view.back_label {
            html.push_str(&format!(
                "<button class=\"btn btn-secondary\" data-action=\"exit-search\">{}</button>",
                escape_html(back)
            ));
        }
        html.push_str("</div>");
    }

    if let Some(message) = &view.empty_message {
        html.push_str(&format!(
            "<div class=\"loading\">{}</div>",
            escape_html(message)
        ));
        return html;
    }

    let activation = match view.activation {
        ItemActivation::Open => "open",
        ItemActivation::Edit => "edit",
    };
    html.push_str("<div class=\"file-grid\">");
    for item in &view.items {
        let class = if item.selected {
            "file-item selected"
        } else {
            "file-item"
        };
        html.push_str(&format!(
            "<div class=\"{class}\" data-path=\"{path}\" data-activate=\"{activation}\" \
             data-context-menu=\"{menu}\"><div class=\"file-icon\">{icon}</div>\
             <div class=\"file-name\">{name}</div><div class=\"file-size\">{size}</div></div>",
            path = escape_html(&display_path(&item.path)),
            menu = view.context_menu,
            icon = item.icon,
            name = escape_html(&item.name),
            size = escape_html(&item.size_label),
        ));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::presentation::ItemView;

    fn listing(items: Vec<ItemView>) -> ListingView {
        ListingView {
            heading: None,
            back_label: None,
            empty_message: None,
            items,
            activation: ItemActivation::Open,
            context_menu: true,
        }
    }

    #[test]
    fn quotes_and_backslashes_in_paths_are_escaped_for_attributes() {
        let html = render_listing_html(&listing(vec![ItemView {
            name: "it's \"odd\" <b>.txt".to_string(),
            path: "C:\\Users\\o'neil\\it's \"odd\" <b>.txt".to_string(),
            icon: "📄",
            size_label: "0 B".to_string(),
            is_directory: false,
            selected: true,
        }]));
        assert!(html.contains(
            "data-path=\"C:/Users/o&#39;neil/it&#39;s &quot;odd&quot; &lt;b&gt;.txt\""
        ));
        assert!(html.contains(
            "<div class=\"file-name\">it&#39;s &quot;odd&quot; &lt;b&gt;.txt</div>"
        ));
        assert!(html.contains("class=\"file-item selected\""));
        assert!(!html.contains('\\'));
    }

    #[test]
    fn empty_search_keeps_back_control() {
        let view = ListingView {
            heading: Some("Search results: 0 file(s)".to_string()),
            back_label: Some("Back to file list"),
            empty_message: Some("No files containing \"<x>\" found".to_string()),
            items: Vec::new(),
            activation: ItemActivation::Edit,
            context_menu: false,
        };
        assert_eq!(
            render_listing_html(&view),
            "<div class=\"search-heading\"><h3>Search results: 0 file(s)</h3>\
             <button class=\"btn btn-secondary\" data-action=\"exit-search\">Back to file list</button>\
             </div><div class=\"loading\">No files containing &quot;&lt;x&gt;&quot; found</div>"
        );
    }

    #[test]
    fn display_path_only_touches_backslashes() {
        assert_eq!(display_path("C:\\a\\b c"), "C:/a/b c");
        assert_eq!(display_path("/a/'b'"), "/a/'b'");
    }
}
