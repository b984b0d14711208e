//! The saved/hidden-activities page: the one static page component served by
//! this crate. Renders an HTML fragment the embedding shell injects into its
//! content area.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// One saved activity (a link or a comment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedItem {
    pub title: String,
    pub href: String,
    /// Section label shown next to the item, when known.
    pub section: Option<String>,
}

/// View model for the saved page. `items` is `None` while the listing data
/// is still loading.
#[derive(Debug, Clone, Default)]
pub struct SavedPage {
    /// "Saved" or "Hidden"; used in the empty-state copy.
    pub action_name: String,
    pub items: Option<Vec<SavedItem>>,
}

impl SavedPage {
    pub fn render(&self) -> String {
        let Some(items) = self.items.as_ref() else {
            return r#"<div class="loading"></div>"#.to_string();
        };

        if items.is_empty() {
            return format!(
                concat!(
                    r#"<div class="alert alert-info vertical-spacing-top">"#,
                    "<p>You have no {} links or comments.</p>",
                    "</div>"
                ),
                encode_text(&self.action_name.to_lowercase()),
            );
        }

        let mut out = String::from(
            r#"<div class="user-page user-saved"><ul class="listing-list vertical-spacing-top">"#,
        );
        for item in items {
            out.push_str(r#"<li class="listing"><a href=""#);
            out.push_str(&encode_double_quoted_attribute(&item.href));
            out.push_str(r#"">"#);
            out.push_str(&encode_text(&item.title));
            out.push_str("</a>");
            if let Some(section) = &item.section {
                out.push_str(r#" <span class="listing-section">"#);
                out.push_str(&encode_text(section));
                out.push_str("</span>");
            }
            out.push_str("</li>");
        }
        out.push_str("</ul></div>");
        out
    }
}
