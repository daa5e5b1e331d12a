//! Computed-style lookup for document elements.
//!
//! The extractor only needs `font-style`. A browser-backed fetcher would
//! answer from the rendering engine; [`MarkupStyles`] derives it from the
//! markup itself, which is what the HTTP fetcher and the test fakes use.

use scraper::ElementRef;

/// Source of computed CSS property values for elements of the current page.
pub trait StyleSource {
    /// Computed value of `property` for `element`, or `None` if unknown.
    fn computed_style(&self, element: ElementRef<'_>, property: &str) -> Option<String>;
}

/// Elements rendered in italics by default user-agent stylesheets.
const ITALIC_TAGS: &[&str] = &["i", "em", "cite", "var", "dfn", "address"];

/// Style resolution from markup: inline `style` declarations and the
/// default styling of italic elements, inherited from the nearest ancestor
/// that sets one.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupStyles;

impl StyleSource for MarkupStyles {
    fn computed_style(&self, element: ElementRef<'_>, property: &str) -> Option<String> {
        if property != "font-style" {
            return None;
        }
        let lineage =
            std::iter::once(element).chain(element.ancestors().filter_map(ElementRef::wrap));
        for node in lineage {
            if let Some(value) = node
                .value()
                .attr("style")
                .and_then(|style| inline_declaration(style, property))
            {
                return Some(value);
            }
            if ITALIC_TAGS.contains(&node.value().name()) {
                return Some("italic".to_string());
            }
        }
        Some("normal".to_string())
    }
}

/// Value of `property` in an inline `style` attribute. The last declaration wins.
fn inline_declaration(style: &str, property: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| {
            value
                .trim()
                .trim_end_matches("!important")
                .trim()
                .to_ascii_lowercase()
        })
        .next_back()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn font_style(fragment: &str, id: &str) -> Option<String> {
        let html = Html::parse_fragment(fragment);
        let element = html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(id))
            .expect("element with id");
        MarkupStyles.computed_style(element, "font-style")
    }

    #[test]
    fn plain_anchor_is_normal() {
        let style = font_style(r#"<p><a id="x" href="/wiki/A">A</a></p>"#, "x");
        assert_eq!(style.as_deref(), Some("normal"));
    }

    #[test]
    fn anchor_inside_italic_tag_is_italic() {
        let style = font_style(r#"<p><i><a id="x" href="/wiki/A">A</a></i></p>"#, "x");
        assert_eq!(style.as_deref(), Some("italic"));
    }

    #[test]
    fn inline_style_overrides_inherited_italic() {
        let fragment = r#"<p><i><span style="font-style: normal"><a id="x" href="/wiki/A">A</a></span></i></p>"#;
        assert_eq!(font_style(fragment, "x").as_deref(), Some("normal"));
    }

    #[test]
    fn inline_italic_on_parent_is_inherited() {
        let fragment = r#"<p><span style="color:red; FONT-STYLE:Italic"><a id="x" href="/wiki/A">A</a></span></p>"#;
        assert_eq!(font_style(fragment, "x").as_deref(), Some("italic"));
    }

    #[test]
    fn italic_child_does_not_change_anchor_style() {
        let style = font_style(r#"<p><a id="x" href="/wiki/A"><i>A</i></a></p>"#, "x");
        assert_eq!(style.as_deref(), Some("normal"));
    }

    #[test]
    fn unknown_property_is_none() {
        let html = Html::parse_fragment(r#"<a href="/wiki/A">A</a>"#);
        let anchor = html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "a")
            .expect("anchor");
        assert_eq!(MarkupStyles.computed_style(anchor, "color"), None);
    }
}
