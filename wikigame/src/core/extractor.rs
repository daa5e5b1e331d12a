//! First-qualifying-link selection.
//!
//! Emulates "click the first non-parenthetical, non-italic, mainspace link in
//! body text". Blocks (`p`, `ul`, `ol` directly under the parser output) are
//! scanned in document order. Within a block the element tree is walked in
//! order while a signed bracket depth is tracked over its text nodes, so each
//! anchor is judged by the depth at its own position.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html};

use crate::core::styles::StyleSource;
use crate::core::title::is_mainspace_href;
use crate::core::types::LinkCandidate;

const CONTENT_TEXT_ID: &str = "mw-content-text";
const PARSER_OUTPUT_CLASS: &str = "mw-parser-output";
const BLOCK_TAGS: &[&str] = &["p", "ul", "ol"];
const EXCLUDED_ANCESTORS: &[&str] = &["table", "figure", "figcaption", "caption", "sup"];
/// Elements whose text is not rendered and must not move the bracket depth.
const NON_TEXT_TAGS: &[&str] = &["style", "script"];

/// Locate the article's main content container.
pub fn content_root(document: &Html) -> Option<ElementRef<'_>> {
    let content_text = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().id() == Some(CONTENT_TEXT_ID))?;
    content_text
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|class| class == PARSER_OUTPUT_CLASS))
}

/// Block elements of the content container, in document order.
pub fn content_blocks<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| BLOCK_TAGS.contains(&el.value().name()))
}

/// Select the link to follow next from a loaded article.
///
/// Returns `Ok(None)` when no block contains a qualifying anchor, and an
/// error when the document has no article content region at all.
pub fn first_link<S: StyleSource + ?Sized>(
    document: &Html,
    styles: &S,
) -> Result<Option<LinkCandidate>> {
    let root = content_root(document).ok_or_else(|| anyhow!("missing article content region"))?;
    Ok(content_blocks(root).find_map(|block| first_link_in_block(block, styles)))
}

/// First qualifying anchor of a single block, if any.
pub fn first_link_in_block<S: StyleSource + ?Sized>(
    block: ElementRef<'_>,
    styles: &S,
) -> Option<LinkCandidate> {
    BlockScan {
        styles,
        block,
        depth: 0,
    }
    .visit(block)
}

/// Net bracket depth change contributed by a run of text.
pub fn bracket_delta(text: &str) -> i32 {
    text.chars().fold(0, |delta, ch| match ch {
        '(' | '[' => delta + 1,
        ')' | ']' => delta - 1,
        _ => delta,
    })
}

struct BlockScan<'s, 'b, S: ?Sized> {
    styles: &'s S,
    /// Ancestor checks stop here.
    block: ElementRef<'b>,
    depth: i32,
}

impl<'b, S: StyleSource + ?Sized> BlockScan<'_, 'b, S> {
    fn visit(&mut self, element: ElementRef<'b>) -> Option<LinkCandidate> {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                self.depth += bracket_delta(text);
                continue;
            }
            let Some(child) = ElementRef::wrap(child) else {
                continue;
            };
            let name = child.value().name();
            if NON_TEXT_TAGS.contains(&name) {
                continue;
            }
            if name == "a"
                && self.depth == 0
                && let Some(candidate) = self.candidate(child)
            {
                return Some(candidate);
            }
            if let Some(found) = self.visit(child) {
                return Some(found);
            }
        }
        None
    }

    /// Structural filter for an anchor already known to sit at depth 0.
    fn candidate(&self, anchor: ElementRef<'b>) -> Option<LinkCandidate> {
        let href = anchor.value().attr("href")?;
        if !is_mainspace_href(href) {
            return None;
        }
        let excluded = anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take_while(|el| *el != self.block)
            .any(|el| EXCLUDED_ANCESTORS.contains(&el.value().name()));
        if excluded {
            return None;
        }
        if self
            .styles
            .computed_style(anchor, "font-style")
            .is_some_and(|style| style == "italic")
        {
            return None;
        }
        Some(LinkCandidate {
            href: href.to_string(),
            anchor_text: anchor.text().collect::<String>().trim().to_string(),
            bracket_depth: self.depth,
        })
    }
}
