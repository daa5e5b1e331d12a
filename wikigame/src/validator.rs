//! Existence checks for language editions and articles, and title lookup.
//!
//! Every check navigates the fetcher; callers must reload the page they want
//! to work on afterwards.

use anyhow::Result;
use scraper::{ElementRef, Html};
use tracing::{debug, instrument, warn};

use crate::io::config::SiteConfig;
use crate::io::fetcher::PageFetcher;

/// Class of the element MediaWiki renders on pages without an article.
const MISSING_ARTICLE_CLASS: &str = "noarticletext";
/// Title element classes, in lookup order.
const TITLE_CLASSES: &[&str] = &["mw-page-title-main", "mw-first-heading"];

/// Returns true if the root page of the `language` edition loads.
#[instrument(skip(fetcher, site))]
pub fn language_exists<F: PageFetcher + ?Sized>(
    fetcher: &mut F,
    site: &SiteConfig,
    language: &str,
) -> bool {
    let url = site.root_url(language);
    match fetcher.load(&url) {
        Ok(()) => true,
        Err(err) => {
            debug!(err = %err, "language edition not reachable");
            false
        }
    }
}

/// Returns `Ok(true)` if `url` loads and carries no missing-article marker.
///
/// Only the marker means "not an article"; a failed load is an error.
#[instrument(skip(fetcher))]
pub fn article_exists<F: PageFetcher + ?Sized>(fetcher: &mut F, url: &str) -> Result<bool> {
    fetcher.load(url)?;
    let document = fetcher.current_document()?;
    let missing = has_missing_marker(document);
    if missing {
        debug!("missing-article marker present");
    }
    Ok(!missing)
}

/// Displayed title of the current page.
///
/// Tries each known title element in order; logs and returns `None` when
/// none is present.
pub fn article_title<F: PageFetcher + ?Sized>(fetcher: &F) -> Option<String> {
    let title = fetcher
        .current_document()
        .ok()
        .and_then(title_from_document);
    if title.is_none() {
        warn!(
            url = fetcher.current_url().unwrap_or("<none>"),
            "no title found for article"
        );
    }
    title
}

/// Title text of the first known title element in `document`.
pub fn title_from_document(document: &Html) -> Option<String> {
    TITLE_CLASSES.iter().find_map(|class| {
        find_by_class(document, class)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    })
}

fn has_missing_marker(document: &Html) -> bool {
    find_by_class(document, MISSING_ARTICLE_CLASS).is_some()
}

fn find_by_class<'a>(document: &'a Html, class: &str) -> Option<ElementRef<'a>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|c| c == class))
}
