//! Test-only helpers: article markup builders and a scripted fetcher.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html};

use crate::core::styles::{MarkupStyles, StyleSource};
use crate::core::title::title_to_path;
use crate::io::config::SiteConfig;
use crate::io::fetcher::PageFetcher;

/// Full article page with MediaWiki's title and content containers.
pub fn article_html(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{title} - Wikipedia</title></head>
<body>
<h1 id="firstHeading" class="firstHeading mw-first-heading"><span class="mw-page-title-main">{title}</span></h1>
<div id="bodyContent">
<div id="mw-content-text" class="mw-body-content"><div class="mw-content-ltr mw-parser-output" lang="en" dir="ltr">
{body}
</div></div>
</div>
</body></html>"#
    )
}

/// Page served for a title that has no article.
pub fn missing_article_html(title: &str) -> String {
    article_html(
        title,
        r#"<div class="noarticletext mw-content-ltr"><p>Wikipedia does not have an article with this exact name.</p></div>"#,
    )
}

/// Lead paragraph whose first qualifying link points at `next`, preceded by
/// a parenthetical link that must be skipped.
pub fn lead_linking_to(title: &str, next: &str) -> String {
    format!(
        r#"<p><b>{title}</b> (<a href="/wiki/Help:Pronunciation">listen</a>, from <a href="/wiki/Etymology">etymology</a>) is a kind of <a href="/wiki/{path}">{next}</a> and <a href="/wiki/Other">other</a>.</p>"#,
        path = title_to_path(next)
    )
}

/// Article URL under the default site layout.
pub fn wiki_url(language: &str, title: &str) -> String {
    SiteConfig::default().article_url(language, title)
}

/// Scripted in-memory fetcher.
///
/// Serves registered pages by URL, follows registered redirects, and fails
/// navigation to anything else. Every attempted load is recorded.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    redirects: HashMap<String, String>,
    current: Option<(String, Html)>,
    visits: Vec<String>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn with_redirect(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.redirects.insert(from.into(), to.into());
        self
    }

    /// Register the root page of a language edition.
    pub fn with_language(self, language: &str) -> Self {
        let url = SiteConfig::default().root_url(language);
        self.with_page(url, "<html><body>Main page</body></html>")
    }

    /// Register an article whose first qualifying link points at `next`.
    pub fn with_linked_article(self, language: &str, title: &str, next: &str) -> Self {
        let html = article_html(title, &lead_linking_to(title, next));
        self.with_page(wiki_url(language, title), html)
    }

    /// Register an article with an arbitrary body.
    pub fn with_article(self, language: &str, title: &str, body: &str) -> Self {
        self.with_page(wiki_url(language, title), article_html(title, body))
    }

    pub fn with_missing_article(self, language: &str, title: &str) -> Self {
        self.with_page(wiki_url(language, title), missing_article_html(title))
    }

    /// Register a chain of linked articles: each title links to the next.
    pub fn with_chain(self, language: &str, titles: &[&str]) -> Self {
        titles.windows(2).fold(self, |fetcher, pair| {
            fetcher.with_linked_article(language, pair[0], pair[1])
        })
    }

    /// URLs of every attempted load, in order.
    pub fn visits(&self) -> &[String] {
        &self.visits
    }
}

impl StyleSource for FakeFetcher {
    fn computed_style(&self, element: ElementRef<'_>, property: &str) -> Option<String> {
        MarkupStyles.computed_style(element, property)
    }
}

impl PageFetcher for FakeFetcher {
    fn load(&mut self, url: &str) -> Result<()> {
        self.visits.push(url.to_string());
        self.current = None;
        let resolved = self.redirects.get(url).map_or(url, String::as_str);
        let html = self
            .pages
            .get(resolved)
            .ok_or_else(|| anyhow!("navigation to {url} failed"))?;
        self.current = Some((resolved.to_string(), Html::parse_document(html)));
        Ok(())
    }

    fn current_document(&self) -> Result<&Html> {
        self.current
            .as_ref()
            .map(|(_, document)| document)
            .ok_or_else(|| anyhow!("no page loaded"))
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|(url, _)| url.as_str())
    }
}
