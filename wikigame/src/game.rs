//! Game orchestration: validation, traversal, and result classification.
//!
//! A run moves through `Validating → Traversing → Terminal`. Validation
//! failures map to their own result variants. Any error raised while
//! traversing is caught here and reported as [`GameResult::GameError`], so a
//! run never fails and the fetcher stays usable for the next one.

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use tracing::{debug, info, instrument, warn};

use crate::core::extractor::first_link;
use crate::core::types::{ArticleRef, GameRequest, GameResult, StepEvent, StepKind};
use crate::core::visited::VisitedSet;
use crate::io::config::GameConfig;
use crate::io::fetcher::PageFetcher;
use crate::validator::{article_exists, article_title, language_exists};

/// Plays games on one fetcher session.
///
/// The fetcher is reused across runs; each run owns a fresh [`VisitedSet`].
pub struct GameEngine<F: PageFetcher> {
    fetcher: F,
    config: GameConfig,
}

impl<F: PageFetcher> GameEngine<F> {
    pub fn new(fetcher: F, config: GameConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Request built from the configured defaults.
    pub fn default_request(&self) -> GameRequest {
        self.config.defaults.request()
    }

    /// Play one game to its terminal result.
    pub fn run_game(&mut self, request: &GameRequest) -> GameResult {
        self.run_game_with(request, |_| {})
    }

    /// Play one game, reporting every loaded article to `on_step`.
    #[instrument(skip_all, fields(start = %request.start_title, target = %request.target_title, language = %request.language))]
    pub fn run_game_with<O: FnMut(&StepEvent)>(
        &mut self,
        request: &GameRequest,
        mut on_step: O,
    ) -> GameResult {
        let site = &self.config.site;
        if !language_exists(&mut self.fetcher, site, &request.language) {
            return GameResult::LanguageDoesNotExist {
                start_title: request.start_title.clone(),
                language: request.language.clone(),
            };
        }

        let start_url = site.article_url(&request.language, &request.start_title);
        match article_exists(&mut self.fetcher, &start_url) {
            Ok(true) => {}
            Ok(false) => {
                return GameResult::StartNotAnArticle {
                    start_title: request.start_title.clone(),
                    url: start_url,
                };
            }
            Err(err) => return validation_failed(request, &start_url, &err),
        }

        let target_url = site.article_url(&request.language, &request.target_title);
        match article_exists(&mut self.fetcher, &target_url) {
            Ok(true) => {}
            Ok(false) => {
                return GameResult::TargetNotAnArticle {
                    start_title: request.start_title.clone(),
                    target_title: request.target_title.clone(),
                    url: target_url,
                };
            }
            Err(err) => return validation_failed(request, &target_url, &err),
        }

        info!(%start_url, "starting traversal");
        let mut visited = VisitedSet::new();
        let mut last_title = None;
        let outcome = self.traverse(
            request,
            &start_url,
            &mut visited,
            &mut last_title,
            &mut on_step,
        );
        match outcome {
            Ok(result) => {
                info!(steps = ?result.total_steps(), "game finished");
                result
            }
            Err(err) => {
                let reason = format!("{err:#}");
                let path: Vec<&str> = visited.iter().map(|(title, _)| title).collect();
                warn!(%reason, ?path, "game aborted");
                GameResult::GameError {
                    start_title: request.start_title.clone(),
                    article_title: last_title.unwrap_or_else(|| request.start_title.clone()),
                }
            }
        }
    }

    fn traverse<O: FnMut(&StepEvent)>(
        &mut self,
        request: &GameRequest,
        start_url: &str,
        visited: &mut VisitedSet,
        last_title: &mut Option<String>,
        on_step: &mut O,
    ) -> Result<GameResult> {
        let mut steps = 0u32;

        let start = self.load_article(start_url, &request.language)?;
        *last_title = Some(start.title.clone());
        visited.record(&start.title, steps);
        on_step(&StepEvent {
            step: steps,
            kind: StepKind::Start,
            article: start,
        });

        loop {
            let next_url = self.next_link_url()?;
            let article = self.load_article(&next_url, &request.language)?;
            *last_title = Some(article.title.clone());
            steps += 1;

            let terminal = if article.title == request.target_title {
                Some(GameResult::TargetFound {
                    start_title: request.start_title.clone(),
                    target_title: request.target_title.clone(),
                    total_steps: steps,
                })
            } else if let Some(seen) = visited.first_seen(&article.title) {
                let circle: Vec<&str> = visited
                    .iter()
                    .filter(|(_, step)| *step >= seen)
                    .map(|(title, _)| title)
                    .collect();
                debug!(?circle, "circle closed");
                Some(GameResult::CircleDetected {
                    start_title: request.start_title.clone(),
                    target_title: request.target_title.clone(),
                    circle_title: article.title.clone(),
                    total_steps: steps,
                    circle_steps: steps - seen,
                })
            } else if let Some(max_steps) = self.config.max_steps.filter(|max| steps >= *max) {
                Some(GameResult::StepBudgetExceeded {
                    start_title: request.start_title.clone(),
                    target_title: request.target_title.clone(),
                    total_steps: steps,
                    max_steps,
                })
            } else {
                None
            };

            if terminal.is_none() {
                visited.record(&article.title, steps);
            }
            let kind = if terminal.is_some() {
                StepKind::Finish
            } else {
                StepKind::Visit
            };
            on_step(&StepEvent {
                step: steps,
                kind,
                article,
            });
            if let Some(result) = terminal {
                return Ok(result);
            }
        }
    }

    fn load_article(&mut self, url: &str, language: &str) -> Result<ArticleRef> {
        self.fetcher.load(url)?;
        let title =
            article_title(&self.fetcher).ok_or_else(|| anyhow!("no title found at {url}"))?;
        let url = self.fetcher.current_url().unwrap_or(url).to_string();
        Ok(ArticleRef {
            title,
            url,
            language: language.to_string(),
        })
    }

    /// Absolute URL of the first qualifying link on the current page.
    fn next_link_url(&self) -> Result<String> {
        let base = self
            .fetcher
            .current_url()
            .ok_or_else(|| anyhow!("no page loaded"))?;
        let document = self.fetcher.current_document()?;
        let candidate = first_link(document, &self.fetcher)
            .with_context(|| format!("extract link from {base}"))?
            .ok_or_else(|| anyhow!("no qualifying link on {base}"))?;
        debug!(href = %candidate.href, anchor = %candidate.anchor_text, "following link");
        let url = Url::parse(base)
            .with_context(|| format!("parse url {base}"))?
            .join(&candidate.href)
            .with_context(|| format!("resolve {} against {base}", candidate.href))?;
        Ok(url.to_string())
    }
}

/// A start or target check that could not load its page.
fn validation_failed(request: &GameRequest, url: &str, err: &anyhow::Error) -> GameResult {
    let reason = format!("{err:#}");
    warn!(%reason, %url, "article check failed");
    GameResult::GameError {
        start_title: request.start_title.clone(),
        article_title: request.start_title.clone(),
    }
}
