//! Shared deterministic types for the game core.
//!
//! These types define stable contracts between the extractor, the engine and
//! the batch layer. They carry no I/O handles and serialize deterministically.

use serde::{Deserialize, Serialize};

/// A resolved article: its displayed title, the URL it was loaded from, and
/// the language edition it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub url: String,
    pub language: String,
}

/// Inputs for a single game run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRequest {
    pub start_title: String,
    pub target_title: String,
    pub language: String,
}

impl GameRequest {
    pub fn new(
        start_title: impl Into<String>,
        target_title: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            start_title: start_title.into(),
            target_title: target_title.into(),
            language: language.into(),
        }
    }
}

/// Terminal outcome of one game run.
///
/// Exactly one variant is produced per run. Every variant carries the
/// requested start title so batch output can label the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GameResult {
    /// No Wikipedia edition could be loaded for `language`.
    LanguageDoesNotExist { start_title: String, language: String },
    /// The start page carries the missing-article marker.
    StartNotAnArticle { start_title: String, url: String },
    /// The target page carries the missing-article marker.
    TargetNotAnArticle {
        start_title: String,
        target_title: String,
        url: String,
    },
    /// Navigation, extraction or title lookup failed mid-run.
    GameError {
        start_title: String,
        /// Last article title read before the failure.
        article_title: String,
    },
    /// An article already visited in this run was reached again.
    CircleDetected {
        start_title: String,
        target_title: String,
        circle_title: String,
        total_steps: u32,
        circle_steps: u32,
    },
    TargetFound {
        start_title: String,
        target_title: String,
        total_steps: u32,
    },
    /// The configured `max_steps` was reached without a target or a circle.
    StepBudgetExceeded {
        start_title: String,
        target_title: String,
        total_steps: u32,
        max_steps: u32,
    },
}

impl GameResult {
    /// Start title as requested by the caller.
    pub fn start_title(&self) -> &str {
        match self {
            GameResult::LanguageDoesNotExist { start_title, .. }
            | GameResult::StartNotAnArticle { start_title, .. }
            | GameResult::TargetNotAnArticle { start_title, .. }
            | GameResult::GameError { start_title, .. }
            | GameResult::CircleDetected { start_title, .. }
            | GameResult::TargetFound { start_title, .. }
            | GameResult::StepBudgetExceeded { start_title, .. } => start_title,
        }
    }

    /// Number of link-follow transitions, for variants reached by traversal.
    pub fn total_steps(&self) -> Option<u32> {
        match self {
            GameResult::CircleDetected { total_steps, .. }
            | GameResult::TargetFound { total_steps, .. }
            | GameResult::StepBudgetExceeded { total_steps, .. } => Some(*total_steps),
            GameResult::LanguageDoesNotExist { .. }
            | GameResult::StartNotAnArticle { .. }
            | GameResult::TargetNotAnArticle { .. }
            | GameResult::GameError { .. } => None,
        }
    }
}

/// An anchor considered during link extraction. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    /// `href` attribute exactly as written in the markup.
    pub href: String,
    pub anchor_text: String,
    /// Bracket depth at the point the anchor opens.
    pub bracket_depth: i32,
}

/// Where an article sits in the traversal trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Step 0.
    Start,
    /// An intermediate article; the run continues.
    Visit,
    /// The last article of the run (target, circle or budget stop).
    Finish,
}

/// Progress notification emitted after each article is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepEvent {
    pub step: u32,
    pub kind: StepKind,
    pub article: ArticleRef,
}
