//! Stable exit codes for wikigame CLI commands.

use crate::core::types::GameResult;

/// Target reached, or the command succeeded.
pub const OK: i32 = 0;
/// Invalid config/input, I/O failure, missing language or article, or a game error.
pub const INVALID: i32 = 1;
/// A circle was detected before reaching the target.
pub const CIRCLE: i32 = 2;
/// The configured `max_steps` was reached.
pub const BUDGET_EXCEEDED: i32 = 3;
/// `first-link` found no qualifying link on the page.
pub const NO_LINK: i32 = 4;

/// Exit code for a single game result.
pub fn for_result(result: &GameResult) -> i32 {
    match result {
        GameResult::TargetFound { .. } => OK,
        GameResult::CircleDetected { .. } => CIRCLE,
        GameResult::StepBudgetExceeded { .. } => BUDGET_EXCEEDED,
        GameResult::LanguageDoesNotExist { .. }
        | GameResult::StartNotAnArticle { .. }
        | GameResult::TargetNotAnArticle { .. }
        | GameResult::GameError { .. } => INVALID,
    }
}
