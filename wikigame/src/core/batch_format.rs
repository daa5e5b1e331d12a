//! Batch record parsing and result formatting.
//!
//! Input: one record per line, `start_title[|target_title[|language]]`.
//! Lines starting with `#` and blank lines are ignored; fields are trimmed and
//! empty fields fall back to the configured defaults.

use crate::core::types::{GameRequest, GameResult};

/// Parse batch input into run requests. `defaults` supplies missing fields.
pub fn parse_batch_input(input: &str, defaults: &GameRequest) -> Vec<GameRequest> {
    input
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| parse_record(line, defaults))
        .collect()
}

fn parse_record(line: &str, defaults: &GameRequest) -> GameRequest {
    let mut fields = line.split('|').map(str::trim);
    let mut field_or = |fallback: &str| {
        fields
            .next()
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    };
    let start_title = field_or(&defaults.start_title);
    let target_title = field_or(&defaults.target_title);
    let language = field_or(&defaults.language);
    GameRequest {
        start_title,
        target_title,
        language,
    }
}

/// Human-readable report for one result: a `"<start>:"` header followed by
/// tab-indented sentences and a blank line.
pub fn format_result(result: &GameResult) -> String {
    let mut out = format!("{}:\n", result.start_title());
    let body = match result {
        GameResult::LanguageDoesNotExist { language, .. } => {
            format!("\tNo wikipedia site for the language \"{language}\" found.\n")
        }
        GameResult::StartNotAnArticle { start_title, url } => format!(
            "\tNo wikipedia article found for the start \"{start_title}\" (url: {url}).\n"
        ),
        GameResult::TargetNotAnArticle {
            target_title, url, ..
        } => format!(
            "\tNo wikipedia article found for the target \"{target_title}\" (url: {url}).\n"
        ),
        GameResult::GameError { start_title, .. } => {
            format!("\tAn error occurred while playing from \"{start_title}\".\n")
        }
        GameResult::CircleDetected {
            start_title,
            circle_title,
            circle_steps,
            ..
        } => format!(
            "\tA circle was detected after starting from \"{start_title}\".\n\
             \tThe circle started at \"{circle_title}\" and is {circle_steps} steps long.\n"
        ),
        GameResult::TargetFound {
            start_title,
            target_title,
            total_steps,
        } => format!(
            "\tArrived at \"{target_title}\" from \"{start_title}\" after {total_steps} steps.\n"
        ),
        GameResult::StepBudgetExceeded {
            start_title,
            target_title,
            total_steps,
            max_steps,
        } => format!(
            "\tGave up after {total_steps} steps from \"{start_title}\" without reaching \"{target_title}\" (limit: {max_steps}).\n"
        ),
    };
    out.push_str(&body);
    out.push('\n');
    out
}

/// Concatenated text report for a whole batch.
pub fn render_report(results: &[GameResult]) -> String {
    results.iter().map(format_result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> GameRequest {
        GameRequest::new("Special:Random", "Philosophy", "en")
    }

    #[test]
    fn parses_records_with_defaults() {
        let input = "\
# start | target | language
Rust
Albert Einstein | Physics
Katze|Philosophie|de

  Zebra | | fr
";
        let requests = parse_batch_input(input, &defaults());
        assert_eq!(
            requests,
            vec![
                GameRequest::new("Rust", "Philosophy", "en"),
                GameRequest::new("Albert Einstein", "Physics", "en"),
                GameRequest::new("Katze", "Philosophie", "de"),
                GameRequest::new("Zebra", "Philosophy", "fr"),
            ]
        );
    }

    #[test]
    fn empty_start_field_uses_default_start() {
        let requests = parse_batch_input("|Science", &defaults());
        assert_eq!(
            requests,
            vec![GameRequest::new("Special:Random", "Science", "en")]
        );
    }

    #[test]
    fn formats_circle() {
        let text = format_result(&GameResult::CircleDetected {
            start_title: "Rust".to_string(),
            target_title: "Philosophy".to_string(),
            circle_title: "Metal".to_string(),
            total_steps: 5,
            circle_steps: 3,
        });
        assert_eq!(
            text,
            "Rust:\n\tA circle was detected after starting from \"Rust\".\n\tThe circle started at \"Metal\" and is 3 steps long.\n\n"
        );
    }

    #[test]
    fn formats_language_and_target_variants() {
        let language = format_result(&GameResult::LanguageDoesNotExist {
            start_title: "Rust".to_string(),
            language: "xx".to_string(),
        });
        assert_eq!(
            language,
            "Rust:\n\tNo wikipedia site for the language \"xx\" found.\n\n"
        );

        let target = format_result(&GameResult::TargetNotAnArticle {
            start_title: "Rust".to_string(),
            target_title: "Nope".to_string(),
            url: "https://en.wikipedia.org/wiki/Nope".to_string(),
        });
        assert!(target.starts_with("Rust:\n"));
        assert!(target.contains("for the target \"Nope\" (url: https://en.wikipedia.org/wiki/Nope)."));
    }

    #[test]
    fn report_concatenates_records() {
        let results = vec![
            GameResult::TargetFound {
                start_title: "A".to_string(),
                target_title: "Philosophy".to_string(),
                total_steps: 3,
            },
            GameResult::GameError {
                start_title: "B".to_string(),
                article_title: "C".to_string(),
            },
        ];
        assert_eq!(
            render_report(&results),
            "A:\n\tArrived at \"Philosophy\" from \"A\" after 3 steps.\n\n\
             B:\n\tAn error occurred while playing from \"B\".\n\n"
        );
    }
}
