//! Game configuration stored in `wikigame.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::title::title_to_path;
use crate::core::types::GameRequest;

/// Placeholder substituted with the language code in `site.root_url`.
pub const LANGUAGE_PLACEHOLDER: &str = "{language}";

/// Game configuration (TOML).
///
/// Missing fields default to the values of the classic game: random start,
/// "Philosophy" as target, English Wikipedia, no step cap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    /// Stop a run with `StepBudgetExceeded` after this many link follows.
    /// Unbounded when absent.
    pub max_steps: Option<u32>,

    /// Minimum delay between two navigations, in milliseconds.
    pub step_delay_ms: u64,

    pub defaults: GameDefaults,
    pub site: SiteConfig,
    pub http: HttpConfig,
}

/// Values used when a run or batch record leaves a field out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameDefaults {
    pub start_title: String,
    pub target_title: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Root page of a language edition, e.g. `https://{language}.wikipedia.org/`.
    pub root_url: String,
    /// Path under the root where articles live.
    pub article_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GameDefaults {
    fn default() -> Self {
        Self {
            start_title: "Special:Random".to_string(),
            target_title: "Philosophy".to_string(),
            language: "en".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_url: format!("https://{LANGUAGE_PLACEHOLDER}.wikipedia.org/"),
            article_path: "wiki/".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(
                "wikigame/",
                env!("CARGO_PKG_VERSION"),
                " (first-link Wikipedia game)"
            )
            .to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            step_delay_ms: 500,
            defaults: GameDefaults::default(),
            site: SiteConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == Some(0) {
            return Err(anyhow!("max_steps must be > 0 when set"));
        }
        if !self.site.root_url.contains(LANGUAGE_PLACEHOLDER) {
            return Err(anyhow!(
                "site.root_url must contain the {LANGUAGE_PLACEHOLDER} placeholder"
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(anyhow!("http.timeout_secs must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(anyhow!("http.user_agent must not be empty"));
        }
        if self.defaults.start_title.trim().is_empty()
            || self.defaults.target_title.trim().is_empty()
        {
            return Err(anyhow!("defaults.start_title and defaults.target_title must not be empty"));
        }
        if self.defaults.language.trim().is_empty() {
            return Err(anyhow!("defaults.language must not be empty"));
        }
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

impl GameDefaults {
    /// A request using only default values.
    pub fn request(&self) -> GameRequest {
        GameRequest::new(&self.start_title, &self.target_title, &self.language)
    }
}

impl SiteConfig {
    /// Root page URL of the `language` edition.
    pub fn root_url(&self, language: &str) -> String {
        self.root_url.replace(LANGUAGE_PLACEHOLDER, language.trim())
    }

    /// Article URL for `title` in the `language` edition (spaces become underscores).
    pub fn article_url(&self, language: &str, title: &str) -> String {
        format!(
            "{}{}{}",
            self.root_url(language),
            self.article_path,
            title_to_path(title)
        )
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GameConfig::default()`.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        let cfg = GameConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GameConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &GameConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

/// Write the default config to `path`.
///
/// Fails if `path` already exists unless `force` is set.
pub fn init_config(path: &Path, force: bool) -> Result<GameConfig> {
    if path.exists() && !force {
        return Err(anyhow!(
            "wikigame init-config: {} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    let cfg = GameConfig::default();
    write_config(path, &cfg)?;
    Ok(cfg)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
