use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use client_core::{DEFAULT_SWIPE_THRESHOLD_PX, INITIAL_BATCH_SIZE, MEALDB_BASE_URL};
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "recipe_swipe.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "recipe_swipe", about = "Swipe through random recipes")]
pub struct CliArgs {
    /// Settings file; defaults to ./recipe_swipe.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub api_base_url: Option<String>,
    #[arg(long)]
    pub initial_batch_size: Option<usize>,
    #[arg(long)]
    pub swipe_threshold_px: Option<f32>,
    /// tracing filter directive, e.g. `info,client_core=debug`.
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub initial_batch_size: usize,
    pub swipe_threshold_px: f32,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: MEALDB_BASE_URL.into(),
            initial_batch_size: INITIAL_BATCH_SIZE,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    initial_batch_size: Option<usize>,
    swipe_threshold_px: Option<f32>,
    log_filter: Option<String>,
}

/// Defaults, then the settings file, then `APP__*` variables, then flags.
pub fn load_settings(cli: &CliArgs) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match &cli.config {
        Some(path) => apply_file(&mut settings, path)?,
        None => {
            let path = Path::new(DEFAULT_SETTINGS_FILE);
            if path.exists() {
                apply_file(&mut settings, path)?;
            }
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok())?;
    apply_cli(&mut settings, cli);
    validate(&settings)?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    apply_toml(settings, &raw)
        .with_context(|| format!("invalid settings file {}", path.display()))
}

pub(crate) fn apply_toml(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.initial_batch_size {
        settings.initial_batch_size = v;
    }
    if let Some(v) = file_cfg.swipe_threshold_px {
        settings.swipe_threshold_px = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

pub(crate) fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__INITIAL_BATCH_SIZE") {
        settings.initial_batch_size = v
            .parse()
            .with_context(|| format!("APP__INITIAL_BATCH_SIZE is not a count: {v}"))?;
    }
    if let Some(v) = lookup("APP__SWIPE_THRESHOLD_PX") {
        settings.swipe_threshold_px = v
            .parse()
            .with_context(|| format!("APP__SWIPE_THRESHOLD_PX is not a number: {v}"))?;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_cli(settings: &mut Settings, cli: &CliArgs) {
    if let Some(v) = &cli.api_base_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = cli.initial_batch_size {
        settings.initial_batch_size = v;
    }
    if let Some(v) = cli.swipe_threshold_px {
        settings.swipe_threshold_px = v;
    }
    if let Some(v) = &cli.log_filter {
        settings.log_filter = v.clone();
    }
}

pub(crate) fn validate(settings: &Settings) -> anyhow::Result<()> {
    url::Url::parse(&settings.api_base_url)
        .with_context(|| format!("api_base_url is not a url: {}", settings.api_base_url))?;
    if settings.initial_batch_size == 0 {
        bail!("initial_batch_size must be at least 1");
    }
    if !settings.swipe_threshold_px.is_finite() || settings.swipe_threshold_px <= 0.0 {
        bail!(
            "swipe_threshold_px must be a positive number, got {}",
            settings.swipe_threshold_px
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
