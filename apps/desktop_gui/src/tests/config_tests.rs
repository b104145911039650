use super::{apply_env, apply_toml, load_settings, validate, CliArgs, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use clap::Parser;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_match_upstream_behaviour() {
    let settings = Settings::default();
    assert_eq!(
        settings.api_base_url,
        "https://www.themealdb.com/api/json/v1/1/"
    );
    assert_eq!(settings.initial_batch_size, 10);
    assert_eq!(settings.swipe_threshold_px, 50.0);
    validate(&settings).expect("defaults are valid");
}

#[test]
fn toml_overrides_only_present_keys() {
    let mut settings = Settings::default();
    apply_toml(&mut settings, "initial_batch_size = 4\nlog_filter = \"debug\"\n").expect("toml");
    assert_eq!(settings.initial_batch_size, 4);
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.swipe_threshold_px, 50.0);
}

#[test]
fn env_overrides_file_values() {
    let mut settings = Settings::default();
    apply_toml(&mut settings, "swipe_threshold_px = 80.0").expect("toml");
    apply_env(
        &mut settings,
        env_from(&[
            ("APP__SWIPE_THRESHOLD_PX", "30"),
            ("APP__API_BASE_URL", "http://127.0.0.1:9000/api"),
        ]),
    )
    .expect("env");
    assert_eq!(settings.swipe_threshold_px, 30.0);
    assert_eq!(settings.api_base_url, "http://127.0.0.1:9000/api");
}

#[test]
fn unparsable_env_value_is_an_error() {
    let mut settings = Settings::default();
    let err = apply_env(
        &mut settings,
        env_from(&[("APP__INITIAL_BATCH_SIZE", "ten")]),
    )
    .expect_err("must fail");
    assert!(err.to_string().contains("APP__INITIAL_BATCH_SIZE"));
}

#[test]
fn validation_rejects_nonsense() {
    let mut settings = Settings::default();
    settings.initial_batch_size = 0;
    assert!(validate(&settings).is_err());

    let mut settings = Settings::default();
    settings.swipe_threshold_px = -1.0;
    assert!(validate(&settings).is_err());

    let mut settings = Settings::default();
    settings.api_base_url = "themealdb".into();
    assert!(validate(&settings).is_err());
}

#[test]
fn cli_flags_win_over_settings_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("recipe_swipe_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp dir");
    let path = temp_root.join("recipe_swipe.toml");
    fs::write(&path, "initial_batch_size = 3\nswipe_threshold_px = 75.0\n").expect("write");

    let cli = CliArgs::parse_from([
        "recipe_swipe",
        "--config",
        path.to_str().expect("utf8 path"),
        "--initial-batch-size",
        "6",
    ]);
    let settings = load_settings(&cli).expect("settings");

    assert_eq!(settings.initial_batch_size, 6);
    assert_eq!(settings.swipe_threshold_px, 75.0);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_explicit_settings_file_is_an_error() {
    let cli = CliArgs::parse_from([
        "recipe_swipe",
        "--config",
        "/definitely/not/here/recipe_swipe.toml",
    ]);
    assert!(load_settings(&cli).is_err());
}
