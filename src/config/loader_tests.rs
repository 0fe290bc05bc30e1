//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_ends_with_zonegrid_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("zonegrid") && path_str.ends_with("config.toml"),
        "Path should contain 'zonegrid' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("zonegrid_test_config.toml");

    let toml_content = r#"
zones_url = "https://example.com/zones.json"
cover_url = "https://example.com/covers"
page_size = 12
default_sort = "name"
dark_mode = true
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should parse valid TOML")
        .expect("Should return Some for existing file");

    assert_eq!(
        config.zones_url.as_deref(),
        Some("https://example.com/zones.json")
    );
    assert_eq!(config.cover_url.as_deref(), Some("https://example.com/covers"));
    assert_eq!(config.html_url, None);
    assert_eq!(config.page_size, Some(12));
    assert_eq!(config.default_sort, Some(SortKey::Name));
    assert_eq!(config.dark_mode, Some(true));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("zonegrid_test_invalid.toml");
    fs::write(&config_path, "page_size = [not valid").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should be a parse error, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = env::temp_dir().join("zonegrid_test_unknown_field.toml");
    fs::write(&config_path, "theme = \"monokai\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_none_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn defaults_match_published_catalog() {
    let config = ResolvedConfig::default();
    assert_eq!(config.zones_url, "zones.json");
    assert_eq!(config.page_size.get(), 20);
    assert_eq!(config.default_sort, SortKey::Unordered);
    assert!(config.cover_url.contains("covers@main"));
    assert!(config.html_url.contains("html@main"));
}

#[test]
fn merge_config_overrides_only_set_fields() {
    let config_file = ConfigFile {
        html_url: Some("https://mirror.test/html".to_string()),
        page_size: Some(5),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.html_url, "https://mirror.test/html");
    assert_eq!(resolved.page_size.get(), 5);
    assert_eq!(resolved.cover_url, defaults.cover_url);
    assert_eq!(resolved.zones_url, defaults.zones_url);
}

#[test]
fn merge_config_zero_page_size_falls_back_to_default() {
    let config_file = ConfigFile {
        page_size: Some(0),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    assert_eq!(resolved.page_size.get(), DEFAULT_PAGE_SIZE);
}

#[test]
fn merge_config_detached_dir_follows_state_dir() {
    let config_file = ConfigFile {
        state_dir: Some(PathBuf::from("/srv/zonegrid")),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    assert_eq!(resolved.state_dir, PathBuf::from("/srv/zonegrid"));
    assert_eq!(resolved.detached_dir, PathBuf::from("/srv/zonegrid/detached"));
}

#[test]
#[serial(env)]
fn apply_env_overrides_reads_zones_url_and_page_size() {
    env::set_var("ZONEGRID_ZONES_URL", "/tmp/local-zones.json");
    env::set_var("ZONEGRID_PAGE_SIZE", "7");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("ZONEGRID_ZONES_URL");
    env::remove_var("ZONEGRID_PAGE_SIZE");

    assert_eq!(config.zones_url, "/tmp/local-zones.json");
    assert_eq!(config.page_size.get(), 7);
}

#[test]
#[serial(env)]
fn apply_env_overrides_ignores_invalid_page_size() {
    env::set_var("ZONEGRID_PAGE_SIZE", "zero");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("ZONEGRID_PAGE_SIZE");

    assert_eq!(config.page_size.get(), DEFAULT_PAGE_SIZE);
}

#[test]
#[serial(env)]
fn load_config_with_precedence_uses_env_path() {
    let config_path = env::temp_dir().join("zonegrid_test_env_config.toml");
    fs::write(&config_path, "page_size = 3\n").expect("Failed to write test config");
    env::set_var("ZONEGRID_CONFIG", &config_path);

    let result = load_config_with_precedence(None);

    env::remove_var("ZONEGRID_CONFIG");
    fs::remove_file(&config_path).ok();

    let config = result.unwrap().expect("env config should load");
    assert_eq!(config.page_size, Some(3));
}

#[test]
fn explicit_config_path_wins_over_env() {
    let result = load_config_with_precedence(Some(PathBuf::from("/nonexistent/explicit.toml")));
    assert_eq!(result, Ok(None));
}

#[test]
fn apply_cli_overrides_has_highest_precedence() {
    let merged = merge_config(Some(ConfigFile {
        default_sort: Some(SortKey::Name),
        dark_mode: Some(false),
        ..ConfigFile::default()
    }));

    let resolved = apply_cli_overrides(
        merged,
        CliOverrides {
            default_sort: Some(SortKey::Id),
            dark_mode: Some(true),
            page_size: NonZeroUsize::new(4),
            zones_url: None,
        },
    );

    assert_eq!(resolved.default_sort, SortKey::Id);
    assert!(resolved.dark_mode);
    assert_eq!(resolved.page_size.get(), 4);
    assert_eq!(resolved.zones_url, DEFAULT_ZONES_URL);
}

#[test]
fn template_context_resolves_configured_bases() {
    let config = ResolvedConfig {
        cover_url: "https://c.test".to_string(),
        html_url: "https://h.test".to_string(),
        ..ResolvedConfig::default()
    };

    let ctx = config.template_context().unwrap();
    assert_eq!(ctx.resolve("{HTML_URL}/a.html"), "https://h.test/a.html");
}

#[test]
fn template_context_fails_for_empty_base() {
    let config = ResolvedConfig {
        html_url: String::new(),
        ..ResolvedConfig::default()
    };

    assert_eq!(
        config.template_context(),
        Err(TemplateError::MissingPlaceholder(HTML_URL))
    );
}
