//! Tests for project configuration and its environment overrides

use std::env;
use std::fs;
use std::path::Path;

use devbar::config::{DbMode, DevbarConfig};
use devbar::core::models::BuildMode;
use devbar::paths::{APP_TOKEN_ENV, RANDOM_DB_ENV, REMOTE_URL_ENV, default_store_path};
use serial_test::serial;
use tempfile::TempDir;

/// Run `f` with the given variables set (or removed when `None`)
fn with_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
    let saved: Vec<_> = vars.iter().map(|(name, _)| (*name, env::var_os(name))).collect();
    for (name, value) in vars {
        // SAFETY: every test touching the environment runs under #[serial(env)]
        unsafe {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
    let result = f();
    for (name, value) in saved {
        // SAFETY: as above
        unsafe {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
    result
}

fn managed_config(token: Option<&str>) -> DevbarConfig {
    let mut config = DevbarConfig::default();
    config.db.mode = DbMode::Managed;
    config.db.app_token = token.map(str::to_string);
    config
}

// =============================================================================
// BUILD MODE
// =============================================================================

#[test]
#[serial(env)]
fn test_local_mode_ignores_token() {
    let mode = with_env(&[(APP_TOKEN_ENV, Some("env-token"))], || {
        DevbarConfig::default().build_mode(false).unwrap()
    });
    assert_eq!(mode, BuildMode::Local);
}

#[test]
#[serial(env)]
fn test_environment_token_wins_over_config() {
    let mode = with_env(&[(APP_TOKEN_ENV, Some("env-token"))], || {
        managed_config(Some("file-token")).build_mode(false).unwrap()
    });
    assert_eq!(
        mode,
        BuildMode::Managed {
            app_token: "env-token".to_string()
        }
    );
}

#[test]
#[serial(env)]
fn test_config_token_used_without_environment() {
    let mode = with_env(&[(APP_TOKEN_ENV, None)], || {
        managed_config(Some("file-token")).build_mode(false).unwrap()
    });
    assert_eq!(
        mode,
        BuildMode::Managed {
            app_token: "file-token".to_string()
        }
    );
}

#[test]
#[serial(env)]
fn test_forced_managed_without_token_fails() {
    let err = with_env(&[(APP_TOKEN_ENV, Some(""))], || {
        DevbarConfig::default().build_mode(true).unwrap_err()
    });
    assert!(err.to_string().contains(APP_TOKEN_ENV));
}

// =============================================================================
// REMOTE URL
// =============================================================================

#[test]
#[serial(env)]
fn test_remote_url_precedence() {
    let mut config = DevbarConfig::default();

    let default = with_env(&[(REMOTE_URL_ENV, None)], || config.remote_url());
    assert_eq!(default, "https://db.services.astro.build");

    config.db.remote_url = Some("https://db.example.com".to_string());
    let configured = with_env(&[(REMOTE_URL_ENV, None)], || config.remote_url());
    assert_eq!(configured, "https://db.example.com");

    let overridden = with_env(&[(REMOTE_URL_ENV, Some("http://localhost:9000"))], || config.remote_url());
    assert_eq!(overridden, "http://localhost:9000");
}

// =============================================================================
// STORE PATH
// =============================================================================

#[test]
#[serial(env)]
fn test_store_path_is_conventional_by_default() {
    let path = with_env(&[(RANDOM_DB_ENV, None)], default_store_path);
    assert_eq!(path, Path::new(".astro/content.db"));
}

#[test]
#[serial(env)]
fn test_random_store_path_per_call() {
    let (first, second) = with_env(&[(RANDOM_DB_ENV, Some("1"))], || {
        (default_store_path(), default_store_path())
    });
    assert!(first.starts_with(".astro"));
    assert_ne!(first, Path::new(".astro/content.db"));
    assert_ne!(first, second);
}

#[test]
#[serial(env)]
fn test_plugin_settings_resolve_against_root() {
    let settings = with_env(&[(RANDOM_DB_ENV, None), (REMOTE_URL_ENV, None)], || {
        DevbarConfig::default().plugin_settings(Path::new("/site/./"), false).unwrap()
    });

    assert_eq!(settings.root, Path::new("/site"));
    assert_eq!(settings.src_dir, Path::new("/site/src"));
    assert_eq!(settings.store_path, Path::new("/site/.astro/content.db"));
    assert_eq!(settings.seed_files.len(), 4);
    assert_eq!(settings.db_url(), "file:///site/.astro/content.db");
}

// =============================================================================
// RULES AND TABLES
// =============================================================================

const SEO_RULES: &str = r#"
[[category]]
code = "seo"
name = "SEO"

[[rule]]
category = "seo"
code = "seo-javascript-link"
selector = "a[href]"
title = "Link runs JavaScript"
message = "Use a button for actions."

[rule.when]
attribute = "href"
matches = "^javascript:"
"#;

#[test]
fn test_catalog_adds_rule_files_and_drops_disabled_rules() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("audits")).unwrap();
    fs::write(temp.path().join("audits/seo.toml"), SEO_RULES).unwrap();

    let mut config = DevbarConfig::default();
    config.audit.disabled.push("a11y-autofocus".to_string());
    let catalog = config.catalog(temp.path()).unwrap();

    let codes: Vec<&str> = catalog.rules().map(|(_, rule)| rule.code()).collect();
    assert!(codes.contains(&"seo-javascript-link"));
    assert!(!codes.contains(&"a11y-autofocus"));
    assert_eq!(catalog.categories().last().unwrap().code, "seo");
}

#[test]
fn test_invalid_rule_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("audits")).unwrap();
    fs::write(temp.path().join("audits/bad.toml"), "[[rule]]\ncode = 1\n").unwrap();

    assert!(DevbarConfig::default().catalog(temp.path()).is_err());
}

#[test]
fn test_tables_file_is_optional() {
    let temp = TempDir::new().unwrap();
    assert!(DevbarConfig::default().tables(temp.path()).unwrap().is_empty());

    fs::create_dir(temp.path().join("db")).unwrap();
    fs::write(
        temp.path().join("db/tables.toml"),
        "[Author.columns.id]\ntype = \"number\"\nschema = { primaryKey = true }\n",
    )
    .unwrap();

    let tables = DevbarConfig::default().tables(temp.path()).unwrap();
    assert!(tables["Author"].columns["id"].schema.primary_key);
}
