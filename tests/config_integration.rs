//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables, and
//! that the loaded profile drives which links the overlay shows.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use starfield::config::AppConfig;
use starfield::profile::{Channel, ProfileView};

// Fresh config directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("starfield-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("STARFIELD_PROFILE__NAME", "Test From Env");
    std::env::set_var("STARFIELD_FIELD__PARTICLE_COUNT", "12");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("STARFIELD_PROFILE__NAME");
    std::env::remove_var("STARFIELD_FIELD__PARTICLE_COUNT");

    assert_eq!(config.profile.name, "Test From Env");
    assert_eq!(config.field.particle_count, 12);
}

#[test]
#[serial]
fn test_env_values_out_of_range_fall_back_to_defaults() {
    std::env::set_var("STARFIELD_FIELD__MAX_DELTA_FRAMES", "-1");
    std::env::set_var("STARFIELD_FIELD__POINTER_SMOOTHING", "4");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("STARFIELD_FIELD__MAX_DELTA_FRAMES");
    std::env::remove_var("STARFIELD_FIELD__POINTER_SMOOTHING");

    let builtin = AppConfig::default();
    assert_eq!(config.field.max_delta_frames, builtin.field.max_delta_frames);
    assert_eq!(config.field.pointer_smoothing, builtin.field.pointer_smoothing);
}

#[test]
#[serial]
fn test_shipped_defaults_match_builtin_defaults() {
    let config = AppConfig::load().unwrap();
    let builtin = AppConfig::default();

    assert_eq!(config.window.title, builtin.window.title);
    assert_eq!(config.profile, builtin.profile);
    assert_eq!(config.field.particle_count, builtin.field.particle_count);
    assert_eq!(config.field.connection_distance, builtin.field.connection_distance);
    assert_eq!(config.field.connection_strategy, builtin.field.connection_strategy);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = scratch_dir("layers");
    fs::write(
        dir.join("default.toml"),
        "[profile]\nname = \"Base\"\nsubtitle = \"base subtitle\"\n",
    )
    .unwrap();
    fs::write(dir.join("user.toml"), "[profile]\nname = \"Local\"\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.profile.name, "Local");
    assert_eq!(config.profile.subtitle, "base subtitle");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_gives_defaults() {
    let dir = std::env::temp_dir().join("starfield-does-not-exist");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.profile.name, "Nova Drift");
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("default.toml"), "[field]\nparticle_count = \"many\"\n").unwrap();

    let result = AppConfig::load_from(&dir);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().starts_with("configuration error"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_only_configured_socials_are_shown() {
    let dir = scratch_dir("socials");
    fs::write(
        dir.join("default.toml"),
        r#"
        [profile]
        name = "Nova"
        music = ""

        [profile.socials]
        steam = "https://x"
        "#,
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    let view = ProfileView::from_config(&config.profile);

    assert!(view.link(Channel::Steam).unwrap().visible);
    assert!(!view.link(Channel::Spotify).unwrap().visible);
    assert!(!view.link(Channel::DiscordUser).unwrap().visible);
    assert!(!view.has_music());
    assert_eq!(view.avatar.alt, "Nova avatar");

    fs::remove_dir_all(&dir).unwrap();
}
