use super::data::Config;
use super::io::{ConfigError, ConfigLocation, CONFIG_FILE_NAME};
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = r#"
api_endpoint = "https://bots.example.com/chat"
authorization_header = "Bearer abc123"
bot_name = "Marvin"
user_name = "Arthur"
"#;

#[test]
fn loads_every_required_key() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, SAMPLE).unwrap();

    let config = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(config.api_endpoint, "https://bots.example.com/chat");
    assert_eq!(config.authorization_header, "Bearer abc123");
    assert_eq!(config.bot_name, "Marvin");
    assert_eq!(config.user_name, "Arthur");
}

#[test]
fn missing_key_is_a_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &config_path,
        "api_endpoint = \"http://x\"\nbot_name = \"b\"\nuser_name = \"u\"\n",
    )
    .unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("authorization_header"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "api_endpoint = ").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn unreadable_path_is_a_read_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nope.toml");

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().starts_with("Failed to read config at"));
}

#[test]
fn working_directory_file_takes_precedence() {
    let work = TempDir::new().unwrap();
    let platform = TempDir::new().unwrap();
    let local = work.path().join(CONFIG_FILE_NAME);
    let platform_path = platform.path().join(CONFIG_FILE_NAME);
    fs::write(&local, SAMPLE).unwrap();
    fs::write(&platform_path, SAMPLE).unwrap();

    let location = Config::locate(Some(work.path()), Some(platform_path)).unwrap();
    assert_eq!(location, ConfigLocation::Existing(local));
}

#[test]
fn falls_back_to_platform_path() {
    let work = TempDir::new().unwrap();
    let platform = TempDir::new().unwrap();
    let platform_path = platform.path().join(CONFIG_FILE_NAME);

    let location = Config::locate(Some(work.path()), Some(platform_path.clone())).unwrap();
    assert_eq!(location, ConfigLocation::Create(platform_path.clone()));

    fs::write(&platform_path, SAMPLE).unwrap();
    let location = Config::locate(Some(work.path()), Some(platform_path.clone())).unwrap();
    assert_eq!(location, ConfigLocation::Existing(platform_path));
}

#[test]
fn no_platform_directory_is_an_error() {
    let work = TempDir::new().unwrap();
    let err = Config::locate(Some(work.path()), None).unwrap_err();
    assert!(matches!(err, ConfigError::NoConfigDir));
}

#[test]
fn missing_file_is_created_with_defaults_then_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

    let config = Config::load_from_location(&ConfigLocation::Create(config_path.clone()))
        .expect("default config should be created");
    assert_eq!(config, Config::default());
    assert_eq!(config.api_endpoint, "http://localhost:5000/chat");
    assert!(config_path.is_file());

    let on_disk = fs::read_to_string(&config_path).unwrap();
    assert!(on_disk.contains("authorization_header = \"your-auth-token\""));
}

#[test]
fn existing_file_is_not_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, SAMPLE).unwrap();

    let config = Config::load_from_location(&ConfigLocation::Existing(config_path.clone())).unwrap();
    assert_eq!(config.bot_name, "Marvin");
    assert_eq!(fs::read_to_string(&config_path).unwrap(), SAMPLE);
}
