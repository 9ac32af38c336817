//! Configuration parsing tests: defaults, sections, env expansion.

use acornbot::bot::BotConfig;

#[test]
fn test_defaults() {
  let config = BotConfig::default();
  assert_eq!(config.server.host, "127.0.0.1");
  assert_eq!(config.server.port, 8090);
  assert_eq!(config.data.features_path, "./data/features.json");
  assert_eq!(config.data.guild_settings_path, "./data/guild-settings.json");
  assert_eq!(config.logging.level, "info");
  assert!(config.bot.owner_id.is_none());
}

#[test]
fn test_partial_yaml_fills_defaults() {
  let yaml = r#"
bot:
  owner_id: "123456789"
server:
  port: 9999
"#;
  let config: BotConfig = serde_yaml::from_str(yaml).unwrap();
  assert_eq!(config.bot.owner_id.as_deref(), Some("123456789"));
  assert_eq!(config.server.port, 9999);
  assert_eq!(config.server.host, "127.0.0.1");
  assert_eq!(config.logging.level, "info");
}

#[test]
fn test_address_formatting() {
  let yaml = r#"
server:
  host: "0.0.0.0"
  port: 7000
"#;
  let config: BotConfig = serde_yaml::from_str(yaml).unwrap();
  assert_eq!(config.address(), "0.0.0.0:7000");
}

#[test]
fn test_data_paths_override() {
  let yaml = r#"
data:
  features_path: "/var/lib/acornbot/features.json"
"#;
  let config: BotConfig = serde_yaml::from_str(yaml).unwrap();
  assert_eq!(config.data.features_path, "/var/lib/acornbot/features.json");
  assert_eq!(
    config.data.guild_settings_path,
    "./data/guild-settings.json"
  );
}

#[test]
fn test_env_expansion_in_file() {
  std::env::set_var("ACORNBOT_TEST_TOKEN", "s3cret");
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("acornbot.yaml");
  std::fs::write(
    &path,
    r#"
bot:
  token: "${ACORNBOT_TEST_TOKEN}"
  application_id: "$ACORNBOT_TEST_TOKEN"
"#,
  )
  .unwrap();

  let config = BotConfig::from_file(&path).unwrap();
  assert_eq!(config.bot.token.as_deref(), Some("s3cret"));
  assert_eq!(config.bot.application_id.as_deref(), Some("s3cret"));
}

#[test]
fn test_missing_file_is_an_error() {
  assert!(BotConfig::from_file("/definitely/not/here.yaml").is_err());
}
