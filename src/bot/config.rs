use serde::{Deserialize, Serialize};
use std::path::Path;

/// Expand environment variables in a string.
/// Supports $VAR_NAME and ${VAR_NAME} syntax.
fn expand_env_vars(input: &str) -> String {
  let mut result = input.to_string();

  // Handle ${VAR_NAME} syntax first (more specific)
  while let Some(start) = result.find("${") {
    if let Some(end) = result[start..].find('}') {
      let var_name = &result[start + 2..start + end];
      let value = std::env::var(var_name).unwrap_or_default();
      result = format!(
        "{}{}{}",
        &result[..start],
        value,
        &result[start + end + 1..]
      );
    } else {
      break;
    }
  }

  // Handle $VAR_NAME syntax (word boundary: alphanumeric + underscore)
  let mut i = 0;
  while i < result.len() {
    if result[i..].starts_with('$') && !result[i..].starts_with("${") {
      let rest = &result[i + 1..];
      let var_len = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .count();
      if var_len > 0 {
        let var_name = &rest[..var_len];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..i], value, &rest[var_len..]);
        i += value.len();
        continue;
      }
    }
    i += 1;
  }

  result
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
  #[serde(default)]
  pub bot: BotSection,
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub data: DataSection,
  #[serde(default)]
  pub logging: LoggingSection,
}

/// Identity and platform credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotSection {
  /// User id allowed to run global toggles. Unset means nobody is.
  #[serde(default)]
  pub owner_id: Option<String>,
  /// Application id used for remote command registration.
  #[serde(default)]
  pub application_id: Option<String>,
  /// Platform token; usually `${ACORNBOT_TOKEN}` in the file.
  #[serde(default)]
  pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
}

fn default_host() -> String {
  "127.0.0.1".into()
}
fn default_port() -> u16 {
  8090
}

impl Default for ServerSection {
  fn default() -> Self {
    Self {
      host: default_host(),
      port: default_port(),
    }
  }
}

/// Paths of the two persisted documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSection {
  #[serde(default = "default_features_path")]
  pub features_path: String,
  #[serde(default = "default_guild_settings_path")]
  pub guild_settings_path: String,
}

fn default_features_path() -> String {
  "./data/features.json".into()
}
fn default_guild_settings_path() -> String {
  "./data/guild-settings.json".into()
}

impl Default for DataSection {
  fn default() -> Self {
    Self {
      features_path: default_features_path(),
      guild_settings_path: default_guild_settings_path(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
  #[serde(default = "default_level")]
  pub level: String,
}

fn default_level() -> String {
  "info".into()
}

impl Default for LoggingSection {
  fn default() -> Self {
    Self {
      level: default_level(),
    }
  }
}

impl BotConfig {
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
    let content = std::fs::read_to_string(&path)?;
    let expanded = expand_env_vars(&content);
    Ok(serde_yaml::from_str(&expanded)?)
  }

  pub fn find_and_load() -> Result<Option<Self>, anyhow::Error> {
    for p in ["acornbot.yaml", "acornbot.yml"] {
      if Path::new(p).exists() {
        tracing::info!("Loading config from {}", p);
        return Ok(Some(Self::from_file(p)?));
      }
    }
    Ok(None)
  }

  pub fn address(&self) -> String {
    format!("{}:{}", self.server.host, self.server.port)
  }
}
