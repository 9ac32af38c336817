use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inbound interaction envelope as delivered by the platform gateway.
///
/// Every variant carries the community (`guild_id`), its owner and the
/// invoking user; the gateway resolves those before handing the event over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
  Command {
    id: String,
    guild_id: String,
    guild_owner_id: String,
    user_id: String,
    name: String,
    #[serde(default)]
    subcommand: Option<String>,
    #[serde(default)]
    options: BTreeMap<String, serde_json::Value>,
  },
  Button {
    id: String,
    guild_id: String,
    guild_owner_id: String,
    user_id: String,
    custom_id: String,
  },
  SelectMenu {
    id: String,
    guild_id: String,
    guild_owner_id: String,
    user_id: String,
    custom_id: String,
    #[serde(default)]
    values: Vec<String>,
  },
  Modal {
    id: String,
    guild_id: String,
    guild_owner_id: String,
    user_id: String,
    custom_id: String,
    #[serde(default)]
    fields: BTreeMap<String, String>,
  },
}

impl Interaction {
  pub fn id(&self) -> &str {
    match self {
      Self::Command { id, .. }
      | Self::Button { id, .. }
      | Self::SelectMenu { id, .. }
      | Self::Modal { id, .. } => id,
    }
  }

  pub fn guild_id(&self) -> &str {
    match self {
      Self::Command { guild_id, .. }
      | Self::Button { guild_id, .. }
      | Self::SelectMenu { guild_id, .. }
      | Self::Modal { guild_id, .. } => guild_id,
    }
  }

  pub fn user_id(&self) -> &str {
    match self {
      Self::Command { user_id, .. }
      | Self::Button { user_id, .. }
      | Self::SelectMenu { user_id, .. }
      | Self::Modal { user_id, .. } => user_id,
    }
  }
}

/// Outbound reply. Components and modals are plain data; rendering them is
/// the platform client's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
  pub content: String,
  pub ephemeral: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub components: Vec<ButtonRow>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub open_modal: Option<ModalForm>,
}

impl Reply {
  pub fn public(content: impl Into<String>) -> Self {
    Self {
      content: content.into(),
      ephemeral: false,
      components: Vec::new(),
      open_modal: None,
    }
  }

  pub fn ephemeral(content: impl Into<String>) -> Self {
    Self {
      content: content.into(),
      ephemeral: true,
      components: Vec::new(),
      open_modal: None,
    }
  }

  pub fn with_buttons(mut self, row: ButtonRow) -> Self {
    self.components.push(row);
    self
  }

  pub fn with_modal(mut self, modal: ModalForm) -> Self {
    self.open_modal = Some(modal);
    self
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonRow {
  pub buttons: Vec<Button>,
}

impl ButtonRow {
  pub fn of(buttons: Vec<Button>) -> Self {
    Self { buttons }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Button {
  pub custom_id: String,
  pub label: String,
  pub style: ButtonStyle,
}

impl Button {
  pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
    Self {
      custom_id: custom_id.into(),
      label: label.into(),
      style,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
  Primary,
  Secondary,
  Success,
  Danger,
}

/// A modal form the client should open in response to an interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalForm {
  pub custom_id: String,
  pub title: String,
  pub inputs: Vec<TextInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextInput {
  pub custom_id: String,
  pub label: String,
  pub required: bool,
  pub multiline: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_interaction_tagged_decoding() {
    let json = r#"{
      "type": "command",
      "id": "i1",
      "guild_id": "g1",
      "guild_owner_id": "u0",
      "user_id": "u1",
      "name": "roll",
      "options": { "sides": 20 }
    }"#;
    let interaction: Interaction = serde_json::from_str(json).unwrap();
    assert_eq!(interaction.id(), "i1");
    assert_eq!(interaction.guild_id(), "g1");
    match interaction {
      Interaction::Command { name, options, subcommand, .. } => {
        assert_eq!(name, "roll");
        assert_eq!(subcommand, None);
        assert_eq!(options.get("sides").and_then(|v| v.as_i64()), Some(20));
      }
      other => panic!("unexpected variant: {:?}", other),
    }
  }

  #[test]
  fn test_reply_skips_empty_components() {
    let reply = Reply::ephemeral("hi");
    let json = serde_json::to_string(&reply).unwrap();
    assert!(!json.contains("components"));
    assert!(!json.contains("open_modal"));

    let reply = reply.with_buttons(ButtonRow::of(vec![Button::new(
      "ping_again",
      "Ping Again",
      ButtonStyle::Primary,
    )]));
    let json = serde_json::to_string(&reply).unwrap();
    assert!(json.contains("ping_again"));
  }
}
