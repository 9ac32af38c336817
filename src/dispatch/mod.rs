use std::collections::BTreeMap;
use std::sync::Arc;

use crate::access::{AccessGate, Decision};
use crate::commands::{self, Invocation};
use crate::deploy::CommandDeployer;
use crate::features::{self, FeatureRegistry};
use crate::guilds::GuildStore;
use crate::types::{Button, ButtonRow, ButtonStyle, Interaction, Reply};

enum TogglePanel {
  Commands,
  Features,
}

/// Routes every inbound interaction through the access gate to its handler
/// and turns the outcome into a reply. One instance per process, sharing
/// the singleton stores by handle.
pub struct InteractionDispatcher {
  registry: Arc<FeatureRegistry>,
  guilds: Arc<GuildStore>,
  gate: AccessGate,
  deployer: Arc<dyn CommandDeployer>,
}

impl InteractionDispatcher {
  pub fn new(
    registry: Arc<FeatureRegistry>,
    guilds: Arc<GuildStore>,
    gate: AccessGate,
    deployer: Arc<dyn CommandDeployer>,
  ) -> Self {
    Self {
      registry,
      guilds,
      gate,
      deployer,
    }
  }

  pub async fn handle(&self, interaction: Interaction) -> Reply {
    tracing::debug!(
      "Handling interaction {} from {} in {}",
      interaction.id(),
      interaction.user_id(),
      interaction.guild_id()
    );
    match interaction {
      Interaction::Command {
        guild_id,
        guild_owner_id,
        user_id,
        name,
        subcommand,
        options,
        ..
      } => {
        let inv = Invocation {
          guild_id: &guild_id,
          guild_owner_id: &guild_owner_id,
          user_id: &user_id,
          subcommand: subcommand.as_deref(),
          options: &options,
        };
        self.handle_command(&name, &inv).await
      }
      Interaction::Button {
        user_id, custom_id, ..
      } => self.handle_button(&user_id, &custom_id),
      Interaction::SelectMenu {
        user_id,
        custom_id,
        values,
        ..
      } => self.handle_select(&user_id, &custom_id, &values),
      Interaction::Modal {
        custom_id, fields, ..
      } => self.handle_modal(&custom_id, &fields),
    }
  }

  async fn handle_command(&self, name: &str, inv: &Invocation<'_>) -> Reply {
    if !commands::is_implemented(name) {
      tracing::error!("No implementation for command '{}'", name);
      return Reply::ephemeral("Unknown command.");
    }
    if let Decision::Refused(refusal) =
      self
        .gate
        .decide(name, inv.guild_id, inv.user_id, inv.guild_owner_id)
    {
      return Reply::ephemeral(refusal.message());
    }

    let result: Result<Reply, anyhow::Error> = match name {
      "ping" => Ok(commands::ping()),
      "hello" => Ok(commands::hello(inv.user_id)),
      "say" => Ok(commands::say(inv)),
      "roll" => Ok(commands::roll(inv)),
      "user" => Ok(commands::user(inv)),
      "server" => Ok(commands::server(inv)),
      "announce" => Ok(commands::announce()),
      "components" => Ok(commands::components()),
      commands::SETTINGS_COMMAND => {
        Ok(commands::settings(&self.gate, &self.registry, &self.guilds, inv))
      }
      commands::SYS_COMMAND => {
        Ok(commands::sys(&self.gate, &self.registry, self.deployer.as_ref(), inv).await)
      }
      _ => Ok(Reply::ephemeral("Unknown command.")),
    };

    // The only place an unexpected failure inside a command body surfaces:
    // fatal to the interaction, never to the process.
    match result {
      Ok(reply) => reply,
      Err(e) => {
        tracing::error!("Command '{}' failed: {}", name, e);
        Reply::ephemeral("There was an error while executing this command!")
      }
    }
  }

  fn handle_button(&self, user_id: &str, custom_id: &str) -> Reply {
    if !self.registry.is_feature_enabled(features::COMPONENT_INTERACTIONS) {
      return Reply::ephemeral("Component interactions are currently disabled.");
    }

    if custom_id == "ping_again" {
      return commands::ping();
    }
    if custom_id == "roll_again" {
      return commands::quick_roll();
    }
    if let Some(color) = custom_id.strip_prefix("color_") {
      return Reply::ephemeral(format!("You selected the color: {}!", color));
    }
    if let Some(name) = custom_id.strip_prefix("toggle_cmd_") {
      if let Decision::Refused(refusal) = self.gate.authorize_owner(user_id) {
        return Reply::ephemeral(refusal.message());
      }
      return commands::toggle_reply("Command", name, self.registry.toggle_command(name));
    }
    if let Some(name) = custom_id.strip_prefix("toggle_feat_") {
      if let Decision::Refused(refusal) = self.gate.authorize_owner(user_id) {
        return Reply::ephemeral(refusal.message());
      }
      return commands::toggle_reply("Feature", name, self.registry.toggle_feature(name));
    }

    tracing::debug!("Unknown button custom_id: {}", custom_id);
    Reply::ephemeral("Unknown button interaction.")
  }

  fn handle_select(&self, user_id: &str, custom_id: &str, values: &[String]) -> Reply {
    if !self.registry.is_feature_enabled(features::COMPONENT_INTERACTIONS) {
      return Reply::ephemeral("Component interactions are currently disabled.");
    }

    if custom_id == "feature_management" {
      if let Decision::Refused(refusal) = self.gate.authorize_owner(user_id) {
        return Reply::ephemeral(refusal.message());
      }
      return match values.first().map(String::as_str) {
        Some("commands") => self.toggle_panel(TogglePanel::Commands),
        Some("features") => self.toggle_panel(TogglePanel::Features),
        _ => Reply::ephemeral("Pick either commands or features."),
      };
    }

    tracing::debug!("Unknown select menu custom_id: {}", custom_id);
    Reply::ephemeral("Unknown selection.")
  }

  fn handle_modal(&self, custom_id: &str, fields: &BTreeMap<String, String>) -> Reply {
    if !self.registry.is_feature_enabled(features::MODAL_FORMS) {
      return Reply::ephemeral("Modal forms are currently disabled.");
    }

    if custom_id == commands::ANNOUNCE_FORM {
      return commands::submit_announcement(fields);
    }

    tracing::debug!("Unknown modal custom_id: {}", custom_id);
    Reply::ephemeral("Unknown form submission.")
  }

  /// The owner's toggle panel: one button per entry, five per row, styled
  /// by current state.
  fn toggle_panel(&self, panel: TogglePanel) -> Reply {
    let (entries, prefix, title) = match panel {
      TogglePanel::Commands => (self.registry.all_commands(), "toggle_cmd_", "Command Management"),
      TogglePanel::Features => (self.registry.all_features(), "toggle_feat_", "Feature Management"),
    };

    let mut reply = Reply::ephemeral(format!(
      "{}\nClick a button to enable or disable an entry:",
      title
    ));
    let mut row = Vec::new();
    for (name, entry) in entries {
      let style = if entry.enabled {
        ButtonStyle::Success
      } else {
        ButtonStyle::Danger
      };
      row.push(Button::new(format!("{}{}", prefix, name), name, style));
      if row.len() == 5 {
        reply = reply.with_buttons(ButtonRow::of(std::mem::take(&mut row)));
      }
    }
    if !row.is_empty() {
      reply = reply.with_buttons(ButtonRow::of(row));
    }
    reply
  }
}
