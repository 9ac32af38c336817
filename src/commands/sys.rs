use crate::access::{AccessGate, Refusal};
use crate::commands::{self, Invocation};
use crate::deploy::{self, CommandDeployer};
use crate::features::{FeatureRegistry, ToggleOutcome};
use crate::types::Reply;

/// Owner-only system administration: registry status, inventory reload and
/// global command/feature toggles.
pub async fn run(
  gate: &AccessGate,
  registry: &FeatureRegistry,
  deployer: &dyn CommandDeployer,
  inv: &Invocation<'_>,
) -> Reply {
  if !gate.authorize_owner(inv.user_id).is_allowed() {
    return Reply::ephemeral(Refusal::NotBotOwner.message());
  }

  match inv.subcommand {
    Some("status") => status(registry),
    Some("info") => info(registry),
    Some("reload") => reload(registry, deployer).await,
    Some("toggle-command") => match inv.str_option("name") {
      Some(name) => toggle_reply("Command", name, registry.toggle_command(name)),
      None => Reply::ephemeral("You need to name a command to toggle."),
    },
    Some("toggle-feature") => match inv.str_option("name") {
      Some(name) => toggle_reply("Feature", name, registry.toggle_feature(name)),
      None => Reply::ephemeral("You need to name a feature to toggle."),
    },
    _ => Reply::ephemeral(
      "Unknown system subcommand. Use status, info, reload, toggle-command or toggle-feature.",
    ),
  }
}

fn status(registry: &FeatureRegistry) -> Reply {
  let status = registry.status();
  Reply::ephemeral(format!(
    "Registry Status\nCommands: {}/{} enabled\nFeatures: {}/{} enabled",
    status.commands.enabled, status.commands.total, status.features.enabled, status.features.total
  ))
}

fn info(registry: &FeatureRegistry) -> Reply {
  let status = registry.status();
  Reply::ephemeral(format!(
    "Bot Information\nVersion: {}\nImplemented commands: {}\nCommands enabled: {}/{}\nFeatures enabled: {}/{}",
    env!("CARGO_PKG_VERSION"),
    commands::catalog().len(),
    status.commands.enabled,
    status.commands.total,
    status.features.enabled,
    status.features.total
  ))
}

async fn reload(registry: &FeatureRegistry, deployer: &dyn CommandDeployer) -> Reply {
  let changed = commands::reconcile(registry);
  let specs = commands::catalog();
  let report = deploy::deploy_catalog(deployer, &specs).await;

  let inventory = if changed {
    "registry updated from the implemented inventory"
  } else {
    "registry already in sync"
  };
  if report.success {
    Reply::ephemeral(format!(
      "Commands Reloaded\n{} commands implemented, {}.\nAdvertised {} commands to the platform.",
      specs.len(),
      inventory,
      report.count
    ))
  } else {
    // Local state is already durable; the remote sync is the only casualty.
    Reply::ephemeral(format!(
      "Partial Success\n{} commands implemented, {}.\nRemote registration failed: {}",
      specs.len(),
      inventory,
      report.error.unwrap_or_else(|| "unknown error".to_string())
    ))
  }
}

/// Render a global toggle outcome, including the not-found sentinel and a
/// warning when the new state did not reach disk.
pub(crate) fn toggle_reply(kind: &str, name: &str, outcome: Option<ToggleOutcome>) -> Reply {
  match outcome {
    Some(ToggleOutcome { enabled, persisted }) => {
      let state = if enabled { "enabled" } else { "disabled" };
      let mut content = format!("{} `{}` is now {}.", kind, name, state);
      if !persisted {
        content.push_str(" Warning: the change could not be saved and may not survive a restart.");
      }
      Reply::ephemeral(content)
    }
    None => Reply::ephemeral(format!("{} `{}` not found.", kind, name)),
  }
}
