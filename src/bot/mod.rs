mod config;

pub use config::{BotConfig, BotSection, DataSection, LoggingSection, ServerSection};

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::access::AccessGate;
use crate::commands;
use crate::deploy::{self, CommandDeployer, LogDeployer};
use crate::dispatch::InteractionDispatcher;
use crate::features::{self, FeatureRegistry};
use crate::guilds::GuildStore;
use crate::server::GatewayServer;
use crate::store::JsonStore;

/// The bot process: constructs the singleton services once and runs the
/// startup sequence plus the interaction ingress.
pub struct Bot {
  config: BotConfig,
  registry: Arc<FeatureRegistry>,
  deployer: Arc<dyn CommandDeployer>,
  dispatcher: Arc<InteractionDispatcher>,
  shutdown_tx: broadcast::Sender<()>,
}

impl Bot {
  /// The only construction site for the registry and the guild store; every
  /// handler shares these instances for the process lifetime.
  pub fn new(config: BotConfig) -> Self {
    let registry = Arc::new(FeatureRegistry::load(JsonStore::new(
      &config.data.features_path,
    )));
    let guilds = Arc::new(GuildStore::load(JsonStore::new(
      &config.data.guild_settings_path,
    )));
    let gate = AccessGate::new(
      registry.clone(),
      guilds.clone(),
      config.bot.owner_id.clone(),
    );
    let deployer: Arc<dyn CommandDeployer> = Arc::new(LogDeployer::new(
      config.bot.application_id.clone(),
      config.bot.token.clone(),
    ));
    let dispatcher = Arc::new(InteractionDispatcher::new(
      registry.clone(),
      guilds,
      gate,
      deployer.clone(),
    ));
    let (shutdown_tx, _) = broadcast::channel(1);

    Self {
      config,
      registry,
      deployer,
      dispatcher,
      shutdown_tx,
    }
  }

  /// Trigger graceful shutdown of the ingress.
  pub fn shutdown(&self) {
    tracing::info!("Initiating graceful shutdown...");
    let _ = self.shutdown_tx.send(());
  }

  pub async fn run(&self) -> Result<(), anyhow::Error> {
    // Reconcile before any remote registration so the registry and the
    // advertised set agree on which commands exist.
    commands::reconcile(&self.registry);

    if self.registry.is_feature_enabled(features::AUTO_DEPLOY) {
      let report = deploy::deploy_catalog(self.deployer.as_ref(), &commands::catalog()).await;
      if report.success {
        tracing::info!("Auto-deployed {} commands", report.count);
      } else {
        tracing::warn!(
          "Auto-deploy failed: {}",
          report.error.unwrap_or_else(|| "unknown error".to_string())
        );
      }
    } else {
      tracing::info!("auto_deploy feature disabled, skipping command deployment");
    }

    let server = GatewayServer::new(self.dispatcher.clone(), self.shutdown_tx.subscribe());
    server.run(&self.config.address()).await
  }
}
