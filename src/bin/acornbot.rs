use acornbot::bot::{Bot, BotConfig};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "acornbot", about = "Acornbot chat-platform bot", version)]
struct Args {
  #[arg(short, long)]
  config: Option<String>,
  #[arg(long, env = "ACORNBOT_OWNER_ID")]
  owner_id: Option<String>,
  #[arg(long, env = "ACORNBOT_APPLICATION_ID")]
  application_id: Option<String>,
  #[arg(long, env = "ACORNBOT_TOKEN", hide_env_values = true)]
  token: Option<String>,
  #[arg(long)]
  host: Option<String>,
  #[arg(short, long)]
  port: Option<u16>,
  #[arg(long)]
  features_file: Option<String>,
  #[arg(long)]
  guild_settings_file: Option<String>,
  #[arg(long)]
  log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
  let args = Args::parse();

  // Load config: explicit path > auto-detect > defaults
  let mut config = if let Some(path) = &args.config {
    BotConfig::from_file(path)?
  } else {
    BotConfig::find_and_load()?.unwrap_or_default()
  };

  // CLI args override config file
  if let Some(owner_id) = args.owner_id {
    config.bot.owner_id = Some(owner_id);
  }
  if let Some(application_id) = args.application_id {
    config.bot.application_id = Some(application_id);
  }
  if let Some(token) = args.token {
    config.bot.token = Some(token);
  }
  if let Some(host) = args.host {
    config.server.host = host;
  }
  if let Some(port) = args.port {
    config.server.port = port;
  }
  if let Some(path) = args.features_file {
    config.data.features_path = path;
  }
  if let Some(path) = args.guild_settings_file {
    config.data.guild_settings_path = path;
  }
  if let Some(level) = args.log_level {
    config.logging.level = level;
  }

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  if config.bot.owner_id.is_none() {
    tracing::warn!("No bot owner configured; global toggles will refuse everyone");
  }

  let bot = Arc::new(Bot::new(config));
  let bot_clone = bot.clone();

  // Handle shutdown signals (SIGINT, SIGTERM)
  tokio::spawn(async move {
    shutdown_signal().await;
    bot_clone.shutdown();

    // Give the ingress time to drain connections
    tokio::time::sleep(Duration::from_secs(2)).await;
    tracing::info!("Shutdown complete");
    std::process::exit(0);
  });

  bot.run().await
}

async fn shutdown_signal() {
  let ctrl_c = async {
    tokio::signal::ctrl_c()
      .await
      .expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
      .expect("Failed to install SIGTERM handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => tracing::info!("Received SIGINT"),
    _ = terminate => tracing::info!("Received SIGTERM"),
  }
}
