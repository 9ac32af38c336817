use async_trait::async_trait;
use serde::Serialize;

use crate::commands::CommandSpec;

/// Outcome of a remote registration attempt, shaped for user-facing
/// rendering. Local registry state is durable before any deploy runs, so a
/// failed report is a partial success, never a rollback.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
  pub success: bool,
  pub count: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// Boundary to the platform's command catalog. The real HTTP transport
/// lives behind this trait, outside this crate.
#[async_trait]
pub trait CommandDeployer: Send + Sync {
  /// Advertise the full command set. Returns how many commands the platform
  /// accepted.
  async fn deploy(&self, specs: &[CommandSpec]) -> Result<usize, anyhow::Error>;
}

/// Run a deploy and fold the result into a report.
pub async fn deploy_catalog(deployer: &dyn CommandDeployer, specs: &[CommandSpec]) -> DeployReport {
  match deployer.deploy(specs).await {
    Ok(count) => {
      tracing::info!("Advertised {} application commands", count);
      DeployReport {
        success: true,
        count,
        error: None,
      }
    }
    Err(e) => {
      tracing::warn!("Remote command registration failed: {}", e);
      DeployReport {
        success: false,
        count: 0,
        error: Some(e.to_string()),
      }
    }
  }
}

/// Default deployer: checks that platform credentials are configured and
/// logs the advertised set without performing network I/O.
pub struct LogDeployer {
  application_id: Option<String>,
  token: Option<String>,
}

impl LogDeployer {
  pub fn new(application_id: Option<String>, token: Option<String>) -> Self {
    Self {
      application_id,
      token,
    }
  }
}

#[async_trait]
impl CommandDeployer for LogDeployer {
  async fn deploy(&self, specs: &[CommandSpec]) -> Result<usize, anyhow::Error> {
    let app = match self.application_id.as_deref() {
      Some(app) if !app.is_empty() => app,
      _ => anyhow::bail!("missing application id, skipping remote registration"),
    };
    if self.token.as_deref().map(str::is_empty).unwrap_or(true) {
      anyhow::bail!("missing platform token, skipping remote registration");
    }

    tracing::info!(
      "Refreshing {} application commands for {}",
      specs.len(),
      app
    );
    for spec in specs {
      tracing::debug!("Advertising /{}: {}", spec.name, spec.description);
    }
    Ok(specs.len())
  }
}
