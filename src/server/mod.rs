//! Interaction ingress.
//!
//! Stand-in for the platform gateway connection: newline-delimited JSON over
//! TCP, one `Interaction` per line in, one `Reply` per line out. The real
//! gateway client terminates the platform protocol and speaks this framing
//! to the bot process.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

use crate::dispatch::InteractionDispatcher;
use crate::types::{Interaction, Reply};

pub struct GatewayServer {
  dispatcher: Arc<InteractionDispatcher>,
  shutdown_rx: broadcast::Receiver<()>,
}

impl GatewayServer {
  pub fn new(dispatcher: Arc<InteractionDispatcher>, shutdown_rx: broadcast::Receiver<()>) -> Self {
    Self {
      dispatcher,
      shutdown_rx,
    }
  }

  pub async fn run(mut self, addr: &str) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Interaction ingress listening on {}", addr);

    loop {
      tokio::select! {
        Ok((stream, peer)) = listener.accept() => {
          tracing::debug!("Gateway connection from {}", peer);
          let dispatcher = self.dispatcher.clone();
          tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, dispatcher).await {
              tracing::debug!("Gateway connection error: {}", e);
            }
          });
        }
        _ = self.shutdown_rx.recv() => {
          tracing::info!("Interaction ingress shutting down");
          break;
        }
      }
    }
    Ok(())
  }
}

/// One connection: read interactions line by line, answer each in order.
/// Malformed lines get an error reply; the connection stays open.
async fn handle_connection(
  stream: TcpStream,
  dispatcher: Arc<InteractionDispatcher>,
) -> Result<(), anyhow::Error> {
  let (read_half, mut write_half) = stream.into_split();
  let mut lines = BufReader::new(read_half).lines();

  while let Some(line) = lines.next_line().await? {
    if line.trim().is_empty() {
      continue;
    }
    let reply = match serde_json::from_str::<Interaction>(&line) {
      Ok(interaction) => dispatcher.handle(interaction).await,
      Err(e) => {
        tracing::debug!("Undecodable interaction: {}", e);
        Reply::ephemeral(format!("Invalid interaction payload: {}", e))
      }
    };
    let mut out = serde_json::to_vec(&reply)?;
    out.push(b'\n');
    write_half.write_all(&out).await?;
  }
  Ok(())
}
