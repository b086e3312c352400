//! Headless mode: follow a lobby from the terminal without the TUI.

use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;

use tokio::sync::mpsc;

use guess_common::lobby::{Lobby, LobbyView};

use crate::api::LobbyApi;
use crate::config::ClientConfig;
use crate::poller::LobbyPoller;

pub async fn run<A: LobbyApi + 'static>(
    api: Arc<A>,
    config: &ClientConfig,
    player_id: String,
) -> anyhow::Result<()> {
    if player_id.is_empty() {
        anyhow::bail!("--watch needs a player id");
    }

    let (tx, rx) = mpsc::channel::<Lobby>(16);
    let mut poller = LobbyPoller::start(api, player_id.clone(), config.poll_interval, tx);
    tracing::info!("Watching lobby for player {} at {}", player_id, config.base_url);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let printed = watch_snapshots(rx, &mut io::stdout(), shutdown).await?;

    poller.stop();
    tracing::info!("Stopped watching after {} update(s)", printed);
    Ok(())
}

/// Prints each snapshot that differs from the previous one until `shutdown`
/// resolves or the sender goes away. Returns the number of snapshots printed.
pub async fn watch_snapshots<W, F>(
    mut rx: mpsc::Receiver<Lobby>,
    out: &mut W,
    shutdown: F,
) -> io::Result<usize>
where
    W: Write,
    F: Future<Output = ()>,
{
    let mut view = LobbyView::default();
    let mut printed = 0;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            next = rx.recv() => {
                let Some(lobby) = next else { break };
                if !view.apply(lobby) {
                    continue;
                }
                for line in view.summary_lines() {
                    writeln!(out, "{}", line)?;
                }
                writeln!(out)?;
                out.flush()?;
                printed += 1;
            }
        }
    }

    Ok(printed)
}
