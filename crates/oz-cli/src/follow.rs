//! `tail --follow`: print the last records, then poll for new ones until stopped.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use oz_log_analyzer::{AnalyzerConfig, LogSource, TailFollower};

use crate::render::render_record;

/// Follow `path` until Ctrl-C.
pub async fn follow(
    config: &AnalyzerConfig,
    source: &dyn LogSource,
    path: &str,
    lines: usize,
    interval: Duration,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };
    follow_until(config, source, path, lines, interval, out, shutdown).await
}

/// Follow `path` until `stop` completes.
///
/// A file that disappears between polls (log rotation) is waited for;
/// any other read failure ends the loop with an error.
pub async fn follow_until(
    config: &AnalyzerConfig,
    source: &dyn LogSource,
    path: &str,
    lines: usize,
    interval: Duration,
    out: &mut impl Write,
    stop: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let mut follower = TailFollower::new(config.clone(), path);
    for record in follower.start(source, lines)? {
        render_record(&record, out)?;
    }
    out.flush()?;
    tracing::debug!(path, format = ?follower.format(), ?interval, "following log file");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    tokio::pin!(stop);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match follower.poll(source) {
                    Ok(records) => {
                        for record in &records {
                            render_record(record, out)?;
                        }
                        out.flush()?;
                    }
                    Err(e) if e.is_not_found() => {
                        tracing::warn!(path, "log file missing, waiting for it to reappear");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            () = &mut stop => {
                tracing::info!(path, "follow stopped");
                break;
            }
        }
    }
    Ok(())
}
