//! Re-running the pipeline on file changes.

use std::future::Future;
use std::time::Duration;

use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::PipelineError;
use crate::runner::{PipelineRunner, RunOutcome};

/// Watch the page root and regenerate routes until Ctrl-C.
///
/// Runs once up front, then once per debounced burst of changes.
pub async fn watch(runner: &mut PipelineRunner) -> Result<(), PipelineError> {
    watch_until(runner, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "could not listen for Ctrl-C");
        }
    })
    .await
}

/// Watch the page root until `shutdown` completes.
///
/// The watcher is registered before the initial run, so changes made once
/// that run has been delivered are never missed.
pub async fn watch_until<F>(runner: &mut PipelineRunner, shutdown: F) -> Result<(), PipelineError>
where
    F: Future<Output = ()>,
{
    let (tx, rx) = mpsc::channel(100);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        // A full channel already holds a pending trigger.
        Ok(event) => {
            let _ = tx.try_send(event);
        }
        Err(err) => warn!(error = %err, "file watcher error"),
    })?;

    let root = runner.config().page_root.clone();
    watcher.watch(&root, RecursiveMode::Recursive)?;
    info!(root = %root.display(), "watching for changes");

    report(runner.run_once().await);

    let delay = runner.debounce();
    tokio::select! {
        _ = debounce_runs(runner, rx, delay) => {}
        _ = shutdown => info!("stopped watching"),
    }

    drop(watcher);
    Ok(())
}

/// Run the pipeline once per burst of events.
///
/// Each event restarts the delay; the run happens once the channel has been
/// quiet for `delay`. Returns when the channel closes, after flushing a
/// pending burst.
pub async fn debounce_runs<T>(
    runner: &mut PipelineRunner,
    mut events: mpsc::Receiver<T>,
    delay: Duration,
) {
    while events.recv().await.is_some() {
        let mut closed = false;
        loop {
            tokio::select! {
                event = events.recv() => {
                    if event.is_none() {
                        closed = true;
                        break;
                    }
                }
                _ = tokio::time::sleep(delay) => break,
            }
        }

        report(runner.run_once().await);
        if closed {
            break;
        }
    }
}

fn report(result: Result<RunOutcome, PipelineError>) {
    match result {
        Ok(RunOutcome::Written { routes }) => debug!(routes, "routes regenerated"),
        Ok(RunOutcome::Unchanged) => debug!("routes unchanged"),
        Err(err) => error!(error = %err, "route generation failed"),
    }
}
