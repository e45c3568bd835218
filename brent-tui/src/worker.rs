//! Background worker thread — all network I/O runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each load
//! fans out into one thread per endpoint; every completion is sent back on
//! its own, tagged with the load generation that requested it.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use brent_core::source::{DashboardSource, Endpoint, Payload, SourceError};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Fetch all four endpoints concurrently.
    Load { generation: u64 },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Loaded {
        generation: u64,
        payload: Payload,
    },
    FetchFailed {
        generation: u64,
        endpoint: Endpoint,
        error: SourceError,
    },
}

impl WorkerResponse {
    pub fn generation(&self) -> u64 {
        match self {
            WorkerResponse::Loaded { generation, .. } | WorkerResponse::FetchFailed { generation, .. } => {
                *generation
            }
        }
    }
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    source: Arc<dyn DashboardSource>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("brent-worker".into())
        .spawn(move || worker_loop(source, rx, tx))
}

fn worker_loop(source: Arc<dyn DashboardSource>, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    tracing::debug!(source = source.name(), "worker started");
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Load { generation }) => {
                tracing::info!(generation, source = source.name(), "loading dashboard data");
                for endpoint in Endpoint::ALL {
                    spawn_fetch(Arc::clone(&source), endpoint, generation, tx.clone());
                }
            }
        }
    }
    tracing::debug!("worker stopped");
}

/// Fire one fetch on its own thread. Fetch threads are detached: a slow
/// endpoint never blocks shutdown, and a send after the UI has gone is
/// silently dropped.
fn spawn_fetch(source: Arc<dyn DashboardSource>, endpoint: Endpoint, generation: u64, tx: Sender<WorkerResponse>) {
    let failure_tx = tx.clone();
    let spawned = thread::Builder::new()
        .name(format!("brent-fetch-{}", endpoint.path().trim_start_matches("/api/")))
        .spawn(move || {
            let resp = match source.fetch(endpoint) {
                Ok(payload) => WorkerResponse::Loaded { generation, payload },
                Err(error) => WorkerResponse::FetchFailed {
                    generation,
                    endpoint,
                    error,
                },
            };
            let _ = tx.send(resp);
        });

    if let Err(e) = spawned {
        let _ = failure_tx.send(WorkerResponse::FetchFailed {
            generation,
            endpoint,
            error: SourceError::Other(format!("failed to spawn fetch thread: {e}")),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::mpsc;
    use std::time::Duration;

    use brent_core::sample::sample_source;

    #[test]
    fn load_yields_one_response_per_endpoint() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(Arc::new(sample_source(1)), cmd_rx, resp_tx).unwrap();

        cmd_tx.send(WorkerCommand::Load { generation: 3 }).unwrap();
        let mut seen = HashSet::new();
        for _ in 0..4 {
            let resp = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(resp.generation(), 3);
            match resp {
                WorkerResponse::Loaded { payload, .. } => {
                    seen.insert(payload.endpoint());
                }
                WorkerResponse::FetchFailed { endpoint, error, .. } => {
                    panic!("{} failed: {error}", endpoint.label())
                }
            }
        }
        assert_eq!(seen.len(), 4);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn failing_endpoint_reports_failure() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let source = sample_source(1).failing(Endpoint::ChangePoints);
        let handle = spawn_worker(Arc::new(source), cmd_rx, resp_tx).unwrap();

        cmd_tx.send(WorkerCommand::Load { generation: 1 }).unwrap();
        let failures: Vec<Endpoint> = (0..4)
            .filter_map(|_| match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                WorkerResponse::FetchFailed { endpoint, .. } => Some(endpoint),
                WorkerResponse::Loaded { .. } => None,
            })
            .collect();
        assert_eq!(failures, vec![Endpoint::ChangePoints]);

        drop(cmd_tx);
        handle.join().unwrap();
    }
}
