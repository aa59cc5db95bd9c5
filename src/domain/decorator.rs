//! Status decoration pipeline.
//!
//! A single worker thread drains a queue of newly discovered ports, asks the
//! oracle whether each one is installed and outdated, and writes the result
//! into the shared graph. Traversal keeps running while lookups are in flight;
//! [`StatusDecorator::finish`] is the barrier that must pass before rendering.
//!
//! The worker stops at its first oracle failure. From then on
//! [`StatusDecorator::enqueue`] returns [`DecorationStopped`] so the traversal
//! can abort instead of walking the rest of the tree.

use crate::domain::graph::DependencyGraph;
use crate::domain::node::{NodeStatus, PortName};
use crate::domain::ports::{DependencyOracle, OracleError};
use anyhow::{Context as _, Result, anyhow};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::debug;

/// The worker has already failed; [`StatusDecorator::finish`] holds the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("status decoration worker stopped")]
pub struct DecorationStopped;

pub struct StatusDecorator {
    sender: Option<Sender<PortName>>,
    worker: Option<JoinHandle<Result<usize>>>,
    stopped: Arc<AtomicBool>,
}

impl StatusDecorator {
    /// Start the worker. It lives until [`finish`](Self::finish) is called or
    /// the decorator is dropped.
    pub fn spawn(oracle: Arc<dyn DependencyOracle>, graph: DependencyGraph) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let stopped = Arc::new(AtomicBool::new(false));
        let worker_stopped = stopped.clone();
        let worker = thread::Builder::new()
            .name("status-decorator".into())
            .spawn(move || {
                let result = run_worker(receiver, oracle.as_ref(), &graph);
                if result.is_err() {
                    worker_stopped.store(true, Ordering::Release);
                }
                result
            })
            .context("Failed to spawn status decoration worker")?;
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            stopped,
        })
    }

    /// Whether the worker has stopped on an error.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Queue `name` for decoration. Never blocks.
    pub fn enqueue(&self, name: &str) -> Result<(), DecorationStopped> {
        if self.is_stopped() {
            return Err(DecorationStopped);
        }
        let sender = self.sender.as_ref().ok_or(DecorationStopped)?;
        sender.send(name.to_string()).map_err(|_| {
            debug!(port = name, "decoration worker gone, dropping request");
            DecorationStopped
        })
    }

    /// Close the queue and wait until every queued port has been decorated.
    ///
    /// Returns the number of decorated ports, or the first oracle failure.
    pub fn finish(mut self) -> Result<usize> {
        self.sender.take();
        let worker = self
            .worker
            .take()
            .ok_or_else(|| anyhow!("status decoration worker already joined"))?;
        worker
            .join()
            .map_err(|_| anyhow!("status decoration worker panicked"))?
    }
}

fn run_worker(
    receiver: Receiver<PortName>,
    oracle: &dyn DependencyOracle,
    graph: &DependencyGraph,
) -> Result<usize> {
    let mut decorated = 0;
    for name in receiver {
        let status = lookup_status(oracle, &name)
            .with_context(|| format!("Failed to determine status of {}", name))?;
        graph.update_node(&name, |node| node.status = status)?;
        debug!(port = %name, %status, "decorated");
        decorated += 1;
    }
    Ok(decorated)
}

/// Query the oracle for both status facts and resolve them.
pub fn lookup_status(
    oracle: &dyn DependencyOracle,
    name: &str,
) -> Result<NodeStatus, OracleError> {
    let installed = oracle.is_installed(name)?;
    // An absent port cannot be outdated; skip the second query.
    let outdated = installed && oracle.is_outdated(name)?;
    Ok(NodeStatus::resolve(installed, outdated))
}
