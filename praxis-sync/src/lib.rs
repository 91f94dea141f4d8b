//! # praxis-sync
//!
//! Reconciliation between the local tenant store and the authoritative
//! remote: drains the unsynced-result queue, refreshes cached schedules and
//! question banks, and reacts to connectivity edges. Retries are
//! event-driven; the engine never blocks local work on the network.

pub mod monitor;
pub mod reconciler;
pub mod refresh;
pub mod transport;

pub use monitor::ConnectivityMonitor;
pub use reconciler::SyncReconciler;
pub use transport::HttpGateway;
