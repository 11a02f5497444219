//! Service layer: the transaction coordinator and the `ProgressApi`
//! implementation built on it.

pub mod coordinator;
pub mod progress;
pub mod snapshot;

pub use coordinator::TransactionCoordinator;
pub use progress::ProgressService;
pub use snapshot::Snapshot;
