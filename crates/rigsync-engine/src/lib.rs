//! rigsync Engine - Session layer
//!
//! Provides the [`SyncSession`] that drives copy, paste and dry run over a
//! scene host and owns their lifecycle logging.

pub mod session;

pub use session::{OutcomeStatus, SyncOutcome, SyncSession};
