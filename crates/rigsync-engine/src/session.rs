//! Sync session with boundary logging.
//!
//! A [`SyncSession`] holds everything that lives between a copy and the
//! pastes that follow it: the captured snapshot, the membership list and the
//! logs of the last paste or dry run.
//!
//! ## Logging Ownership
//!
//! The session owns lifecycle logging for the three entry points:
//! - `log_op_start!` at entry
//! - `log_op_end!` on completion
//! - `log_op_error!` when a root handle does not resolve
//!
//! The walks in `rigsync-core` use only `tracing::debug!()` and warnings for
//! host failures they step over.

use rigsync_core::errors::SyncError;
use rigsync_core::model::{ModificationEntry, ModificationLog, TreeNode};
use rigsync_core::scene::{ComponentId, NodeId, ReadOnlyHost, SceneHost};
use rigsync_core::settings::SyncSettings;
use rigsync_core::sync::{self, Capture, WalkMode};
use rigsync_core::{log_op_end, log_op_error, log_op_start};
use rigsync_core_types::schema::{OP_COPY, OP_DRY_RUN, OP_PASTE};
use rigsync_core_types::RequestId;
use serde::Serialize;

/// How a top-level call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Completed,
    /// Paste or dry run called before any successful copy
    NothingCaptured,
    /// The root handle passed in does not resolve
    RootNotFound,
}

impl OutcomeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeStatus::Completed => "completed",
            OutcomeStatus::NothingCaptured => "nothing_captured",
            OutcomeStatus::RootNotFound => "root_not_found",
        }
    }
}

/// Summary of one `copy`, `paste` or `dry_run` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncOutcome {
    pub request_id: RequestId,
    pub status: OutcomeStatus,
    pub captured_nodes: usize,
    pub component_entries: usize,
    pub object_entries: usize,
    /// Reference fields rewritten by the remap pass
    pub remapped: usize,
}

impl SyncOutcome {
    fn new(request_id: RequestId, status: OutcomeStatus) -> Self {
        Self {
            request_id,
            status,
            captured_nodes: 0,
            component_entries: 0,
            object_entries: 0,
            remapped: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == OutcomeStatus::Completed
    }
}

/// Explicit state of a copy/paste workflow
///
/// Not thread-safe; one session drives one host at a time.
#[derive(Debug, Default)]
pub struct SyncSession {
    capture: Option<Capture>,
    log: ModificationLog,
    created: Vec<ComponentId>,
}

impl SyncSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the subtree under `source_root`
    ///
    /// Replaces any earlier capture. A root that does not resolve leaves the
    /// session without a capture.
    pub fn copy(
        &mut self,
        host: &dyn SceneHost,
        source_root: NodeId,
        settings: &SyncSettings,
    ) -> SyncOutcome {
        let request_id = RequestId::new();
        log_op_start!(OP_COPY, request_id = %request_id, node = %source_root);
        let start = std::time::Instant::now();

        self.capture = sync::capture(host, source_root, settings);

        let Some(capture) = &self.capture else {
            log_op_error!(
                OP_COPY,
                SyncError::NodeNotFound { node: source_root },
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %request_id
            );
            return SyncOutcome::new(request_id, OutcomeStatus::RootNotFound);
        };

        let mut outcome = SyncOutcome::new(request_id, OutcomeStatus::Completed);
        outcome.captured_nodes = capture.membership.len();

        log_op_end!(
            OP_COPY,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %outcome.request_id,
            captured_nodes = outcome.captured_nodes,
            captured_components = capture.tree.component_count()
        );
        outcome
    }

    /// Reconcile the capture onto `dest_root`, mutating the host
    pub fn paste(
        &mut self,
        host: &mut dyn SceneHost,
        dest_root: NodeId,
        settings: &SyncSettings,
    ) -> SyncOutcome {
        self.run(OP_PASTE, host, dest_root, settings, WalkMode::Execute)
    }

    /// Log what [`Self::paste`] would do without touching the host
    ///
    /// The walks run against a [`ReadOnlyHost`] view. The log is recorded
    /// even when `record_log` is off.
    pub fn dry_run(
        &mut self,
        host: &dyn SceneHost,
        dest_root: NodeId,
        settings: &SyncSettings,
    ) -> SyncOutcome {
        let mut view = ReadOnlyHost::new(host);
        self.run(OP_DRY_RUN, &mut view, dest_root, settings, WalkMode::DryRun)
    }

    fn run(
        &mut self,
        op: &'static str,
        host: &mut dyn SceneHost,
        dest_root: NodeId,
        settings: &SyncSettings,
        mode: WalkMode,
    ) -> SyncOutcome {
        let request_id = RequestId::new();
        log_op_start!(op, request_id = %request_id, node = %dest_root);
        let start = std::time::Instant::now();

        self.log.clear();
        self.created.clear();

        let Some(capture) = &self.capture else {
            let outcome = SyncOutcome::new(request_id, OutcomeStatus::NothingCaptured);
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %outcome.request_id,
                status = outcome.status.as_str()
            );
            return outcome;
        };

        if !host.contains_node(dest_root) {
            log_op_error!(
                op,
                SyncError::NodeNotFound { node: dest_root },
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %request_id
            );
            return SyncOutcome::new(request_id, OutcomeStatus::RootNotFound);
        }

        let result = sync::reconcile(host, capture, dest_root, settings, mode);
        self.log = result.log;
        self.created = result.created;

        let outcome = SyncOutcome {
            request_id,
            status: OutcomeStatus::Completed,
            captured_nodes: capture.membership.len(),
            component_entries: self.log.components.len(),
            object_entries: self.log.objects.len(),
            remapped: result.remapped,
        };

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %outcome.request_id,
            status = outcome.status.as_str(),
            component_entries = outcome.component_entries,
            object_entries = outcome.object_entries,
            remapped = outcome.remapped
        );
        outcome
    }

    /// Log of the last paste or dry run
    pub fn log(&self) -> &ModificationLog {
        &self.log
    }

    pub fn component_log(&self) -> &[ModificationEntry] {
        &self.log.components
    }

    pub fn object_log(&self) -> &[ModificationEntry] {
        &self.log.objects
    }

    /// Captured snapshot, if a copy succeeded
    pub fn snapshot(&self) -> Option<&TreeNode> {
        self.capture.as_ref().map(|c| &c.tree)
    }

    /// Every source node visited by the last copy
    pub fn membership(&self) -> &[NodeId] {
        self.capture
            .as_ref()
            .map(|c| c.membership.as_slice())
            .unwrap_or_default()
    }

    /// Components added or updated by the last paste
    pub fn created_components(&self) -> &[ComponentId] {
        &self.created
    }
}
