use std::collections::HashSet;

use crate::matcher::NameMatcher;
use crate::model::{ModificationEntry, ModificationLog};
use crate::scene::{ComponentId, NodeId, SceneHost};
use crate::settings::SyncSettings;

/// Whether walks only plan or also mutate the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    DryRun,
    Execute,
}

/// State shared by the walks of one paste or dry run
pub struct SyncContext<'a> {
    pub(crate) host: &'a mut dyn SceneHost,
    pub(crate) matcher: &'a NameMatcher,
    pub(crate) settings: &'a SyncSettings,
    pub(crate) mode: WalkMode,
    pub(crate) dest_root: NodeId,
    log: ModificationLog,
    /// Components a dry run has planned to remove
    removed: HashSet<ComponentId>,
    /// Node and type pairs a dry run has planned to add
    planned: HashSet<(NodeId, String)>,
    /// Non-transform components added or updated by merge
    created: Vec<ComponentId>,
}

impl<'a> SyncContext<'a> {
    pub fn new(
        host: &'a mut dyn SceneHost,
        matcher: &'a NameMatcher,
        settings: &'a SyncSettings,
        mode: WalkMode,
        dest_root: NodeId,
    ) -> Self {
        Self {
            host,
            matcher,
            settings,
            mode,
            dest_root,
            log: ModificationLog::new(),
            removed: HashSet::new(),
            planned: HashSet::new(),
            created: Vec::new(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode == WalkMode::DryRun
    }

    fn records(&self) -> bool {
        self.is_dry_run() || self.settings.record_log
    }

    pub fn log(&self) -> &ModificationLog {
        &self.log
    }

    /// Append a component entry; `None` when paste runs without a log
    pub(crate) fn record_component(&mut self, entry: ModificationEntry) -> Option<usize> {
        self.records().then(|| self.log.push_component(entry))
    }

    pub(crate) fn record_object(&mut self, entry: ModificationEntry) -> Option<usize> {
        self.records().then(|| self.log.push_object(entry))
    }

    pub(crate) fn log_mut(&mut self) -> &mut ModificationLog {
        &mut self.log
    }

    pub(crate) fn mark_removed(&mut self, component: ComponentId) {
        self.removed.insert(component);
    }

    pub(crate) fn mark_planned(&mut self, node: NodeId, type_name: &str) {
        self.planned.insert((node, type_name.to_string()));
    }

    /// Whether a dry run already planned to add `type_name` on `node`
    pub(crate) fn is_planned(&self, node: NodeId, type_name: &str) -> bool {
        self.planned.contains(&(node, type_name.to_string()))
    }

    pub(crate) fn push_created(&mut self, component: ComponentId) {
        if !self.created.contains(&component) {
            self.created.push(component);
        }
    }

    /// Path of a destination node below the destination root
    pub(crate) fn path_of(&self, node: NodeId) -> String {
        self.host
            .relative_path(self.dest_root, node)
            .unwrap_or_default()
    }

    /// Components of a type on a node, minus those a dry run already removed
    pub(crate) fn live_components_of_type(&self, node: NodeId, type_name: &str) -> Vec<ComponentId> {
        self.host
            .components_of_type(node, type_name)
            .into_iter()
            .filter(|c| !self.removed.contains(c))
            .collect()
    }

    /// First destination child whose name matches `name`
    pub(crate) fn find_matching_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.find_child_where(parent, name, |_| true)
    }

    /// Like [`Self::find_matching_child`] but only among children tagged `tag`
    pub(crate) fn find_matching_child_tagged(
        &self,
        parent: NodeId,
        name: &str,
        tag: &str,
    ) -> Option<NodeId> {
        self.find_child_where(parent, name, |child| self.host.node_tag(child) == Some(tag))
    }

    fn find_child_where<F>(&self, parent: NodeId, name: &str, keep: F) -> Option<NodeId>
    where
        F: Fn(NodeId) -> bool,
    {
        let children: Vec<NodeId> = self
            .host
            .children(parent)
            .into_iter()
            .filter(|c| keep(*c))
            .collect();
        let names: Vec<&str> = children
            .iter()
            .map(|c| self.host.node_name(*c).unwrap_or_default())
            .collect();
        self.matcher
            .find_matching_index(&names, name)
            .map(|i| children[i])
    }

    /// Consume the context, yielding the log and the merged components
    pub fn finish(self) -> (ModificationLog, Vec<ComponentId>) {
        (self.log, self.created)
    }
}

/// Join a parent path and a child name the way `relative_path` renders them
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
