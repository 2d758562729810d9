use serde::Serialize;

use crate::scene::{ComponentId, NodeId};

/// Operation recorded by a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    None,
    Add,
    Remove,
    Update,
    CreateObject,
}

impl ModificationKind {
    pub fn verb(self) -> &'static str {
        match self {
            ModificationKind::None => "Keep",
            ModificationKind::Add => "Add",
            ModificationKind::Remove => "Remove",
            ModificationKind::Update => "Update",
            ModificationKind::CreateObject => "Create",
        }
    }
}

/// What an entry acts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationTarget {
    /// An existing destination node
    Node(NodeId),
    /// A node that does not exist (yet), addressed by path below the destination root
    Path(String),
}

/// Concrete result of an executed modification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatedRef {
    Component(ComponentId),
    Node(NodeId),
}

/// One planned or performed modification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModificationEntry {
    pub kind: ModificationKind,
    pub target: ModificationTarget,
    /// Slash-separated path of the target below the destination root
    pub relative_path: String,
    pub component_type: Option<String>,
    pub message: String,
    /// Filled in once the modification has been carried out
    pub created: Option<CreatedRef>,
}

/// Comparable projection of an entry, free of execution results
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntrySignature {
    pub kind: ModificationKind,
    /// Component type, or the relative path for object-level entries
    pub subject: String,
    pub relative_path: String,
}

impl ModificationEntry {
    /// Component-level entry on an existing destination node
    pub fn component(
        kind: ModificationKind,
        node: NodeId,
        relative_path: impl Into<String>,
        component_type: impl Into<String>,
    ) -> Self {
        let relative_path = relative_path.into();
        let component_type = component_type.into();
        let message = format!(
            "{} {} on '{}'",
            kind.verb(),
            component_type,
            display_path(&relative_path)
        );
        Self {
            kind,
            target: ModificationTarget::Node(node),
            relative_path,
            component_type: Some(component_type),
            message,
            created: None,
        }
    }

    /// Object-level entry for a node that is about to be created
    pub fn create_object(relative_path: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        let message = format!(
            "{} object '{}'",
            ModificationKind::CreateObject.verb(),
            display_path(&relative_path)
        );
        Self {
            kind: ModificationKind::CreateObject,
            target: ModificationTarget::Path(relative_path.clone()),
            relative_path,
            component_type: None,
            message,
            created: None,
        }
    }

    pub fn signature(&self) -> EntrySignature {
        EntrySignature {
            kind: self.kind,
            subject: self
                .component_type
                .clone()
                .unwrap_or_else(|| self.relative_path.clone()),
            relative_path: self.relative_path.clone(),
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

/// The two ordered logs produced by a paste or dry run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModificationLog {
    pub components: Vec<ModificationEntry>,
    pub objects: Vec<ModificationEntry>,
}

impl ModificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.components.clear();
        self.objects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.objects.is_empty()
    }

    /// Append a component entry, returning its index for later attachment
    pub fn push_component(&mut self, entry: ModificationEntry) -> usize {
        self.components.push(entry);
        self.components.len() - 1
    }

    /// Append an object entry, returning its index for later attachment
    pub fn push_object(&mut self, entry: ModificationEntry) -> usize {
        self.objects.push(entry);
        self.objects.len() - 1
    }

    /// Index of an object entry with the same path and kind, if any
    pub fn find_object(&self, relative_path: &str, kind: ModificationKind) -> Option<usize> {
        self.objects
            .iter()
            .position(|e| e.kind == kind && e.relative_path == relative_path)
    }

    pub fn attach_component(&mut self, index: usize, created: CreatedRef) {
        if let Some(entry) = self.components.get_mut(index) {
            entry.created = Some(created);
        }
    }

    pub fn attach_object(&mut self, index: usize, created: CreatedRef) {
        if let Some(entry) = self.objects.get_mut(index) {
            entry.created = Some(created);
        }
    }

    pub fn component_signatures(&self) -> Vec<EntrySignature> {
        self.components.iter().map(ModificationEntry::signature).collect()
    }

    pub fn object_signatures(&self) -> Vec<EntrySignature> {
        self.objects.iter().map(ModificationEntry::signature).collect()
    }

    /// Count of component entries of one kind
    pub fn count(&self, kind: ModificationKind) -> usize {
        self.components.iter().filter(|e| e.kind == kind).count()
    }
}
