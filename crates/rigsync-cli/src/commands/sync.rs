//! Dry-run and paste commands
//!
//! Usage:
//!   rigsync dry-run --scene scene.json --source root --dest root2 [--settings sync.toml]
//!   rigsync paste --scene scene.json --source root --dest root2 [--settings sync.toml] [--json]

use std::path::{Path, PathBuf};

use clap::Args;
use rigsync_core::model::ModificationEntry;
use rigsync_core::settings::SyncSettings;
use rigsync_engine::{SyncOutcome, SyncSession};
use serde::Serialize;

use super::document::SceneDocument;

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Scene document (JSON)
    #[arg(long)]
    pub scene: PathBuf,

    /// Path of the subtree to capture, starting at its root name
    #[arg(long)]
    pub source: String,

    /// Path of the subtree to reconcile onto
    #[arg(long)]
    pub dest: String,

    /// Settings file (.toml or .json); defaults apply when omitted
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Print the outcome and entries as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    outcome: &'a SyncOutcome,
    components: &'a [ModificationEntry],
    objects: &'a [ModificationEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    outline: Option<String>,
}

pub fn load_settings(path: Option<&Path>) -> Result<SyncSettings, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(SyncSettings::default());
    };
    let text = std::fs::read_to_string(path)?;
    let settings = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => SyncSettings::from_toml_str(&text)?,
        Some("json") => SyncSettings::from_json_str(&text)?,
        _ => {
            return Err(format!(
                "Unsupported settings format: {} (expected .toml or .json)",
                path.display()
            )
            .into())
        }
    };
    for err in settings.invalid_patterns() {
        eprintln!("Warning: {}", err);
    }
    Ok(settings)
}

pub fn execute_dry_run(args: SyncArgs) -> Result<(), Box<dyn std::error::Error>> {
    run(args, false)
}

pub fn execute_paste(args: SyncArgs) -> Result<(), Box<dyn std::error::Error>> {
    run(args, true)
}

fn run(args: SyncArgs, apply: bool) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(args.settings.as_deref())?;
    let mut loaded = SceneDocument::load(&args.scene)?.into_scene()?;

    let source = loaded
        .resolve(&args.source)
        .ok_or_else(|| format!("Source path not found: {}", args.source))?;
    let dest = loaded
        .resolve(&args.dest)
        .ok_or_else(|| format!("Destination path not found: {}", args.dest))?;

    let mut session = SyncSession::new();
    let copied = session.copy(&loaded.scene, source, &settings);
    if !copied.is_completed() {
        return Err(format!("Copy failed: {}", copied.status.as_str()).into());
    }

    let outcome = if apply {
        session.paste(&mut loaded.scene, dest, &settings)
    } else {
        session.dry_run(&loaded.scene, dest, &settings)
    };
    if !outcome.is_completed() {
        return Err(format!("Reconcile failed: {}", outcome.status.as_str()).into());
    }

    let outline = apply.then(|| loaded.scene.outline(dest));

    if args.json {
        let report = Report {
            outcome: &outcome,
            components: session.component_log(),
            objects: session.object_log(),
            outline,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entry in session.object_log() {
        println!("{}", entry.message);
    }
    for entry in session.component_log() {
        println!("{}", entry.message);
    }
    if session.log().is_empty() {
        println!("Nothing to change");
    }
    if let Some(outline) = outline {
        println!();
        print!("{}", outline);
    }
    Ok(())
}
