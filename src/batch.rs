// Batch runner: list .tres assets, decorate each, write them back
use crate::cli_output::OutputWriter;
use crate::color::extract_base_color;
use crate::error::AssetError;
use crate::generator::ColorGenerator;
use crate::gradient::GradientType;
use crate::rewriter::rewrite;
use anyhow::{Context, Result};
use rand::Rng;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const ASSET_EXTENSION: &str = ".tres";

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub dir: PathBuf,
    /// Compute and report without touching any file
    pub dry_run: bool,
    /// Write through a temp file + rename instead of overwriting in place
    pub atomic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Updated {
        file: String,
        gradient: GradientType,
    },
    Skipped {
        file: String,
        reason: AssetError,
    },
}

impl FileOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, FileOutcome::Updated { .. })
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FileOutcome::Updated { file, gradient } => json!({
                "file": file,
                "status": "updated",
                "gradient": gradient,
            }),
            FileOutcome::Skipped { file, reason } => json!({
                "file": file,
                "status": "skipped",
                "reason": reason.kind(),
                "message": reason.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchRun {
    /// The target directory does not exist; nothing was processed
    DirectoryMissing(PathBuf),
    Completed(Vec<FileOutcome>),
}

impl BatchRun {
    pub fn updated(&self) -> usize {
        match self {
            BatchRun::DirectoryMissing(_) => 0,
            BatchRun::Completed(outcomes) => outcomes.iter().filter(|o| o.is_updated()).count(),
        }
    }

    pub fn total(&self) -> usize {
        match self {
            BatchRun::DirectoryMissing(_) => 0,
            BatchRun::Completed(outcomes) => outcomes.len(),
        }
    }
}

pub struct MonsterBatch<'a> {
    options: BatchOptions,
    output: &'a OutputWriter,
}

impl<'a> MonsterBatch<'a> {
    pub fn new(options: BatchOptions, output: &'a OutputWriter) -> Self {
        Self { options, output }
    }

    /// Process every asset in sorted order, drawing from `rng` in sequence
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<BatchRun> {
        let dir = &self.options.dir;
        if !dir.is_dir() {
            self.output.error(&format!(
                "Error: {} not found. Run from project root.",
                dir.display()
            ));
            return Ok(BatchRun::DirectoryMissing(dir.clone()));
        }

        let assets = list_assets(dir)?;
        self.output
            .info(&format!("Found {} monster files", assets.len()));

        let mut generator = ColorGenerator::new(rng);
        let mut outcomes = Vec::with_capacity(assets.len());
        for path in &assets {
            let outcome = self.process_file(path, &mut generator)?;
            self.report(path, &outcome);
            outcomes.push(outcome);
        }

        let run = BatchRun::Completed(outcomes);
        self.output.summary(run.updated(), run.total());
        Ok(run)
    }

    fn process_file<R: Rng + ?Sized>(
        &self,
        path: &Path,
        generator: &mut ColorGenerator<'_, R>,
    ) -> Result<FileOutcome> {
        let file = file_name(path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let base = match extract_base_color(&content) {
            Ok(base) => base,
            Err(reason) => return Ok(FileOutcome::Skipped { file, reason }),
        };

        let decoration = generator.decorate(base);
        let rewritten = match rewrite(&content, &decoration) {
            Ok(rewritten) => rewritten,
            Err(reason) => return Ok(FileOutcome::Skipped { file, reason }),
        };
        debug!(
            "{}: base {} -> secondary {} ({:?}), gradient {} ({:?})",
            file,
            base,
            decoration.secondary,
            rewritten.secondary,
            decoration.gradient,
            rewritten.gradient
        );

        if !self.options.dry_run {
            if self.options.atomic {
                write_atomic(path, &rewritten.text)?;
            } else {
                fs::write(path, &rewritten.text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }

        Ok(FileOutcome::Updated {
            file,
            gradient: decoration.gradient,
        })
    }

    fn report(&self, path: &Path, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Updated { file, gradient } => {
                let verb = if self.options.dry_run {
                    "Would update"
                } else {
                    "Updated"
                };
                self.output
                    .updated(file, &format!("{}: {} - gradient: {}", verb, file, gradient));
            }
            FileOutcome::Skipped { file, reason } => {
                self.output.warning(
                    file,
                    &format!("Warning: {} in {}", reason, path.display()),
                );
            }
        }
    }
}

/// Regular files directly inside `dir` ending in `.tres`, sorted by name
pub fn list_assets(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut assets = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let is_asset = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(ASSET_EXTENSION));
        if is_asset && entry.path().is_file() {
            assets.push(entry.into_path());
        }
    }
    Ok(assets)
}

/// Replace `path` with `content` via a sibling temp file and rename.
/// The replacement keeps the original file's permissions.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();
    tmp.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
