//! `build`: rewrite every matching component into an output directory.
//!
//! Components are processed in parallel. Each one is all-or-nothing: its
//! output file is written only after the transform succeeded, and a failed
//! component never leaves a partial file behind.

use crate::cli::BuildArgs;
use crate::commands::utils::{resolve_against, Project};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// What happened to one component.
#[derive(Debug)]
enum FileOutcome {
    Written(PathBuf),
    Unmatched,
    Failed(CliError),
}

pub fn execute(args: BuildArgs, root: &Path, config: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    let project = Project::load(root, config)?;
    let out_dir = resolve_against(&project.root, &args.out_dir);

    let components = project.components(Some(&out_dir))?;
    debug!("Found {} component(s) under {}", components.len(), project.root.display());

    let outcomes: Vec<FileOutcome> = components
        .par_iter()
        .map(|path| match process(&project, path, &out_dir) {
            Ok(Some(written)) => FileOutcome::Written(written),
            Ok(None) => FileOutcome::Unmatched,
            Err(err) => FileOutcome::Failed(err),
        })
        .collect();

    let mut written = 0;
    let mut failed = 0;
    for outcome in outcomes {
        match outcome {
            FileOutcome::Written(path) => {
                debug!("Wrote {}", path.display());
                written += 1;
            }
            FileOutcome::Unmatched => {}
            FileOutcome::Failed(err) => {
                ui::error(&err.to_string());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::BuildFailed {
            failed,
            total: written + failed,
        });
    }

    ui::success(&format!(
        "Injected mixins into {} in {}",
        ui::plural(written, "component"),
        ui::format_duration(start.elapsed())
    ));
    Ok(())
}

/// Transforms one component and writes it under `out_dir`, mirroring its
/// path relative to the root. Returns `None` when no rule matches.
fn process(project: &Project, path: &Path, out_dir: &Path) -> Result<Option<PathBuf>> {
    let id = project.id_for(path)?;
    let source = fs::read_to_string(path).with_path(path)?;
    let Some(transformed) = project.transformer.transform(&id, &source)? else {
        return Ok(None);
    };

    let target = out_dir.join(project.relative(path));
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(&target, transformed.code).with_path(&target)?;

    Ok(Some(target))
}
