//! `transform`: rewrite a single component.

use crate::cli::TransformArgs;
use crate::commands::utils::{resolve_against, Project};
use crate::error::{Result, ResultExt};
use crate::ui;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Prints the rewritten component to stdout, or writes it to `--out`.
///
/// A component no rule matches is emitted unchanged.
pub fn execute(args: TransformArgs, root: &Path, config: Option<&Path>) -> Result<()> {
    let project = Project::load(root, config)?;

    let cwd = std::env::current_dir().with_path(Path::new("."))?;
    let file = resolve_against(&cwd, &args.file);
    let file = fs::canonicalize(&file).with_path(&file)?;

    let source = fs::read_to_string(&file).with_path(&file)?;
    let id = project.id_for(&file)?;

    let code = match project.transformer.transform(&id, &source)? {
        Some(transformed) => {
            debug!("{} mixin(s) injected", transformed.mixins.len());
            transformed.code
        }
        None => {
            ui::warning(&format!(
                "No rule matches {}; output is unchanged",
                project.relative(&file).display()
            ));
            source
        }
    };

    match args.out {
        Some(out) => {
            let out = resolve_against(&cwd, &out);
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).with_path(parent)?;
            }
            fs::write(&out, code).with_path(&out)?;
            ui::success(&format!("Wrote {}", out.display()));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(code.as_bytes())
                .with_path(Path::new("<stdout>"))?;
        }
    }

    Ok(())
}
