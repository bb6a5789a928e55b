//! `check`: list which components each rule set applies to.

use crate::cli::CheckArgs;
use crate::commands::utils::Project;
use crate::error::Result;
use crate::ui;
use std::path::Path;

/// Prints every matching component (relative to the root) followed by its
/// mixins, one per indented line.
pub fn execute(_args: CheckArgs, root: &Path, config: Option<&Path>) -> Result<()> {
    let project = Project::load(root, config)?;

    if project.transformer.rules().is_empty() {
        ui::warning("No rules configured; nothing will be injected");
        return Ok(());
    }

    let components = project.components(None)?;
    let mut matched = 0;

    for path in &components {
        let id = project.id_for(path)?;
        let mixins = project.transformer.rules().matches(&id);
        if mixins.is_empty() {
            continue;
        }

        matched += 1;
        println!("{}", project.relative(path).display());
        for mixin in mixins {
            println!("  {}", mixin);
        }
    }

    ui::info(&format!(
        "{} of {} match",
        matched,
        ui::plural(components.len(), "component")
    ));

    Ok(())
}
