//! List command implementation.
//!
//! The `moorage list` command lists registered instances.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::instance::{GlobalRegistry, Instance, InstanceRegistry};
use crate::ui::{MoorageTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

/// JSON shape for one instance in `list --json` output.
#[derive(Debug, Serialize)]
struct InstanceSummary<'a> {
    name: &'a str,
    version: Option<String>,
    dir: String,
}

impl<'a> InstanceSummary<'a> {
    fn from(instance: &'a Instance) -> Self {
        Self {
            name: &instance.name,
            version: instance.version.as_ref().map(|v| v.to_string()),
            dir: instance.dir.display().to_string(),
        }
    }
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = GlobalRegistry::open()?;
        let instances = registry.all_instances()?;

        if self.args.json {
            let summaries: Vec<InstanceSummary> =
                instances.iter().map(InstanceSummary::from).collect();
            ui.message(&serde_json::to_string_pretty(&summaries).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        if instances.is_empty() {
            ui.message("No instances registered.");
            return Ok(CommandResult::success());
        }

        let theme = MoorageTheme::auto();
        ui.message(&format!("  {}", theme.key.apply_to("Instances:")));
        for instance in &instances {
            let version = instance
                .version
                .as_ref()
                .map(|v| format!("v{}", v))
                .unwrap_or_else(|| "unknown".to_string());
            ui.message(&format!(
                "    {} {} {}",
                theme.highlight.apply_to(&instance.name),
                theme.dim.apply_to(&version),
                theme.dim.apply_to(instance.dir.display().to_string()),
            ));
        }

        Ok(CommandResult::success())
    }
}
