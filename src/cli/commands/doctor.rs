//! Doctor command implementation.
//!
//! `moorage doctor` summarizes the environment and the registered
//! instances, then runs the deprecation checks. Advisory findings are
//! printed but never turn into a failing exit code; the command fails
//! only when it cannot inspect the system at all.

use crate::checks::{self, DeprecationChecks};
use crate::cli::args::DoctorArgs;
use crate::config::Environment;
use crate::error::Result;
use crate::extension::BuiltinExtensions;
use crate::instance::{GlobalRegistry, Instance, InstanceRegistry};
use crate::ui::{MoorageTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The doctor command implementation.
pub struct DoctorCommand {
    args: DoctorArgs,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(args: DoctorArgs) -> Self {
        Self { args }
    }

    fn resolve_environment(&self, ui: &mut dyn UserInterface) -> Option<Environment> {
        match &self.args.env {
            Some(raw) => match raw.parse() {
                Ok(env) => Some(env),
                Err(e) => {
                    ui.error(&e);
                    None
                }
            },
            None => Some(Environment::detect()),
        }
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(env) = self.resolve_environment(ui) else {
            return Ok(CommandResult::failure(2));
        };

        let theme = MoorageTheme::auto();
        let node = checks::node_version();

        ui.message(&format!(
            "  {} {}",
            theme.key.apply_to("Environment:"),
            env
        ));
        ui.message(&format!(
            "  {} {}",
            theme.key.apply_to("Node.js:"),
            node.as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "not found".to_string())
        ));

        let registry = GlobalRegistry::open()?;
        let instances = registry.all_instances()?;

        ui.message(&format!(
            "  {} {}",
            theme.key.apply_to("Instances:"),
            instances.len()
        ));
        for instance in &instances {
            ui.message(&describe_instance(instance, env, &theme));
        }
        ui.message("");

        let extensions = BuiltinExtensions::new();
        let fired =
            DeprecationChecks::new(&registry, &extensions).run(node.as_ref(), env, ui)?;

        if fired.is_empty() {
            ui.success("No deprecation warnings");
        } else {
            ui.warning(&format!(
                "{} deprecation warning{}",
                fired.len(),
                if fired.len() == 1 { "" } else { "s" }
            ));
        }

        Ok(CommandResult::success())
    }
}

/// One summary line per instance: name, version, effective environment,
/// and database client.
fn describe_instance(instance: &Instance, system_env: Environment, theme: &MoorageTheme) -> String {
    let version = instance
        .version
        .as_ref()
        .map(|v| format!("v{}", v))
        .unwrap_or_else(|| "unknown".to_string());

    let env = instance.check_environment(system_env);
    let client = instance
        .config(env)
        .ok()
        .and_then(|c| c.database_client().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "    {} {}",
        theme.highlight.apply_to(&instance.name),
        theme
            .dim
            .apply_to(format!("({}, {}, database: {})", version, env, client))
    )
}
