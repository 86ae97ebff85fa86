//! Environment and deprecation diagnostics.

pub mod deprecation;
pub mod runtime;

pub use deprecation::{Deprecation, DeprecationChecks, Thresholds};
pub use runtime::node_version;

use crate::config::Environment;
use crate::error::Result;
use crate::extension::BuiltinExtensions;
use crate::instance::GlobalRegistry;
use crate::ui::UserInterface;

/// Run the deprecation checks against the real registry, extensions,
/// and runtime.
pub fn deprecation_checks(
    system_env: Environment,
    ui: &mut dyn UserInterface,
) -> Result<Vec<Deprecation>> {
    let registry = GlobalRegistry::open()?;
    let extensions = BuiltinExtensions::new();
    let node = node_version();

    DeprecationChecks::new(&registry, &extensions).run(node.as_ref(), system_env, ui)
}
