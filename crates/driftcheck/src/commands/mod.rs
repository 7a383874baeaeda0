pub mod run;
pub mod validate;

use anyhow::Context;
use driftcheck_core::Scenario;
use std::path::Path;

/// Load and structurally validate one scenario file
pub(crate) fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Scenario::from_json(&content).with_context(|| format!("parsing {}", path.display()))
}
