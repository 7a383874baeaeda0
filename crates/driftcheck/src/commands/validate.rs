//! `drift validate`: parse and check scenario files without touching the
//! network

use colored::Colorize;
use std::path::PathBuf;

pub fn handle(paths: &[PathBuf]) -> anyhow::Result<()> {
    let mut failed = 0;
    for path in paths {
        match super::load_scenario(path) {
            Ok(scenario) => println!(
                "{} {}: {} ({} steps)",
                "✓".green(),
                path.display(),
                scenario.name,
                scenario.steps.len()
            ),
            Err(e) => {
                failed += 1;
                println!("{} {}: {:#}", "✗".red(), path.display(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} scenario file(s) invalid", failed, paths.len());
    }
    Ok(())
}
