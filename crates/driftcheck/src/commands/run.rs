//! `drift run`: execute scenario files against the remote API

use colored::Colorize;
use driftcheck_core::{ParamContext, Scenario};
use driftcheck_remote::{RemoteConfig, RestClient};
use driftcheck_verify::{RunReport, Runner};
use std::path::PathBuf;

pub async fn handle(
    scenarios: Vec<PathBuf>,
    params: Vec<String>,
    sequential: bool,
) -> anyhow::Result<()> {
    let config = RemoteConfig::from_env()?;
    let base_params = parse_params(&params)?;

    let mut loaded = Vec::with_capacity(scenarios.len());
    for path in &scenarios {
        loaded.push(super::load_scenario(path)?);
    }

    tracing::info!(
        scenarios = loaded.len(),
        parallel = !sequential,
        "starting verification runs"
    );

    let outcomes: Vec<anyhow::Result<RunReport>> = if sequential {
        let mut outcomes = Vec::with_capacity(loaded.len());
        for scenario in &loaded {
            outcomes.push(run_one(&config, scenario, &base_params).await);
        }
        outcomes
    } else {
        // Independent runs share nothing mutable: each gets its own
        // client and its own randomized parameter context.
        let futures: Vec<_> = loaded
            .iter()
            .map(|scenario| run_one(&config, scenario, &base_params))
            .collect();
        futures_util::future::join_all(futures).await
    };

    let mut failed = 0;
    for (scenario, outcome) in loaded.iter().zip(&outcomes) {
        match outcome {
            Ok(report) => println!(
                "{} {} ({} steps, {} destroy checks)",
                "✓".green(),
                scenario.name,
                report.steps_completed,
                report.destroy_checks
            ),
            Err(e) => {
                failed += 1;
                println!("{} {}: {:#}", "✗".red(), scenario.name, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} scenario(s) failed", failed, outcomes.len());
    }
    Ok(())
}

async fn run_one(
    config: &RemoteConfig,
    scenario: &Scenario,
    base_params: &ParamContext,
) -> anyhow::Result<RunReport> {
    let params = base_params
        .clone()
        .with_str("random_suffix", random_suffix());
    let client =
        RestClient::new(config.clone()).with_path_templates(scenario.identity_paths.clone());

    // One client backs all three roles of the run.
    let runner = Runner::new(&client, &client, &client);
    let report = runner.execute(scenario, &params).await?;
    Ok(report)
}

/// Parse `name=value` pairs into a parameter context.
///
/// A value that parses as an integer becomes an integer parameter, so
/// numeric identifiers substitute unquoted.
fn parse_params(pairs: &[String]) -> anyhow::Result<ParamContext> {
    let mut params = ParamContext::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            anyhow::bail!("malformed parameter '{}', expected name=value", pair);
        };
        params = match value.parse::<i64>() {
            Ok(int) => params.with_int(name, int),
            Err(_) => params.with_str(name, value),
        };
    }
    Ok(params)
}

/// Non-colliding suffix so parallel runs never share resource names
fn random_suffix() -> String {
    let mut suffix = uuid::Uuid::new_v4().simple().to_string();
    suffix.truncate(10);
    suffix
}
