//! Replay a scenario's cast script.
//!
//! Builds the scenario's initial state, runs every scripted cast through the
//! engine and prints the tri-state outcomes plus the final state root.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use keeper_content::{ScenarioLoader, TargetSpec};
use keeper_core::{CastOutcome, CueLog, Env, GameError, GridTerrain, PcgRng, compute_state_root};

/// Replay a scenario's cast script
#[derive(Parser)]
pub struct Replay {
    /// Scenario name under `scenarios/` in the data directory
    #[arg(value_name = "SCENARIO", default_value = "skirmish")]
    scenario: String,

    /// Scenario file to replay instead of a named one
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Custom data directory (defaults to the bundled content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per cast and the final state root
    Summary,
    /// Full JSON output including the final state
    Json,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let factory = super::factory(self.data_dir);
        let scenario = match self.file {
            Some(path) => ScenarioLoader::load(&path)?,
            None => factory.load_scenario(&self.scenario)?,
        };
        let catalog = factory.load_catalog()?;
        let config = factory.load_config()?;
        let terrain = factory
            .load_map(&scenario.map)
            .with_context(|| format!("Scenario map '{}'", scenario.map))?;

        let mut state = scenario.build(&config, &terrain)?;
        let env = Env::<GridTerrain, PcgRng>::with_all(&catalog, &terrain, &PcgRng, &config);
        let mut cues = CueLog::new();
        let outcomes = scenario.replay(&mut state, env.as_magic_env(), &mut cues)?;
        let root = hex::encode(compute_state_root(&state));

        match self.format {
            OutputFormat::Summary => {
                println!("{}", style("=== Replay ===").bold().green());
                for (cast, outcome) in scenario.script.iter().zip(&outcomes) {
                    println!(
                        "  turn {:>6}  keeper {}  {:<14} {:<18} {}",
                        cast.turn,
                        cast.caster,
                        cast.power.as_ref(),
                        describe_target(cast.target),
                        describe_outcome(outcome)
                    );
                }
                println!();
                println!("{} {}", style("Cues:").bold().cyan(), cues.cues().len());
                println!("{} {}", style("Final turn:").bold().cyan(), state.game_turn);
                println!("{} {}", style("State root:").bold().cyan(), root);
            }
            OutputFormat::Json => {
                let casts: Vec<_> = scenario
                    .script
                    .iter()
                    .zip(&outcomes)
                    .map(|(cast, outcome)| {
                        serde_json::json!({
                            "turn": cast.turn,
                            "caster": cast.caster,
                            "power": cast.power,
                            "outcome": outcome,
                        })
                    })
                    .collect();
                let report = serde_json::json!({
                    "casts": casts,
                    "state_root": root,
                    "state": state,
                });
                let json = serde_json::to_string_pretty(&report)
                    .context("Failed to serialize replay to JSON")?;
                println!("{}", json);
            }
        }
        Ok(())
    }
}

fn describe_target(target: TargetSpec) -> String {
    match target {
        TargetSpec::OnThing { id } => format!("thing #{id}"),
        TargetSpec::OnLocation { x, y, .. } => format!("({x}, {y})"),
        TargetSpec::Untargeted => "-".to_string(),
    }
}

fn describe_outcome(outcome: &CastOutcome) -> String {
    match outcome {
        CastOutcome::Ok => style("ok").dim().to_string(),
        CastOutcome::Success => style("success").green().to_string(),
        CastOutcome::Fail(error) => format!(
            "{} {} ({})",
            style("fail").red(),
            error.error_code(),
            error
        ),
    }
}
