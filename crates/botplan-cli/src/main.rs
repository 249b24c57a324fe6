//! Botplan CLI - validate and execute robot action plans.
//!
//! Single binary that provides:
//! - `botplan validate` - check a candidate plan against a world map
//! - `botplan run` - execute a validated plan and print the trace
//! - `botplan schema` - print the instruction text for plan generators

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use botplan_core::{RobotState, WorldMap};
use botplan_exec::{execute, RunOutcome, DEFAULT_STEP_BUDGET};
use botplan_validate::{instruction_for, parse_plan, validate, ValidationWarning};

#[derive(Parser)]
#[command(name = "botplan")]
#[command(about = "Robot plan validation and execution", version)]
struct Cli {
    /// World map JSON (defaults to the built-in home layout)
    #[arg(short, long, global = true)]
    world: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a candidate plan
    Validate {
        /// Plan JSON file
        #[arg(long)]
        plan: PathBuf,
    },

    /// Validate and execute a plan
    Run {
        /// Plan JSON file
        #[arg(long)]
        plan: PathBuf,

        /// Initial robot state JSON (defaults to docked and fully charged)
        #[arg(long)]
        state: Option<PathBuf>,

        /// Maximum steps to execute
        #[arg(long, default_value_t = DEFAULT_STEP_BUDGET)]
        budget: u32,

        /// Emit the trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the generator schema instruction
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let map = load_world(cli.world.as_deref())?;

    match cli.command {
        Commands::Validate { plan } => validate_plan(&plan, &map),
        Commands::Run {
            plan,
            state,
            budget,
            json,
        } => run_plan(&plan, state.as_deref(), &map, budget, json),
        Commands::Schema => {
            println!("{}", instruction_for(&map));
            Ok(())
        }
    }
}

fn load_world(path: Option<&Path>) -> Result<WorldMap> {
    match path {
        None => Ok(WorldMap::home()),
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse world map {}", path.display()))
        }
    }
}

fn load_state(path: Option<&Path>) -> Result<RobotState> {
    match path {
        None => Ok(RobotState::docked()),
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse robot state {}", path.display()))
        }
    }
}

fn load_validated(path: &Path, map: &WorldMap) -> Result<botplan_validate::Validated> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw = parse_plan(&content)
        .with_context(|| format!("Failed to parse plan {}", path.display()))?;
    validate(&raw, map).map_err(|err| anyhow::anyhow!("invalid plan: {err}"))
}

fn validate_plan(path: &Path, map: &WorldMap) -> Result<()> {
    let validated = load_validated(path, map)?;

    for warning in &validated.warnings {
        let ValidationWarning::UnreachableStep { step } = warning;
        tracing::warn!(step = %step, "step is unreachable from start");
    }

    println!(
        "plan OK: {} steps, start `{}`",
        validated.plan.len(),
        validated.plan.start()
    );
    Ok(())
}

fn run_plan(
    path: &Path,
    state_path: Option<&Path>,
    map: &WorldMap,
    budget: u32,
    json: bool,
) -> Result<()> {
    let validated = load_validated(path, map)?;
    for warning in &validated.warnings {
        let ValidationWarning::UnreachableStep { step } = warning;
        tracing::warn!(step = %step, "step is unreachable from start");
    }

    let initial = load_state(state_path)?;
    let trace = execute(&validated.plan, &initial, budget);

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    for (i, entry) in trace.entries.iter().enumerate() {
        println!("{:>4}  {:<12}  {}", i + 1, entry.step_id, entry.effect);
    }
    match trace.outcome {
        RunOutcome::CompletedNormally => println!("completed normally"),
        RunOutcome::BudgetExceeded => println!("stopped: step budget ({budget}) exceeded"),
        RunOutcome::CycleDetected => println!("stopped: cycle detected"),
    }
    println!(
        "final state: battery {}%, at `{}`, carrying {}, detected {}",
        trace.final_state.battery_level,
        trace.final_state.current_location_id,
        trace
            .final_state
            .carrying_object
            .as_deref()
            .unwrap_or("nothing"),
        trace
            .final_state
            .detected_object
            .as_deref()
            .unwrap_or("nothing"),
    );
    Ok(())
}
