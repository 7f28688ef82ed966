use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use stowage_core::{
    DragOutcome, PackingSession, PackingStats, PlanMode, PlanRequest, PlanResult, Planner,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Cargo placement planner - place boxes and pallets into a container", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a load from a request file
    Plan {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the mode given in the request
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Rank every instance ordering for a request
    Compare {
        /// Input file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Move one placed item of a saved session
    Drag {
        /// Session file (YAML or JSON)
        #[arg(short, long)]
        session: PathBuf,

        /// Instance id, e.g. "crate#2"
        #[arg(long)]
        item: String,

        #[arg(long, allow_hyphen_values = true)]
        x: i64,

        #[arg(long, allow_hyphen_values = true)]
        z: i64,

        /// Output file for the updated session (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    FloorFirst,
    CornerFill,
    CompareAll,
}

impl From<ModeArg> for PlanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FloorFirst => PlanMode::FloorFirst,
            ModeArg::CornerFill => PlanMode::CornerFill,
            ModeArg::CompareAll => PlanMode::CompareAll,
        }
    }
}

#[derive(Serialize)]
struct DragReport<'a> {
    outcome: &'a DragOutcome,
    session: &'a PackingSession,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            input,
            output,
            mode,
        } => {
            plan_command(input, output, mode)?;
        }
        Commands::Compare { input } => {
            compare_command(input)?;
        }
        Commands::Drag {
            session,
            item,
            x,
            z,
            output,
        } => {
            drag_command(session, &item, x, z, output)?;
        }
    }

    Ok(())
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let ext = path.extension().and_then(|s| s.to_str());
    debug!("Loading {} as {:?}", path.display(), ext);

    let value = if matches!(ext, Some("yaml") | Some("yml")) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(value)
}

fn write_json<T: Serialize>(value: &T, output: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn plan_command(input: PathBuf, output: Option<PathBuf>, mode: Option<ModeArg>) -> Result<()> {
    println!("{}", "🔍 Loading request...".bright_blue());

    let mut request: PlanRequest = load(&input)?;
    if let Some(mode) = mode {
        request.mode = mode.into();
    }

    println!(
        "  {} cargo lines, {} instances",
        request.cargo.len().to_string().bright_white().bold(),
        request
            .cargo
            .iter()
            .map(|c| c.quantity)
            .sum::<u32>()
            .to_string()
            .bright_white()
            .bold()
    );
    println!(
        "  Bin {} x {} x {} mm",
        request.bin.width, request.bin.height, request.bin.length
    );
    println!();

    println!("{}", "🚀 Planning...".bright_blue());

    let planner = Planner::new(request)?;
    let result = planner.plan()?;

    println!();
    print_outcome(&result);
    println!();

    write_json(&result, output)
}

fn print_outcome(result: &PlanResult) {
    match &result.failure {
        None => println!("{}", "✅ All cargo placed!".bright_green().bold()),
        Some(failure) => println!(
            "{} Stopped at instance {} of '{}' ({}): no legal position",
            "⚠️".bright_yellow(),
            failure.index,
            failure.spec_id.bright_white(),
            failure.spec_name
        ),
    }
    println!();

    println!("{}", "📊 Results:".bright_yellow().bold());
    if let Some(key) = result.selected_strategy {
        println!("  Strategy: {}", key.label().bright_cyan());
    }
    print_stats(&result.stats);
}

fn print_stats(stats: &PackingStats) {
    println!(
        "  Placed: {} / {}",
        stats.placed.to_string().bright_white().bold(),
        stats.requested
    );
    println!(
        "  Volume efficiency: {}%",
        format!("{:.2}", stats.volume_efficiency).bright_white()
    );
    println!("  Stack height: {} mm", stats.max_stack_height);

    let weight = format!("{:.1}", stats.total_weight);
    if stats.over_weight_limit {
        println!("  Total weight: {} (over limit)", weight.bright_red());
    } else {
        println!("  Total weight: {}", weight.bright_white());
    }

    if let Some(cog) = stats.center_of_gravity {
        println!(
            "  Center of gravity: ({:.1}, {:.1}, {:.1})",
            cog.x, cog.y, cog.z
        );
    }
}

fn compare_command(input: PathBuf) -> Result<()> {
    println!("{}", "🔍 Loading request...".bright_blue());

    let mut request: PlanRequest = load(&input)?;
    request.mode = PlanMode::CompareAll;

    println!("{}", "🚀 Comparing orderings...".bright_blue());
    let result = Planner::new(request)?.plan()?;
    println!();

    for report in &result.strategies {
        let line = format!(
            "  #{} {:<22} {:>7.2}%  {}/{} placed",
            report.rank + 1,
            report.key.label(),
            report.stats.volume_efficiency,
            report.stats.placed,
            report.stats.requested
        );
        if report.rank == 0 {
            println!("{}", line.bright_green().bold());
        } else if report.failure.is_some() {
            println!("{}", line.bright_yellow());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}

fn drag_command(
    session_path: PathBuf,
    item: &str,
    x: i64,
    z: i64,
    output: Option<PathBuf>,
) -> Result<()> {
    let session: PackingSession = load(&session_path)?;
    if session.placed.is_empty() {
        bail!("session {} has no placed items", session_path.display());
    }

    let (session, outcome) = session.drag_move(item, x, z)?;

    match outcome {
        DragOutcome::Moved { position } => println!(
            "{} Moved {} to ({}, {}, {})",
            "✅".bright_green(),
            item.bright_white(),
            position.x,
            position.y,
            position.z
        ),
        DragOutcome::Rejected { required_height, .. } => println!(
            "{} {} would reach {} mm under a {} mm ceiling, kept in place",
            "⚠️".bright_yellow(),
            item.bright_white(),
            required_height,
            session.bin.height
        ),
    }

    write_json(
        &DragReport {
            outcome: &outcome,
            session: &session,
        },
        output,
    )
}
