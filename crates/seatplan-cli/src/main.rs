//! Seatplan CLI
//!
//! The `seatplan` command assigns exam candidates to rooms.
//!
//! ## Commands
//!
//! - `allocate`: Read a roster, fill the selected rooms, write manifests
//! - `rooms`: Show how many rooms a roster needs
//! - `pairs`: Show the branch pair sequence for a set of branches

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};

use seatplan_core::{
    archive_directory, generate_branch_pairs, manifests_for, plan_allocation, read_roster,
    render_all, required_rooms, seeded_rng, shuffle, write_manifests, write_manifests_json,
    write_summary_json, AllocationRequest, AllocationSummary, MismatchReport, SeatPlanConfig,
    SeatPlanError,
};

#[derive(Parser)]
#[command(name = "seatplan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Exam seat planner: branch-balanced room allocation", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Path to a seatplan TOML config file
    #[arg(long, global = true, env = "SEATPLAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate a roster to rooms and write per-room manifests
    Allocate {
        /// Roster: a directory of per-branch CSV sheets, a single sheet, or a JSON file
        #[arg(short, long)]
        roster: PathBuf,

        /// Selected rooms (comma-separated labels)
        #[arg(long, value_delimiter = ',', required = true)]
        rooms: Vec<String>,

        /// Seed for reproducible shuffling
        #[arg(long, env = "SEATPLAN_SEED")]
        seed: Option<u64>,

        /// Seats per room (overrides config)
        #[arg(long, env = "SEATPLAN_CAPACITY")]
        capacity: Option<usize>,

        /// Per-branch limit during primary fill (default: capacity / 2)
        #[arg(long)]
        sub_cap: Option<usize>,

        /// Output directory
        #[arg(short, long, default_value = "seatplan-out")]
        out: PathBuf,

        /// Also render HTML attendance sheets
        #[arg(long)]
        render: bool,

        /// Bundle rendered sheets into a .tar.gz (implies --render)
        #[arg(long)]
        archive: bool,
    },

    /// Show the number of rooms required
    Rooms {
        /// Roster to count candidates from
        #[arg(short, long, conflicts_with = "students")]
        roster: Option<PathBuf>,

        /// Candidate count, instead of reading a roster
        #[arg(short, long, required_unless_present = "roster")]
        students: Option<usize>,

        /// Seats per room (overrides config)
        #[arg(long, env = "SEATPLAN_CAPACITY")]
        capacity: Option<usize>,
    },

    /// Show the branch pair sequence rooms will cycle through
    Pairs {
        /// Branch labels (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        branches: Vec<String>,

        /// Seed for the branch shuffle; omit to print in the given order
        #[arg(long)]
        seed: Option<u64>,
    },
}

const ROOMS_DIR: &str = "rooms";
const SHEETS_DIR: &str = "sheets";
const ARCHIVE_NAME: &str = "sheets.tar.gz";

#[derive(Serialize)]
struct MismatchOutput {
    error: String,
    #[serde(flatten)]
    report: MismatchReport,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    seatplan_core::init_tracing(cli.json, level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(report) = err
                .downcast_ref::<SeatPlanError>()
                .and_then(SeatPlanError::mismatch_report)
            {
                let output = MismatchOutput {
                    error: err.to_string(),
                    report,
                };
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{json}"),
                    Err(_) => eprintln!("Error: {err}"),
                }
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = SeatPlanConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Allocate {
            roster,
            rooms,
            seed,
            capacity,
            sub_cap,
            out,
            render,
            archive,
        } => cmd_allocate(
            &config,
            AllocateArgs {
                roster: &roster,
                rooms,
                seed,
                capacity,
                sub_cap,
                out: &out,
                render: render || archive,
                archive,
            },
        ),
        Commands::Rooms {
            roster,
            students,
            capacity,
        } => cmd_rooms(&config, roster.as_deref(), students, capacity),
        Commands::Pairs { branches, seed } => cmd_pairs(branches, seed),
    }
}

struct AllocateArgs<'a> {
    roster: &'a Path,
    rooms: Vec<String>,
    seed: Option<u64>,
    capacity: Option<usize>,
    sub_cap: Option<usize>,
    out: &'a Path,
    render: bool,
    archive: bool,
}

fn cmd_allocate(config: &SeatPlanConfig, args: AllocateArgs<'_>) -> Result<()> {
    let capacity = args.capacity.unwrap_or(config.capacity);
    let sub_cap = args
        .sub_cap
        .or(config.sub_cap)
        .unwrap_or(capacity / 2);
    let rooms: Vec<String> = args.rooms.into_iter().map(|r| r.trim().to_string()).collect();

    let candidates = read_roster(args.roster)
        .with_context(|| format!("failed to read roster {:?}", args.roster))?;
    info!(candidates = candidates.len(), rooms = rooms.len(), capacity, sub_cap, "roster loaded");

    let request = AllocationRequest::new(candidates, rooms, capacity).with_sub_cap(sub_cap);
    let plan = plan_allocation(request, &mut seeded_rng(args.seed))?;
    clear_previous_output(args.out)?;

    let manifests = manifests_for(&plan.rooms);
    let rooms_dir = args.out.join(ROOMS_DIR);
    let written = write_manifests(&rooms_dir, &manifests)?;
    write_manifests_json(&args.out.join("rooms.json"), &manifests)?;
    write_summary_json(
        &args.out.join("allocation_summary.json"),
        &AllocationSummary::new(&plan, args.seed),
    )?;

    println!("Allocated {} candidates to {} rooms", plan.total_seated(), plan.rooms.len());
    for room in &plan.rooms {
        let pair = room
            .pair
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<12} {:>3} seated  pair {:<16} primary {:>3}  overflow {:>3}",
            room.id,
            room.len(),
            pair,
            room.primary_count(),
            room.overflow_count()
        );
    }
    println!("Manifests: {} files in {}", written.len(), rooms_dir.display());

    // Rosters are final from here on; rendering failures do not undo them.
    if args.render {
        let sheets_dir = args.out.join(SHEETS_DIR);
        let today = Local::now().date_naive();
        let sheets = render_all(&sheets_dir, &manifests, &config.sheet, today)?;
        println!("Sheets: {} files in {}", sheets.len(), sheets_dir.display());

        if args.archive {
            let dest = args.out.join(ARCHIVE_NAME);
            let entries = archive_directory(&sheets_dir, &dest)?;
            println!("Archive: {} ({} entries)", dest.display(), entries.len());
        }
    }
    Ok(())
}

/// Remove the per-room files and sheet archive of an earlier run in `out`.
///
/// Called only after a plan succeeds, so a rejected request leaves `out` as it was.
fn clear_previous_output(out: &Path) -> Result<()> {
    for dir in [out.join(ROOMS_DIR), out.join(SHEETS_DIR)] {
        if dir.exists() {
            fs::remove_dir_all(&dir).with_context(|| format!("failed to clear {:?}", dir))?;
        }
    }
    let archive = out.join(ARCHIVE_NAME);
    if archive.exists() {
        fs::remove_file(&archive).with_context(|| format!("failed to remove {:?}", archive))?;
    }
    Ok(())
}

fn cmd_rooms(
    config: &SeatPlanConfig,
    roster: Option<&Path>,
    students: Option<usize>,
    capacity: Option<usize>,
) -> Result<()> {
    let capacity = capacity.unwrap_or(config.capacity);
    let total = match (roster, students) {
        (Some(path), _) => read_roster(path)
            .with_context(|| format!("failed to read roster {:?}", path))?
            .len(),
        (None, Some(n)) => n,
        (None, None) => anyhow::bail!("either --roster or --students is required"),
    };
    let required = required_rooms(total, capacity)?;
    println!("{total} candidates at {capacity} per room need {required} rooms");
    Ok(())
}

fn cmd_pairs(mut branches: Vec<String>, seed: Option<u64>) -> Result<()> {
    branches.retain(|b| !b.trim().is_empty());
    if let Some(seed) = seed {
        shuffle(&mut branches, &mut seeded_rng(Some(seed)));
    }
    let pairs = generate_branch_pairs(&branches);
    if pairs.is_empty() {
        println!("No pairs: at least two distinct branches are needed.");
        return Ok(());
    }
    for (i, pair) in pairs.iter().enumerate() {
        println!("{:>3}. {} / {}", i + 1, pair.first, pair.second);
    }
    Ok(())
}
