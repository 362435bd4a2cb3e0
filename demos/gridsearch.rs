//! Run one re-planning search and print the walk.
//!
//! Usage:
//!   gridsearch                                   # 40x40 open grid, bfs
//!   gridsearch --algorithm iddfs --seed 7
//!   gridsearch --scenario demos/scenarios/maze.toml --algorithm dls
//!
//! Set `RUST_LOG=debug` to follow the controller's state changes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gridsearch_demos::{Tally, load_scenario, render_walk};
use gridsearch_paths::AlgorithmKind;
use gridsearch_plan::{PlanConfig, PlanOutcome};
use tracing_subscriber::EnvFilter;

/// Command-line flags. Each one overrides the scenario file.
#[derive(Parser)]
#[command(name = "gridsearch")]
#[command(about = "Uninformed grid search with dynamic obstacles and re-planning")]
struct Args {
    /// Scenario file (TOML)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// bfs, dfs, ucs, dls, iddfs or bidirectional
    #[arg(long, short)]
    algorithm: Option<AlgorithmKind>,

    #[arg(long)]
    rows: Option<i32>,

    #[arg(long)]
    cols: Option<i32>,

    /// Seconds allowed per search
    #[arg(long)]
    timeout: Option<f64>,

    /// Depth limit for dls
    #[arg(long)]
    depth_limit: Option<usize>,

    /// Largest limit tried by iddfs
    #[arg(long)]
    max_depth: Option<usize>,

    /// Chance of a new obstacle per search iteration
    #[arg(long, short)]
    probability: Option<f64>,

    #[arg(long)]
    max_replans: Option<usize>,

    /// Seed for obstacle placement
    #[arg(long, short)]
    seed: Option<u64>,

    /// Skip drawing the grid
    #[arg(long)]
    no_grid: bool,
}

impl Args {
    fn apply(&self, cfg: &mut PlanConfig) {
        if let Some(a) = self.algorithm {
            cfg.algorithm = a;
        }
        if let Some(r) = self.rows {
            cfg.rows = r;
        }
        if let Some(c) = self.cols {
            cfg.cols = c;
        }
        if let Some(t) = self.timeout {
            cfg.timeout_secs = t;
        }
        if let Some(d) = self.depth_limit {
            cfg.depth_limit = d;
        }
        if let Some(d) = self.max_depth {
            cfg.max_depth = d;
        }
        if let Some(p) = self.probability {
            cfg.obstacle_probability = p;
        }
        if let Some(m) = self.max_replans {
            cfg.max_replans = m;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => PlanConfig::default(),
    };
    args.apply(&mut cfg);

    let mut layout = cfg.layout()?;
    let mut tally = Tally::default();
    let mut replanner = cfg.replanner(&layout, cfg.spawner());
    let report = replanner.run(&mut layout.grid, &mut tally)?;

    if !args.no_grid {
        println!("{}", render_walk(&layout, &report));
        println!();
    }
    println!("algorithm:  {}", cfg.algorithm());
    println!("outcome:    {}", report.outcome);
    println!("moves:      {}", report.moves());
    println!("searches:   {}", report.searches);
    println!("replans:    {}", report.replans.len());
    println!(
        "steps:      {} frontier, {} explored (peak frontier {}, peak visited {})",
        tally.frontier, tally.explored, tally.peak_frontier, tally.peak_visited
    );

    Ok(match report.outcome {
        PlanOutcome::Success => ExitCode::SUCCESS,
        PlanOutcome::Failed(_) | PlanOutcome::Cancelled => ExitCode::FAILURE,
    })
}
