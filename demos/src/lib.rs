//! Shared pieces of the `gridsearch` runner: step counting, scenario loading
//! and text rendering of a finished walk.

use std::path::Path;

use gridsearch_core::{Coord, Layout};
use gridsearch_paths::{Notify, Signal, StepRole};
use gridsearch_plan::{PlanConfig, PlanReport};

/// Counts notifications across every search of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub frontier: usize,
    pub explored: usize,
    pub peak_frontier: usize,
    pub peak_visited: usize,
}

impl Notify for Tally {
    fn notify(&mut self, _node: Coord, role: StepRole, frontier: usize, visited: usize) -> Signal {
        match role {
            StepRole::Frontier => self.frontier += 1,
            StepRole::Explored => self.explored += 1,
        }
        self.peak_frontier = self.peak_frontier.max(frontier);
        self.peak_visited = self.peak_visited.max(visited);
        Signal::Continue
    }
}

/// Read a TOML scenario. Missing keys keep their defaults.
pub fn load_scenario(path: &Path) -> Result<PlanConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let cfg: PlanConfig = toml::from_str(&text)?;
    log::debug!("loaded scenario {}", path.display());
    Ok(cfg)
}

/// Draw the grid with the walk overlaid.
///
/// `S` and `T` mark the initial endpoints, `o` a walked cell and `x` a
/// cell where the walk was blocked and had to replan.
pub fn render_walk(layout: &Layout, report: &PlanReport) -> String {
    let mut rows: Vec<Vec<char>> = layout
        .grid
        .to_string()
        .lines()
        .map(|l| l.chars().collect())
        .collect();
    let mut put = |c: Coord, ch: char| {
        if let Some(cell) = rows
            .get_mut(c.row as usize)
            .and_then(|r| r.get_mut(c.col as usize))
        {
            *cell = ch;
        }
    };
    for &c in &report.traversed {
        put(c, 'o');
    }
    for r in &report.replans {
        put(r.blocked, 'x');
    }
    put(layout.start, 'S');
    put(layout.target, 'T');
    rows.into_iter()
        .map(|r| r.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
