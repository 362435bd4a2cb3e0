//! Uninformed search strategies over a [`Grid`](gridsearch_core::Grid).
//!
//! Six strategies share one contract ([`SearchStrategy`]):
//!
//! - **Breadth-first** ([`BreadthFirst`]) : FIFO frontier
//! - **Depth-first** ([`DepthFirst`]) : LIFO frontier
//! - **Uniform-cost** ([`UniformCost`]) : min-heap on cost, FIFO on ties
//! - **Depth-limited** ([`DepthLimited`]) : recursive, bounded depth
//! - **Iterative deepening** ([`IterativeDeepening`]) : growing depth limit
//! - **Bidirectional** ([`Bidirectional`]) : two BFS waves that meet
//!
//! [`Algorithm`] is the closed enum that dispatches to them.
//!
//! Every strategy reports each frontier admission and each expansion to a
//! [`Notify`] observer, which may cancel the run. Each outer iteration also
//! polls a wall-clock [`Deadline`] and gives an [`ObstacleSpawner`] the
//! chance to block a cell.
//!
//! | Outcome | Meaning |
//! |---|---|
//! | [`SearchOutcome::Path`] | start → target, inclusive |
//! | [`SearchOutcome::NotFound`] | search space exhausted |
//! | [`SearchOutcome::Cancelled`] | the observer returned [`Signal::Cancel`] |
//! | [`SearchOutcome::TimedOut`] | the deadline passed |

mod algorithm;
mod bfs;
mod bidirectional;
mod deadline;
mod dfs;
mod dls;
mod iddfs;
mod notify;
mod outcome;
mod path;
mod search;
mod spawner;
mod ucs;

pub use algorithm::{Algorithm, AlgorithmKind, ParseAlgorithmError};
pub use bfs::BreadthFirst;
pub use bidirectional::Bidirectional;
pub use deadline::{DEFAULT_TIMEOUT, Deadline};
pub use dfs::DepthFirst;
pub use dls::DepthLimited;
pub use iddfs::IterativeDeepening;
pub use notify::{Notify, Quiet, Signal, StepRole};
pub use outcome::SearchOutcome;
pub use path::{CameFrom, merge, reconstruct};
pub use search::{Interrupt, Search, SearchStrategy};
pub use spawner::{NoObstacles, ObstacleSpawner};
pub use ucs::UniformCost;
