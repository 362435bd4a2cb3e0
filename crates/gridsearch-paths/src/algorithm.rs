use std::fmt;
use std::str::FromStr;

use gridsearch_core::Coord;

use crate::bfs::BreadthFirst;
use crate::bidirectional::Bidirectional;
use crate::dfs::DepthFirst;
use crate::dls::DepthLimited;
use crate::iddfs::IterativeDeepening;
use crate::notify::Notify;
use crate::search::{Interrupt, Search, SearchStrategy};
use crate::spawner::ObstacleSpawner;
use crate::ucs::UniformCost;

/// Name of a search strategy, without its parameters.
///
/// Parses case-insensitively from `bfs`, `dfs`, `ucs`, `dls`, `iddfs` and
/// `bidirectional` (or `bidi`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum AlgorithmKind {
    #[default]
    Bfs,
    Dfs,
    Ucs,
    Dls,
    Iddfs,
    #[cfg_attr(feature = "serde", serde(alias = "bidi"))]
    Bidirectional,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 6] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Ucs,
        AlgorithmKind::Dls,
        AlgorithmKind::Iddfs,
        AlgorithmKind::Bidirectional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Ucs => "ucs",
            Self::Dls => "dls",
            Self::Iddfs => "iddfs",
            Self::Bidirectional => "bidirectional",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} \
             (expected bfs, dfs, ucs, dls, iddfs or bidirectional)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for AlgorithmKind {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "ucs" => Ok(Self::Ucs),
            "dls" => Ok(Self::Dls),
            "iddfs" => Ok(Self::Iddfs),
            "bidirectional" | "bidi" => Ok(Self::Bidirectional),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// A configured search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    BreadthFirst,
    DepthFirst,
    UniformCost,
    DepthLimited { limit: usize },
    IterativeDeepening { max_depth: usize },
    Bidirectional,
}

impl Algorithm {
    /// Build the strategy named by `kind`; `limit` and `max_depth` apply only
    /// to the depth-bounded ones.
    pub fn from_kind(kind: AlgorithmKind, limit: usize, max_depth: usize) -> Self {
        match kind {
            AlgorithmKind::Bfs => Self::BreadthFirst,
            AlgorithmKind::Dfs => Self::DepthFirst,
            AlgorithmKind::Ucs => Self::UniformCost,
            AlgorithmKind::Dls => Self::DepthLimited { limit },
            AlgorithmKind::Iddfs => Self::IterativeDeepening { max_depth },
            AlgorithmKind::Bidirectional => Self::Bidirectional,
        }
    }

    pub fn kind(self) -> AlgorithmKind {
        match self {
            Self::BreadthFirst => AlgorithmKind::Bfs,
            Self::DepthFirst => AlgorithmKind::Dfs,
            Self::UniformCost => AlgorithmKind::Ucs,
            Self::DepthLimited { .. } => AlgorithmKind::Dls,
            Self::IterativeDeepening { .. } => AlgorithmKind::Iddfs,
            Self::Bidirectional => AlgorithmKind::Bidirectional,
        }
    }
}

impl From<AlgorithmKind> for Algorithm {
    fn from(kind: AlgorithmKind) -> Self {
        Self::from_kind(
            kind,
            DepthLimited::DEFAULT_LIMIT,
            IterativeDeepening::DEFAULT_MAX_DEPTH,
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthLimited { limit } => write!(f, "dls(limit={limit})"),
            Self::IterativeDeepening { max_depth } => write!(f, "iddfs(max_depth={max_depth})"),
            other => write!(f, "{}", other.kind()),
        }
    }
}

impl SearchStrategy for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Self::BreadthFirst => BreadthFirst.name(),
            Self::DepthFirst => DepthFirst.name(),
            Self::UniformCost => UniformCost.name(),
            Self::DepthLimited { limit } => DepthLimited::new(*limit).name(),
            Self::IterativeDeepening { max_depth } => IterativeDeepening::new(*max_depth).name(),
            Self::Bidirectional => Bidirectional.name(),
        }
    }

    fn search<N: Notify, S: ObstacleSpawner>(
        &self,
        cx: &mut Search<'_, N, S>,
    ) -> Result<Option<Vec<Coord>>, Interrupt> {
        match self {
            Self::BreadthFirst => BreadthFirst.search(cx),
            Self::DepthFirst => DepthFirst.search(cx),
            Self::UniformCost => UniformCost.search(cx),
            Self::DepthLimited { limit } => DepthLimited::new(*limit).search(cx),
            Self::IterativeDeepening { max_depth } => {
                IterativeDeepening::new(*max_depth).search(cx)
            }
            Self::Bidirectional => Bidirectional.search(cx),
        }
    }
}
