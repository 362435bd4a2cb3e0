use std::fmt;

use gridsearch_core::Coord;

/// Result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// Ordered cells from start to target, both included.
    Path(Vec<Coord>),
    /// The reachable space was exhausted without meeting the target.
    NotFound,
    /// The step observer asked to stop.
    Cancelled,
    /// The wall-clock budget ran out.
    TimedOut,
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            Self::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// Number of moves in the path (cells minus one).
    pub fn moves(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "path of {} moves", p.len().saturating_sub(1)),
            Self::NotFound => f.write_str("not found"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let o = SearchOutcome::Path(vec![Coord::new(0, 0), Coord::new(1, 1)]);
        assert!(o.is_found());
        assert_eq!(o.moves(), Some(1));
        assert_eq!(o.to_string(), "path of 1 moves");
        assert_eq!(SearchOutcome::TimedOut.path(), None);
        assert_eq!(SearchOutcome::NotFound.moves(), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn outcome_round_trip() {
        let o = SearchOutcome::Path(vec![Coord::new(2, 3), Coord::new(2, 4)]);
        let json = serde_json::to_string(&o).unwrap();
        let back: SearchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(o, back);
    }
}
