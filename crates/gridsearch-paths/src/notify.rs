use gridsearch_core::Coord;

/// Why a node is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepRole {
    /// The node was admitted to the frontier.
    Frontier,
    /// The node was taken off the frontier and its neighbours examined.
    Explored,
}

/// Observer reply: keep going or stop the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    #[default]
    Continue,
    Cancel,
}

/// Step observer called synchronously by every search.
///
/// The same call carries progress (which node, in what role, and the
/// current frontier and visited sizes) and the cancellation request. A
/// [`Signal::Cancel`] reply makes the search return
/// [`SearchOutcome::Cancelled`](crate::SearchOutcome::Cancelled) without
/// touching any further node.
///
/// Implemented for every `FnMut(Coord, StepRole, usize, usize) -> Signal`.
pub trait Notify {
    fn notify(&mut self, node: Coord, role: StepRole, frontier: usize, visited: usize) -> Signal;
}

impl<F> Notify for F
where
    F: FnMut(Coord, StepRole, usize, usize) -> Signal,
{
    #[inline]
    fn notify(&mut self, node: Coord, role: StepRole, frontier: usize, visited: usize) -> Signal {
        self(node, role, frontier, visited)
    }
}

/// Observer that ignores every step and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quiet;

impl Notify for Quiet {
    #[inline]
    fn notify(&mut self, _: Coord, _: StepRole, _: usize, _: usize) -> Signal {
        Signal::Continue
    }
}
