use std::collections::VecDeque;

use gridsearch_core::Coord;

use crate::notify::Notify;
use crate::path::{CameFrom, merge};
use crate::search::{Interrupt, Search, SearchStrategy};
use crate::spawner::ObstacleSpawner;

/// Bidirectional breadth-first search.
///
/// Two FIFO waves grow alternately, one expansion each per round, from the
/// start and from the target. The search ends as soon as an expansion
/// touches a cell the other wave has already reached, so the path is found
/// early but is not guaranteed to be the shortest. Frontier and visited
/// counts in notifications cover both waves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bidirectional;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Wave {
    Forward,
    Backward,
}

struct Waves {
    fq: VecDeque<Coord>,
    bq: VecDeque<Coord>,
    fwd: CameFrom,
    bwd: CameFrom,
}

impl Waves {
    fn frontier(&self) -> usize {
        self.fq.len() + self.bq.len()
    }

    fn visited(&self) -> usize {
        self.fwd.len() + self.bwd.len()
    }

    fn parts(&mut self, wave: Wave) -> (&mut VecDeque<Coord>, &mut CameFrom, &CameFrom) {
        match wave {
            Wave::Forward => (&mut self.fq, &mut self.fwd, &self.bwd),
            Wave::Backward => (&mut self.bq, &mut self.bwd, &self.fwd),
        }
    }

    fn join(&self, wave: Wave, cur: Coord, met: Coord) -> Vec<Coord> {
        match wave {
            Wave::Forward => merge(cur, met, &self.fwd, &self.bwd),
            Wave::Backward => merge(met, cur, &self.fwd, &self.bwd),
        }
    }
}

/// Expand the head of one wave. Returns the joined path if it touched the
/// other wave, and `Ok(None)` if it expanded normally or its queue was empty.
fn expand<N: Notify, S: ObstacleSpawner>(
    cx: &mut Search<'_, N, S>,
    st: &mut Waves,
    wave: Wave,
) -> Result<Option<Vec<Coord>>, Interrupt> {
    let Some(cur) = st.parts(wave).0.pop_front() else {
        return Ok(None);
    };

    let nbuf = cx.take_neighbors(cur);
    let mut met = None;
    for &n in nbuf.iter() {
        let (queue, mine, other) = st.parts(wave);
        if other.contains(n) {
            met = Some(n);
            break;
        }
        if mine.contains(n) {
            continue;
        }
        mine.insert(n, cur);
        queue.push_back(n);
        cx.frontier(n, st.frontier(), st.visited())?;
    }
    cx.restore(nbuf);
    if let Some(n) = met {
        return Ok(Some(st.join(wave, cur, n)));
    }

    cx.explored(cur, st.frontier(), st.visited())?;
    Ok(None)
}

impl SearchStrategy for Bidirectional {
    fn name(&self) -> &'static str {
        "bidirectional"
    }

    fn search<N: Notify, S: ObstacleSpawner>(
        &self,
        cx: &mut Search<'_, N, S>,
    ) -> Result<Option<Vec<Coord>>, Interrupt> {
        let (start, target) = (cx.start(), cx.target());
        if start == target {
            return Ok(Some(vec![start]));
        }
        let dims = cx.grid().dims();
        let mut st = Waves {
            fq: VecDeque::from([start]),
            bq: VecDeque::from([target]),
            fwd: CameFrom::rooted_at(dims, start),
            bwd: CameFrom::rooted_at(dims, target),
        };

        while !st.fq.is_empty() && !st.bq.is_empty() {
            cx.poll()?;
            for wave in [Wave::Forward, Wave::Backward] {
                if let Some(path) = expand(cx, &mut st, wave)? {
                    log::trace!(
                        "waves met after {} forward and {} backward cells",
                        st.fwd.len(),
                        st.bwd.len()
                    );
                    return Ok(Some(path));
                }
            }
            cx.spawn_obstacle();
        }
        Ok(None)
    }
}
