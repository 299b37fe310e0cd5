//! Parallel branch and bound: the branches of the root node are independent searches
//! distributed over a rayon thread pool. They share the best clique found so far, which only
//! ever grows.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use bit_set::BitSet;
use rayon::prelude::*;

use crate::bound::{BoundStrategy, Coloring};
use crate::clique::{CliqueSolution, SearchStatus, VertexId};
use crate::engine::CliqueBnb;
use crate::graph::Graph;
use crate::order::OrderedAdjacency;
use crate::stopping::StoppingCriterion;


/**
best clique shared between workers.
The size can be read without locking. The clique is only replaced while holding the lock,
and only by a strictly larger one.
*/
#[derive(Debug, Default)]
pub struct SharedBest {
    /// size of the best clique
    size: AtomicUsize,
    /// best clique (original vertex ids)
    clique: Mutex<Vec<VertexId>>,
}

impl SharedBest {
    /// creates an empty best clique
    pub fn new() -> Self { Self::default() }

    /// size of the best clique
    pub fn size(&self) -> usize { self.size.load(Ordering::Acquire) }

    /// replaces the best clique if `clique` is strictly larger. Returns true if it did.
    pub fn offer(&self, clique:&[VertexId]) -> bool {
        let mut best = match self.clique.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if clique.len() <= best.len() { return false; }
        best.clear();
        best.extend_from_slice(clique);
        self.size.store(clique.len(), Ordering::Release);
        true
    }

    /// copy of the best clique
    pub fn clique(&self) -> Vec<VertexId> {
        match self.clique.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}


/** statistics returned by a root branch */
#[derive(Debug, Clone, Copy, Default)]
struct BranchStats {
    nb_nodes: u64,
    nb_pruned: u64,
    interrupted: bool,
}


/**
solves the maximum clique problem with the root branches spread over `nb_threads` threads
(0: rayon default).
Root branch i (taken from the last bounded candidate to the first) searches the cliques
containing order[i] within order[0..i], as the sequential search does.
*/
pub fn parallel_solve<Bound:BoundStrategy, Stopping:StoppingCriterion + Sync>(
    graph:&Graph, bound:&Bound, stopping:&Stopping, nb_threads:usize, show_completion:bool
) -> CliqueSolution {
    let t_start = Instant::now();
    let adj = OrderedAdjacency::from_degree_order(graph);
    let shared = SharedBest::new();
    let mut root = Coloring::default();
    bound.compute(&adj, &adj.all_ranks(), &mut root);
    let run = || -> Vec<BranchStats> {
        (0..root.len()).into_par_iter().rev().map(|i| {
            if stopping.is_finished() {
                return BranchStats { interrupted: true, ..BranchStats::default() };
            }
            if root.bound[i] <= shared.size() {
                return BranchStats { nb_pruned: 1, ..BranchStats::default() };
            }
            let v = root.order[i];
            let mut candidates = BitSet::with_capacity(adj.nb_vertices());
            for u in &root.order[0..i] { candidates.insert(*u); }
            candidates.intersect_with(adj.neighbors(v));
            let mut search = CliqueBnb::new(&adj, bound, stopping.clone())
                .with_shared_best(&shared)
                .show_completion(show_completion);
            search.search(&[v], candidates);
            BranchStats {
                nb_nodes: search.nb_nodes(),
                nb_pruned: search.nb_pruned(),
                interrupted: search.is_interrupted(),
            }
        }).collect()
    };
    let stats = match rayon::ThreadPoolBuilder::new().num_threads(nb_threads).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            println!("unable to build a pool of {} threads ({}), using the global pool", nb_threads, e);
            run()
        }
    };
    CliqueSolution {
        vertices: shared.clique(),
        status: if stats.iter().any(|s| s.interrupted) { SearchStatus::Interrupted } else { SearchStatus::Optimal },
        nb_nodes: 1 + stats.iter().map(|s| s.nb_nodes).sum::<u64>(),
        nb_pruned: stats.iter().map(|s| s.nb_pruned).sum(),
        time_searched: t_start.elapsed().as_secs_f32(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::thread;

    use rand::{SeedableRng, rngs::StdRng};

    use crate::bound::{CandidateCount, GreedyColoring};
    use crate::clique::{checker, CheckerResult};
    use crate::engine::max_clique;
    use std::time::Duration;

    use crate::stopping::{FlagStoppingCriterion, NeverStoppingCriterion, TimeStoppingCriterion};

    #[test]
    fn test_shared_best_is_monotone() {
        let best = SharedBest::new();
        assert!(best.offer(&[1,2]));
        assert!(!best.offer(&[3,4]));
        assert!(!best.offer(&[5]));
        assert_eq!(best.size(), 2);
        assert_eq!(best.clique(), vec![1,2]);
        assert!(best.offer(&[1,2,3]));
        assert_eq!(best.size(), 3);
    }

    #[test]
    fn test_shared_best_concurrent_offers() {
        let best = Arc::new(SharedBest::new());
        let handles:Vec<_> = (0..8).map(|t| {
            let best = best.clone();
            thread::spawn(move || {
                for k in 0..50 {
                    let clique:Vec<VertexId> = (0..(k*t)%37).collect();
                    best.offer(&clique);
                    assert!(best.size() >= clique.len());
                }
            })
        }).collect();
        for h in handles { h.join().unwrap(); }
        assert_eq!(best.size(), 36);
        assert_eq!(best.clique().len(), 36);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(0xFA11);
        for p in [0.3, 0.6, 0.9] {
            for _ in 0..5 {
                let g = Graph::random(50, p, &mut rng);
                let expected = max_clique(&g).size();
                for nb_threads in [1, 4] {
                    let sol = parallel_solve(&g, &GreedyColoring, &NeverStoppingCriterion::default(), nb_threads, false);
                    assert_eq!(sol.size(), expected);
                    assert!(sol.is_optimal());
                    assert_eq!(checker(&g, &sol.vertices), CheckerResult::Ok(expected));
                }
            }
        }
    }

    #[test]
    fn test_parallel_candidate_count() {
        let g = Graph::new(6, &[(0,1), (0,2), (1,2), (3,4), (3,5), (4,5), (2,3)]);
        let sol = parallel_solve(&g, &CandidateCount, &NeverStoppingCriterion::default(), 2, false);
        assert_eq!(sol.size(), 3);
    }

    #[test]
    fn test_parallel_boundary_cases() {
        let sol = parallel_solve(&Graph::new(0, &[]), &GreedyColoring, &NeverStoppingCriterion::default(), 2, false);
        assert_eq!(sol.size(), 0);
        assert!(sol.is_optimal());
        let sol = parallel_solve(&Graph::new(3, &[]), &GreedyColoring, &NeverStoppingCriterion::default(), 2, false);
        assert_eq!(sol.size(), 1);
        let sol = parallel_solve(&Graph::complete(9), &GreedyColoring, &NeverStoppingCriterion::default(), 2, false);
        assert_eq!(sol.size(), 9);
    }

    #[test]
    fn test_parallel_interrupted() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = Graph::random(60, 0.5, &mut rng);
        let sol = parallel_solve(&g, &GreedyColoring, &TimeStoppingCriterion::new(0.), 2, false);
        assert_eq!(sol.status, SearchStatus::Interrupted);
        assert_eq!(checker(&g, &sol.vertices), CheckerResult::Ok(sol.size()));
    }

    #[test]
    fn test_parallel_cancelled_during_search() {
        let mut rng = StdRng::seed_from_u64(401);
        let g = Graph::random(400, 0.9, &mut rng);
        let stopping = FlagStoppingCriterion::new();
        let canceller = {
            let stopping = stopping.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(200));
                stopping.cancel();
            })
        };
        let sol = parallel_solve(&g, &GreedyColoring, &stopping, 2, false);
        canceller.join().unwrap();
        assert_eq!(sol.status, SearchStatus::Interrupted);
        assert!(sol.size() > 1);
        assert_eq!(checker(&g, &sol.vertices), CheckerResult::Ok(sol.size()));
    }
}
