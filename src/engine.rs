use std::time::Instant;

use bit_set::BitSet;

use crate::bound::{BoundStrategy, Coloring, GreedyColoring};
use crate::clique::{CliqueSolution, SearchStatus};
use crate::graph::Graph;
use crate::order::OrderedAdjacency;
use crate::parallel::SharedBest;
use crate::stopping::{NeverStoppingCriterion, StoppingCriterion};


/**
Branch and bound for the maximum clique problem.

Search state (current clique, best clique, per-depth bound buffers) lives in this structure,
vertices are handled as ranks of an `OrderedAdjacency`.
expand(candidates):
 1. order the candidates and bound them (bound strategy)
 2. from the last candidate to the first: stop if |current| + bound <= |best|,
    otherwise add the candidate and expand its neighbors within the candidates,
    then remove it from the candidates (each vertex is a branching vertex once per node).
The recursion depth is bounded by the size of the largest clique.
*/
#[derive(Debug)]
pub struct CliqueBnb<'a, Bound, Stopping> {
    /// relabelled graph
    adj: &'a OrderedAdjacency,
    /// upper bound procedure
    bound: Bound,
    /// when to give up
    stopping: Stopping,
    /// best clique shared with other workers (if any)
    shared: Option<&'a SharedBest>,
    /// clique being built (ranks)
    current: Vec<usize>,
    /// best clique found by this search (ranks)
    best: Vec<usize>,
    /// colorings[d]: buffer used by the node at depth d
    colorings: Vec<Coloring>,
    /// number of expanded nodes
    nb_nodes: u64,
    /// number of cuts performed by the bound
    nb_pruned: u64,
    /// true if the stopping criterion fired
    interrupted: bool,
    /// prints each improvement
    show_completion: bool,
}

impl<'a, Bound:BoundStrategy, Stopping:StoppingCriterion> CliqueBnb<'a, Bound, Stopping> {

    /** creates a search over the relabelled graph */
    pub fn new(adj:&'a OrderedAdjacency, bound:Bound, stopping:Stopping) -> Self {
        Self {
            adj,
            bound,
            stopping,
            shared: None,
            current: Vec::with_capacity(adj.nb_vertices()),
            best: Vec::new(),
            colorings: Vec::new(),
            nb_nodes: 0,
            nb_pruned: 0,
            interrupted: false,
            show_completion: false,
        }
    }

    /// prints the new best cliques during the search
    pub fn show_completion(mut self, show_completion:bool) -> Self {
        self.show_completion = show_completion;
        self
    }

    /// prunes against (and publishes to) a best clique shared between searches
    pub fn with_shared_best(mut self, shared:&'a SharedBest) -> Self {
        self.shared = Some(shared);
        self
    }

    /// number of expanded nodes
    pub fn nb_nodes(&self) -> u64 { self.nb_nodes }

    /// number of cuts performed by the bound
    pub fn nb_pruned(&self) -> u64 { self.nb_pruned }

    /// true if the stopping criterion fired during the search
    pub fn is_interrupted(&self) -> bool { self.interrupted }

    /// best clique found by this search (as ranks)
    pub fn best_ranks(&self) -> &[usize] { &self.best }

    /** searches the largest clique containing `clique` and included in `clique` ∪ `candidates`.
    `candidates` must be adjacent to every vertex of `clique`.
    The best clique and the statistics of a previous search are discarded.
    */
    pub fn search(&mut self, clique:&[usize], mut candidates:BitSet) {
        debug_assert!(clique.iter().all(|u| candidates.iter().all(|v| self.adj.neighbors(*u).contains(v))));
        self.best.clear();
        self.nb_nodes = 0;
        self.nb_pruned = 0;
        self.interrupted = false;
        self.current.clear();
        self.current.extend_from_slice(clique);
        if candidates.is_empty() {
            self.update_best();
        } else {
            self.expand(&mut candidates);
        }
        self.current.clear();
    }

    /// searches from the root (empty clique, every vertex is a candidate)
    pub fn run(&mut self) {
        let candidates = self.adj.all_ranks();
        self.search(&[], candidates);
    }

    /// size of the best clique known (local or shared)
    fn best_len(&self) -> usize {
        match self.shared {
            None => self.best.len(),
            Some(shared) => self.best.len().max(shared.size()),
        }
    }

    /// records the current clique if it improves the best one
    fn update_best(&mut self) {
        if self.current.len() <= self.best_len() { return; }
        self.best.clone_from(&self.current);
        if let Some(shared) = self.shared {
            shared.offer(&self.adj.to_vertices(&self.best));
        }
        if self.show_completion {
            println!("new best clique: {:<10} nodes: {:<15} pruned: {}", self.best.len(), self.nb_nodes, self.nb_pruned);
        }
    }

    fn expand(&mut self, candidates:&mut BitSet) {
        self.nb_nodes += 1;
        if self.interrupted || self.stopping.is_finished() {
            self.interrupted = true;
            return;
        }
        let depth = self.current.len();
        if self.colorings.len() <= depth {
            self.colorings.resize_with(depth+1, Coloring::default);
        }
        let mut coloring = std::mem::take(&mut self.colorings[depth]);
        self.bound.compute(self.adj, candidates, &mut coloring);
        for i in (0..coloring.len()).rev() {
            // bounds are non-decreasing: nothing before i can do better
            if self.current.len() + coloring.bound[i] <= self.best_len() {
                self.nb_pruned += 1;
                break;
            }
            let v = coloring.order[i];
            self.current.push(v);
            let mut new_candidates = candidates.clone();
            new_candidates.intersect_with(self.adj.neighbors(v));
            if new_candidates.is_empty() {
                self.update_best();
            } else {
                self.expand(&mut new_candidates);
            }
            self.current.pop();
            candidates.remove(v);
            if self.interrupted { break; }
        }
        self.colorings[depth] = coloring;
    }

    /// builds the solution (best clique of this search, original vertex ids)
    pub fn to_solution(&self, time_searched:f32) -> CliqueSolution {
        CliqueSolution {
            vertices: self.adj.to_vertices(&self.best),
            status: if self.interrupted { SearchStatus::Interrupted } else { SearchStatus::Optimal },
            nb_nodes: self.nb_nodes,
            nb_pruned: self.nb_pruned,
            time_searched,
        }
    }
}


/**
solves the maximum clique problem on a graph:
vertices are ordered by degree, then the branch and bound runs from the root.
*/
pub fn solve<Bound:BoundStrategy, Stopping:StoppingCriterion>(graph:&Graph, bound:Bound, stopping:Stopping, show_completion:bool) -> CliqueSolution {
    let t_start = Instant::now();
    let adj = OrderedAdjacency::from_degree_order(graph);
    let mut search = CliqueBnb::new(&adj, bound, stopping)
        .show_completion(show_completion);
    search.run();
    search.to_solution(t_start.elapsed().as_secs_f32())
}

/// maximum clique using the greedy coloring bound, without time limit
pub fn max_clique(graph:&Graph) -> CliqueSolution {
    solve(graph, GreedyColoring, NeverStoppingCriterion::default(), false)
}
