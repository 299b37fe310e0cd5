//! Upper bounds on the size of a clique within a candidate set.
//!
//! A bound strategy orders the candidates and gives, for each position `i`, an upper bound
//! on the size of a clique using only the candidates at positions `0..=i`. The branch and bound
//! consumes the order from the end and stops as soon as the bound can no longer beat the best
//! clique found so far.

use std::str::FromStr;

use bit_set::BitSet;

use crate::order::OrderedAdjacency;


/** ordered candidates and their bounds (bound[i] is the color of order[i]) */
#[derive(Debug, Clone, Default)]
pub struct Coloring {
    /// candidates in the order they were colored
    pub order: Vec<usize>,
    /// bound[i]: upper bound on the clique size using order[0..=i]
    pub bound: Vec<usize>,
}

impl Coloring {
    /// empties the coloring (keeps the allocated memory)
    pub fn clear(&mut self) {
        self.order.clear();
        self.bound.clear();
    }

    /// appends a vertex with its bound
    pub fn push(&mut self, v:usize, bound:usize) {
        debug_assert!(self.bound.last().map_or(true, |b| *b <= bound), "bounds must be non-decreasing");
        self.order.push(v);
        self.bound.push(bound);
    }

    /// number of colored vertices
    pub fn len(&self) -> usize { self.order.len() }

    /// true if no vertex is colored
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// number of colors used (bound on the whole candidate set)
    pub fn nb_colors(&self) -> usize { self.bound.last().copied().unwrap_or(0) }

}


/**
computes an ordering of a candidate set with non-decreasing upper bounds.
Strategies are shared between parallel workers, hence Sync.
*/
pub trait BoundStrategy: Sync {
    /// fills `out` with the candidates (ranks of `adj`) and their bounds
    fn compute(&self, adj:&OrderedAdjacency, candidates:&BitSet, out:&mut Coloring);

    /// name displayed in the statistics
    fn name(&self) -> &'static str;
}


/**
Greedy coloring bound (Tomita-style).
Repeatedly peels a maximal independent set from the uncolored candidates:
vertices are considered in rank order (degree descending) and admitted in the current color
if they are not adjacent to a vertex already admitted in it. A clique uses at most one vertex per
color, so the color of order[i] bounds any clique within order[0..=i].
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyColoring;

impl BoundStrategy for GreedyColoring {
    fn compute(&self, adj:&OrderedAdjacency, candidates:&BitSet, out:&mut Coloring) {
        out.clear();
        let mut uncolored = candidates.clone();
        let mut color = 0;
        while !uncolored.is_empty() {
            color += 1;
            // vertices that can still join the current color
            let mut available = uncolored.clone();
            while let Some(v) = available.iter().next() {
                available.remove(v);
                available.difference_with(adj.neighbors(v));
                uncolored.remove(v);
                out.push(v, color);
            }
        }
    }

    fn name(&self) -> &'static str { "coloring" }
}


/**
Trivial bound: a clique within k candidates has at most k vertices.
Candidates are ordered by rank.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateCount;

impl BoundStrategy for CandidateCount {
    fn compute(&self, _adj:&OrderedAdjacency, candidates:&BitSet, out:&mut Coloring) {
        out.clear();
        for (i,v) in candidates.iter().enumerate() {
            out.push(v, i+1);
        }
    }

    fn name(&self) -> &'static str { "count" }
}


/** bound strategies selectable from the command line */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// greedy coloring bound
    Coloring,
    /// number of candidates
    CandidateCount,
}

impl BoundKind {
    /// returns the strategy implementing the bound
    pub fn strategy(&self) -> Box<dyn BoundStrategy> {
        match self {
            BoundKind::Coloring => Box::new(GreedyColoring),
            BoundKind::CandidateCount => Box::new(CandidateCount),
        }
    }
}

impl FromStr for BoundKind {
    type Err = String;

    fn from_str(s:&str) -> Result<Self, Self::Err> {
        match s {
            "coloring" | "color" => Ok(BoundKind::Coloring),
            "count" | "candidates" => Ok(BoundKind::CandidateCount),
            _ => Err(format!("unknown bound '{}' (valid: 'coloring', 'count')", s)),
        }
    }
}

impl<B:BoundStrategy + ?Sized> BoundStrategy for &B {
    fn compute(&self, adj:&OrderedAdjacency, candidates:&BitSet, out:&mut Coloring) {
        (**self).compute(adj, candidates, out)
    }

    fn name(&self) -> &'static str { (**self).name() }
}

impl<B:BoundStrategy + ?Sized> BoundStrategy for Box<B> {
    fn compute(&self, adj:&OrderedAdjacency, candidates:&BitSet, out:&mut Coloring) {
        (**self).compute(adj, candidates, out)
    }

    fn name(&self) -> &'static str { (**self).name() }
}
