use bit_set::BitSet;
use serde::{Serialize, Deserialize};

use crate::graph::Graph;

/** Vertex Id (0-based inside the crate, DIMACS ids are shifted by one when read) */
pub type VertexId = usize;

/** tells if a search explored the whole search tree */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    /// the search completed: the clique is maximum
    Optimal,
    /// the stopping criterion fired: the clique is only the best found so far
    Interrupted,
}

impl SearchStatus {
    /// human readable status
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStatus::Optimal => "optimal",
            SearchStatus::Interrupted => "interrupted",
        }
    }
}

/** result of a maximum clique search */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliqueSolution {
    /// vertices of the clique (sorted)
    pub vertices: Vec<VertexId>,
    /// optimal or interrupted
    pub status: SearchStatus,
    /// number of search nodes (calls to expand)
    pub nb_nodes: u64,
    /// number of subtrees cut by the bound
    pub nb_pruned: u64,
    /// time spent in the search (seconds)
    pub time_searched: f32,
}

impl CliqueSolution {
    /// number of vertices in the clique
    pub fn size(&self) -> usize { self.vertices.len() }

    /// true iff the search was exhaustive
    pub fn is_optimal(&self) -> bool { self.status == SearchStatus::Optimal }

    /// vertices as DIMACS ids (1-based)
    pub fn dimacs_vertices(&self) -> Vec<usize> {
        self.vertices.iter().map(|v| v+1).collect()
    }
}


/** result of the clique checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// valid clique of the given size
    Ok(usize),
    /// vertex id not in the graph
    UnknownVertex(VertexId),
    /// a vertex appears twice
    VertexAddedTwice(VertexId),
    /// two vertices of the clique are not adjacent
    NonAdjacent(VertexId, VertexId),
}

/**
checks that the vertices form a clique of the graph.
returns the size of the clique if it is valid, the reason otherwise.
*/
pub fn checker(graph:&Graph, clique:&[VertexId]) -> CheckerResult {
    let mut visited = BitSet::with_capacity(graph.nb_vertices());
    for v in clique {
        if *v >= graph.nb_vertices() { return CheckerResult::UnknownVertex(*v); }
        if !visited.insert(*v) { return CheckerResult::VertexAddedTwice(*v); }
    }
    for (i,a) in clique.iter().enumerate() {
        for b in &clique[i+1..] {
            if !graph.are_adjacent(*a, *b) {
                return CheckerResult::NonAdjacent(*a, *b);
            }
        }
    }
    CheckerResult::Ok(clique.len())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_and_isolated() -> Graph {
        Graph::new(4, &[(0,1), (0,2), (1,2)])
    }

    #[test]
    fn test_checker_accepts_triangle() {
        let g = triangle_and_isolated();
        assert_eq!(checker(&g, &[0,1,2]), CheckerResult::Ok(3));
        assert_eq!(checker(&g, &[3]), CheckerResult::Ok(1));
        assert_eq!(checker(&g, &[]), CheckerResult::Ok(0));
    }

    #[test]
    fn test_checker_rejects() {
        let g = triangle_and_isolated();
        assert_eq!(checker(&g, &[0,3]), CheckerResult::NonAdjacent(0,3));
        assert_eq!(checker(&g, &[0,0]), CheckerResult::VertexAddedTwice(0));
        assert_eq!(checker(&g, &[1,7]), CheckerResult::UnknownVertex(7));
    }

    #[test]
    fn test_solution_serializes() {
        let sol = CliqueSolution {
            vertices: vec![0,1,2],
            status: SearchStatus::Interrupted,
            nb_nodes: 3,
            nb_pruned: 1,
            time_searched: 0.5,
        };
        assert_eq!(sol.dimacs_vertices(), vec![1,2,3]);
        assert!(!sol.is_optimal());
        let s = serde_json::to_string(&sol).unwrap();
        assert!(s.contains("\"Interrupted\""));
        let back:CliqueSolution = serde_json::from_str(&s).unwrap();
        assert_eq!(back.size(), 3);
    }
}
