use bit_set::BitSet;

use crate::clique::VertexId;
use crate::graph::Graph;


/**
returns the vertices sorted by degree (largest first).
ties are broken by vertex id (largest first) so that the order is deterministic.
*/
pub fn degree_order(graph:&Graph) -> Vec<VertexId> {
    let mut res:Vec<VertexId> = graph.vertices().collect();
    res.sort_by(|a,b| {
        graph.degree(*b).cmp(&graph.degree(*a))
            .then_with(|| b.cmp(a))
    });
    res
}


/**
adjacency of a graph relabelled along a vertex order:
rank r corresponds to the r-th vertex of the order.
Iterating a bitset of ranks in increasing order thus follows the vertex order
(degree descending when built by `from_degree_order`).
*/
#[derive(Debug, Clone)]
pub struct OrderedAdjacency {
    /// vertices[r]: original vertex of rank r
    vertices: Vec<VertexId>,
    /// adj[r]: ranks of the neighbors of rank r
    adj: Vec<BitSet>,
}

impl OrderedAdjacency {

    /** relabels the graph along a permutation of its vertices */
    pub fn new(graph:&Graph, order:Vec<VertexId>) -> Self {
        let n = graph.nb_vertices();
        assert_eq!(order.len(), n, "the order must be a permutation of the vertices");
        let mut rank = vec![usize::MAX ; n];
        for (r,v) in order.iter().enumerate() {
            debug_assert_eq!(rank[*v], usize::MAX, "vertex {} appears twice in the order", v);
            rank[*v] = r;
        }
        let adj = order.iter().map(|v| {
            let mut neighbors = BitSet::with_capacity(n);
            for u in graph.adj(*v) {
                neighbors.insert(rank[*u]);
            }
            neighbors
        }).collect();
        Self { vertices: order, adj }
    }

    /** relabels the graph along the degree order */
    pub fn from_degree_order(graph:&Graph) -> Self {
        Self::new(graph, degree_order(graph))
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.vertices.len() }

    /// neighbors of rank r (as ranks)
    pub fn neighbors(&self, r:usize) -> &BitSet { &self.adj[r] }

    /// degree of rank r
    pub fn degree(&self, r:usize) -> usize { self.adj[r].len() }

    /// original vertex of rank r
    pub fn vertex(&self, r:usize) -> VertexId { self.vertices[r] }

    /// set containing all ranks
    pub fn all_ranks(&self) -> BitSet {
        let mut res = BitSet::with_capacity(self.nb_vertices());
        for r in 0..self.nb_vertices() { res.insert(r); }
        res
    }

    /// translates ranks back to (sorted) original vertices
    pub fn to_vertices(&self, ranks:&[usize]) -> Vec<VertexId> {
        let mut res:Vec<VertexId> = ranks.iter().map(|r| self.vertices[*r]).collect();
        res.sort_unstable();
        res
    }
}
