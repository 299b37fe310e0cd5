use std::path::Path;

use bit_set::BitSet;
use rand::Rng;

use crate::clique::VertexId;
use crate::dimacs::{read_from_file, DimacsError};


/** models an undirected simple graph (immutable once built). */
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// edges of the graph (u < v)
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[i]: list of vertices adjacent to i (sorted)
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Vec<BitSet>,
}


impl Graph {

    /**
    builds a graph with n vertices from an edge list.
    self-loops are dropped and parallel edges are merged.

    # Panics
     - if an edge endpoint is not in 0..n
    */
    pub fn new(n:usize, edges:&[(VertexId,VertexId)]) -> Self {
        let mut adj_matrix = vec![BitSet::with_capacity(n) ; n];
        for (a,b) in edges {
            assert!(*a < n && *b < n, "edge ({},{}) out of range (n={})", a, b, n);
            if a == b { continue; } // self-loop
            adj_matrix[*a].insert(*b);
            adj_matrix[*b].insert(*a);
        }
        let adj_list:Vec<Vec<VertexId>> = adj_matrix.iter()
            .map(|neighbors| neighbors.iter().collect())
            .collect();
        let edges = Self::build_edges(&adj_list);
        Self { n, edges, adj_list, adj_matrix }
    }

    /// complete graph on n vertices
    pub fn complete(n:usize) -> Self {
        let mut edges = Vec::with_capacity(n*n.saturating_sub(1)/2);
        for a in 0..n {
            for b in a+1..n {
                edges.push((a,b));
            }
        }
        Self::new(n, &edges)
    }

    /// random graph G(n,p): each edge exists with probability p
    pub fn random<R:Rng>(n:usize, p:f64, rng:&mut R) -> Self {
        let mut edges = Vec::new();
        for a in 0..n {
            for b in a+1..n {
                if rng.gen_bool(p) {
                    edges.push((a,b));
                }
            }
        }
        Self::new(n, &edges)
    }

    /// creates a graph from a DIMACS file
    pub fn from_file<P:AsRef<Path>>(filename:P) -> Result<Self, DimacsError> {
        let (n, edges) = read_from_file(filename)?;
        Ok(Self::new(n, &edges))
    }

    /// builds the edge list (each edge once, smallest endpoint first)
    fn build_edges(adj_list:&[Vec<VertexId>]) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        for (i,l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i,*j));
                }
            }
        }
        res
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// iterator over the vertices
    pub fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.n }

    /// edge list (u < v)
    pub fn edges(&self) -> &[(VertexId, VertexId)] { &self.edges }

    /// neighbors of u as a bitset
    pub fn neighbors(&self, u:VertexId) -> &BitSet { &self.adj_matrix[u] }

    /// neighbors of u as a sorted list
    pub fn adj(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// degree of u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// returns if a and b are adjacent (O(1))
    pub fn are_adjacent(&self, a:VertexId, b:VertexId) -> bool {
        self.adj_matrix[a].contains(b)
    }

    /// edge density (m / (n(n-1)/2))
    pub fn density(&self) -> f64 {
        if self.n < 2 { return 0.; }
        2. * self.nb_edges() as f64 / (self.n * (self.n-1)) as f64
    }

    /// print statistics of the graph
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        println!("\t{:.3} \t density", self.density());
        let degrees:Vec<usize> = self.vertices().map(|i| self.degree(i)).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            println!("\t{} \t min degree", min);
            println!("\t{} \t max degree", max);
        }
    }
}
