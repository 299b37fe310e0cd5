//! DOGS implementation of the Maximum Clique problem (exact branch and bound)

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// clique solutions and checker
pub mod clique;

/// undirected graph (adjacency lists & bitset adjacency matrix)
pub mod graph;

/// initial vertex ordering and relabelled adjacency
pub mod order;

/// upper bounds (greedy coloring, candidate count)
pub mod bound;

/// stopping criteria (time limit, cancellation flag)
pub mod stopping;

/// branch and bound search
pub mod engine;

/// parallel search over the branches of the root
pub mod parallel;

/// read/write DIMACS formats
pub mod dimacs;

/// helper and utility methods for executables
pub mod util;
