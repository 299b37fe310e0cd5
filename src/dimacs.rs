use std::fs;
use std::path::Path;

use nom::IResult;
use nom::bytes::complete::tag;
use nom::character::complete::{alphanumeric1, digit1, space0, space1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{preceded, separated_pair, terminated, tuple};
use thiserror::Error;

use crate::clique::VertexId;


/** errors raised while reading a DIMACS graph */
#[derive(Debug, Error)]
pub enum DimacsError {
    /// the file cannot be read
    #[error("unable to read {path}: {source}")]
    Io {
        /// file name
        path: String,
        /// underlying error
        source: std::io::Error,
    },
    /// a line is neither a comment, a problem line or an edge
    #[error("line {line}: unable to parse '{content}'")]
    MalformedLine {
        /// line number (starting at 1)
        line: usize,
        /// content of the line
        content: String,
    },
    /// the problem line declares more vertices than a graph can hold
    #[error("line {line}: {n} vertices declared, at most {max} are supported")]
    TooManyVertices {
        /// line number
        line: usize,
        /// number of vertices declared
        n: usize,
        /// largest number of vertices accepted
        max: usize,
    },
    /// no problem line ('p edge n m')
    #[error("missing problem line ('p edge <nb vertices> <nb edges>')")]
    MissingHeader,
    /// a second problem line
    #[error("line {line}: problem line already given")]
    DuplicateHeader {
        /// line number
        line: usize,
    },
    /// an edge appears before the problem line
    #[error("line {line}: edge given before the problem line")]
    EdgeBeforeHeader {
        /// line number
        line: usize,
    },
    /// an edge endpoint is not in [1,n]
    #[error("line {line}: vertex {vertex} out of range [1,{n}]")]
    VertexOutOfRange {
        /// line number
        line: usize,
        /// vertex id (as written in the file)
        vertex: usize,
        /// number of vertices declared
        n: usize,
    },
}


/// largest number of vertices accepted (the adjacency matrix holds n² bits)
pub const MAX_VERTICES:usize = 1 << 16;

/// reads a number
fn read_number(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    separated_pair(read_number, space1, read_number)(s)
}

/// reads header containing (n,m). The format word is not checked ("edge", "col", "clq"...)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alphanumeric1, space1)),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(tuple((tag("e"), space1)), read_two_integers)(s)
}

/// parses a whole line with `parser` (trailing spaces allowed)
fn parse_line<'a, O>(line:&'a str, parser:fn(&'a str) -> IResult<&'a str, O>) -> Option<O> {
    all_consuming(terminated(parser, space0))(line).ok().map(|(_,res)| res)
}


/**
parses a DIMACS graph, returns (n, edges) with 0-based vertex ids.
comments ('c') and blank lines are skipped. Self-loops and duplicate edges are kept
(the graph constructor drops them).
*/
pub fn parse_dimacs(content:&str) -> Result<(usize, Vec<(VertexId,VertexId)>), DimacsError> {
    let mut header:Option<(usize,usize)> = None;
    let mut edges = Vec::new();
    for (i,raw) in content.lines().enumerate() {
        let line_nb = i+1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') { continue; }
        if let Some((n,m)) = parse_line(line, read_header) {
            if header.is_some() { return Err(DimacsError::DuplicateHeader { line: line_nb }); }
            if n > MAX_VERTICES {
                return Err(DimacsError::TooManyVertices { line: line_nb, n, max: MAX_VERTICES });
            }
            header = Some((n,m));
            edges.reserve(m.min(n.saturating_mul(n)));
        } else if let Some((a,b)) = parse_line(line, read_edge) {
            let n = match header {
                None => return Err(DimacsError::EdgeBeforeHeader { line: line_nb }),
                Some((n,_)) => n,
            };
            for v in [a,b] {
                if v == 0 || v > n {
                    return Err(DimacsError::VertexOutOfRange { line: line_nb, vertex: v, n });
                }
            }
            edges.push((a-1, b-1));
        } else {
            return Err(DimacsError::MalformedLine { line: line_nb, content: line.to_string() });
        }
    }
    match header {
        None => Err(DimacsError::MissingHeader),
        Some((n,m)) => {
            if edges.len() != m && 2*edges.len() != m {
                println!("warning: {} edges read, {} declared", edges.len(), m);
            }
            Ok((n, edges))
        }
    }
}

/// reads an instance from file, returns (n, edges)
pub fn read_from_file<P:AsRef<Path>>(filename:P) -> Result<(usize, Vec<(VertexId,VertexId)>), DimacsError> {
    let content = fs::read_to_string(filename.as_ref()).map_err(|source| DimacsError::Io {
        path: filename.as_ref().display().to_string(),
        source,
    })?;
    parse_dimacs(&content)
}
