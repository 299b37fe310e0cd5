use std::fs;

use clap::ArgMatches;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    bound::BoundKind,
    clique::{CliqueSolution, checker, CheckerResult},
    dimacs::DimacsError,
    engine::solve,
    graph::Graph,
    parallel::parallel_solve,
    stopping::StoppingCriterion,
};


/** errors reported by the executables */
#[derive(Debug, Error)]
pub enum CliError {
    /// an argument has an invalid value
    #[error("invalid value '{value}' for '{name}': {reason}")]
    InvalidArgument {
        /// argument name
        name: &'static str,
        /// value given
        value: String,
        /// why it is invalid
        reason: String,
    },
    /// the instance cannot be read
    #[error(transparent)]
    Instance(#[from] DimacsError),
    /// a result file cannot be written
    #[error("unable to write {path}: {source}")]
    Export {
        /// file name
        path: String,
        /// underlying error
        source: std::io::Error,
    },
}


/** parameters read from the command line */
#[derive(Debug, Clone)]
pub struct Params {
    /// instance file (DIMACS)
    pub inst_filename: String,
    /// time limit in seconds (None: run to completion)
    pub time_limit: Option<f32>,
    /// bound used to prune the search
    pub bound: BoundKind,
    /// number of threads (1: sequential search, 0: one per core)
    pub nb_threads: usize,
    /// where to write the clique
    pub sol_file: Option<String>,
    /// where to write the statistics (json)
    pub perf_file: Option<String>,
    /// prints the progress of the search
    pub show_completion: bool,
}

impl Params {
    /// true if the root branches are spread over several threads
    pub fn is_parallel(&self) -> bool { self.nb_threads != 1 }
}

/** reads command line input */
pub fn read_params(main_args:&ArgMatches) -> Result<Params, CliError> {
    let inst_filename = main_args.value_of("instance").unwrap_or_default().to_string();
    let time_limit = match main_args.value_of("time") {
        None => None,
        Some(t) => {
            let t:f32 = t.parse().map_err(|e:std::num::ParseFloatError| CliError::InvalidArgument {
                name: "time", value: t.to_string(), reason: e.to_string()
            })?;
            if !t.is_finite() || t < 0. {
                return Err(CliError::InvalidArgument {
                    name: "time", value: t.to_string(), reason: "expected a non-negative number of seconds".to_string()
                });
            }
            Some(t)
        }
    };
    let bound_str = main_args.value_of("bound").unwrap_or("coloring");
    let bound:BoundKind = bound_str.parse().map_err(|reason| CliError::InvalidArgument {
        name: "bound", value: bound_str.to_string(), reason
    })?;
    let threads_str = main_args.value_of("threads").unwrap_or("1");
    let nb_threads:usize = threads_str.parse().map_err(|e:std::num::ParseIntError| CliError::InvalidArgument {
        name: "threads", value: threads_str.to_string(), reason: e.to_string()
    })?;
    // read value of the solution filename
    let sol_file: Option<String> = match main_args.value_of("solution") {
        None => None,
        Some(e) => {
            println!("printing solutions in: {}", e);
            Some(e.to_string())
        }
    };
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            println!("printing perfs in: {}\n", e);
            Some(e.to_string())
        }
    };
    Ok(Params {
        inst_filename,
        time_limit,
        bound,
        nb_threads,
        sol_file,
        perf_file,
        show_completion: !main_args.is_present("quiet"),
    })
}

/** reads the instance and displays its statistics */
pub fn read_instance(params:&Params) -> Result<Graph, CliError> {
    println!("reading instance: {}...", params.inst_filename);
    let graph = Graph::from_file(&params.inst_filename)?;
    graph.display_statistics();
    println!("=======================");
    Ok(graph)
}

/** runs the search selected by the parameters (parallel unless exactly one thread is asked) */
pub fn solve_with_params<Stopping:StoppingCriterion + Sync>(
    graph:&Graph, params:&Params, stopping:Stopping
) -> CliqueSolution {
    let bound = params.bound.strategy();
    if params.is_parallel() {
        parallel_solve(graph, &bound, &stopping, params.nb_threads, params.show_completion)
    } else {
        solve(graph, &bound, stopping, params.show_completion)
    }
}

/** statistics of a run (exported as json) */
pub fn solution_stats(params:&Params, solution:&CliqueSolution) -> Value {
    json!({
        "inst_name": params.inst_filename,
        "primal_list": vec![solution.size()],
        "clique": solution.dimacs_vertices(),
        "status": solution.status.as_str(),
        "time_searched": solution.time_searched,
        "nb_nodes": solution.nb_nodes,
        "nb_pruned": solution.nb_pruned,
        "bound": params.bound.strategy().name(),
        "nb_threads": params.nb_threads,
        "time_limit": params.time_limit,
    })
}

/** writes a string encoding the clique (DIMACS ids, one line) */
pub fn solution_to_string(solution:&CliqueSolution) -> String {
    let mut res = String::default();
    for v in solution.dimacs_vertices() {
        res += format!("{} ", v).as_str();
    }
    res += "\n";
    res
}

/// exports search results to files
pub fn export_results(
    graph:&Graph,
    solution:&CliqueSolution,
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<(), CliError> {
    // export statistics
    if let Some(filename) = perf_file {
        fs::write(filename, stats.to_string()).map_err(|source| CliError::Export {
            path: filename.to_string(), source
        })?;
    }
    // export solution
    if let Some(filename) = sol_file {
        match checker(graph, &solution.vertices) {
            CheckerResult::Ok(_) => {},
            checker_result => { println!("invalid solution (reason: {:?})", checker_result) }
        };
        fs::write(filename, solution_to_string(solution)).map_err(|source| CliError::Export {
            path: filename.to_string(), source
        })?;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    use clap::{App, Arg};

    use crate::clique::SearchStatus;
    use crate::stopping::NeverStoppingCriterion;

    fn app() -> App<'static, 'static> {
        App::new("test")
            .arg(Arg::with_name("instance").required(true).index(1))
            .arg(Arg::with_name("time").long("time").takes_value(true))
            .arg(Arg::with_name("bound").long("bound").takes_value(true))
            .arg(Arg::with_name("threads").long("threads").takes_value(true))
            .arg(Arg::with_name("solution").long("solution").takes_value(true))
            .arg(Arg::with_name("perf").long("perf").takes_value(true))
            .arg(Arg::with_name("quiet").long("quiet"))
    }

    fn solution() -> CliqueSolution {
        CliqueSolution {
            vertices: vec![0,1,2],
            status: SearchStatus::Optimal,
            nb_nodes: 4,
            nb_pruned: 2,
            time_searched: 0.1,
        }
    }

    #[test]
    fn test_read_params_defaults() {
        let matches = app().get_matches_from(vec!["test", "insts/johnson8-2-4.clq"]);
        let params = read_params(&matches).unwrap();
        assert_eq!(params.inst_filename, "insts/johnson8-2-4.clq");
        assert_eq!(params.time_limit, None);
        assert_eq!(params.bound, BoundKind::Coloring);
        assert_eq!(params.nb_threads, 1);
        assert!(params.show_completion);
        let graph = read_instance(&params).unwrap();
        assert_eq!(graph.nb_vertices(), 28);
    }

    #[test]
    fn test_read_params_values() {
        let matches = app().get_matches_from(vec![
            "test", "g.clq", "--time", "2.5", "--bound", "count", "--threads", "4", "--quiet"
        ]);
        let params = read_params(&matches).unwrap();
        assert_eq!(params.time_limit, Some(2.5));
        assert_eq!(params.bound, BoundKind::CandidateCount);
        assert_eq!(params.nb_threads, 4);
        assert!(!params.show_completion);
    }

    #[test]
    fn test_read_params_errors() {
        for args in [
            vec!["test", "g.clq", "--time", "soon"],
            vec!["test", "g.clq", "--time", "inf"],
            vec!["test", "g.clq", "--bound", "dsatur"],
            vec!["test", "g.clq", "--threads", "many"],
        ] {
            let matches = app().get_matches_from(args);
            assert!(matches!(read_params(&matches), Err(CliError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn test_thread_dispatch() {
        for (threads, parallel) in [("0", true), ("1", false), ("2", true)] {
            let matches = app().get_matches_from(vec![
                "test", "insts/johnson8-2-4.clq", "--threads", threads, "--quiet"
            ]);
            let params = read_params(&matches).unwrap();
            assert_eq!(params.is_parallel(), parallel);
            let graph = read_instance(&params).unwrap();
            let sol = solve_with_params(&graph, &params, NeverStoppingCriterion::default());
            assert_eq!(sol.size(), 4);
            assert!(sol.is_optimal());
            assert_eq!(checker(&graph, &sol.vertices), CheckerResult::Ok(4));
        }
    }

    #[test]
    fn test_missing_instance() {
        let matches = app().get_matches_from(vec!["test", "insts/missing.clq"]);
        let params = read_params(&matches).unwrap();
        assert!(matches!(read_instance(&params), Err(CliError::Instance(_))));
    }

    #[test]
    fn test_stats_and_export() {
        let matches = app().get_matches_from(vec!["test", "g.clq"]);
        let params = read_params(&matches).unwrap();
        let sol = solution();
        let stats = solution_stats(&params, &sol);
        assert_eq!(stats["primal_list"][0], 3);
        assert_eq!(stats["status"], "optimal");
        assert_eq!(stats["clique"], json!([1,2,3]));
        assert_eq!(solution_to_string(&sol), "1 2 3 \n");
        let dir = std::env::temp_dir();
        let perf = dir.join(format!("dogs_clique_perf_{}.json", std::process::id()));
        let sol_path = dir.join(format!("dogs_clique_sol_{}.txt", std::process::id()));
        let graph = Graph::complete(3);
        export_results(&graph, &sol, &stats, perf.to_str(), sol_path.to_str()).unwrap();
        let read_stats:Value = serde_json::from_str(&fs::read_to_string(&perf).unwrap()).unwrap();
        assert_eq!(read_stats, stats);
        assert_eq!(fs::read_to_string(&sol_path).unwrap(), "1 2 3 \n");
        fs::remove_file(perf).unwrap();
        fs::remove_file(sol_path).unwrap();
    }
}
