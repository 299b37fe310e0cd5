use std::process;

use clap::{App, ArgMatches, load_yaml};

use dogs_clique::clique::{checker, CheckerResult, CliqueSolution};
use dogs_clique::stopping::{NeverStoppingCriterion, TimeStoppingCriterion};
use dogs_clique::util::{CliError, export_results, read_instance, read_params, solution_stats, solve_with_params};


/** solves a maximum clique instance using a branch and bound */
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("clique_bnb.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> Result<(), CliError> {
    let params = read_params(main_args)?;
    let graph = read_instance(&params)?;
    // solve it
    let solution:CliqueSolution = match params.time_limit {
        Some(t) => solve_with_params(&graph, &params, TimeStoppingCriterion::new(t)),
        None => solve_with_params(&graph, &params, NeverStoppingCriterion::default()),
    };
    println!("=======================");
    match checker(&graph, &solution.vertices) {
        CheckerResult::Ok(size) => println!("clique size: {}", size),
        checker_result => println!("invalid clique (reason: {:?})", checker_result),
    }
    let vertices:Vec<String> = solution.dimacs_vertices().iter().map(|v| v.to_string()).collect();
    println!("vertices: {}", vertices.join(" "));
    println!("status: {}", solution.status.as_str());
    println!("nodes: {} \t pruned: {}", solution.nb_nodes, solution.nb_pruned);
    println!("time: {:.3} seconds", solution.time_searched);
    // export results
    let stats = solution_stats(&params, &solution);
    export_results(
        &graph,
        &solution,
        &stats,
        params.perf_file.as_deref(),
        params.sol_file.as_deref(),
    )
}
