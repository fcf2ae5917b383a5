use std::path::PathBuf;
use std::process::ExitCode;

use anstream::eprintln;
use anstream::println;
use clap::Parser;
use owo_colors::OwoColorize;
use size::Size;
use thiserror::Error;
use thousands::Separable;
use tqdm::tqdm;
use tracing_subscriber::EnvFilter;

use route_search::algorithms::Algorithm;
use route_search::algorithms::SearchConfig;
use route_search::algorithms::dijkstra::shortest_path_cost;
use route_search::algorithms::search;
use route_search::benchmark::BenchmarkRow;
use route_search::benchmark::benchmark_algorithm;
use route_search::benchmark::sort_by_runtime;
use route_search::error::BenchmarkError;
use route_search::error::LoadError;
use route_search::error::SearchError;
use route_search::graph::Graph;
use route_search::graph::NodeId;
use route_search::graph::WeightedGraph;
use route_search::heuristic::EuclideanHeuristic;
use route_search::instrument::SearchResult;
use route_search::loader::load_graph;
use route_search::profiling::PeakAlloc;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: PeakAlloc<dhat::Alloc> = PeakAlloc::new(dhat::Alloc);
#[cfg(all(not(feature = "mem_profile"), not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: PeakAlloc<tikv_jemallocator::Jemalloc> =
    PeakAlloc::new(tikv_jemallocator::Jemalloc);
#[cfg(all(not(feature = "mem_profile"), target_env = "msvc"))]
#[global_allocator]
static GLOBAL: PeakAlloc<std::alloc::System> = PeakAlloc::new(std::alloc::System);

/// Finds routes between towns and compares uninformed and informed searches.
#[derive(Parser, Debug)]
#[clap(long_version = route_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Adjacency list, one `A B` pair per line.
    #[arg(long, env = "ROUTE_ADJACENCY", default_value = "data/Adjacencies.txt")]
    pub adjacency: PathBuf,
    /// Coordinates CSV with a name, latitude and longitude column.
    #[arg(long, env = "ROUTE_COORDINATES", default_value = "data/coordinates.csv")]
    pub coordinates: PathBuf,

    #[arg(short, long, required_unless_present = "list_nodes")]
    pub start: Option<String>,
    #[arg(short, long, required_unless_present = "list_nodes")]
    pub goal: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Algorithm::AStar)]
    pub algorithm: Algorithm,
    /// Deepest limit tried by IDDFS.
    #[arg(long, default_value_t = route_search::algorithms::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Runs every algorithm and prints a comparison table.
    #[arg(long)]
    pub benchmark: bool,
    #[arg(long, default_value_t = 5usize)]
    pub repeats: usize,

    /// Prints the towns in the graph and exits.
    #[arg(long)]
    pub list_nodes: bool,
    /// Prints results as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Benchmark(#[from] BenchmarkError),
    #[error("Failed writing JSON. {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing --{0}.")]
    MissingArgument(&'static str),
}

fn main() -> ExitCode {
    #[cfg(feature = "mem_profile")]
    let _profiler = dhat::Profiler::new_heap();

    let args = Args::parse();
    args.color.write_global();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let graph = load_graph(&args.adjacency, &args.coordinates)?;

    if args.list_nodes {
        list_nodes(&graph);
        return Ok(());
    }

    let start = NodeId::from(args.start.as_deref().ok_or(CliError::MissingArgument("start"))?);
    let goal = NodeId::from(args.goal.as_deref().ok_or(CliError::MissingArgument("goal"))?);
    let heuristic = EuclideanHeuristic::new(&graph, &goal);
    let config = SearchConfig {
        max_depth: args.max_depth,
    };

    if args.benchmark {
        let mut rows = Vec::with_capacity(Algorithm::ALL.len());
        let desc = format!("Benchmarking {start} -> {goal} ({} runs each)", args.repeats);
        for algorithm in tqdm(Algorithm::ALL.into_iter()).desc(Some(desc)) {
            rows.push(benchmark_algorithm(
                algorithm,
                &graph,
                &start,
                &goal,
                &heuristic,
                &config,
                args.repeats,
            )?);
        }
        sort_by_runtime(&mut rows);
        let optimal = shortest_path_cost(&graph, &start, &goal)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            print_table(&rows);
            match optimal {
                Some(cost) => {
                    println!("Optimal cost (Dijkstra): {}", format!("{cost:.4}").green());
                }
                None => println!("Optimal cost (Dijkstra): {}", "unreachable".red()),
            }
        }
        return Ok(());
    }

    let result = search(args.algorithm, &graph, &start, &goal, &heuristic, &config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(args.algorithm, &result);
    }
    Ok(())
}

fn list_nodes(graph: &Graph) {
    let mut nodes: Vec<&NodeId> = graph.nodes().collect();
    nodes.sort();
    println!(
        "{} towns, {} roads",
        graph.node_count().separate_with_commas(),
        graph.edge_count().separate_with_commas()
    );
    for node in nodes {
        match graph.position(node) {
            Some(p) => println!("  {node} {}", p.dimmed()),
            None => println!("  {node}"),
        }
    }
}

fn print_result(algorithm: Algorithm, result: &SearchResult<NodeId>) {
    println!("Algorithm: {}", algorithm.yellow());
    if result.found() {
        let route: Vec<&str> = result.path.iter().map(NodeId::as_str).collect();
        println!("Path: {}", route.join(" -> ").green());
    } else {
        println!("Path: {}", "NO SOLUTION".red());
    }

    let metrics = &result.metrics;
    for (key, value) in metrics.iter() {
        println!("  {key}: {value}");
    }
    if let Some(runtime) = metrics.runtime_sec() {
        let runtime = std::time::Duration::from_secs_f64(runtime);
        println!("  Runtime: {}", human_duration::human_duration(&runtime));
    }
    if let Some(peak) = metrics.peak_memory_bytes() {
        println!("  Peak memory: {}", Size::from_bytes(peak));
    }
    if let Some(expanded) = metrics.nodes_expanded() {
        println!("  Expanded: {} nodes", expanded.separate_with_commas());
    }
}

fn print_table(rows: &[BenchmarkRow]) {
    println!(
        "{:<16} {:>14} {:>14} {:>14} {:>12} {:>12} {:>8}",
        "algorithm".bold(),
        "runtime".bold(),
        "std".bold(),
        "peak memory".bold(),
        "expanded".bold(),
        "cost".bold(),
        "depth".bold(),
    );
    for row in rows {
        let runtime = std::time::Duration::from_secs_f64(row.runtime_mean_sec);
        let std = std::time::Duration::from_secs_f64(row.runtime_std_sec);
        println!(
            "{:<16} {:>14} {:>14} {:>14} {:>12} {:>12.4} {:>8.1}",
            row.algorithm.to_string(),
            human_duration::human_duration(&runtime),
            human_duration::human_duration(&std),
            Size::from_bytes(row.peak_memory_mean_bytes as u64).to_string(),
            (row.nodes_expanded_mean.round() as u64).separate_with_commas(),
            row.path_cost_mean,
            row.solution_depth_mean,
        );
    }
}
