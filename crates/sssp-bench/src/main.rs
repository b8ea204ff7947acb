use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use graph_rs::{
    GraphError,
    algorithms::{bellman_ford::BellmanFord, dijkstra::Dijkstra},
    input::GraphText,
};
use log::{error, info, warn};
use sssp_bench::{
    Error, Result,
    config::{self, BenchConfig},
    diagram::{self, render_diagram},
    export::PathFile,
    harness,
    report::{ChartData, ChartOutput, default_renderer, summary::Report},
    timing,
    units::{Mode, TimeUnit, TimingTable, resolve_unit},
};

#[derive(Parser)]
#[command(version, about = "Compare Dijkstra and Bellman-Ford running times")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart timings read from a csv file.
    Compare {
        /// Timing table. Defaults to 'data/benchmark.csv'.
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        #[command(flatten)]
        chart: ChartArgs,
    },

    /// Time both engines on graph files and chart the result.
    Bench {
        /// Graph files in the order they are charted.
        #[arg(conflicts_with = "graph_dir")]
        graphs: Vec<PathBuf>,

        /// Read '<DIR>/<PREFIX>1.txt' ... '<DIR>/<PREFIX><COUNT>.txt'.
        #[arg(long, value_name = "DIR", requires = "graph_count")]
        graph_dir: Option<PathBuf>,

        #[arg(long, value_name = "PREFIX", default_value = config::DEFAULT_GRAPH_PREFIX)]
        graph_prefix: String,

        #[arg(long, value_name = "COUNT", requires = "graph_dir")]
        graph_count: Option<usize>,

        #[command(flatten)]
        run: RunArgs,

        /// Calls per engine and graph.
        #[arg(long, default_value_t = i64::from(config::DEFAULT_REPETITIONS), allow_negative_numbers = true)]
        repeat: i64,

        /// Also write the converted timings as csv.
        #[arg(long, value_name = "FILE")]
        write_csv: Option<PathBuf>,

        /// Write a json report with operation estimates.
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        #[command(flatten)]
        chart: ChartArgs,
    },

    /// Compute one shortest path and write it as a path file.
    Path {
        graph: PathBuf,

        /// Target vertex, 1-based.
        #[arg(long)]
        target: usize,

        #[command(flatten)]
        run: RunArgs,

        #[arg(long, value_enum, default_value_t = Algorithm::Dijkstra)]
        algorithm: Algorithm,

        /// Defaults to 'data/temp.txt'.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Draw a path file.
    Diagram {
        /// Defaults to 'data/temp.txt'.
        file: Option<PathBuf>,

        #[arg(long, default_value = config::DEFAULT_DIAGRAM_TITLE)]
        title: String,

        /// Image file: svg, or png/jpg/bmp in builds with the `ttf` feature.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Do not render when no --out is given.
        #[arg(long)]
        no_show: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Start vertex, 1-based. Clamped into the vertex range.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    start_vertex: i64,

    /// Insert every edge in both directions.
    #[arg(long)]
    undirected: bool,
}

#[derive(Args)]
struct ChartArgs {
    /// Time unit: s, ms, us or ns.
    #[arg(long)]
    unit: Option<TimeUnit>,

    /// Multiply every value after unit conversion.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[arg(long)]
    title: Option<String>,

    /// Replace the labels with '<PREFIX>1', '<PREFIX>2', ...
    #[arg(long, value_name = "PREFIX")]
    label_prefix: Option<String>,

    /// Image file: svg, or png/jpg/bmp in builds with the `ttf` feature.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Do not render when no --out is given.
    #[arg(long)]
    no_show: bool,
}

impl ChartArgs {
    fn output(&self) -> ChartOutput {
        ChartOutput {
            out: self.out.clone(),
            show: !self.no_show,
            ..Default::default()
        }
    }

    fn adjust(&self, table: &mut TimingTable) {
        table.scale(self.scale);
        if let Some(prefix) = &self.label_prefix {
            table.relabel(prefix);
        }
    }

    fn render(&self, table: &TimingTable) -> Result<()> {
        let title = self.title.as_deref().unwrap_or(config::DEFAULT_TITLE);
        let data = ChartData::from_table(table, title);
        default_renderer().render(&data, &self.output())?;
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Dijkstra,
    BellmanFord,
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(cli.command) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Compare { csv, chart } => {
            let csv_file = csv.unwrap_or_else(|| PathBuf::from(config::DEFAULT_CSV));
            info!("Reading timings from {}", csv_file.display());

            let csv = timing::read_timings(&csv_file)?;
            let unit = resolve_unit(chart.unit, csv.inferred_unit, Mode::Csv);
            let mut table = csv.into_table(unit);
            info!("{} rows in {unit}", table.len());

            chart.adjust(&mut table);
            chart.render(&table)
        }
        Commands::Bench {
            graphs,
            graph_dir,
            graph_prefix,
            graph_count,
            run,
            repeat,
            write_csv,
            report,
            chart,
        } => {
            let graphs = match graph_dir {
                Some(dir) => config::graph_paths(dir, &graph_prefix, graph_count.unwrap_or(0)),
                None => graphs,
            };
            let config = BenchConfig {
                start_vertex: run.start_vertex,
                repetitions: repeat,
                undirected: run.undirected,
            };

            let records = harness::benchmark_graphs(&graphs, &config)?;

            let unit = resolve_unit(chart.unit, None, Mode::Benchmark);
            let mut table = TimingTable::from_records(&records, unit);
            chart.adjust(&mut table);

            if let Some(csv_file) = write_csv {
                timing::write_timings(&csv_file, &table)?;
                info!("Timings written to {}", csv_file.display());
            }

            let summary = Report::new(&records, unit, config.repetitions());
            println!("{}", summary.table());
            if let Some(report_file) = report {
                summary.write_json(&report_file)?;
                info!("Report written to {}", report_file.display());
            }

            chart.render(&table)
        }
        Commands::Path {
            graph: graph_file,
            target,
            run,
            algorithm,
            out,
        } => {
            let config = BenchConfig {
                start_vertex: run.start_vertex,
                undirected: run.undirected,
                ..Default::default()
            };
            harness::ensure_exists(&[&graph_file])?;
            let graph = GraphText::read(&graph_file, config.load_options()).map_err(|source| {
                Error::Graph {
                    path: graph_file.clone(),
                    source,
                }
            })?;

            let node_count = graph.node_count();
            let target = target
                .checked_sub(1)
                .filter(|t| *t < node_count)
                .ok_or(GraphError::NodeNotFound(target))?;
            let start = config.start_index(node_count);

            let algorithm = if algorithm == Algorithm::Dijkstra && graph.edges.has_negative_weight()
            {
                warn!("negative edge weight, using bellman-ford instead of dijkstra");
                Algorithm::BellmanFord
            } else {
                algorithm
            };

            let paths = match algorithm {
                Algorithm::Dijkstra => {
                    let (adjacency, _) = graph.clone().into_graph();
                    adjacency.try_dijkstra(start)?
                }
                Algorithm::BellmanFord => {
                    let paths = graph.edges.try_bellman_ford(start)?;
                    if graph.edges.negative_cycle_edge(&paths).is_some() {
                        warn!("negative cycle reachable from the start vertex, route may be wrong");
                    }
                    paths
                }
            };

            let file = PathFile::from_shortest_path(&graph, &paths, target);
            match paths.path(target) {
                Some(path) => {
                    let route: Vec<&str> = path.nodes().map(|v| graph.labels[v].as_str()).collect();
                    println!("{} (cost {})", route.join(" -> "), path.cost());
                }
                None if paths.is_reachable(target) => println!(
                    "no simple route to {}, the predecessors form a negative cycle",
                    graph.labels[target]
                ),
                None => println!(
                    "{} is unreachable from {}",
                    graph.labels[target], graph.labels[start]
                ),
            }

            file.write(&out.unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH_FILE)))
        }
        Commands::Diagram {
            file,
            title,
            out,
            no_show,
        } => {
            let file = file.unwrap_or_else(|| PathBuf::from(config::DEFAULT_PATH_FILE));
            let path_file = PathFile::read(&file)?;

            let output = ChartOutput {
                out,
                show: !no_show,
                width: Some(diagram::DIAGRAM_SIZE.0),
                height: diagram::DIAGRAM_SIZE.1,
            };
            render_diagram(&path_file, &title, &output)?;
            Ok(())
        }
    }
}
