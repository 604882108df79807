//! Graphlens CLI — command-line front end for graph analysis
//!
//! Loads a GraphML or node-link JSON file, selects a subgraph and prints
//! metrics, degree distributions or centrality rankings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use graphlens::centrality::CentralityMetric;
use graphlens::degree::{self, DegreeKind};
use graphlens::{
    centrality, export, metrics, select, AnalysisConfig, Analyzer, GraphStore, SelectionPolicy,
    Subgraph,
};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "graphlens", version, about = "Knowledge graph analysis CLI")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "GRAPHLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Selection policy: full, lwcc or kcore
    #[arg(long, global = true)]
    policy: Option<String>,

    /// k for the kcore policy
    #[arg(long, global = true, allow_negative_numbers = true)]
    k: Option<i64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum KindArg {
    Total,
    In,
    Out,
}

impl From<KindArg> for DegreeKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Total => DegreeKind::Total,
            KindArg::In => DegreeKind::In,
            KindArg::Out => DegreeKind::Out,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Structural metrics of the selected subgraph
    Metrics {
        /// Graph file (.graphml or .json)
        graph: PathBuf,
    },
    /// Degree distribution of the selected subgraph
    Degrees {
        graph: PathBuf,

        #[arg(long, default_value = "total")]
        kind: KindArg,
    },
    /// Top-k nodes per centrality metric
    Centrality {
        graph: PathBuf,

        /// Number of nodes per ranking
        #[arg(long, allow_negative_numbers = true)]
        top_k: Option<i64>,
    },
    /// Full analysis report
    Analyze { graph: PathBuf },
    /// Write the selected subgraph as node-link JSON
    Export {
        graph: PathBuf,

        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;

    match &cli.command {
        Commands::Metrics { graph } => run_metrics(&config, graph, cli.format),
        Commands::Degrees { graph, kind } => run_degrees(&config, graph, (*kind).into(), cli.format),
        Commands::Centrality { graph, top_k } => {
            let config = match top_k {
                Some(k) => config.with_top_k(*k),
                None => config,
            };
            run_centrality(&config, graph, cli.format)
        }
        Commands::Analyze { graph } => run_analyze(&config, graph, cli.format),
        Commands::Export { graph, output } => run_export(&config, graph, output),
    }
}

/// File values first, then command-line overrides
fn resolve_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_yaml_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(policy) = &cli.policy {
        config.selection.policy = policy.clone();
    }
    if let Some(k) = cli.k {
        config.selection.k = k;
    }
    // surface an invalid policy before any loading happens
    config.policy()?;
    Ok(config)
}

fn load_subgraph(config: &AnalysisConfig, path: &Path) -> Result<Subgraph> {
    let store = GraphStore::load(path)?;
    let policy: SelectionPolicy = config.policy()?;
    let subgraph = select(store.graph(), policy)
        .with_context(|| format!("selecting {} of {}", policy, path.display()))?;
    debug!("Selected {} nodes under {}", subgraph.node_count(), policy);
    Ok(subgraph)
}

fn empty_notice(subgraph: &Subgraph) {
    println!("(the {} is empty: no nodes selected)", subgraph.policy());
}

fn run_metrics(config: &AnalysisConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let subgraph = load_subgraph(config, path)?;
    let report = metrics::compute(subgraph.graph());

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if subgraph.is_empty() {
        empty_notice(&subgraph);
        return Ok(());
    }

    let rows = vec![
        vec!["nodes".to_string(), report.node_count.to_string()],
        vec!["edges".to_string(), report.edge_count.to_string()],
        vec!["density".to_string(), format_score(report.density)],
        vec!["assortativity".to_string(), format_optional(report.assortativity)],
        vec!["average clustering".to_string(), format_score(report.average_clustering)],
        vec![
            "strongly connected components".to_string(),
            report.strongly_connected_components.to_string(),
        ],
        vec![
            "weakly connected components".to_string(),
            report.weakly_connected_components.to_string(),
        ],
    ];
    print_rows(format, &["metric", "value"], rows);
    Ok(())
}

fn run_degrees(config: &AnalysisConfig, path: &Path, kind: DegreeKind, format: OutputFormat) -> Result<()> {
    let subgraph = load_subgraph(config, path)?;
    let profile = degree::DegreeProfile::compute(subgraph.graph(), kind);

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }
    if subgraph.is_empty() {
        empty_notice(&subgraph);
        return Ok(());
    }

    let rows = profile
        .histogram
        .iter()
        .map(|(d, count)| vec![d.to_string(), count.to_string()])
        .collect();
    let header = format!("{} degree", kind);
    print_rows(format, &[header.as_str(), "nodes"], rows);

    if let (OutputFormat::Table, Some(summary)) = (format, profile.summary) {
        println!("min {}, max {}, mean {:.3}", summary.min, summary.max, summary.mean);
    }
    Ok(())
}

fn run_centrality(config: &AnalysisConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let subgraph = load_subgraph(config, path)?;
    let report = centrality::rank(subgraph.graph(), config.top_k, config.eigenvector_config());

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if subgraph.is_empty() {
        empty_notice(&subgraph);
        return Ok(());
    }

    for metric in CentralityMetric::ALL {
        let ranked = report.ranking(metric);
        if let OutputFormat::Table = format {
            println!("Top {} by {} centrality", report.top_k, metric);
        }
        if ranked.is_empty() {
            println!("(undefined for this graph)");
            continue;
        }
        let rows = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| vec![(i + 1).to_string(), r.node.to_string(), format_score(r.score)])
            .collect();
        let header = metric.to_string();
        print_rows(format, &["rank", "node", header.as_str()], rows);
    }
    Ok(())
}

fn run_analyze(config: &AnalysisConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let store = GraphStore::load(path)?;
    let report = Analyzer::new(config.clone()).run(store.graph())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!("Selection: {}", report.policy);
            println!("Nodes:     {}", report.node_count);
            println!("Edges:     {}", report.edge_count);
            if report.empty {
                println!("(no nodes selected)");
            } else {
                println!("Density:   {}", format_score(report.metrics.density));
                println!("Top-k:     {}", report.centrality.top_k);
                println!("(use --format json for the full report)");
            }
        }
    }
    Ok(())
}

fn run_export(config: &AnalysisConfig, path: &Path, output: &Path) -> Result<()> {
    let subgraph = load_subgraph(config, path)?;
    export::write_node_link(subgraph.graph(), output)?;
    println!(
        "Wrote {} nodes and {} edges to {}",
        subgraph.node_count(),
        subgraph.edge_count(),
        output.display()
    );
    Ok(())
}

fn print_rows(format: OutputFormat, header: &[&str], rows: Vec<Vec<String>>) {
    match format {
        OutputFormat::Csv => {
            println!("{}", header.iter().map(|h| format_csv_cell(h)).collect::<Vec<_>>().join(","));
            for row in &rows {
                let cells: Vec<String> = row.iter().map(|c| format_csv_cell(c)).collect();
                println!("{}", cells.join(","));
            }
        }
        _ => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(header);
            let count = rows.len();
            for row in rows {
                table.add_row(row);
            }
            println!("{}", table);
            println!("{} row(s)", count);
        }
    }
}

fn format_score(v: f64) -> String {
    format!("{:.6}", v)
}

fn format_optional(v: Option<f64>) -> String {
    v.map(format_score).unwrap_or_else(|| "n/a".to_string())
}

fn format_csv_cell(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
