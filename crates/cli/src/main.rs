use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use repograph_analyzer::RepoAnalyzer;
use repograph_graph::Direction;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repograph", version, about = "Structural analysis of source repositories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a repository and print a summary (or the full report as JSON)
    Analyze {
        /// Repository root
        path: PathBuf,

        /// Emit the full analysis report as JSON
        #[arg(long)]
        json: bool,

        /// How many top-central chunks to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Traverse dependencies from a graph node
    Query {
        /// Repository root
        path: PathBuf,

        /// Node id (chunk id, `file:<path>` or `var:<name>:<path>`)
        node_id: String,

        #[arg(long, value_enum, default_value_t = DirectionArg::Both)]
        direction: DirectionArg,

        #[arg(long, default_value_t = 1)]
        depth: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Incoming,
    Outgoing,
    Both,
}

impl std::fmt::Display for DirectionArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Incoming => Direction::Incoming,
            DirectionArg::Outgoing => Direction::Outgoing,
            DirectionArg::Both => Direction::Both,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { path, json, top } => analyze(path, json, top).await,
        Command::Query {
            path,
            node_id,
            direction,
            depth,
        } => query(path, &node_id, direction.into(), depth).await,
    }
}

async fn analyze(path: PathBuf, json: bool, top: usize) -> Result<()> {
    let mut analyzer = RepoAnalyzer::new()?;
    let report = analyzer.analyze(&path).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}: {} files, {} chunks, {} nodes, {} edges",
        report.repo, report.total_files, report.total_chunks, report.graph.nodes, report.graph.edges
    );

    let ranked = report.top_central(top);
    if !ranked.is_empty() {
        println!("\nMost central chunks (by pagerank):");
        for (id, metrics) in ranked {
            let location = report
                .chunks
                .iter()
                .find(|c| c.id == id)
                .map(|c| {
                    let symbol = c.symbol.as_deref().unwrap_or("<anonymous>");
                    format!("{symbol} ({}:{})", c.path, c.start_line)
                })
                .unwrap_or_else(|| id.to_string());
            println!(
                "  {location}  pagerank={:.4} in={} out={}",
                metrics.pagerank, metrics.in_degree, metrics.out_degree
            );
        }
    }

    Ok(())
}

async fn query(path: PathBuf, node_id: &str, direction: Direction, depth: usize) -> Result<()> {
    let mut analyzer = RepoAnalyzer::new()?;
    analyzer.analyze(&path).await?;

    let triples = analyzer.graph().query_dependencies(node_id, direction, depth);
    if triples.is_empty() {
        println!("No dependencies found for {node_id}");
        return Ok(());
    }

    for triple in triples {
        println!(
            "{} -[{}]-> {}",
            triple.source,
            triple.relationship.as_str(),
            triple.target
        );
    }

    Ok(())
}
