use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use premolecule2community::community::{CommunityPartitioner, LabelPropagation, Louvain};
use premolecule2community::{parse, project};

#[derive(Parser, Debug)]
#[command(name = "premolecule2community", version)]
#[command(about = "Assign community labels to linked reads by partitioning a premolecule similarity graph")]
#[command(long_about = "\
Builds a weighted graph from a premolecule edge list (edge weight = 1/distance), \
partitions it into communities by modularity optimization, and prints one \
'barcode<TAB>read<TAB>community' line per read whose premolecule is in the graph. \
Reads of premolecules absent from the edge list are excluded by design. \
Both inputs may be gzip/bzip2/xz compressed.")]
struct Args {
    /// Edge list CSV with a 'Source,Target,Weight' header; Weight is a distance
    graph: PathBuf,

    /// Headerless CSV of 'read_id,premolecule_id' assignments
    assignments: PathBuf,

    /// Partitioning algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Louvain)]
    algorithm: Algorithm,

    /// Modularity resolution; higher values produce smaller communities
    #[arg(short, long, default_value_t = 1.0)]
    resolution: f64,

    /// Random seed for label propagation
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Louvain,
    LabelPropagation,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    run(&args, &mut out)?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn run<W: Write>(args: &Args, out: W) -> Result<()> {
    let start = Instant::now();

    let graph = parse::similarity_graph_from_path(&args.graph)
        .with_context(|| format!("failed to read edge list '{}'", args.graph.display()))?;
    info!(
        "similarity graph: {} premolecules, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let index = parse::read_index_from_path(&args.assignments)
        .with_context(|| format!("failed to read assignment table '{}'", args.assignments.display()))?;
    info!(
        "read index: {} reads across {} premolecules",
        index.read_count(),
        index.premolecule_count()
    );

    let partition = match args.algorithm {
        Algorithm::Louvain => Louvain::new()
            .with_resolution(args.resolution)
            .partition(graph.inner()),
        Algorithm::LabelPropagation => {
            let mut label_prop = LabelPropagation::new();
            if let Some(seed) = args.seed {
                label_prop = label_prop.with_seed(seed);
            }
            label_prop.partition(graph.inner())
        }
    }?;
    info!("partitioned into {} communities", project::community_count(&partition));

    let rows = project::assignments(&graph, &partition, &index)?;
    project::write_tsv(&rows, out)?;
    info!(
        "wrote {} read assignments in {:.2}s",
        rows.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
