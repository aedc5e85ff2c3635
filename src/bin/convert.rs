use anyhow::{Context, Result};
use boundary_graph::application::{convert_file, summarize, ConvertOptions, GraphSummary};
use boundary_graph::domain::{MergePolicy, Projection};
use boundary_graph::infrastructure::save_graph;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Convert coordinate polylines into a node/edge graph JSON")]
struct Args {
    #[arg(
        short,
        long,
        default_value = "Germany.geojson",
        help = "One lon,lat,lon,lat,... chain per line"
    )]
    input: PathBuf,
    #[arg(short, long, default_value = "Germany.json")]
    output: PathBuf,
    #[arg(
        long,
        default_value_t = Projection::DEFAULT_ORIGIN_LON,
        value_parser = finite,
        allow_negative_numbers = true
    )]
    origin_lon: f64,
    #[arg(
        long,
        default_value_t = Projection::DEFAULT_ORIGIN_LAT,
        value_parser = finite,
        allow_negative_numbers = true
    )]
    origin_lat: f64,
    #[arg(
        long,
        default_value_t = Projection::DEFAULT_SCALE,
        value_parser = finite,
        allow_negative_numbers = true
    )]
    scale: f64,
    #[arg(
        long,
        value_parser = positive,
        help = "Merge points closer than this (projected units) instead of exact matches"
    )]
    merge_radius: Option<f64>,
}

impl Args {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            projection: Projection::new(self.origin_lon, self.origin_lat, self.scale),
            merge: self.merge_radius.map_or(MergePolicy::Exact, MergePolicy::Tolerance),
        }
    }
}

fn finite(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("`{}` is not a finite number", s)),
    }
}

fn positive(s: &str) -> Result<f64, String> {
    match finite(s) {
        Ok(v) if v > 0.0 => Ok(v),
        _ => Err(format!("`{}` is not a positive number", s)),
    }
}

fn run(args: &Args) -> Result<GraphSummary> {
    let graph = convert_file(&args.input, &args.options())
        .with_context(|| format!("converting {:?}", args.input))?;
    save_graph(&graph, &args.output)?;
    Ok(summarize(&graph))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("boundary_graph=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let summary = run(&args)?;
    println!("{}", summary);
    println!("Graph saved to {:?}", args.output);
    Ok(())
}
