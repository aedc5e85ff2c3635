use anyhow::{anyhow, Result};
use boundary_graph::application::summarize;
use boundary_graph::domain::BoundaryGraph;
use boundary_graph::infrastructure::load_graph;
use clap::Parser;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Render a boundary graph JSON to a PNG preview")]
struct Args {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long, default_value = "graph.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 800)]
    height: u32,
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
    let graph = load_graph(&args.input)?;
    println!("Loaded {}", summarize(&graph));

    draw_graph(&graph, &args.output, (args.width, args.height))?;
    println!("Preview saved to: {:?}", args.output);
    Ok(())
}

fn draw_graph(graph: &BoundaryGraph, output_path: &Path, size: (u32, u32)) -> Result<()> {
    let bounds = graph.bounds().ok_or_else(|| anyhow!("graph has no nodes to draw"))?;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    // Degenerate extents still need a non-empty axis range
    let padding = ((bounds.max_x - bounds.min_x).max(bounds.max_y - bounds.min_y) * 0.05).max(1.0);
    let mut chart = ChartBuilder::on(&root)
        .caption("Boundary Graph", ("sans-serif", 30))
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(
            (bounds.min_x - padding)..(bounds.max_x + padding),
            (bounds.min_y - padding)..(bounds.max_y + padding),
        )?;

    chart.configure_mesh().draw()?;

    let nodes: Vec<(f64, f64)> = graph.nodes().map(|p| (p.x, p.y)).collect();
    for (s, t) in graph.edges() {
        chart.draw_series(LineSeries::new(vec![nodes[s], nodes[t]], &BLUE.mix(0.6)))?;
    }

    chart.draw_series(PointSeries::of_element(
        nodes.iter().cloned(),
        2,
        RED,
        &|c, s, st| EmptyElement::at(c) + Circle::new((0, 0), s, st.filled()),
    ))?;

    root.present()?;
    Ok(())
}
