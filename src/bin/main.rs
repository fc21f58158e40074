use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use potential_flow_rs::airfoil::{generate_naca4_with, ChordSpacing, Naca4Options};
use potential_flow_rs::scene::Scene;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Evaluate a potential flow scene, or write out a NACA 4-digit airfoil outline
#[derive(Parser)]
#[command(name = "potential-flow", version, about, long_about = None)]
struct Cli {
    /// Scene description (JSON)
    #[arg(short, long, required_unless_present = "naca")]
    scene: Option<PathBuf>,

    /// Only generate the outline of this NACA 4-digit airfoil, e.g. 2412
    #[arg(long, conflicts_with = "scene")]
    naca: Option<String>,

    /// Points per airfoil side
    #[arg(short = 'n', long, default_value_t = 100)]
    points: usize,

    /// Cluster airfoil points toward the leading and trailing edges
    #[arg(long)]
    half_cosine: bool,

    /// Leave a finite-thickness trailing edge
    #[arg(long)]
    finite_te: bool,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); falls back to RUST_LOG
    #[arg(short, long)]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let level = level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| {
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|v| v.parse::<LevelFilter>().ok())
        })
        .unwrap_or(LevelFilter::Info);

    Builder::new()
        .filter_level(level)
        .target(Target::Stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    if let Some(designation) = &cli.naca {
        let options = Naca4Options {
            finite_trailing_edge: cli.finite_te,
            spacing: if cli.half_cosine {
                ChordSpacing::HalfCosine
            } else {
                ChordSpacing::Linear
            },
            ..Naca4Options::default()
        };
        let coords = generate_naca4_with(designation, cli.points, &options)?;
        for p in coords.points().iter() {
            writeln!(out, "{}, {}", p.x, p.y)?;
        }
    } else if let Some(path) = &cli.scene {
        log::info!("loading scene {}", path.display());
        let output = Scene::load(path)?.run()?;
        log::info!(
            "found {} stagnation nodes",
            output.stagnation.indices.len()
        );
        serde_json::to_writer(&mut out, &output)?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}
