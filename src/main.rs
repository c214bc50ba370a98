//! Pentad Plot CLI
//!
//! Usage:
//!   pentad-plot [OPTIONS] <AVERAGE_COMPARTMENT_PATH>
//!
//! Options:
//!   --vmin <FLOAT>          Lower bound of the log color scale [default: 0.5]
//!   --vmax <FLOAT>          Upper bound of the log color scale [default: 2]
//!   --cmap <NAME>           Colormap name, `_r` reverses it [default: coolwarm]
//!   --title <TEXT>          Figure title
//!   --closed                Drop the last distance interval (dist only)
//!   --out_pref <PREFIX>     Output path without extension [default: pentad]
//!   --format <FORMAT>       png or svg [default: png]
//!   --colormaps <FILE>      Extra colormaps (TOML format)
//!   --dpi <FLOAT>           Pixels per inch [default: 100]
//!   -v, --verbose           Verbosity (-v, -vv, -vvv)
//!   -h, --help              Print help

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use pentad_plot::{run, Backend, LayoutConfig, Palette, RenderConfig, RenderError};

#[derive(Parser)]
#[command(name = "pentad-plot")]
#[command(version)]
#[command(about = "Render averaged compartment contacts as heatmap grids")]
struct Cli {
    /// JSON file with averaged compartment matrices
    average_compartment_path: PathBuf,

    /// Lower bound of the log color scale
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    vmin: f64,

    /// Upper bound of the log color scale
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    vmax: f64,

    /// Colormap name
    #[arg(long, default_value = "coolwarm")]
    cmap: String,

    /// Figure title
    #[arg(long, default_value = "")]
    title: String,

    /// Drop the last distance interval of dist documents
    #[arg(long)]
    closed: bool,

    /// Output path without extension
    #[arg(long = "out_pref", visible_alias = "out-pref", default_value = "pentad")]
    out_pref: String,

    /// Output format (png or svg)
    #[arg(long, default_value = "png")]
    format: String,

    /// Extra colormaps (TOML format), merged over the built-in ones
    #[arg(long)]
    colormaps: Option<PathBuf>,

    /// Pixels per inch
    #[arg(long, default_value_t = 100.0)]
    dpi: f64,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let backend = Backend::init();

    match execute(&cli, &backend) {
        Ok(_) => {
            println!("Visualization created!");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: &Cli, backend: &Backend) -> Result<PathBuf, RenderError> {
    let palette = match &cli.colormaps {
        Some(path) => Palette::default().merge(Palette::from_file(path)?),
        None => Palette::default(),
    };

    let config = RenderConfig::new()
        .with_range(cli.vmin, cli.vmax)
        .with_cmap(&cli.cmap)
        .with_title(&cli.title)
        .with_closed(cli.closed)
        .with_out_pref(&cli.out_pref)
        .with_format(&cli.format)
        .with_layout(LayoutConfig::default().with_dpi(cli.dpi))
        .with_palette(palette);

    run(&cli.average_compartment_path, &config, backend)
}
