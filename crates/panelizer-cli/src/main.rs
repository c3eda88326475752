use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use panelizer_core::{
    render_svg, FillRating, PanelReport, PanelSize, PanelizationRequest, PanelizationResult,
    Panelizer,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panelizer")]
#[command(about = "PCB Panelizer - Compute how many boards fit on each panel format", long_about = None)]
struct Cli {
    /// Log placement trials to stderr (filter with RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the best placement on every panel format
    Run(RunArgs),

    /// Generate SVG visualization from result
    Svg {
        /// Input result file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,

        /// Panel units per SVG unit
        #[arg(long, default_value_t = 2.0)]
        scale: f64,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Request file (YAML or JSON); flags below override its values
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for result (JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// PCB size as WIDTHxHEIGHT, e.g. 100x80
    #[arg(long, value_parser = parse_dimensions)]
    pcb: Option<(f64, f64)>,

    /// Gap between adjacent PCBs
    #[arg(long)]
    spacing: Option<f64>,

    /// Panel border margin
    #[arg(long)]
    border: Option<f64>,

    /// Keep every PCB upright
    #[arg(long)]
    no_rotation: bool,

    /// Number of PCBs to manufacture
    #[arg(short, long)]
    quantity: Option<u64>,

    /// Scrap percentage added to the quantity
    #[arg(long)]
    scrap: Option<f64>,

    /// Panel format as WIDTHxHEIGHT, repeat for up to four formats
    #[arg(long = "panel", value_parser = parse_dimensions)]
    panels: Vec<(f64, f64)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Run(args) => {
            run_command(args)?;
        }
        Commands::Svg {
            input,
            output,
            scale,
        } => {
            svg_command(input, output, scale)?;
        }
    }

    Ok(())
}

fn run_command(args: RunArgs) -> Result<()> {
    let request = build_request(&args)?;

    println!(
        "{} {} x {} PCB on {} panel formats",
        "🔍".bright_blue(),
        request.pcb_width.to_string().bright_white().bold(),
        request.pcb_height.to_string().bright_white().bold(),
        request.panel_sizes.len().to_string().bright_white().bold()
    );
    println!();

    let panelizer = Panelizer::new(request)?;
    let result = panelizer.run();

    println!("{}", "✅ Placement complete!".bright_green().bold());
    println!();
    print_summary(&result);
    println!();

    let json = serde_json::to_string_pretty(&result)?;
    if let Some(output_path) = args.output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

/// Loads the request file if given, then applies command-line overrides.
fn build_request(args: &RunArgs) -> Result<PanelizationRequest> {
    let mut request = match (&args.input, args.pcb) {
        (Some(path), _) => load_request(path)?,
        (None, Some((width, height))) => PanelizationRequest::new(width, height),
        (None, None) => bail!("either --input or --pcb must be provided"),
    };

    if let Some((width, height)) = args.pcb {
        request.pcb_width = width;
        request.pcb_height = height;
    }
    if let Some(spacing) = args.spacing {
        request.spacing = spacing;
    }
    if let Some(border) = args.border {
        request.border = border;
    }
    if args.no_rotation {
        request.allow_rotation = false;
    }
    if let Some(quantity) = args.quantity {
        request.quantity = quantity;
    }
    if let Some(scrap) = args.scrap {
        request.scrap_percentage = scrap;
    }
    if !args.panels.is_empty() {
        request.panel_sizes = args
            .panels
            .iter()
            .enumerate()
            .map(|(idx, &(width, height))| {
                PanelSize::new(format!("format_{}", idx + 1), width, height)
            })
            .collect();
    }

    Ok(request)
}

fn load_request(path: &Path) -> Result<PanelizationRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let request = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };

    Ok(request)
}

fn print_summary(result: &PanelizationResult) {
    println!("{}", "📊 Results:".bright_yellow().bold());
    println!(
        "  Required quantity (with scrap): {}",
        result.required_quantity.to_string().bright_white().bold()
    );
    println!();
    println!(
        "  {:<10} {:>13} {:>13} {:>8} {:>9} {:>8} {:>9}",
        "Panel", "Total", "Usable", "PCB", "Fill", "Panels", "Produced"
    );

    for report in &result.reports {
        println!(
            "  {:<10} {:>13} {:>13} {:>8} {} {:>8} {:>9}",
            report.panel_id,
            format!("{} x {}", report.outer_width, report.outer_height),
            format!("{} x {}", report.usable_width, report.usable_height),
            report.pcb_per_panel,
            colored_fill(report),
            report.panels_needed,
            report.produced_quantity
        );
    }
}

fn colored_fill(report: &PanelReport) -> ColoredString {
    let text = format!("{:>8.2}%", report.fill_percentage);
    match report.fill_rating {
        FillRating::Good => text.bright_green(),
        FillRating::Fair => text.bright_yellow(),
        FillRating::Poor => text.bright_red(),
    }
}

fn svg_command(input: PathBuf, output: PathBuf, scale: f64) -> Result<()> {
    println!("{}", "🔍 Loading result...".bright_blue());

    let content = std::fs::read_to_string(&input)?;
    let result: PanelizationResult = serde_json::from_str(&content)?;

    println!("{}", "🎨 Generating SVG...".bright_blue());

    let svg = render_svg(&result, scale)?;
    std::fs::write(&output, svg)?;

    println!();
    println!(
        "{} Saved SVG to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}

/// Parses `WIDTHxHEIGHT` (also accepts `X` and `*`).
fn parse_dimensions(value: &str) -> std::result::Result<(f64, f64), String> {
    let (width, height) = value
        .split_once(['x', 'X', '*'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;

    let width: f64 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", height))?;

    Ok((width, height))
}
