//! PDF Certificates CLI tool
//!
//! A command-line tool for batch-generating personalized PDF certificates
//! from spreadsheet rows.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use pdf_certificates::batch::{run_batch, BatchOptions};
use pdf_certificates::column::column_index;
use pdf_certificates::fonts::{FontCatalog, FONT_README_NAME};
use pdf_certificates::layout::BoundingBox;
use pdf_certificates::pdf::document_info;
use pdf_certificates::style::{parse_hex_color, StyleSpec};

/// PDF Certificates - Stamp personalized names onto a PDF template
#[derive(Parser)]
#[command(name = "pdf-certificates")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Generate one certificate per spreadsheet row
    pdf-certificates generate input_data.xlsx certificate_template.pdf \\
        -o output --name-col A --phone-col C --box 150 300 450 360

    # Use a discovered system font at 32pt in dark gray
    pdf-certificates generate data.xlsx template.pdf -o out \\
        --name-col B --phone-col D --box 100 250 500 320 \\
        --font DejaVuSans --size 32 --color '#333333'

    # List available font identifiers (also writes FONTS_README.md)
    pdf-certificates fonts

    # Inspect a template's pages
    pdf-certificates info certificate_template.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate personalized PDFs from a spreadsheet
    Generate {
        /// Input spreadsheet (.xlsx); row 1 is treated as a header
        spreadsheet: PathBuf,

        /// PDF template; every page receives the stamped name
        template: PathBuf,

        /// Output directory (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Column letter holding the name (e.g. "A")
        #[arg(long, default_value = "A")]
        name_col: String,

        /// Column letter holding the phone number (e.g. "C")
        #[arg(long, default_value = "C")]
        phone_col: String,

        /// Bounding box the name is centered in: x1 y1 x2 y2,
        /// in points with the origin at the bottom-left of the page
        #[arg(long = "box", num_args = 4, value_names = ["X1", "Y1", "X2", "Y2"], required = true)]
        box_coords: Vec<f32>,

        /// Font identifier (see the fonts subcommand / FONTS_README.md)
        #[arg(long, default_value = "Helvetica")]
        font: String,

        /// Font size in points
        #[arg(long, default_value_t = 24)]
        size: u32,

        /// Fill color as #rrggbb
        #[arg(long, default_value = "#000000")]
        color: String,
    },

    /// List available font identifiers and write FONTS_README.md
    Fonts,

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            spreadsheet,
            template,
            output,
            name_col,
            phone_col,
            box_coords,
            font,
            size,
            color,
        } => cmd_generate(
            spreadsheet, template, output, name_col, phone_col, box_coords, font, size, color,
        ),
        Commands::Fonts => cmd_fonts(),
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Run one batch: validate parameters, refresh the font list, process rows.
#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    spreadsheet: PathBuf,
    template: PathBuf,
    output: PathBuf,
    name_col: String,
    phone_col: String,
    box_coords: Vec<f32>,
    font: String,
    size: u32,
    color: String,
) -> anyhow::Result<()> {
    let name_column = column_index(&name_col)
        .with_context(|| format!("Invalid name column letter: {name_col:?}"))?;
    let phone_column = column_index(&phone_col)
        .with_context(|| format!("Invalid phone column letter: {phone_col:?}"))?;

    // clap guarantees exactly four values for --box
    let bbox = BoundingBox::new(box_coords[0], box_coords[1], box_coords[2], box_coords[3])?;

    if size == 0 {
        bail!("Font size must be positive");
    }

    let style = StyleSpec {
        font,
        size,
        color: parse_hex_color(&color)?,
    };

    // The advisory font list is rewritten at the start of every run so it
    // always reflects the fonts this machine actually has
    let catalog = FontCatalog::system();
    if let Err(e) = catalog.write_readme(std::path::Path::new(FONT_README_NAME)) {
        eprintln!("Warning: could not write {FONT_README_NAME}: {e}");
    }

    let options = BatchOptions {
        spreadsheet,
        template,
        output_dir: output,
        name_column,
        phone_column,
        bbox,
        style,
    };

    let summary = run_batch(&options, &catalog)?;

    println!("Processing complete!");
    println!("  Successfully processed: {}", summary.processed);
    println!("  Skipped/Failed: {}", summary.skipped);
    println!("  Output folder: {}", options.output_dir.display());

    Ok(())
}

/// List font identifiers and refresh FONTS_README.md
fn cmd_fonts() -> anyhow::Result<()> {
    let catalog = FontCatalog::system();
    catalog
        .write_readme(std::path::Path::new(FONT_README_NAME))
        .with_context(|| format!("Failed to write {FONT_README_NAME}"))?;

    let mut count = 0;
    for name in catalog.names() {
        println!("{name}");
        count += 1;
    }
    eprintln!("{count} fonts available (list written to {FONT_README_NAME})");

    Ok(())
}

/// Show page count and per-page dimensions of a PDF
fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    let pages = document_info(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", pages.len());
    for (i, (width, height)) in pages.iter().enumerate() {
        println!("  Page {}: {width:.1} x {height:.1} pt", i + 1);
    }

    Ok(())
}
