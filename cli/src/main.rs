//! guidex CLI - structured record extraction from directory guide page dumps

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use guidex::{
    extract_source, DocumentVariant, ExtractOptions, JsonFormat, JsonSource, PageSource, RecordSet,
};

#[derive(Parser)]
#[command(name = "guidex")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract structured records from directory guide page dumps", long_about = None)]
struct Cli {
    /// Input page dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output basename (without extension)
    #[arg(short, long, value_name = "NAME")]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "both")]
    format: OutputFormat,

    /// Document variant
    #[arg(long, value_enum, default_value = "directory")]
    variant: Variant,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records and write CSV/JSON output
    Extract {
        /// Input page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output basename (without extension)
        #[arg(short, long, value_name = "NAME")]
        output: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "both")]
        format: OutputFormat,

        /// Document variant
        #[arg(long, value_enum, default_value = "directory")]
        variant: Variant,

        /// Wrapped-header lookahead bound
        #[arg(long, default_value = "3")]
        max_lookahead: usize,
    },

    /// Show page dump information
    Info {
        /// Input page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Tabular rows in schema column order
    Csv,
    /// List of key/value records
    Json,
    /// Both outputs
    Both,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// State/county directory listings
    Directory,
    /// Healthcare system and network sections
    Systems,
}

impl From<Variant> for DocumentVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Directory => DocumentVariant::Directory,
            Variant::Systems => DocumentVariant::Systems,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            format,
            variant,
            max_lookahead,
        }) => cmd_extract(&input, output.as_deref(), format, variant, max_lookahead),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&input, cli.output.as_deref(), cli.format, cli.variant, 3)
            } else {
                println!("{}", "Usage: guidex <FILE> [-o NAME] [-f FORMAT]".yellow());
                println!("       guidex --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&str>,
    format: OutputFormat,
    variant: Variant,
    max_lookahead: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let basename = output.map(|s| s.to_string()).unwrap_or_else(|| {
        input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    });

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Loading page dump...");
    let source = JsonSource::open(input)?;
    pb.inc(1);

    pb.set_message("Parsing records...");
    let options = ExtractOptions::new()
        .with_variant(variant.into())
        .with_max_lookahead(max_lookahead);
    let records = extract_source(&source, options)?;
    pb.inc(1);

    pb.set_message("Writing output...");
    let mut written = Vec::new();
    if matches!(format, OutputFormat::Csv | OutputFormat::Both) {
        let path = format!("{}.csv", basename);
        fs::write(&path, record_csv(&records)?)?;
        written.push(path);
    }
    if matches!(format, OutputFormat::Json | OutputFormat::Both) {
        let path = format!("{}.json", basename);
        fs::write(&path, record_json(&records)?)?;
        written.push(path);
    }
    pb.inc(1);
    pb.finish_with_message("Done!");

    print_summary(&source, &records);

    if !written.is_empty() {
        println!("\n{}", "Output files:".green().bold());
        for (i, path) in written.iter().enumerate() {
            let branch = if i + 1 == written.len() { "└─" } else { "├─" };
            println!("  {} {}", branch.dimmed(), path);
        }
    }

    Ok(())
}

fn record_csv(records: &RecordSet) -> guidex::Result<String> {
    match records {
        RecordSet::Directory(r) => guidex::to_csv(r),
        RecordSet::Systems(r) => guidex::to_csv(r),
    }
}

fn record_json(records: &RecordSet) -> guidex::Result<String> {
    match records {
        RecordSet::Directory(r) => guidex::to_json(r, JsonFormat::Pretty),
        RecordSet::Systems(r) => guidex::to_json(r, JsonFormat::Pretty),
    }
}

fn print_summary(source: &JsonSource, records: &RecordSet) {
    if records.is_empty() {
        // Zero records is a reported outcome, not a failure.
        println!(
            "\n{} across {} pages",
            "No records found".yellow(),
            source.page_count()
        );
        return;
    }

    match records {
        RecordSet::Directory(r) => {
            println!(
                "\n{} {} records across {} pages",
                "Found".green().bold(),
                r.len(),
                source.page_count()
            );
        }
        RecordSet::Systems(r) => {
            let systems: HashSet<&str> = r
                .iter()
                .filter(|e| e.section == "Systems")
                .map(|e| e.healthcare_system.as_str())
                .collect();
            let networks: HashSet<&str> = r
                .iter()
                .filter(|e| e.section == "Networks")
                .map(|e| e.healthcare_system.as_str())
                .collect();
            println!(
                "\n{} {} hospital entries across {} pages",
                "Found".green().bold(),
                r.len(),
                source.page_count()
            );
            println!(
                "  Systems: {} systems, {} hospitals",
                systems.len(),
                r.iter().filter(|e| e.section == "Systems").count()
            );
            println!(
                "  Networks: {} networks, {} hospitals",
                networks.len(),
                r.iter().filter(|e| e.section == "Networks").count()
            );
        }
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonSource::open(input)?;
    let pages = source.pages();

    println!("{}", "Page dump information".green().bold());
    println!("  Pages: {}", pages.len());

    if let Some(first) = pages.first() {
        println!("  Page size: {:.0} x {:.0} pt", first.width, first.height);
    }

    let blocks: usize = pages.iter().map(|p| p.blocks.len()).sum();
    let lines: usize = pages
        .iter()
        .flat_map(|p| p.blocks.iter())
        .map(|b| b.lines.len())
        .sum();
    let spans: usize = pages
        .iter()
        .flat_map(|p| p.blocks.iter())
        .flat_map(|b| b.lines.iter())
        .map(|l| l.spans.len())
        .sum();
    println!("  Blocks: {}", blocks);
    println!("  Lines: {}", lines);
    println!("  Spans: {}", spans);

    Ok(())
}

fn cmd_version() {
    println!("guidex {}", env!("CARGO_PKG_VERSION"));
}
