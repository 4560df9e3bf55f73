use anyhow::{bail, Result};
use checkr_core::AnalysisResult;
use checkr_server::http::models::AnalysisResponse;
use checkr_server::ServerConfig;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod input;

/// Report address ranges and overlaps for IPv4 CIDR prefixes
#[derive(Parser)]
#[command(name = "checkr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze prefixes given on the command line or in a file
    Analyze(AnalyzeArgs),
    /// Start the HTTP analysis server
    Serve(ServeArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// Prefixes in CIDR notation (e.g., 10.0.0.0/8)
    #[arg(value_name = "CIDR")]
    cidrs: Vec<String>,

    /// Read prefixes from file, one per line (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address (overrides CHECKR_BIND_ADDR)
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// Largest prefix count per request (overrides CHECKR_MAX_PREFIXES)
    #[arg(short, long, value_name = "N")]
    max_prefixes: Option<usize>,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

/// Exit status when the analysis found overlapping prefixes
const EXIT_COLLISION: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, cli.output),
        Commands::Serve(args) => handle_serve(args).map(|()| ExitCode::SUCCESS),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        "debug".to_owned()
    } else {
        std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned())
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

fn handle_analyze(args: AnalyzeArgs, format: OutputFormat) -> Result<ExitCode> {
    let mut cidrs = args.cidrs;
    if let Some(ref path) = args.file {
        tracing::debug!(path = %path, "reading prefixes");
        cidrs.extend(input::read_prefix_file(path)?);
    }
    if cidrs.is_empty() {
        bail!("no prefixes given; pass CIDRs as arguments or use --file");
    }

    let result = checkr_analyzer::analyze(&cidrs)?;
    let has_collision = result.has_collision;
    print_result(result, format)?;

    Ok(if has_collision {
        ExitCode::from(EXIT_COLLISION)
    } else {
        ExitCode::SUCCESS
    })
}

fn handle_serve(args: ServeArgs) -> Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(max_prefixes) = args.max_prefixes {
        config.max_prefixes = max_prefixes;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(checkr_server::serve(config))?;
    Ok(())
}

fn print_result(result: AnalysisResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => print_human(&result),
        OutputFormat::Json => write_json(result, std::io::stdout(), true)?,
        OutputFormat::JsonCompact => write_json(result, std::io::stdout(), false)?,
        OutputFormat::Csv => write_csv(&result, std::io::stdout())?,
    }
    Ok(())
}

fn print_human(result: &AnalysisResult) {
    println!();
    println!("{}", "CIDR Analysis".bold().cyan());
    println!("{}", "─".repeat(72).dimmed());
    println!(
        "{:<20} {:>15}   {:<15} {:>12}",
        "CIDR".bold(),
        "First IP".bold(),
        "Last IP".bold(),
        "Hosts".bold()
    );
    for detail in &result.cidr_details {
        println!(
            "{:<20} {:>15} - {:<15} {:>12}",
            detail.cidr,
            detail.first_ip.to_string(),
            detail.last_ip.to_string(),
            detail.total_hosts
        );
    }
    println!();

    if result.overlaps.is_empty() {
        println!("{}", "No overlaps found".green());
    } else {
        println!(
            "{}",
            format!("{} overlap(s) found", result.overlaps.len()).red().bold()
        );
        for overlap in &result.overlaps {
            println!(
                "  {} {} {}: {} ({} addresses)",
                overlap.cidr1.yellow(),
                "×".dimmed(),
                overlap.cidr2.yellow(),
                overlap.range(),
                overlap.overlap_hosts
            );
        }
    }
    println!();
}

fn write_json<W: Write>(result: AnalysisResult, mut out: W, pretty: bool) -> Result<()> {
    let response = AnalysisResponse::from(result);
    if pretty {
        serde_json::to_writer_pretty(&mut out, &response)?;
    } else {
        serde_json::to_writer(&mut out, &response)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write>(result: &AnalysisResult, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["kind", "cidr", "other_cidr", "first_ip", "last_ip", "count"])?;
    for detail in &result.cidr_details {
        wtr.write_record([
            "prefix",
            detail.cidr.as_str(),
            "",
            detail.first_ip.to_string().as_str(),
            detail.last_ip.to_string().as_str(),
            detail.total_hosts.to_string().as_str(),
        ])?;
    }
    for overlap in &result.overlaps {
        wtr.write_record([
            "overlap",
            overlap.cidr1.as_str(),
            overlap.cidr2.as_str(),
            overlap.first_ip.to_string().as_str(),
            overlap.last_ip.to_string().as_str(),
            overlap.overlap_hosts.to_string().as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
