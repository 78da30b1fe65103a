use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use deungbon::parser::{normalize, sections};
use deungbon::{parse_certificate_with, StrikeIndicators};

#[derive(Parser)]
#[command(name = "deungbon", about = "등기사항전부증명서 text → structured JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a linearized certificate into JSON on stdout
    Parse {
        /// Input text file ("-" for stdin)
        file: PathBuf,
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
        /// Extra strike token to treat as a cancellation marker (repeatable)
        #[arg(long = "strike-token")]
        strike_tokens: Vec<String>,
    },
    /// Show the zone split without extracting rows (debugging aid)
    Sections {
        /// Input text file ("-" for stdin)
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file, compact, strike_tokens } => {
            let text = read_input(&file)?;
            let mut strikes = StrikeIndicators::default();
            strikes.tokens.extend(strike_tokens);

            let parsed = parse_certificate_with(&text, &strikes)?;
            let json = if compact {
                serde_json::to_string(&parsed.record)?
            } else {
                serde_json::to_string_pretty(&parsed.record)?
            };
            println!("{json}");

            for d in &parsed.diagnostics {
                eprintln!("warning: {}", serde_json::to_string(d)?);
            }
            Ok(())
        }
        Commands::Sections { file } => {
            let text = read_input(&file)?;
            let normalized = normalize::normalize(&text);
            let split = sections::split_sections(&normalized)?;

            print_zone("header", &split.header);
            print_zone("표제부", &split.title);
            print_zone("갑구", &split.ownership);
            print_zone("을구", &split.encumbrance);
            print_zone("매매목록", &split.sale_listing);
            Ok(())
        }
    }
}

fn read_input(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn print_zone(name: &str, lines: &[String]) {
    println!("--- {name} ({} lines) ---", lines.len());
    for line in lines {
        println!("{line}");
    }
}
