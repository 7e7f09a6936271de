use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{Level, info};

use fuzzytext::redact::longest_first;
use fuzzytext::{DEFAULT_MASK, MetricKind, Session, redact_with};

/// Find fuzzy occurrences of a phrase in text
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Phrase to look for
    #[arg(short, long)]
    needle: String,

    /// Files to search, stdin when none are given
    files: Vec<PathBuf>,

    /// Similarity metric: jaro-winkler, strsim-jaro-winkler or levenshtein
    #[arg(short, long, default_value = "jaro-winkler")]
    metric: String,

    /// Print the text with every match masked instead of the matches
    #[arg(short, long)]
    redact: bool,

    /// Replacement used by --redact
    #[arg(long, default_value = DEFAULT_MASK)]
    mask: String,

    /// Emit JSON
    #[arg(long)]
    json: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize, Debug)]
struct Report {
    source: String,
    matches: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redacted: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // fail before touching any input
    let metric: MetricKind = args.metric.parse()?;

    let reports: Vec<Report> = if args.files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        vec![search(&args, metric, "-".to_string(), &text)]
    } else {
        // one independent session per file
        args.files
            .par_iter()
            .map(|path| -> Result<Report> {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Ok(search(&args, metric, path.display().to_string(), &text))
            })
            .collect::<Result<Vec<_>>>()?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_plain(&reports);
    }

    Ok(())
}

fn search(args: &Args, metric: MetricKind, source: String, text: &str) -> Report {
    let mut session = Session::with_metric(text, &args.needle, metric.build());
    let found = session.matches();
    info!(source = %source, words = session.words().len(), matches = found.len(), "searched");

    let redacted = args.redact.then(|| redact_with(text, &found, &args.mask));
    let matches = longest_first(&found).into_iter().map(str::to_string).collect();

    Report {
        source,
        matches,
        redacted,
    }
}

fn print_plain(reports: &[Report]) {
    let headers = reports.len() > 1;
    for report in reports {
        if headers {
            println!("==> {} <==", report.source);
        }
        match &report.redacted {
            Some(text) => println!("{text}"),
            None => report.matches.iter().for_each(|m| println!("{m}")),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
