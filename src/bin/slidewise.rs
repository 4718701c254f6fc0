use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use slidewise::matrix::zero_lines;
use slidewise::prelude::*;
use slidewise::window::state::Frequency;

#[derive(Parser)]
#[command(name = "slidewise", about = "Walk through matrix zeroing and sliding-window scans")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the dry-run table of variable window scans
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Zero every row and column that contains a zero, e.g. "1,2,3;4,0,6"
    Zero {
        matrix: String,
        #[arg(long)]
        strategy: Option<ZeroStrategy>,
    },
    /// Aggregate every window of `k` values, e.g. "1,4,2,9" -k 2
    Fixed {
        values: String,
        #[arg(short, long)]
        k: usize,
        #[arg(long, value_enum, default_value_t = AggregateKind::Sum)]
        aggregate: AggregateKind,
    },
    /// Longest substring without a repeated character
    LongestUnique { text: String },
    /// Shortest substring containing every character of the pattern
    MinWindow { text: String, pattern: String },
    /// Start indices of every anagram of the pattern
    Anagrams { text: String, pattern: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum AggregateKind {
    Sum,
    Max,
    Min,
}

fn parse_values(input: &str) -> Result<Vec<i64>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("'{}' is not an integer", s))
        })
        .collect()
}

fn parse_matrix(input: &str) -> Result<Vec<Vec<i64>>> {
    input
        .split(';')
        .filter(|row| !row.trim().is_empty())
        .map(parse_values)
        .collect()
}

fn print_matrix(label: &str, matrix: &[Vec<i64>]) {
    println!("{}", label.bold());
    for row in matrix {
        let cells: Vec<String> = row
            .iter()
            .map(|&v| {
                let cell = format!("{:>4}", v);
                if v == 0 {
                    cell.red().to_string()
                } else {
                    cell
                }
            })
            .collect();
        println!("  {}", cells.join(""));
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| "loading configuration")?,
        None => Config::default(),
    };
    let trace = cli.trace || config.window.trace;

    match cli.command {
        Command::Zero { matrix, strategy } => {
            let mut matrix = parse_matrix(&matrix)?;
            let strategy = strategy.unwrap_or(config.matrix.strategy);
            print_matrix("Input:", &matrix);
            let lines = zero_lines(&matrix)?;
            println!(
                "Zero rows: {:?}, zero columns: {:?}",
                lines.sorted_rows(),
                lines.sorted_cols()
            );
            strategy.zero(&mut matrix)?;
            print_matrix(&format!("Output ({}):", strategy), &matrix);
        }
        Command::Fixed { values, k, aggregate: kind } => {
            let values = parse_values(&values)?;
            let results = match kind {
                AggregateKind::Sum => window_sums(&values, k)?,
                AggregateKind::Max => window_maxima(&values, k)?,
                AggregateKind::Min => window_minima(&values, k)?,
            };
            for (start, value) in results.iter().enumerate() {
                println!(
                    "  {:?} -> {}",
                    &values[start..start + k],
                    value.to_string().green()
                );
            }
            if let AggregateKind::Sum = kind {
                println!("Max window sum: {}", max_fixed_window_sum(&values, k)?.to_string().bold());
            }
        }
        Command::LongestUnique { text } => {
            let chars: Vec<char> = text.chars().collect();
            let mut best = Best::longest();
            let mut scanner = Scanner::new(&chars, Frequency::<char>::new(), Objective::Longest);
            if trace {
                scanner = scanner.with_trace(config.window.max_trace_steps);
            }
            let outcome = scanner.scan(
                |freq, _| !freq.has_duplicates(),
                |_, window| {
                    best.offer(window);
                },
            );
            match outcome.trace {
                Some(table) if table.is_empty() => println!("{}", "Nothing to trace".yellow()),
                Some(table) => print!("{}", table),
                None => {}
            }
            let window = best.get().unwrap_or_default();
            let found: String = window.slice(&chars).iter().collect();
            println!(
                "Longest without repeat: {} at {} (length {})",
                format!("{:?}", found).green(),
                window,
                window.len()
            );
        }
        Command::MinWindow { text, pattern } => match min_window_substring(&text, &pattern)? {
            Some(window) => println!("Minimum window: {}", format!("{:?}", window).green()),
            None => println!("{}", "No window covers the pattern".yellow()),
        },
        Command::Anagrams { text, pattern } => {
            let starts = find_all_anagrams(&text, &pattern)?;
            if starts.is_empty() {
                println!("{}", "No anagrams found".yellow());
            } else {
                println!("Anagram starts: {}", format!("{:?}", starts).green());
            }
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
