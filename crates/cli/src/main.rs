use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CandidateRecord, CandidateTable, TextField};
use pipeline::FilterCriteria;
use rand::Rng;
use ranking::{Algorithm, RankEngine, RankKey};
use shortlist::config::EXPORT_SKIPPED_MESSAGE;
use shortlist::{Shortlist, ShortlistConfig, ShortlistOrchestrator};
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Candidate Shortlist - consensus ranking of job candidates
#[derive(Parser)]
#[command(name = "candidate-shortlist")]
#[command(about = "Filter job candidates and shortlist them by consensus ranking", long_about = None)]
struct Cli {
    /// Path to the candidate file (.csv, .json, .xlsx or .xls)
    #[arg(short, long, default_value = "data/job_candidates.csv")]
    input: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the cleaned working set to a CSV file
    Clean {
        /// Output file for the cleaned dataset
        #[arg(short, long, default_value = "cleaned_candidates.csv")]
        output: PathBuf,
    },

    /// Filter, rank and shortlist candidates
    Rank {
        /// JSON file with filter criteria; flags below override its values
        #[arg(long)]
        criteria: Option<PathBuf>,

        /// Minimum years of experience
        #[arg(long)]
        min_experience: Option<u32>,

        /// Substring the qualifications must contain
        #[arg(long)]
        qualifications: Option<String>,

        /// Substring the work type must contain
        #[arg(long)]
        work_type: Option<String>,

        /// Substring the job title must contain
        #[arg(long)]
        job_title: Option<String>,

        /// Substring the role must contain
        #[arg(long)]
        role: Option<String>,

        /// Substring the location must contain
        #[arg(long)]
        location: Option<String>,

        /// Number of candidates to shortlist (default 5)
        #[arg(long, allow_hyphen_values = true)]
        top: Option<String>,

        /// Export format: csv, excel, or anything else to skip
        #[arg(long)]
        export: Option<String>,

        /// Directory the export is written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Show the per-algorithm positions behind each score
        #[arg(long)]
        explain: bool,
    },

    /// Time the orderings on synthetic candidates
    Benchmark {
        /// Number of synthetic candidates
        #[arg(long, default_value = "10000")]
        candidates: usize,

        /// Experience values are drawn from 1..=max_experience
        #[arg(long, default_value = "15")]
        max_experience: u32,

        /// Number of timed rounds
        #[arg(long, default_value = "20")]
        rounds: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean { output } => handle_clean(&cli.input, &output)?,
        Commands::Rank {
            criteria,
            min_experience,
            qualifications,
            work_type,
            job_title,
            role,
            location,
            top,
            export,
            output_dir,
            explain,
        } => {
            let overrides = FilterCriteria {
                min_experience,
                qualifications_contains: qualifications,
                work_type_contains: work_type,
                job_title_contains: job_title,
                role_contains: role,
                location_contains: location,
            };
            let criteria = load_criteria(criteria.as_deref())?.merge(overrides);
            let config = ShortlistConfig::from_raw(top.as_deref(), export.as_deref());
            handle_rank(&cli.input, &criteria, config, &output_dir, explain)?
        }
        Commands::Benchmark {
            candidates,
            max_experience,
            rounds,
        } => handle_benchmark(candidates, max_experience, rounds),
    }

    Ok(())
}

/// Load the working set for the 'clean' command, printing progress
fn load_table(input: &Path) -> Result<CandidateTable> {
    println!("Loading candidates from {}...", input.display());
    let start = Instant::now();
    let table = CandidateTable::load_from_file(input)
        .with_context(|| format!("Failed to load candidates from {}", input.display()))?;
    println!(
        "{} Loaded {} candidates with experience in {:?}",
        "✓".green(),
        table.len(),
        start.elapsed()
    );
    Ok(table)
}

fn load_criteria(path: Option<&Path>) -> Result<FilterCriteria> {
    let Some(path) = path else {
        return Ok(FilterCriteria::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria file {}", path.display()))?;
    let criteria: FilterCriteria = serde_json::from_str(&content)
        .with_context(|| format!("Invalid criteria file {}", path.display()))?;
    info!("Loaded filter criteria from {}", path.display());
    Ok(criteria)
}

/// Handle the 'clean' command
fn handle_clean(input: &Path, output: &Path) -> Result<()> {
    let table = load_table(input)?;
    data_loader::export::write_csv(output, &table.to_export())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "{} Cleaned data saved to '{}'",
        "✓".green(),
        output.display()
    );
    Ok(())
}

/// Handle the 'rank' command
fn handle_rank(
    input: &Path,
    criteria: &FilterCriteria,
    config: ShortlistConfig,
    output_dir: &Path,
    explain: bool,
) -> Result<()> {
    println!("Loading candidates from {}...", input.display());
    let start = Instant::now();
    let orchestrator = ShortlistOrchestrator::load(input)?;
    println!(
        "{} Loaded {} candidates with experience in {:?}",
        "✓".green(),
        orchestrator.table().len(),
        start.elapsed()
    );
    let shortlist = orchestrator.shortlist(criteria, config.size);

    if shortlist.is_empty() {
        println!(
            "{}",
            "No candidates found with the given filters. Please try again.".yellow()
        );
        return Ok(());
    }

    println!(
        "{}Filtered candidates: {}",
        "• ".cyan(),
        shortlist.summary.count
    );
    println!(
        "{}Average experience: {:.1} years",
        "• ".cyan(),
        shortlist.summary.average_experience
    );

    print_shortlist(&shortlist, explain);

    match orchestrator.export(&shortlist, config.export, output_dir)? {
        Some(path) => println!("Results saved to '{}'", path.display()),
        None => println!("{EXPORT_SKIPPED_MESSAGE}"),
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(candidates: usize, max_experience: u32, rounds: usize) {
    let max_experience = max_experience.max(1);
    let rounds = rounds.max(1);
    let mut rng = rand::rng();
    let records: Vec<CandidateRecord> = (0..candidates)
        .map(|id| CandidateRecord::new(id).with_experience(rng.random_range(1..=max_experience)))
        .collect();
    let keys: Vec<RankKey> = records.iter().map(RankKey::from_record).collect();

    println!(
        "{}",
        format!(
            "Benchmarking {} candidates over {} rounds:",
            candidates, rounds
        )
        .bold()
        .blue()
    );

    for algorithm in Algorithm::ALL {
        let timings = time_rounds(rounds, || {
            black_box(algorithm.order(&keys));
        });
        print_timings(algorithm.name(), timings);
    }

    let engine = RankEngine::new();
    let timings = time_rounds(rounds, || {
        black_box(engine.rank(records.clone()));
    });
    print_timings("consensus", timings);
}

fn time_rounds(rounds: usize, mut run: impl FnMut()) -> Vec<Duration> {
    (0..rounds)
        .map(|_| {
            let start = Instant::now();
            run();
            start.elapsed()
        })
        .collect()
}

fn print_timings(label: &str, mut timings: Vec<Duration>) {
    let total: Duration = timings.iter().sum();
    let avg = total / timings.len() as u32;
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    println!(
        "  {:<10} avg {:>10.2?}  p50 {:>10.2?}  p95 {:>10.2?}",
        label, avg, p50, p95
    );
}

/// A field as shown in the shortlist, including values kept verbatim from
/// non-text cells
fn display_value(record: &CandidateRecord, field: TextField) -> String {
    record
        .column_value(field.header())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Format and print the shortlist
fn print_shortlist(shortlist: &Shortlist, explain: bool) {
    println!(
        "{}",
        format!(
            "Top {} Recommended Candidates Based on Filtered Results:",
            shortlist.entries.len()
        )
        .bold()
        .blue()
    );
    for entry in &shortlist.entries {
        let value = |field| display_value(&entry.record, field);
        println!(
            "{}. {} | Exp: {} | Skills: {}",
            entry.consensus_rank.to_string().green(),
            value(TextField::ContactPerson),
            value(TextField::Experience),
            value(TextField::Skills)
        );
        if explain {
            let [merge, quick, heap] = entry.positions;
            println!(
                "   merge #{}, quick #{}, heap #{} -> average rank score {:.2}",
                merge + 1,
                quick + 1,
                heap + 1,
                entry.average_rank_score
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Normalizer, RawRecord};

    #[test]
    fn test_display_value_text_and_missing() {
        let record = CandidateRecord::new(0)
            .with_text(TextField::ContactPerson, "Ana Ruiz")
            .with_experience(3);

        assert_eq!(display_value(&record, TextField::ContactPerson), "Ana Ruiz");
        assert_eq!(display_value(&record, TextField::Skills), "N/A");
    }

    #[test]
    fn test_display_value_numeric_experience() {
        let raw = RawRecord::new()
            .with("Contact Person", "Bo Chen")
            .with("Experience", 7);
        let record = Normalizer::new().normalize(0, &raw);

        assert_eq!(display_value(&record, TextField::Experience), "7");
    }
}
