use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use wartoll::narrative::equivalence;
use wartoll::report::{self, Summary};
use wartoll::serve::{self, clamp_count};
use wartoll::{select, Category, Dataset, NarrativeMode};

#[derive(Parser, Debug)]
#[command(name = "wartoll")]
#[command(
    author,
    version,
    about = "Parse WWII death estimates and derive civilian and per-capita figures"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Output report file (.csv, .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open the report after writing it
    #[arg(long)]
    open: bool,

    /// Show debug logging (per-record parse results)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and the table
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank countries the way the animated chart does
    Select {
        /// Focus category: total, military, civilian
        #[arg(short, long, default_value = "total")]
        focus: Category,

        /// Number of countries (clamped to 5..=dataset size)
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,

        /// Narrative mode: absolute, per100k, percent
        #[arg(short, long, default_value = "absolute")]
        mode: NarrativeMode,

        /// City size for the equivalence line
        #[arg(long, default_value = "500000")]
        city_unit: u64,

        /// Write the selection document as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse death-count text and show the bounds
    Parse {
        /// Values such as "30,000", "20,000-35,000" or "3-4,000,000"
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Start the JSON API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Some(Command::Parse { texts }) = &args.command {
        return parse_texts(texts);
    }

    let dataset = Dataset::embedded();

    match &args.command {
        Some(Command::Select { focus, count, mode, city_unit, output }) => {
            run_select(&dataset, *focus, *count, *mode, *city_unit, output.as_deref())
        }
        Some(Command::Serve { port }) => {
            serve::start(*port, &dataset).with_context(|| format!("server on port {}", port))
        }
        Some(Command::Parse { .. }) => Ok(()),
        None => run_table(&dataset, &args),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn run_table(dataset: &Dataset, args: &Args) -> Result<()> {
    println!(
        "\x1b[1m{:<20} {:<26} {:<26} {}\x1b[0m",
        "COUNTRY", "MILITARY", "TOTAL", "CIVILIAN (DERIVED)"
    );
    println!("{}", "─".repeat(100));

    for r in &dataset.records {
        println!(
            "{:<20} {:<26} {:<26} {}",
            truncate(&r.country, 20),
            dim_unknown(&r.military_range_label),
            dim_unknown(&r.total_range_label),
            dim_unknown(&r.civilian_range_label)
        );
    }

    let summary = Summary::from_dataset(dataset);
    if !args.quiet {
        eprintln!("\n{}", "─".repeat(100));
        eprintln!("\x1b[1mSummary:\x1b[0m");
        eprintln!("  Countries:         {}", summary.countries);
        eprintln!("  Known military:    {}", summary.known_military);
        eprintln!("  Known total:       {}", summary.known_total);
        eprintln!("  Derived civilian:  {}", summary.derived_civilian);
        eprintln!(
            "  Total deaths:      {}",
            wartoll::format_range(Some(summary.total_deaths_low), Some(summary.total_deaths_high))
        );
        if summary.rejected > 0 {
            eprintln!("  \x1b[31mRejected:\x1b[0m          {}", summary.rejected);
            for row in &dataset.rejected {
                eprintln!("    {} ({}): {}", row.country, row.field, row.reason);
            }
        }
    }

    if let Some(ref output_path) = args.output {
        report::generate(output_path, dataset)
            .with_context(|| format!("writing report {}", output_path.display()))?;
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }
        if args.open {
            open_report(output_path);
        }
    }

    Ok(())
}

fn run_select(
    dataset: &Dataset,
    focus: Category,
    count: usize,
    mode: NarrativeMode,
    city_unit: u64,
    output: Option<&Path>,
) -> Result<()> {
    let count = clamp_count(count, dataset.len());
    let city_unit = city_unit.clamp(serve::MIN_CITY_UNIT, serve::MAX_CITY_UNIT);
    let selection = select(&dataset.records, focus, count, mode);
    info!(focus = %focus, mode = %mode, count, selected = selection.len(), "selection");

    if mode.needs_population() {
        let missing = dataset
            .records
            .iter()
            .filter(|r| r.population_1939.is_none())
            .count();
        if missing > 0 {
            eprintln!("{} countries without a 1939 population are left out", missing);
        }
    }

    println!("\x1b[1m{} · {}\x1b[0m", focus.title(), mode.label());
    println!("{}", "─".repeat(80));

    for (rank, row) in selection.ranked.iter().enumerate() {
        let bounds = match focus {
            Category::Military => (row.military_scaled_min, row.military_scaled_max),
            Category::Total => (row.total_scaled_min, row.total_scaled_max),
            Category::Civilian => (row.civilian_scaled_min, row.civilian_scaled_max),
        };
        let range = match bounds {
            (Some(lo), Some(hi)) if lo != hi => {
                format!("  ({} to {})", mode.format_value(lo), mode.format_value(hi))
            }
            _ => String::new(),
        };
        println!(
            "{:>3}. {:<20} {:>16}{}",
            rank + 1,
            truncate(&row.country, 20),
            mode.format_value(row.metric_value),
            range
        );
    }

    let cumulative = selection.cumulative();
    let base = equivalence::base_city(city_unit);

    println!("{}", "─".repeat(80));
    println!("Cumulative total:     {}", mode.format_value(cumulative.total_scaled));
    println!("Cumulative military:  {}", mode.format_value(cumulative.military_scaled));
    println!("Cumulative civilian:  {}", mode.format_value(cumulative.civilian_scaled));
    println!(
        "Absolute total:       {} ({:.1} x {})",
        NarrativeMode::Absolute.format_value(cumulative.total_absolute),
        cumulative.total_absolute / base.population as f64,
        base.name
    );
    if let (Some(last), Some(eq)) = (selection.reveal.last(), selection.equivalences().last()) {
        println!("{}: {}", last.country, eq);
    }

    if let Some(path) = output {
        report::write_selection(path, &selection)
            .with_context(|| format!("writing selection {}", path.display()))?;
        eprintln!("\n\x1b[32mSelection saved: {}\x1b[0m", path.display());
    }

    Ok(())
}

fn parse_texts(texts: &[String]) -> Result<()> {
    let mut failed = 0;

    for text in texts {
        match wartoll::parse(text) {
            Ok(Some(bounds)) => println!(
                "{:<24} {:<6} low={:<14} high={:<14} {}",
                format!("{:?}", text),
                if bounds.is_exact() { "exact" } else { "range" },
                bounds.low,
                bounds.high,
                bounds.label()
            ),
            Ok(None) => println!("{:<24} Unknown", format!("{:?}", text)),
            Err(e) => {
                failed += 1;
                eprintln!("\x1b[31m{:<24} error: {}\x1b[0m", format!("{:?}", text), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} values failed to parse", failed, texts.len());
    }
    Ok(())
}

fn open_report(path: &Path) {
    if let Err(e) = open::that(path) {
        eprintln!("Failed to open report: {}", e);
    }
}

fn dim_unknown(label: &str) -> String {
    if label == wartoll::estimate::label::UNKNOWN_LABEL {
        format!("\x1b[90m{:<26}\x1b[0m", label)
    } else {
        label.to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
