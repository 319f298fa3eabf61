use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sales_ranking::{
    config::{Config, DEFAULT_CONFIG_PATH},
    period::{MonthStyle, Period},
    ranking::{build_ranking, AggregatedResult, Progress, Ranking},
    report::{self, Style},
    source::load_records,
    transaction::SaleRecord,
};

#[derive(Parser)]
#[clap(version, about = "Rank salespeople by installed sales against their monthly goals")]
struct Cli {
    /// Configuration file
    #[clap(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RunArgs {
    /// Sales export (.xls, .xlsx, .ods or .csv), defaults to the configured input
    #[clap(short, long)]
    input: Option<PathBuf>,
    /// Month number (1-12), asked for when missing
    #[clap(short, long)]
    month: Option<u32>,
    /// Year as YY or YYYY, asked for when missing
    #[clap(short, long)]
    year: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the ranking and save it as text and HTML
    Generate {
        #[clap(flatten)]
        run: RunArgs,
        /// Directory the reports are written to
        #[clap(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Do not draw progress bars
        #[clap(long)]
        no_progress: bool,
    },
    /// Show the installed sales of one salesperson
    Details {
        /// Salesperson key or name
        key: String,
        #[clap(flatten)]
        run: RunArgs,
    },
    /// Show goal attainment of every salesperson
    Summary {
        #[clap(flatten)]
        run: RunArgs,
    },
}

/// Draws a progress bar while salespeople are aggregated.
struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    fn new(total: usize, visible: bool) -> Result<Self> {
        let bar = if visible {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template("📊 [{bar:30}] {percent:>3}% {msg}")?
                .progress_chars("█░"),
        );
        Ok(ProgressReporter { bar })
    }

    fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}

impl Progress for ProgressReporter {
    fn salesperson_done(&mut self, index: usize, _total: usize, result: &AggregatedResult) {
        self.bar.set_position(index as u64 + 1);
        self.bar.set_message(result.key.clone());
        self.bar.println(format!(
            "✅ {}: {} installed sales, {} (goal: {:.1}%)",
            result.key,
            result.installed_count,
            result.total_installed_value.round_dp(2),
            result.goal.percent_uncapped.round_dp(1)
        ));
    }
}

fn spinner(message: String, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓",
            ])
            .template("{spinner} {msg}")?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

fn ask(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer)? == 0 {
        return Err(anyhow!("no answer given on standard input"));
    }
    Ok(answer.trim().to_string())
}

/// Use the period given on the command line, asking for the missing parts.
fn resolve_period(run: &RunArgs, style: MonthStyle) -> Result<Period> {
    let month = match run.month {
        Some(month) => month,
        None => loop {
            match ask("Month number (1-12): ")?.parse::<u32>() {
                Ok(month) if (1..=12).contains(&month) => break month,
                _ => println!("Invalid month, enter a number between 1 and 12."),
            }
        },
    };
    if let Some(year) = &run.year {
        return Ok(Period::new(month, year, style)?);
    }
    loop {
        match Period::new(month, &ask("Year (YY or YYYY): ")?, style) {
            Ok(period) => return Ok(period),
            Err(e) => println!("{}", e),
        }
    }
}

fn load(config: &Config, run: &RunArgs, visible: bool) -> Result<Vec<SaleRecord>> {
    let input = run
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.input));
    let spinner = spinner(format!("Loading {}", input.display()), visible)?;
    let records = load_records(&input, &config.columns);
    spinner.finish_and_clear();
    Ok(records?)
}

/// Resolve the period and load the records, then rank them.
fn rank<P, F>(config: &Config, run: &RunArgs, visible: bool, progress: F) -> Result<(Ranking, P)>
where
    P: Progress,
    F: FnOnce(usize) -> Result<P>,
{
    let roster = config.roster()?;
    let period = resolve_period(run, config.month_style)?;
    let records = load(config, run, visible)?;
    info!(%period, salespeople = roster.entries().len(), "building ranking");
    let mut progress = progress(roster.entries().len())?;
    let ranking = build_ranking(&records, &roster, &period, &mut progress);
    Ok((ranking, progress))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let style = Style::from(&config.report);

    match cli.command {
        Command::Generate {
            run,
            output_dir,
            no_progress,
        } => {
            let visible = !no_progress;
            let (ranking, reporter) = rank(&config, &run, visible, |total| {
                ProgressReporter::new(total, visible)
            })?;
            reporter.finish();

            print!("{}", report::text::ranking(&ranking, &style));
            let (text_path, html_path) = report::write_reports(&output_dir, &ranking, &style)?;
            println!("💾 Reports saved:");
            println!("   📄 {}", text_path.display());
            println!("   🌐 {}", html_path.display());
        }
        Command::Details { key, run } => {
            let (ranking, ()) = rank(&config, &run, false, |_| Ok(()))?;
            let (position, result) = ranking
                .get(&key)
                .with_context(|| format!("salesperson `{}` not found", key))?;
            println!("#{} in {}", position, ranking.period);
            print!("{}", report::text::detail(result, &style));
        }
        Command::Summary { run } => {
            let (ranking, ()) = rank(&config, &run, false, |_| Ok(()))?;
            print!("{}", report::text::summary(&ranking, &style));
        }
    }

    Ok(())
}
