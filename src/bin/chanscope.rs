use anyhow::Context;
use chanscope::report::{AnalyzeOpts, ChannelReport};
use chrono::{DateTime, Utc};
use clap::Parser;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::{self, Read};

#[derive(Parser, Debug)]
#[command(name = "chanscope", version, about = "Channel statistics extraction and derived metrics")]
struct Cli {
    /// Input file with the generated channel description (`-` or omitted for stdin)
    input: Option<String>,

    /// Known channel location; overrides whatever the text says for CPM pricing
    #[arg(long = "location")]
    location: Option<String>,

    /// Known upload cadence in videos per week (default assumes 2)
    #[arg(long = "uploads-per-week")]
    uploads_per_week: Option<f64>,

    /// Seed for the synthetic history (random when omitted)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Reference time (RFC3339) for channel age and month labels
    #[arg(long = "now")]
    now: Option<String>,

    /// JSON file with analysis options; flags override its values
    #[arg(long = "opts")]
    opts: Option<String>,

    /// CSV/TSV history (Month, Subscribers, Views[, Engagement, Retention, CTR]) to chart instead of synthesizing
    #[arg(long = "history-csv")]
    history_csv: Option<String>,

    /// Print only a specific section: parsed | derived | history
    #[arg(long = "only")]
    only: Option<String>,

    /// Output format: json | table
    #[arg(long = "format", default_value = "json")]
    format: String,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        None | Some("-") => {
            if atty::is(atty::Stream::Stdin) {
                tracing::warn!("reading channel text from terminal; end with Ctrl-D");
            }
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(p) => fs::read_to_string(p),
    }
}

fn resolve_opts(cli: &Cli) -> anyhow::Result<AnalyzeOpts> {
    let mut opts = match &cli.opts {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading options file {path}"))?;
            serde_json::from_str::<AnalyzeOpts>(&raw).with_context(|| format!("parsing options file {path}"))?
        }
        None => AnalyzeOpts::default(),
    };
    if let Some(now) = &cli.now {
        opts.now = DateTime::parse_from_rfc3339(now)
            .with_context(|| format!("--now is not RFC3339: {now}"))?
            .with_timezone(&Utc);
    }
    if cli.uploads_per_week.is_some() {
        opts.uploads_per_week = cli.uploads_per_week;
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    chanscope::report::prewarm_regexes();

    let text = read_input(cli.input.as_deref()).context("reading channel text")?;
    let opts = resolve_opts(&cli)?;
    let location = cli.location.as_deref();

    let report = match &cli.history_csv {
        Some(path) => {
            let csv = fs::read_to_string(path).with_context(|| format!("reading history {path}"))?;
            let imported = chanscope::import::parse_history_csv(&csv).with_context(|| format!("importing {path}"))?;
            chanscope::report::analyze_with_history(&text, location, &opts, &imported)
        }
        None => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            chanscope::report::analyze(&text, location, &opts, &mut rng)
        }
    };

    let missing = report.parsed.missing();
    if missing.len() == chanscope::Field::ALL.len() {
        tracing::warn!("no channel statistics recognised in input");
    }

    if cli.format == "table" {
        print_table(&report, cli.only.as_deref());
        return Ok(());
    }
    let out = match cli.only.as_deref() {
        Some("parsed") => serde_json::to_string_pretty(&report.parsed)?,
        Some("derived") => serde_json::to_string_pretty(&report.derived)?,
        Some("history") => serde_json::to_string_pretty(&report.history)?,
        _ => serde_json::to_string_pretty(&report)?,
    };
    println!("{out}");
    Ok(())
}

fn print_table(report: &ChannelReport, only: Option<&str>) {
    use chanscope::numeric::{format_compact, format_grouped};

    if matches!(only, None | Some("parsed")) {
        println!("{:<24} {:<8} {}", "Field", "Found", "Value");
        for field in chanscope::Field::ALL {
            let v = report.parsed.get(field);
            println!("{:<24} {:<8} {}", field, if v.present { "yes" } else { "-" }, v.value);
        }
        println!();
    }
    if matches!(only, None | Some("derived")) {
        let d = &report.derived;
        let age = if d.age_known { format!("{:.1} years", d.channel_age_years) } else { "unknown".to_string() };
        println!("{:<24} {}", "Avg views / video", format_grouped(d.avg_views_per_video));
        println!("{:<24} ${} (CPM {:.2}, {} uploads/wk)", "Est. monthly revenue", format_grouped(d.estimated_monthly_revenue), d.cpm_rate, d.uploads_per_week);
        println!("{:<24} {}", "Channel age", age);
        println!("{:<24} {:.2}%", "Growth rate", d.growth_rate_percent);
        println!();
    }
    if matches!(only, None | Some("history")) {
        println!("{:<10} {:<12} {:<12} {}", "Month", "Subscribers", "Views", "Revenue");
        for p in &report.history {
            println!("{:<10} {:<12} {:<12} ${:.2}", p.month, format_compact(p.subscribers), format_compact(p.views), p.revenue);
        }
        let trend = report.history.iter().map(|p| format_compact(p.subscribers)).join(" -> ");
        println!("\n# subscribers: {trend}");
    }
}
