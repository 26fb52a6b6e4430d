mod policy;
mod reports;
mod scenarios;
mod seeds;
mod simulation;

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use scenarios::{ScenarioCtx, ScenarioResult, list_scenarios, run_scenario};
use seeds::resolve_seed_inputs;

#[derive(Debug, Parser)]
#[command(name = "ubc-survival-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for the UBC Survival game logic")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (integers, SEM-WORD## codes, or "all"; comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        println!("Available scenarios:");
        for (key, description) in list_scenarios() {
            println!("  {key:12} - {description}");
        }
        return Ok(());
    }

    println!("{}", "🎓 UBC Survival Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());

    let start_time = Instant::now();
    let scenario_names = expand_scenarios(&args.scenarios);
    let seed_tokens = split_csv(&args.seeds);
    let seed_infos = resolve_seed_inputs(&seed_tokens)?;

    let ctx = ScenarioCtx {
        seeds: &seed_infos,
        iterations: args.iterations,
        verbose: args.verbose,
    };

    let mut results = Vec::new();
    for name in &scenario_names {
        println!("▶ Running scenario {}", name.bold());
        let result =
            run_scenario(name, &ctx).with_context(|| format!("scenario `{name}` failed to run"))?;
        results.push(result);
    }

    write_report(&args, &results, start_time.elapsed())?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn expand_scenarios(arg: &str) -> Vec<String> {
    let names = split_csv(arg);
    if names.iter().any(|s| s == "all") {
        list_scenarios()
            .iter()
            .map(|(key, _)| (*key).to_string())
            .collect()
    } else {
        names
    }
}

fn write_report(args: &Args, results: &[ScenarioResult], total: Duration) -> Result<()> {
    match args.report.as_str() {
        "json" => emit(args, &reports::generate_json_report(results)?),
        "markdown" => emit(args, &reports::generate_markdown_report(results, total)),
        _ => {
            reports::generate_console_report(results, total);
            Ok(())
        }
    }
}

fn emit(args: &Args, text: &str) -> Result<()> {
    match &args.output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("writing report to {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
