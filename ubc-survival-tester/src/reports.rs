use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use crate::scenarios::ScenarioResult;

pub fn generate_console_report(results: &[ScenarioResult], total_duration: Duration) {
    println!();
    println!("{}", "📊 Logic Test Results Summary".bright_cyan().bold());
    println!("{}", "==============================".cyan());

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    println!("Total scenarios: {total}");
    println!("Passed: {}", passed.to_string().green());
    println!("Failed: {}", failed.to_string().red());
    println!("Total time: {total_duration:?}");
    println!();

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        println!("{} {}", status, result.scenario_name.bold());
        println!(
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        );
        println!("   Average run: {:.2} ms", result.average_ms);

        if !result.ending_counts.is_empty() {
            println!("   Endings:");
            for (headline, count) in &result.ending_counts {
                println!("     {count:4} × {headline}");
            }
        }

        if !result.failures.is_empty() {
            println!("   Failures:");
            for failure in &result.failures {
                println!("     • {}", failure.red());
            }
        }
        println!();
    }
}

/// Render results as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn generate_json_report(results: &[ScenarioResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[must_use]
pub fn generate_markdown_report(results: &[ScenarioResult], total_duration: Duration) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# UBC Survival Logic Test Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total time: {total_duration:?}");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Scenario | Status | Iterations | Avg (ms) |");
    let _ = writeln!(out, "|---|---|---|---|");
    for result in results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(
            out,
            "| {} | {status} | {}/{} | {:.2} |",
            result.scenario_name,
            result.successful_iterations,
            result.iterations_run,
            result.average_ms
        );
    }

    for result in results {
        if !result.ending_counts.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "## Endings — {}", result.scenario_name);
            let _ = writeln!(out);
            for (headline, count) in &result.ending_counts {
                let _ = writeln!(out, "- {headline}: {count}");
            }
        }
        if !result.failures.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "## Failures — {}", result.scenario_name);
            let _ = writeln!(out);
            for failure in &result.failures {
                let _ = writeln!(out, "- {failure}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_result(passed: bool) -> ScenarioResult {
        let mut ending_counts = BTreeMap::new();
        ending_counts.insert("Average UBC Student".to_string(), 3);
        ScenarioResult {
            scenario_name: "smoke".to_string(),
            passed,
            iterations_run: 3,
            successful_iterations: if passed { 3 } else { 2 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["[1337#2] survival out of bounds".to_string()]
            },
            average_ms: 0.42,
            ending_counts,
        }
    }

    #[test]
    fn json_report_round_trips() {
        let text = generate_json_report(&[sample_result(true)]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["scenario_name"], "smoke");
        assert_eq!(parsed[0]["passed"], true);
    }

    #[test]
    fn markdown_report_lists_failures() {
        let text = generate_markdown_report(&[sample_result(false)], Duration::from_millis(5));
        assert!(text.contains("| smoke | FAIL | 2/3 |"));
        assert!(text.contains("survival out of bounds"));
    }
}
