//! Report printing for the CLI.

use anyhow::Result;
use asistencia_lib::SyncReport;

/// Prints the final report: a short human summary followed by the JSON
/// document, or the JSON alone.
pub fn print_report(report: &SyncReport, json_only: bool) -> Result<()> {
    if !json_only {
        print_summary(report);
    }
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_summary(report: &SyncReport) {
    let status = if report.success { "ok" } else { "with failures" };
    println!("\nSync finished {} in {} ms", status, report.duration_ms);
    println!(
        "  scraped: {} parties, {} politicians, {} rows",
        report.steps.scraping.parties_count,
        report.steps.scraping.politicians_count,
        report.steps.scraping.attendance_count
    );
    println!(
        "  parties: {} created, {} existing, {} failed",
        report.steps.party_creation.created_count,
        report.steps.party_creation.existing_count,
        report.steps.party_creation.failure_count
    );
    println!(
        "  politicians: {} created, {} existing, {} failed",
        report.steps.politician_creation.created_count,
        report.steps.politician_creation.existing_count,
        report.steps.politician_creation.failure_count
    );
    println!("\nSync result:");
}

#[cfg(test)]
mod tests {
    use asistencia_lib::{ScrapeStep, SyncReport, SyncSteps};
    use chrono::Utc;

    fn sample_report() -> SyncReport {
        SyncReport {
            success: true,
            start_time: Utc::now(),
            end_time: Some(Utc::now()),
            duration_ms: 1234,
            steps: SyncSteps {
                scraping: ScrapeStep {
                    success: true,
                    parties_count: 1,
                    politicians_count: 2,
                    attendance_count: 2,
                },
                ..SyncSteps::default()
            },
        }
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert!(json.get("startTime").is_some());
        assert_eq!(json["steps"]["scraping"]["politiciansCount"], 2);
        assert_eq!(json["steps"]["partyCreation"]["failureCount"], 0);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: SyncReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.duration_ms, report.duration_ms);
        assert_eq!(back.steps.scraping.politicians_count, 2);
    }
}
