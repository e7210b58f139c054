//! Run Report
//!
//! Bundles scenario outcomes and simulation results for output as JSON or text.

use std::fmt::Write as _;

use serde::Serialize;

use crate::scenarios::ScenarioOutcome;
use crate::workload::SimReport;

// == Run Report ==
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// RFC 3339 timestamp of report creation
    pub generated_at: String,
    pub scenarios: Vec<ScenarioOutcome>,
    pub simulations: Vec<SimReport>,
}

impl RunReport {
    /// Creates a report stamped with the current time.
    pub fn new(scenarios: Vec<ScenarioOutcome>, simulations: Vec<SimReport>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            scenarios,
            simulations,
        }
    }

    pub fn scenarios_passed(&self) -> bool {
        self.scenarios.iter().all(ScenarioOutcome::all_passed)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders a plain-text table of both sections.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "report generated at {}", self.generated_at);
        let _ = writeln!(out, "\nscenarios");
        for s in &self.scenarios {
            let _ = writeln!(out, "  {:<14} {}/{}", s.variant, s.passed, s.total);
        }
        let _ = writeln!(out, "\nsimulations");
        for r in &self.simulations {
            let _ = writeln!(
                out,
                "  {:<14} hit_rate={:.3} hits={} misses={} evictions={} expirations={} write_backs={} failed_puts={}",
                r.variant,
                r.hit_rate,
                r.stats.hits,
                r.stats.misses,
                r.stats.evictions,
                r.stats.expirations,
                r.stats.write_backs,
                r.failed_puts
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;

    fn sample() -> RunReport {
        RunReport::new(
            vec![ScenarioOutcome {
                variant: "lru",
                passed: 5,
                total: 5,
            }],
            vec![SimReport {
                variant: "lru".to_string(),
                accesses: 10,
                failed_puts: 0,
                hit_rate: 0.5,
                stats: CacheStats::new(),
            }],
        )
    }

    #[test]
    fn test_generated_at_is_rfc3339() {
        let report = sample();
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
    }

    #[test]
    fn test_json_contains_sections() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["scenarios"][0]["variant"], "lru");
        assert_eq!(json["simulations"][0]["accesses"], 10);
    }

    #[test]
    fn test_text_lists_variants() {
        let text = sample().to_text();
        assert!(text.contains("lru"));
        assert!(text.contains("5/5"));
        assert!(text.contains("hit_rate=0.500"));
    }

    #[test]
    fn test_scenarios_passed() {
        let mut report = sample();
        assert!(report.scenarios_passed());
        report.scenarios[0].passed = 4;
        assert!(!report.scenarios_passed());
    }
}
