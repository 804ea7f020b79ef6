//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one autopilot session.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub score: u32,
    pub ticks: u64,
    pub taps: u64,
    /// Still alive when the tick cap was reached.
    pub timed_out: bool,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,

    pub avg_score: f64,
    pub max_score: u32,
    pub min_score: u32,
    pub avg_ticks: f64,
    pub avg_taps: f64,

    /// Score → number of runs that ended with it.
    pub score_distribution: BTreeMap<u32, u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let mean = |total: f64| {
            if num_runs == 0 {
                0.0
            } else {
                total / num_runs as f64
            }
        };
        let avg_score = mean(runs.iter().map(|r| r.score as f64).sum());
        let avg_ticks = mean(runs.iter().map(|r| r.ticks as f64).sum());
        let avg_taps = mean(runs.iter().map(|r| r.taps as f64).sum());

        let max_score = runs.iter().map(|r| r.score).max().unwrap_or(0);
        let min_score = runs.iter().map(|r| r.score).min().unwrap_or(0);

        let mut score_distribution = BTreeMap::new();
        for run in &runs {
            *score_distribution.entry(run.score).or_insert(0) += 1;
        }

        Self {
            num_runs,
            runs_timed_out,
            avg_score,
            max_score,
            min_score,
            avg_ticks,
            avg_taps,
            score_distribution,
            run_stats: runs,
        }
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── SCORES ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:           {:.2}\n", self.avg_score));
        report.push_str(&format!("  Best Score:          {}\n", self.max_score));
        report.push_str(&format!("  Worst Score:         {}\n", self.min_score));
        report.push_str(&format!(
            "  Avg Survival:        {:.0} ticks ({:.1}s)\n",
            self.avg_ticks,
            self.avg_ticks * crate::constants::TICK_INTERVAL_MS as f64 / 1000.0
        ));
        report.push_str(&format!("  Avg Taps:            {:.0}\n\n", self.avg_taps));

        report.push_str("── DISTRIBUTION ─────────────────────────────────────────────────\n");
        let widest = self.score_distribution.values().copied().max().unwrap_or(0);
        for (score, count) in &self.score_distribution {
            let bar_len = if widest > 0 {
                (*count as usize * 40).div_ceil(widest as usize)
            } else {
                0
            };
            report.push_str(&format!(
                "  {:>4} │ {} {}\n",
                score,
                "█".repeat(bar_len),
                count
            ));
        }

        report
    }

    /// Generate JSON output for programmatic analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
