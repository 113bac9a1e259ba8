//! Simulation report generation.

use serde::Serialize;

use super::runner::RunStats;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_cleared: u32,
    pub runs_died: u32,
    pub runs_timed_out: u32,
    pub clear_rate: f64,

    pub avg_final_level: f64,
    pub avg_final_area: f64,
    pub avg_actions: f64,
    pub avg_battles_won: f64,
    pub avg_weapons_equipped: f64,
    pub total_abnormal_kills: u64,

    /// Deaths indexed by area (index 0 = area 1)
    pub deaths_per_area: Vec<u32>,

    pub runs: Vec<RunStats>,
}

fn average(runs: &[RunStats], field: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(field).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, area_count: u32, max_actions: u64) -> Self {
        let num_runs = runs.len() as u32;
        let runs_cleared = runs.iter().filter(|r| r.cleared).count() as u32;
        let runs_died = runs.iter().filter(|r| r.died).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.cleared && !r.died && r.actions >= max_actions)
            .count() as u32;

        let mut deaths_per_area = vec![0u32; area_count as usize];
        for run in runs.iter().filter(|r| r.died) {
            if let Some(slot) = deaths_per_area.get_mut(run.final_area.saturating_sub(1) as usize) {
                *slot += 1;
            }
        }

        Self {
            num_runs,
            runs_cleared,
            runs_died,
            runs_timed_out,
            clear_rate: if num_runs == 0 {
                0.0
            } else {
                runs_cleared as f64 / num_runs as f64
            },
            avg_final_level: average(&runs, |r| r.final_level as f64),
            avg_final_area: average(&runs, |r| r.final_area as f64),
            avg_actions: average(&runs, |r| r.actions as f64),
            avg_battles_won: average(&runs, |r| r.battles_won as f64),
            avg_weapons_equipped: average(&runs, |r| r.weapons_equipped as f64),
            total_abnormal_kills: runs.iter().map(|r| r.abnormal_kills).sum(),
            deaths_per_area,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} cleared, {} died, {} timed out\n\n",
            self.num_runs, self.runs_cleared, self.runs_died, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Clear Rate:          {:.1}%\n",
            self.clear_rate * 100.0
        ));
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Final Area:      {:.2}\n", self.avg_final_area));
        report.push_str(&format!("  Avg Actions:         {:.0}\n", self.avg_actions));
        report.push_str(&format!("  Avg Battles Won:     {:.1}\n", self.avg_battles_won));
        report.push_str(&format!(
            "  Avg Weapons Taken:   {:.1}\n",
            self.avg_weapons_equipped
        ));
        report.push_str(&format!(
            "  Abnormal Kills:      {}\n\n",
            self.total_abnormal_kills
        ));

        report.push_str("── DEATHS BY AREA ───────────────────────────────────────────────\n");
        for (index, deaths) in self.deaths_per_area.iter().enumerate() {
            let pct = if self.num_runs == 0 {
                0.0
            } else {
                *deaths as f64 / self.num_runs as f64 * 100.0
            };
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  Area {:2}: {:>5.1}% {}\n",
                index + 1,
                pct,
                bar
            ));
        }

        report
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
