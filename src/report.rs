use crate::prober::ProbeOutcome;

/// Aggregate over one run's outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub failures: Vec<ProbeOutcome>,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: Vec<ProbeOutcome>) -> Self {
        let total = outcomes.len();
        let successful = outcomes.iter().filter(|o| o.success).count();
        let failures: Vec<ProbeOutcome> =
            outcomes.into_iter().filter(|o| !o.success).collect();
        Self {
            total,
            successful,
            failed: failures.len(),
            failures,
        }
    }

    pub fn all_successful(&self) -> bool {
        self.failed == 0
    }
}

pub fn print_banner() {
    println!("{}", "=".repeat(50));
    println!("Keep-Alive Probe");
    println!("{}", "=".repeat(50));
}

pub fn print_summary(summary: &RunSummary) {
    println!("\n{}", "=".repeat(50));
    println!("Summary:");
    println!("{}", "=".repeat(50));
    println!("Total projects: {}", summary.total);
    println!("Successful: {}", summary.successful);
    println!("Failed: {}", summary.failed);

    if !summary.failures.is_empty() {
        println!("\nFailed projects:");
        for outcome in &summary.failures {
            println!(
                "  - {}: {}",
                outcome.project,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}
