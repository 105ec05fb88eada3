//! Prints a per-workload summary of the generated request files.

use std::path::Path;

use reqgen_workload::Batch;
use yansi::Paint;

/// Prints the summary for one generated workload.
pub fn print_workload(name: &str, path: &Path, batch: &Batch) {
    println!(
        "{} {} -> {}",
        "## Workload".bold(),
        name.bold().blue(),
        path.display()
    );
    println!(
        "  {} lines ({} fresh, {} reused)",
        batch.len().bold(),
        batch.fresh(),
        batch.reused()
    );
}
