use std::path::Path;

use imgextract_core::BatchResult;
use tracing::{info, warn};

/// Human-readable report lines for a finished run, in display order.
pub fn summary_lines(result: &BatchResult, output_file: &Path) -> Vec<String> {
    vec![
        format!("Complete! Data saved to {}", output_file.display()),
        "Results summary:".to_string(),
        format!("  - Images: {}", result.total_images),
        format!("  - Successful: {}", result.successful_images()),
        format!("  - Failed: {}", result.failed_images.len()),
        format!("  - Success rate: {:.1}%", result.success_rate()),
        format!("  - No data found: {}", result.empty_images.len()),
        format!("  - Total records: {}", result.total_records()),
    ]
}

/// Report the outcome of a run. Emitted whether or not anything failed.
pub fn log_summary(result: &BatchResult, output_file: &Path) {
    info!(
        images = result.total_images,
        successful = result.successful_images(),
        failed = result.failed_images.len(),
        empty = result.empty_images.len(),
        records = result.total_records(),
        "Run finished"
    );
    for line in summary_lines(result, output_file) {
        info!("{}", line);
    }

    if !result.failed_images.is_empty() {
        warn!("Failed images:");
        for name in &result.failed_images {
            warn!("  - {}", name);
        }
    }
}
