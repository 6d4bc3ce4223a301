use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use uuid::Uuid;

use crate::jobs::models::JobResult;

/// `job_data_<run id>.json`, so concurrent runs never share a file.
pub fn export_filename(run_id: Uuid) -> String {
    format!("job_data_{run_id}.json")
}

/// Writes `results` as a pretty-printed JSON array to `dir/filename`, creating `dir`.
pub async fn save_to_json(results: &[JobResult], dir: &Path, filename: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;

    let path = dir.join(filename);
    let body = serde_json::to_vec_pretty(results)?;
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("Failed to write '{}'", path.display()))?;

    info!("Saved {} job results to {}", results.len(), path.display());
    Ok(path)
}
