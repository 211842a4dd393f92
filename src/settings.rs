//! Loading navigation configuration from disk

use anyhow::Context;
use app_ui::NavigationConfig;
use std::path::Path;

/// Read and validate a JSON navigation config
pub async fn load_config(path: impl AsRef<Path>) -> anyhow::Result<NavigationConfig> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    match NavigationConfig::from_json(&text) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "navigation config loaded");
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "navigation config rejected");
            Err(e).with_context(|| format!("invalid navigation config in {}", path.display()))
        }
    }
}
