use std::sync::Arc;

use anyhow::{Context, Result};
use macroseries::{DataSource, SourceConfig};
use macroseries_imf::ImfConnector;
use macroseries_mock::MockSource;
use tracing::info;

/// Environment variable that swaps the IMF connector for deterministic fixtures.
pub const USE_MOCK_ENV: &str = "MACROSERIES_USE_MOCK";

/// Build the data source: the IMF connector, or the mock when `MACROSERIES_USE_MOCK` is set.
pub fn select(cfg: &SourceConfig) -> Result<Arc<dyn DataSource>> {
    if std::env::var_os(USE_MOCK_ENV).is_some() {
        info!("using mock data source");
        return Ok(Arc::new(MockSource::new()));
    }
    let imf = ImfConnector::from_config(cfg)
        .with_context(|| format!("failed to set up IMF connector for {}", cfg.base_url))?;
    info!(base_url = %imf.base_url(), "using IMF data source");
    Ok(Arc::new(imf))
}
