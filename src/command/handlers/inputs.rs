use std::path::Path;
use tracing::info;

use crate::engine::errors::IngestError;
use crate::engine::ingest::{NormalizedBatch, Normalizer, RawPurchase, RawSpin, load_records};
use crate::shared::config::IngestConfig;

/// Read both exports concurrently and type them.
pub async fn load_batch(
    spins: &Path,
    purchases: &Path,
    cfg: &IngestConfig,
) -> Result<NormalizedBatch, IngestError> {
    let normalizer = Normalizer::new(cfg)?;
    let (raw_spins, raw_purchases) = tokio::try_join!(
        load_records::<RawSpin>(spins),
        load_records::<RawPurchase>(purchases),
    )?;
    info!(
        spins = raw_spins.len(),
        purchases = raw_purchases.len(),
        "Loaded raw exports"
    );
    Ok(normalizer.normalize(&raw_spins, &raw_purchases))
}
