use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

use super::raw::{RawPurchase, RawSpin};
use crate::engine::errors::IngestError;
use crate::engine::types::{PurchaseRecord, SpinRecord};
use crate::shared::config::IngestConfig;
use crate::shared::datetime::{TimestampParser, truncate_to_hour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    Spins,
    Purchases,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Spins => write!(f, "spins"),
            Stream::Purchases => write!(f, "purchases"),
        }
    }
}

/// A raw row that could not be typed. It never reaches the core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub stream: Stream,
    /// 0-based position in the raw input
    pub row: usize,
    pub reason: String,
}

impl Rejection {
    fn new(stream: Stream, row: usize, reason: impl Into<String>) -> Self {
        Self {
            stream,
            row,
            reason: reason.into(),
        }
    }
}

/// Typed, deduplicated inputs plus everything that was turned away.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub spins: Vec<SpinRecord>,
    pub purchases: Vec<PurchaseRecord>,
    pub rejections: Vec<Rejection>,
}

impl NormalizedBatch {
    pub fn from_records(spins: Vec<SpinRecord>, purchases: Vec<PurchaseRecord>) -> Self {
        Self {
            spins,
            purchases,
            rejections: Vec::new(),
        }
    }
}

/// Schema-validation boundary between raw exports and the core.
#[derive(Debug, Clone)]
pub struct Normalizer {
    parser: TimestampParser,
    default_currency: String,
}

impl Normalizer {
    pub fn new(cfg: &IngestConfig) -> Result<Self, IngestError> {
        let parser = TimestampParser::new(cfg.timezone.as_deref()).map_err(IngestError::Config)?;
        Ok(Self {
            parser,
            default_currency: cfg.default_currency.clone(),
        })
    }

    pub fn normalize(&self, spins: &[RawSpin], purchases: &[RawPurchase]) -> NormalizedBatch {
        let (spins, mut rejections) = self.normalize_spins(spins);
        let (purchases, purchase_rejections) = self.normalize_purchases(purchases);
        rejections.extend(purchase_rejections);

        for r in &rejections {
            warn!(stream = %r.stream, row = r.row, "Rejected row: {}", r.reason);
        }
        info!(
            spins = spins.len(),
            purchases = purchases.len(),
            rejected = rejections.len(),
            "Normalized input batch"
        );

        NormalizedBatch {
            spins,
            purchases,
            rejections,
        }
    }

    /// Type spin rows, merging duplicates on (hour, user_id, country).
    ///
    /// Duplicates are summed before rounding so fractional exports add up the
    /// same way the source intended; rounding is half-to-even.
    pub fn normalize_spins(&self, raw: &[RawSpin]) -> (Vec<SpinRecord>, Vec<Rejection>) {
        let mut merged: IndexMap<(chrono::NaiveDateTime, String, String), f64> = IndexMap::new();
        let mut rejections = Vec::new();

        for (row, spin) in raw.iter().enumerate() {
            let user_id = spin.user_id.trim();
            let country = spin.country.trim();
            if user_id.is_empty() {
                rejections.push(Rejection::new(Stream::Spins, row, "empty user_id"));
                continue;
            }
            if country.is_empty() {
                rejections.push(Rejection::new(Stream::Spins, row, "empty country"));
                continue;
            }
            let Some(ts) = self.parser.parse(&spin.date) else {
                rejections.push(Rejection::new(
                    Stream::Spins,
                    row,
                    format!("unparseable date '{}'", spin.date),
                ));
                continue;
            };
            let spins = match spin.total_spins.as_f64() {
                Some(n) if n.is_finite() && n >= 0.0 => n,
                _ => {
                    rejections.push(Rejection::new(
                        Stream::Spins,
                        row,
                        format!("invalid total_spins {:?}", spin.total_spins),
                    ));
                    continue;
                }
            };

            let hour = truncate_to_hour(ts);
            if hour != ts {
                debug!(row, date = %spin.date, "Spin timestamp not on the hour, truncated");
            }
            *merged
                .entry((hour, user_id.to_string(), country.to_uppercase()))
                .or_insert(0.0) += spins;
        }

        let merged_away = raw.len() - rejections.len() - merged.len();
        if merged_away > 0 {
            debug!(merged_away, "Merged duplicate spin rows");
        }

        let records = merged
            .into_iter()
            .map(|((hour, user_id, country), total)| SpinRecord {
                hour,
                user_id,
                country,
                total_spins: total.round_ties_even() as u64,
            })
            .collect();

        (records, rejections)
    }

    /// Type purchase rows. The first occurrence of a transaction id wins,
    /// even when that occurrence is itself rejected.
    pub fn normalize_purchases(
        &self,
        raw: &[RawPurchase],
    ) -> (Vec<PurchaseRecord>, Vec<Rejection>) {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut records = Vec::new();
        let mut rejections = Vec::new();
        let mut duplicates = 0usize;

        for (row, purchase) in raw.iter().enumerate() {
            let transaction_id = purchase.transaction_id.trim();
            if transaction_id.is_empty() {
                rejections.push(Rejection::new(
                    Stream::Purchases,
                    row,
                    "empty transaction_id",
                ));
                continue;
            }
            if !seen.insert(transaction_id) {
                duplicates += 1;
                continue;
            }

            let user_id = purchase.user_id.trim();
            if user_id.is_empty() {
                rejections.push(Rejection::new(Stream::Purchases, row, "empty user_id"));
                continue;
            }
            let Some(timestamp) = self.parser.parse(&purchase.date) else {
                rejections.push(Rejection::new(
                    Stream::Purchases,
                    row,
                    format!("unparseable date '{}'", purchase.date),
                ));
                continue;
            };
            let price = match purchase.revenue.as_price() {
                Some(p) if p.amount.is_finite() && p.amount >= 0.0 => p,
                _ => {
                    rejections.push(Rejection::new(
                        Stream::Purchases,
                        row,
                        format!("invalid revenue {:?}", purchase.revenue),
                    ));
                    continue;
                }
            };

            let currency = purchase
                .currency
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_uppercase)
                .or(price.currency)
                .unwrap_or_else(|| self.default_currency.clone());

            records.push(PurchaseRecord {
                transaction_id: transaction_id.to_string(),
                timestamp,
                user_id: user_id.to_string(),
                revenue: price.amount,
                currency,
            });
        }

        if duplicates > 0 {
            debug!(duplicates, "Dropped duplicate transaction ids");
        }

        (records, rejections)
    }
}
