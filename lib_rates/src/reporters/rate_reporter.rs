//! # Rate Reporter
//!
//! Reads today's and yesterday's records in one batched call and reports, for
//! every currency in today's record, the current rate and its change.
//!
//! The change is `today - yesterday` formatted to four decimals. When
//! yesterday has no usable rate for a currency (absent, zero or NaN) the change
//! is the literal marker `"N/A"`. Currencies that only exist yesterday are
//! dropped. A missing record for either day behaves like an empty mapping.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

use crate::connections::store::RateStore;
use crate::core::calendar::{previous_day, today_utc};
use crate::core::envelope::Envelope;
use crate::core::error::RatesError;
use crate::markets::ecb::RateMap;

/// Marker used when no previous rate exists.
pub const NOT_AVAILABLE: &str = "N/A";
/// Message returned on any report failure.
pub const REPORT_FAILED: &str = "Failed to retrieve exchange rates.";

/// One currency line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateChange {
    /// Today's rate.
    pub current_rate: f64,
    /// Signed change to four decimals, or `"N/A"`.
    pub change: String,
}

/// The report body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateReport {
    /// The date reported on, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Currency → line.
    pub rates: BTreeMap<String, RateChange>,
}

/// Four-decimal rendering where an exact half-way value rounds away from zero.
///
/// `{:.4}` alone rounds exact ties to even. A binary double can only sit exactly
/// on a fourth-decimal tie when `(2n + 1) / 20000` is dyadic, i.e. when `2n + 1`
/// is a multiple of 625.
fn to_fixed4(value: f64) -> String {
    let scaled = value * 1e4;
    let floor = scaled.floor();
    let odd = 2.0 * floor + 1.0;
    if scaled - floor == 0.5 && odd % 625.0 == 0.0 && (floor + 0.5) / 1e4 == value {
        let away = if value > 0.0 { floor + 1.0 } else { floor };
        return format!("{:.4}", away / 1e4);
    }
    format!("{:.4}", value)
}

/// Per-currency deltas of `current` against `previous`.
pub fn compute_changes(current: &RateMap, previous: &RateMap) -> BTreeMap<String, RateChange> {
    current
        .iter()
        .map(|(currency, &rate)| {
            let prior = previous.get(currency).copied().unwrap_or(0.0);
            let change = if prior != 0.0 && !prior.is_nan() {
                to_fixed4(rate - prior)
            } else {
                NOT_AVAILABLE.to_string()
            };
            (
                currency.clone(),
                RateChange {
                    current_rate: rate,
                    change,
                },
            )
        })
        .collect()
}

/// Builds the day-over-day report from the store.
pub struct RateReporter {
    store: Arc<dyn RateStore>,
}

impl RateReporter {
    /// Wires a reporter to its store.
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    /// Reports on the current UTC date.
    pub async fn report(&self) -> Envelope {
        self.report_on(today_utc()).await
    }

    /// Reports on `today` against the day before.
    pub async fn report_on(&self, today: NaiveDate) -> Envelope {
        match self.try_report_on(today).await {
            Ok(report) => Envelope::ok(&report),
            Err(e) => {
                error!(kind = e.kind(), error = %e, date = %today, "error retrieving exchange rates");
                Envelope::failure(REPORT_FAILED)
            }
        }
    }

    /// The typed form of [`report_on`](Self::report_on).
    pub async fn try_report_on(&self, today: NaiveDate) -> Result<RateReport, RatesError> {
        let yesterday = previous_day(today);
        let records = self.store.batch_get(&[today, yesterday]).await?;

        let empty = RateMap::new();
        let current = records.iter().find(|r| r.date == today).map_or(&empty, |r| &r.rates);
        let previous = records.iter().find(|r| r.date == yesterday).map_or(&empty, |r| &r.rates);

        let rates = compute_changes(current, previous);
        info!(date = %today, currencies = rates.len(), "exchange rate report built");
        Ok(RateReport { date: today, rates })
    }
}
