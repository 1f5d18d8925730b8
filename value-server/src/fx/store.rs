//! In-memory EUR-base rate table.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::domain::CurrencyCode;

/// Daily EUR-base rates: date → (currency → EUR→currency rate).
///
/// Every stored rate is positive; the loader and refresh client drop
/// anything else before it reaches the table.
pub type FxTable = BTreeMap<NaiveDate, HashMap<CurrencyCode, f64>>;

/// Thread-safe, refreshable FX rate store.
///
/// Reads take a shared lock; the daily refresh takes the write lock just
/// long enough to insert one day's row.
#[derive(Clone)]
pub struct FxStore {
    inner: Arc<RwLock<FxTable>>,
}

impl FxStore {
    /// Create a store from a pre-loaded table.
    pub fn new(table: FxTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    /// Create an empty store.
    pub fn empty() -> Self {
        Self::new(FxTable::new())
    }

    /// The most recent date with any rates.
    pub async fn latest_date(&self) -> Option<NaiveDate> {
        let table = self.inner.read().await;
        table.keys().next_back().copied()
    }

    /// Number of days of data.
    pub async fn day_count(&self) -> usize {
        let table = self.inner.read().await;
        table.len()
    }

    /// Insert (or replace) one day's EUR-base rates. Returns the number of
    /// currencies stored for that day.
    pub async fn insert_day(&self, date: NaiveDate, rates: HashMap<CurrencyCode, f64>) -> usize {
        let count = rates.len();
        let mut table = self.inner.write().await;
        table.insert(date, rates);
        count
    }

    /// Take a read guard over the whole table for multi-lookup operations.
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, FxTable> {
        self.inner.read().await
    }
}
