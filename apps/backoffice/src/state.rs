//! # Application State
//!
//! Everything a command needs, built once per invocation.
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐
//! │    AppConfig     │ │   SharedStore    │ │       today          │
//! │                  │ │                  │ │                      │
//! │  • Letterhead    │ │  • Sample data   │ │  • As-of date for    │
//! │  • Currency      │ │  • Default tax   │ │    every date rule   │
//! │  • Export dir    │ │    rate applied  │ │  • --date override   │
//! └──────────────────┘ └──────────────────┘ └──────────────────────┘
//! ```
//!
//! The as-of date is injected instead of read from the clock inside the
//! derivers, so a run can be replayed for any day.

use chrono::NaiveDate;
use estate_store::{seed, EntityStore, SharedStore};
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: SharedStore,
    pub today: NaiveDate,
}

impl AppState {
    /// Builds the store from the sample dataset as of `today`.
    pub fn new(config: AppConfig, today: NaiveDate) -> AppResult<Self> {
        let mut store = EntityStore::new()
            .with_default_tax_rate(config.tax_rate()?)
            .with_as_of(today);
        seed::seed(&mut store, today)?;

        info!(%today, "State initialized");
        Ok(AppState {
            config,
            store: SharedStore::new(store),
            today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_uses_configured_tax_rate() {
        let mut config = AppConfig::default();
        config.finance.default_tax_rate = 14.0;
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        let state = AppState::new(config, today).unwrap();

        state.store.with_store(|store| {
            assert_eq!(store.default_tax_rate().percent(), 14.0);
            assert!(store
                .invoices()
                .iter()
                .all(|invoice| invoice.tax_rate.percent() == 14.0));
        });
    }
}
