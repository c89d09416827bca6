//! Connectivity status derivation from the last-update timestamp.

use time::{Duration, OffsetDateTime};

use super::types::ConnectivityStatus;

/// Readings at most this old are `connected`.
pub const CONNECTED_WINDOW: Duration = Duration::seconds(10);

/// Readings at most this old (and older than [`CONNECTED_WINDOW`]) are `stale`.
pub const STALE_WINDOW: Duration = Duration::seconds(30);

impl ConnectivityStatus {
    /// Classify the freshness of a reading last accepted at `last_update`.
    ///
    /// Both band edges are inclusive: exactly 10s is connected, exactly 30s
    /// is stale. A `now` earlier than `last_update` counts as zero elapsed.
    pub fn evaluate(last_update: Option<OffsetDateTime>, now: OffsetDateTime) -> Self {
        let Some(last_update) = last_update else {
            return ConnectivityStatus::Offline;
        };

        let elapsed = (now - last_update).max(Duration::ZERO);

        if elapsed <= CONNECTED_WINDOW {
            ConnectivityStatus::Connected
        } else if elapsed <= STALE_WINDOW {
            ConnectivityStatus::Stale
        } else {
            ConnectivityStatus::Offline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const T: OffsetDateTime = datetime!(2024-03-10 08:00:00 UTC);

    fn at(ms: i64) -> ConnectivityStatus {
        ConnectivityStatus::evaluate(Some(T), T + Duration::milliseconds(ms))
    }

    #[test]
    fn offline_without_any_update() {
        assert_eq!(
            ConnectivityStatus::evaluate(None, T),
            ConnectivityStatus::Offline
        );
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(at(0), ConnectivityStatus::Connected);
        assert_eq!(at(9_000), ConnectivityStatus::Connected);
        assert_eq!(at(10_000), ConnectivityStatus::Connected);
        assert_eq!(at(10_001), ConnectivityStatus::Stale);
        assert_eq!(at(30_000), ConnectivityStatus::Stale);
        assert_eq!(at(30_001), ConnectivityStatus::Offline);
        assert_eq!(at(3_600_000), ConnectivityStatus::Offline);
    }

    #[test]
    fn clock_behind_last_update_counts_as_fresh() {
        assert_eq!(at(-5_000), ConnectivityStatus::Connected);
    }
}
