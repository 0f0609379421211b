//! Metric names for the cache subsystem.

use std::sync::Once;

use metrics::{Unit, describe_counter};

pub(crate) const METRIC_FAST_HIT: &str = "sentix_cache_fast_hit_total";
pub(crate) const METRIC_DURABLE_HIT: &str = "sentix_cache_durable_hit_total";
pub(crate) const METRIC_MISS: &str = "sentix_cache_miss_total";
pub(crate) const METRIC_FAST_EVICT: &str = "sentix_cache_fast_evict_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Register metric descriptions with the installed recorder, at most once.
pub(crate) fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_FAST_HIT,
            Unit::Count,
            "Total number of reads served from the in-memory tier."
        );
        describe_counter!(
            METRIC_DURABLE_HIT,
            Unit::Count,
            "Total number of reads served from the durable tier (with promotion)."
        );
        describe_counter!(
            METRIC_MISS,
            Unit::Count,
            "Total number of reads that found no fresh record in either tier."
        );
        describe_counter!(
            METRIC_FAST_EVICT,
            Unit::Count,
            "Total number of fast-tier records evicted due to capacity."
        );
    });
}
