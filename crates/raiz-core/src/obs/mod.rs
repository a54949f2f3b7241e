//! Observability: ephemeral operation counters for the in-memory stores.
//!
//! This module does not access store internals directly; stores report
//! their own operations.

pub(crate) mod metrics;

pub use metrics::{EntityCounters, EventOps, EventReport};

/// Record an insert against an entity store.
pub(crate) fn record_insert(entity: &'static str) {
    metrics::with_state_mut(|m| {
        m.ops.inserts += 1;
        m.entity_mut(entity).inserts += 1;
    });
}

/// Record a replace against an entity store.
pub(crate) fn record_replace(entity: &'static str) {
    metrics::with_state_mut(|m| {
        m.ops.replaces += 1;
        m.entity_mut(entity).replaces += 1;
    });
}

/// Record a remove against an entity store.
pub(crate) fn record_remove(entity: &'static str) {
    metrics::with_state_mut(|m| {
        m.ops.removes += 1;
        m.entity_mut(entity).removes += 1;
    });
}

/// Record a filtered select and the number of rows it matched.
pub(crate) fn record_select(entity: &'static str, rows: u64) {
    metrics::with_state_mut(|m| {
        m.ops.selects += 1;
        m.ops.rows_matched += rows;
        let counters = m.entity_mut(entity);
        counters.selects += 1;
        counters.rows_matched += rows;
    });
}

/// Record a draft submission rejected by validation.
pub fn record_validation_rejection(entity: &'static str) {
    metrics::with_state_mut(|m| {
        m.ops.validation_rejections += 1;
        m.entity_mut(entity).validation_rejections += 1;
    });
}

/// Snapshot the counters.
#[must_use]
pub fn report() -> EventReport {
    metrics::report()
}

/// Reset all counters (useful in tests).
pub fn reset() {
    metrics::reset();
}
