use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters for store operations.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
    pub since_ms: u64,
}

impl EventState {
    pub(crate) fn entity_mut(&mut self, entity: &'static str) -> &mut EntityCounters {
        self.entities.entry(entity.to_string()).or_default()
    }
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            entities: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Store entrypoints
    pub inserts: u64,
    pub replaces: u64,
    pub removes: u64,
    pub selects: u64,

    // Rows touched
    pub rows_matched: u64,

    // Draft submissions blocked by validation
    pub validation_rejections: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct EntityCounters {
    pub inserts: u64,
    pub replaces: u64,
    pub removes: u64,
    pub selects: u64,
    pub rows_matched: u64,
    pub validation_rejections: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the counters.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
    pub since_ms: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Snapshot the counters.
pub(crate) fn report() -> EventReport {
    EVENT_STATE.with(|m| {
        let state = m.borrow();

        EventReport {
            ops: state.ops,
            entities: state.entities.clone(),
            since_ms: state.since_ms,
        }
    })
}

/// Reset all counters.
pub(crate) fn reset() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// TESTS
///
