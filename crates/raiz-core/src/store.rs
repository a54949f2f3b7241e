use crate::{
    error::InternalError,
    filter::FilterExpr,
    id::RecordId,
    obs,
    value::FieldValues,
};
use derive_more::{Deref, DerefMut};
use std::collections::BTreeMap;

///
/// Record
///
/// A value that can live in a `Store`: it carries a stable entity name
/// (used for counters and error messages) and exposes its own id.
///

pub trait Record: Clone + FieldValues {
    const ENTITY_NAME: &'static str;

    fn id(&self) -> RecordId;
}

///
/// Store
///
/// In-memory record store for one entity. Backed by a `BTreeMap` keyed by
/// `RecordId`; since ids are timestamp-derived, key order is creation order,
/// which preserves the seeded-array semantics of the fixtures.
///

#[derive(Debug, Deref, DerefMut)]
pub struct Store<E: Record>(BTreeMap<RecordId, E>);

impl<E: Record> Default for Store<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> Store<E> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a store seeded with the given records.
    /// Duplicate seed ids are rejected.
    pub fn seeded(records: impl IntoIterator<Item = E>) -> Result<Self, InternalError> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }

        Ok(store)
    }

    /// Insert a new record; the id must not already be present.
    pub fn insert(&mut self, record: E) -> Result<(), InternalError> {
        let id = record.id();
        if self.0.contains_key(&id) {
            return Err(InternalError::store_duplicate(E::ENTITY_NAME, id));
        }

        self.0.insert(id, record);
        obs::record_insert(E::ENTITY_NAME);

        Ok(())
    }

    /// Replace the record with the same id; the id must be present.
    pub fn replace(&mut self, record: E) -> Result<(), InternalError> {
        let id = record.id();
        if !self.0.contains_key(&id) {
            return Err(InternalError::store_not_found(E::ENTITY_NAME, id));
        }

        self.0.insert(id, record);
        obs::record_replace(E::ENTITY_NAME);

        Ok(())
    }

    /// Remove exactly the record with the given id.
    pub fn remove(&mut self, id: RecordId) -> Result<E, InternalError> {
        let removed = self
            .0
            .remove(&id)
            .ok_or_else(|| InternalError::store_not_found(E::ENTITY_NAME, id))?;
        obs::record_remove(E::ENTITY_NAME);

        Ok(removed)
    }

    /// Look up one record by id.
    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&E> {
        self.0.get(&id)
    }

    /// All records in id (creation) order.
    #[must_use]
    pub fn records(&self) -> Vec<E> {
        self.0.values().cloned().collect()
    }

    /// Records matching the filter, in id (creation) order.
    #[must_use]
    pub fn select(&self, filter: &FilterExpr) -> Vec<E> {
        let matched: Vec<E> = self
            .0
            .values()
            .filter(|record| filter.eval(*record))
            .cloned()
            .collect();
        obs::record_select(E::ENTITY_NAME, matched.len() as u64);

        matched
    }

    /// Number of records matching the filter, without materializing them.
    #[must_use]
    pub fn count(&self, filter: &FilterExpr) -> usize {
        self.0.values().filter(|record| filter.eval(*record)).count()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
    struct Widget {
        id: RecordId,
        name: String,
    }

    impl Record for Widget {
        const ENTITY_NAME: &'static str = "widget";

        fn id(&self) -> RecordId {
            self.id
        }
    }

    impl FieldValues for Widget {
        fn field_value(&self, field: &str) -> Option<Value> {
            match field {
                "id" => Some(Value::Id(self.id)),
                "name" => Some(Value::Text(self.name.clone())),
                _ => None,
            }
        }
    }

    fn widget(seq: u128, name: &str) -> Widget {
        Widget {
            id: RecordId::from_parts(1_700_000_000_000, seq),
            name: name.to_string(),
        }
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut store = Store::new();
        store.insert(widget(1, "a")).unwrap();

        let err = store.insert(widget(1, "b")).unwrap_err();
        assert_eq!(err.class, crate::error::ErrorClass::Conflict);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_requires_existing_id() {
        let mut store = Store::new();
        store.insert(widget(1, "a")).unwrap();

        store.replace(widget(1, "a2")).unwrap();
        assert_eq!(store.record(widget(1, "a").id).unwrap().name, "a2");

        assert!(store.replace(widget(2, "b")).is_err());
    }

    #[test]
    fn remove_takes_exactly_one() {
        let mut store = Store::seeded([widget(1, "a"), widget(2, "b"), widget(3, "c")]).unwrap();

        let removed = store.remove(widget(2, "b").id).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(
            store.records().iter().map(|w| w.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }

    #[test]
    fn select_preserves_creation_order() {
        let store = Store::seeded([widget(3, "casa"), widget(1, "casona"), widget(2, "finca")])
            .unwrap();

        let matched = store.select(&FilterExpr::contains_ci("name", "cas"));
        assert_eq!(
            matched.iter().map(|w| w.name.as_str()).collect::<Vec<_>>(),
            vec!["casona", "casa"]
        );
        assert_eq!(store.count(&FilterExpr::contains_ci("name", "cas")), 2);
    }
}
