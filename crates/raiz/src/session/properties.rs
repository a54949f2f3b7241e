//! Inventory management page: search, kind/status filters, six listings
//! per page, and the create/edit/view/delete panel flows.

use crate::{
    domain::property::{ListingStatus, Property, PropertyDraft, PropertyKind},
    fixtures,
    notify::{MemoryNotifier, Notice, Notifier},
    session::Panel,
};
use raiz_core::{
    error::InternalError,
    filter::FilterExpr,
    id::RecordId,
    obs,
    page::{paginate, PageRequest, Paged},
    store::{Record, Store},
    validate::ValidateDraft,
};

const PAGE_SIZE: u32 = 6;

///
/// PropertySession
///
/// Owns the listing store plus the page's view state. Every filter
/// mutation snaps the cursor back to page 1 so the result list never
/// starts on a page past the end.
///

#[derive(Debug, Default)]
pub struct PropertySession {
    store: Store<Property>,
    notifier: MemoryNotifier,
    search: String,
    kind_filter: Option<PropertyKind>,
    status_filter: Option<ListingStatus>,
    page: u32,
    panel: Panel<PropertyDraft>,
}

impl PropertySession {
    /// An empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// A session over the seed inventory.
    pub fn seeded() -> Result<Self, InternalError> {
        Self::with_records(fixtures::properties()?)
    }

    pub fn with_records(records: impl IntoIterator<Item = Property>) -> Result<Self, InternalError> {
        Ok(Self {
            store: Store::seeded(records)?,
            ..Self::new()
        })
    }

    // --- View state ---

    #[must_use]
    pub const fn store(&self) -> &Store<Property> {
        &self.store
    }

    #[must_use]
    pub const fn panel(&self) -> &Panel<PropertyDraft> {
        &self.panel
    }

    /// Mutable access to the open form draft, for field-by-field typing.
    pub const fn draft_mut(&mut self) -> Option<&mut PropertyDraft> {
        self.panel.draft_mut()
    }

    /// Dismiss one field's issue after the user edits that field.
    pub fn clear_issue(&mut self, field: &str) {
        self.panel.clear_issue(field);
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notifier.notices()
    }

    // --- Filtering and pagination ---

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_kind_filter(&mut self, kind: Option<PropertyKind>) {
        self.kind_filter = kind;
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, status: Option<ListingStatus>) {
        self.status_filter = status;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.kind_filter = None;
        self.status_filter = None;
        self.page = 1;
    }

    /// The page of listings the table shows right now.
    #[must_use]
    pub fn current_page(&self) -> Paged<Property> {
        let matched = self.store.select(&self.filter());

        paginate(matched, PageRequest::new(self.page, PAGE_SIZE))
    }

    pub fn next_page(&mut self) {
        if self.current_page().has_next() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    fn filter(&self) -> FilterExpr {
        let mut expr = FilterExpr::True;

        let needle = self.search.trim();
        if !needle.is_empty() {
            expr = expr
                & (FilterExpr::contains_ci("title", needle)
                    | FilterExpr::contains_ci("address", needle));
        }
        if let Some(kind) = self.kind_filter {
            expr = expr & FilterExpr::eq("kind", kind.label());
        }
        if let Some(status) = self.status_filter {
            expr = expr & FilterExpr::eq("status", status.label());
        }

        expr
    }

    // --- Panel lifecycle ---

    pub fn open_create(&mut self) {
        self.panel = Panel::Create {
            draft: PropertyDraft::default(),
            issues: Default::default(),
        };
    }

    pub fn open_edit(&mut self, id: RecordId) -> Result<(), InternalError> {
        let property = self
            .store
            .record(id)
            .ok_or_else(|| InternalError::store_not_found(Property::ENTITY_NAME, id))?;

        self.panel = Panel::Edit {
            id,
            draft: PropertyDraft::from_property(property),
            issues: Default::default(),
        };

        Ok(())
    }

    pub fn open_view(&mut self, id: RecordId) -> Result<(), InternalError> {
        if self.store.record(id).is_none() {
            return Err(InternalError::store_not_found(Property::ENTITY_NAME, id));
        }
        self.panel = Panel::View(id);

        Ok(())
    }

    pub fn open_delete(&mut self, id: RecordId) -> Result<(), InternalError> {
        if self.store.record(id).is_none() {
            return Err(InternalError::store_not_found(Property::ENTITY_NAME, id));
        }
        self.panel = Panel::ConfirmDelete(id);

        Ok(())
    }

    pub fn cancel(&mut self) {
        self.panel = Panel::Closed;
    }

    // --- Submission ---

    /// Submit the open form. Returns `Ok(true)` when the record was
    /// committed and the panel closed, `Ok(false)` when validation kept
    /// the form open with its issues.
    pub fn submit(&mut self) -> Result<bool, InternalError> {
        match std::mem::take(&mut self.panel) {
            Panel::Create { draft, .. } => {
                if let Err(issues) = draft.validate() {
                    obs::record_validation_rejection(Property::ENTITY_NAME);
                    self.panel = Panel::Create { draft, issues };
                    return Ok(false);
                }

                self.store.insert(draft.into_property(RecordId::generate()))?;
                self.notifier.notify(Notice::success(
                    "Propiedad creada",
                    "La nueva propiedad ha sido creada exitosamente.",
                ));

                Ok(true)
            }
            Panel::Edit { id, draft, .. } => {
                if let Err(issues) = draft.validate() {
                    obs::record_validation_rejection(Property::ENTITY_NAME);
                    self.panel = Panel::Edit { id, draft, issues };
                    return Ok(false);
                }

                self.store.replace(draft.into_property(id))?;
                self.notifier.notify(Notice::success(
                    "Propiedad actualizada",
                    "La propiedad ha sido actualizada exitosamente.",
                ));

                Ok(true)
            }
            other => {
                self.panel = other;

                Err(InternalError::session_invariant(
                    "submit without an open property form",
                ))
            }
        }
    }

    /// Remove the record the confirmation panel points at.
    pub fn confirm_delete(&mut self) -> Result<Property, InternalError> {
        match std::mem::take(&mut self.panel) {
            Panel::ConfirmDelete(id) => {
                let removed = self.store.remove(id)?;
                self.notifier.notify(Notice::success(
                    "Propiedad eliminada",
                    "La propiedad ha sido eliminada exitosamente.",
                ));

                Ok(removed)
            }
            other => {
                self.panel = other;

                Err(InternalError::session_invariant(
                    "delete without a pending confirmation",
                ))
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft(title: &str) -> PropertyDraft {
        PropertyDraft {
            title: title.into(),
            price: "$100,000".into(),
            area: "90".into(),
            address: "Calle Falsa 123".into(),
            ..PropertyDraft::default()
        }
    }

    fn session_with(count: usize) -> PropertySession {
        let mut session = PropertySession::new();
        for i in 0..count {
            session.open_create();
            *session.draft_mut().unwrap() = filled_draft(&format!("Listado {i}"));
            assert!(session.submit().unwrap());
        }

        session
    }

    #[test]
    fn create_flow_inserts_and_notifies() {
        let mut session = PropertySession::new();

        session.open_create();
        *session.draft_mut().unwrap() = filled_draft("Casa Nueva");

        assert!(session.submit().unwrap());
        assert!(session.panel().is_closed());
        assert_eq!(session.store().len(), 1);
        assert_eq!(
            session.notices().last().map(|n| n.title.clone()),
            Some("Propiedad creada".to_string())
        );
    }

    #[test]
    fn invalid_draft_keeps_the_form_open_with_issues() {
        let mut session = PropertySession::new();

        session.open_create();
        session.draft_mut().unwrap().title = "Sin precio".into();

        assert!(!session.submit().unwrap());
        let issues = session.panel().issues().unwrap();
        assert_eq!(issues.get("price"), Some("El precio es requerido"));
        assert_eq!(session.store().len(), 0);
        assert!(session.notices().is_empty());

        // typing into the field dismisses its issue
        session.draft_mut().unwrap().price = "$1".into();
        session.clear_issue("price");
        assert!(session.panel().issues().unwrap().get("price").is_none());
    }

    #[test]
    fn edit_flow_replaces_in_place() {
        let mut session = PropertySession::seeded().unwrap();
        let id = crate::fixtures::casa_moderna_id();

        session.open_edit(id).unwrap();
        session.draft_mut().unwrap().price = "$900,000".into();
        assert!(session.submit().unwrap());

        assert_eq!(session.store().record(id).unwrap().price, "$900,000");
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn delete_flow_removes_exactly_the_selected_record() {
        let mut session = PropertySession::seeded().unwrap();
        let id = crate::fixtures::casa_moderna_id();

        session.open_delete(id).unwrap();
        let removed = session.confirm_delete().unwrap();

        assert_eq!(removed.id, id);
        assert_eq!(session.store().len(), 1);
        assert!(session.store().record(id).is_none());
    }

    #[test]
    fn search_matches_title_or_address_case_insensitively() {
        let mut session = PropertySession::seeded().unwrap();

        session.set_search("POBLADO");
        assert_eq!(session.current_page().total, 1);

        session.set_search("laureles");
        assert_eq!(
            session.current_page().items[0].title,
            "Apartamento de Lujo"
        );
    }

    #[test]
    fn filters_compose_and_reset_the_page() {
        let mut session = session_with(13);
        session.next_page();
        assert_eq!(session.current_page().page, 2);

        session.set_kind_filter(Some(PropertyKind::Casa));
        let page = session.current_page();
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 13);

        session.set_kind_filter(Some(PropertyKind::Finca));
        assert_eq!(session.current_page().total, 0);
    }

    #[test]
    fn pagination_walks_six_at_a_time() {
        let mut session = session_with(13);

        let first = session.current_page();
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.total_pages, 3);

        session.next_page();
        session.next_page();
        assert_eq!(session.current_page().items.len(), 1);

        // already on the last page
        session.next_page();
        assert_eq!(session.current_page().page, 3);

        session.prev_page();
        assert_eq!(session.current_page().page, 2);
    }

    #[test]
    fn panel_misuse_is_an_invariant_error() {
        let mut session = PropertySession::new();

        assert!(session.submit().is_err());
        assert!(session.confirm_delete().is_err());
        assert!(session.panel().is_closed());
    }

    #[test]
    fn editing_a_missing_record_is_not_found() {
        let mut session = PropertySession::new();

        let err = session.open_edit(RecordId::generate()).unwrap_err();
        assert!(err.is_not_found());
    }
}
