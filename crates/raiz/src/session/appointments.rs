//! Scheduling page: client search, status and exact-date filters, ten
//! appointments per page, and the booking panel flows. The session also
//! carries a read-only property catalog for the form's selector and for
//! resolving titles in the table.

use crate::{
    domain::{
        appointment::{Appointment, AppointmentDraft, AppointmentStatus},
        property::Property,
    },
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
};
use time::Date;

const PAGE_SIZE: u32 = 10;

///
/// AppointmentSession
///

#[derive(Debug, Default)]
pub struct AppointmentSession {
    store: Store<Appointment>,
    properties: Store<Property>,
    notifier: MemoryNotifier,
    search: String,
    status_filter: Option<AppointmentStatus>,
    date_filter: Option<Date>,
    page: u32,
    panel: Panel<AppointmentDraft>,
}

impl AppointmentSession {
    /// An empty session with no bookable properties.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// A session over the seed appointment book and property catalog.
    pub fn seeded() -> Result<Self, InternalError> {
        Self::with_records(fixtures::appointments()?, fixtures::properties()?)
    }

    pub fn with_records(
        appointments: impl IntoIterator<Item = Appointment>,
        properties: impl IntoIterator<Item = Property>,
    ) -> Result<Self, InternalError> {
        Ok(Self {
            store: Store::seeded(appointments)?,
            properties: Store::seeded(properties)?,
            ..Self::new()
        })
    }

    // --- View state ---

    #[must_use]
    pub const fn store(&self) -> &Store<Appointment> {
        &self.store
    }

    #[must_use]
    pub const fn panel(&self) -> &Panel<AppointmentDraft> {
        &self.panel
    }

    pub const fn draft_mut(&mut self) -> Option<&mut AppointmentDraft> {
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

    /// The catalog backing the form's property selector, in id order.
    #[must_use]
    pub fn property_options(&self) -> Vec<Property> {
        self.properties.records()
    }

    /// Resolve an appointment's property reference. `None` when the
    /// property has been deleted out from under the booking.
    #[must_use]
    pub fn property_for(&self, appointment: &Appointment) -> Option<&Property> {
        self.properties.record(appointment.property_id)
    }

    // --- Filtering and pagination ---

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, status: Option<AppointmentStatus>) {
        self.status_filter = status;
        self.page = 1;
    }

    pub fn set_date_filter(&mut self, date: Option<Date>) {
        self.date_filter = date;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.status_filter = None;
        self.date_filter = None;
        self.page = 1;
    }

    /// The page of bookings the table shows right now.
    #[must_use]
    pub fn current_page(&self) -> Paged<Appointment> {
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

    // Phone search stays case-sensitive; digits and "+57" have no case.
    fn filter(&self) -> FilterExpr {
        let mut expr = FilterExpr::True;

        let needle = self.search.trim();
        if !needle.is_empty() {
            expr = expr
                & (FilterExpr::contains_ci("client_name", needle)
                    | FilterExpr::contains_ci("client_email", needle)
                    | FilterExpr::contains("client_phone", needle));
        }
        if let Some(status) = self.status_filter {
            expr = expr & FilterExpr::eq("status", status.label());
        }
        if let Some(date) = self.date_filter {
            expr = expr & FilterExpr::eq("date", date);
        }

        expr
    }

    // --- Panel lifecycle ---

    pub fn open_create(&mut self) {
        self.panel = Panel::Create {
            draft: AppointmentDraft::default(),
            issues: Default::default(),
        };
    }

    pub fn open_edit(&mut self, id: RecordId) -> Result<(), InternalError> {
        let appointment = self
            .store
            .record(id)
            .ok_or_else(|| InternalError::store_not_found(Appointment::ENTITY_NAME, id))?;

        self.panel = Panel::Edit {
            id,
            draft: AppointmentDraft::from_appointment(appointment),
            issues: Default::default(),
        };

        Ok(())
    }

    pub fn open_view(&mut self, id: RecordId) -> Result<(), InternalError> {
        if self.store.record(id).is_none() {
            return Err(InternalError::store_not_found(Appointment::ENTITY_NAME, id));
        }
        self.panel = Panel::View(id);

        Ok(())
    }

    pub fn open_delete(&mut self, id: RecordId) -> Result<(), InternalError> {
        if self.store.record(id).is_none() {
            return Err(InternalError::store_not_found(Appointment::ENTITY_NAME, id));
        }
        self.panel = Panel::ConfirmDelete(id);

        Ok(())
    }

    pub fn cancel(&mut self) {
        self.panel = Panel::Closed;
    }

    // --- Submission ---

    /// Submit the open form. Returns `Ok(true)` when the booking was
    /// committed and the panel closed, `Ok(false)` when validation kept
    /// the form open with its issues.
    pub fn submit(&mut self) -> Result<bool, InternalError> {
        match std::mem::take(&mut self.panel) {
            Panel::Create { draft, .. } => {
                match draft.clone().try_into_appointment(RecordId::generate()) {
                    Ok(appointment) => {
                        self.store.insert(appointment)?;
                        self.notifier.notify(Notice::success(
                            "Cita creada",
                            "La nueva cita ha sido creada exitosamente.",
                        ));

                        Ok(true)
                    }
                    Err(issues) => {
                        obs::record_validation_rejection(Appointment::ENTITY_NAME);
                        self.panel = Panel::Create { draft, issues };

                        Ok(false)
                    }
                }
            }
            Panel::Edit { id, draft, .. } => match draft.clone().try_into_appointment(id) {
                Ok(appointment) => {
                    self.store.replace(appointment)?;
                    self.notifier.notify(Notice::success(
                        "Cita actualizada",
                        "La cita ha sido actualizada exitosamente.",
                    ));

                    Ok(true)
                }
                Err(issues) => {
                    obs::record_validation_rejection(Appointment::ENTITY_NAME);
                    self.panel = Panel::Edit { id, draft, issues };

                    Ok(false)
                }
            },
            other => {
                self.panel = other;

                Err(InternalError::session_invariant(
                    "submit without an open appointment form",
                ))
            }
        }
    }

    /// Remove the booking the confirmation panel points at.
    pub fn confirm_delete(&mut self) -> Result<Appointment, InternalError> {
        match std::mem::take(&mut self.panel) {
            Panel::ConfirmDelete(id) => {
                let removed = self.store.remove(id)?;
                self.notifier.notify(Notice::success(
                    "Cita eliminada",
                    "La cita ha sido eliminada exitosamente.",
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
    use crate::domain::appointment::TimeSlot;
    use time::macros::date;

    fn filled_draft(name: &str) -> AppointmentDraft {
        AppointmentDraft {
            client_name: name.into(),
            client_phone: "+57 300 999 8877".into(),
            client_email: "cliente@email.com".into(),
            property_id: Some(fixtures::casa_moderna_id()),
            date: Some(date!(2024 - 02 - 01)),
            slot: Some(TimeSlot::parse("09:30").unwrap()),
            ..AppointmentDraft::default()
        }
    }

    #[test]
    fn create_flow_inserts_and_notifies() {
        let mut session = AppointmentSession::seeded().unwrap();

        session.open_create();
        *session.draft_mut().unwrap() = filled_draft("Pedro Gómez");

        assert!(session.submit().unwrap());
        assert!(session.panel().is_closed());
        assert_eq!(session.store().len(), 3);
        assert_eq!(
            session.notices().last().map(|n| n.title.clone()),
            Some("Cita creada".to_string())
        );
    }

    #[test]
    fn malformed_email_is_rejected_with_a_field_issue() {
        let mut session = AppointmentSession::seeded().unwrap();

        session.open_create();
        let mut draft = filled_draft("Pedro Gómez");
        draft.client_email = "pedro-at-email.com".into();
        *session.draft_mut().unwrap() = draft;

        assert!(!session.submit().unwrap());
        assert_eq!(
            session.panel().issues().unwrap().get("client_email"),
            Some("El email no es válido")
        );
        assert_eq!(session.store().len(), 2);
    }

    #[test]
    fn search_spans_name_email_and_phone() {
        let mut session = AppointmentSession::seeded().unwrap();

        session.set_search("ANA");
        assert_eq!(session.current_page().total, 1);

        session.set_search("luis.garcia@");
        assert_eq!(session.current_page().items[0].client_name, "Luis García");

        session.set_search("301 234");
        assert_eq!(session.current_page().total, 1);
    }

    #[test]
    fn date_filter_matches_exactly() {
        let mut session = AppointmentSession::seeded().unwrap();

        session.set_date_filter(Some(date!(2024 - 01 - 16)));
        let page = session.current_page();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].client_name, "Luis García");

        session.set_date_filter(Some(date!(2024 - 03 - 01)));
        assert!(session.current_page().is_empty());
    }

    #[test]
    fn property_join_survives_deletion() {
        let mut session = AppointmentSession::seeded().unwrap();
        let booking = session.store().records().remove(0);

        assert!(session.property_for(&booking).is_some());

        session.properties.remove(booking.property_id).unwrap();
        assert!(session.property_for(&booking).is_none());

        // the booking itself stays on the books
        assert!(session.store().record(booking.id).is_some());
    }

    #[test]
    fn status_change_via_edit_persists() {
        let mut session = AppointmentSession::seeded().unwrap();
        let id = session.store().records()[1].id;

        session.open_edit(id).unwrap();
        session.draft_mut().unwrap().status = AppointmentStatus::Confirmed;
        assert!(session.submit().unwrap());

        assert_eq!(
            session.store().record(id).unwrap().status,
            AppointmentStatus::Confirmed
        );
    }

    #[test]
    fn delete_flow_removes_the_booking() {
        let mut session = AppointmentSession::seeded().unwrap();
        let id = session.store().records()[0].id;

        session.open_delete(id).unwrap();
        let removed = session.confirm_delete().unwrap();

        assert_eq!(removed.id, id);
        assert_eq!(session.store().len(), 1);
        assert_eq!(
            session.notices().last().map(|n| n.title.clone()),
            Some("Cita eliminada".to_string())
        );
    }
}
