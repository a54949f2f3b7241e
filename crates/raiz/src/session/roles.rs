//! Access-control page: role cards with a permission matrix, name and
//! description search, and create/edit/delete flows. The list is short
//! enough that it is never paginated.
//!
//! System roles are load-bearing for sign-in and can be inspected but
//! never edited or deleted.

use crate::{
    domain::role::{Role, RoleDraft},
    fixtures,
    notify::{MemoryNotifier, Notice, Notifier},
    session::Panel,
};
use raiz_core::{
    error::InternalError,
    filter::FilterExpr,
    id::RecordId,
    obs,
    store::{Record, Store},
    validate::ValidateDraft,
};

///
/// RoleSession
///

#[derive(Debug, Default)]
pub struct RoleSession {
    store: Store<Role>,
    notifier: MemoryNotifier,
    search: String,
    panel: Panel<RoleDraft>,
}

impl RoleSession {
    /// An empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session over the seed roles.
    pub fn seeded() -> Result<Self, InternalError> {
        Self::with_records(fixtures::roles())
    }

    pub fn with_records(records: impl IntoIterator<Item = Role>) -> Result<Self, InternalError> {
        Ok(Self {
            store: Store::seeded(records)?,
            ..Self::default()
        })
    }

    // --- View state ---

    #[must_use]
    pub const fn store(&self) -> &Store<Role> {
        &self.store
    }

    #[must_use]
    pub const fn panel(&self) -> &Panel<RoleDraft> {
        &self.panel
    }

    pub const fn draft_mut(&mut self) -> Option<&mut RoleDraft> {
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

    // --- Filtering ---

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// All roles matching the search, in id order.
    #[must_use]
    pub fn roles(&self) -> Vec<Role> {
        self.store.select(&self.filter())
    }

    fn filter(&self) -> FilterExpr {
        let needle = self.search.trim();
        if needle.is_empty() {
            return FilterExpr::True;
        }

        FilterExpr::contains_ci("name", needle) | FilterExpr::contains_ci("description", needle)
    }

    // --- Panel lifecycle ---

    pub fn open_create(&mut self) {
        self.panel = Panel::Create {
            draft: RoleDraft::default(),
            issues: Default::default(),
        };
    }

    pub fn open_edit(&mut self, id: RecordId) -> Result<(), InternalError> {
        let role = self
            .store
            .record(id)
            .ok_or_else(|| InternalError::store_not_found(Role::ENTITY_NAME, id))?;
        if role.is_system {
            return Err(InternalError::session_immutable(format!(
                "system role '{}' cannot be edited",
                role.name
            )));
        }

        self.panel = Panel::Edit {
            id,
            draft: RoleDraft::from_role(role),
            issues: Default::default(),
        };

        Ok(())
    }

    pub fn open_view(&mut self, id: RecordId) -> Result<(), InternalError> {
        if self.store.record(id).is_none() {
            return Err(InternalError::store_not_found(Role::ENTITY_NAME, id));
        }
        self.panel = Panel::View(id);

        Ok(())
    }

    pub fn open_delete(&mut self, id: RecordId) -> Result<(), InternalError> {
        let role = self
            .store
            .record(id)
            .ok_or_else(|| InternalError::store_not_found(Role::ENTITY_NAME, id))?;
        if role.is_system {
            return Err(InternalError::session_immutable(format!(
                "system role '{}' cannot be deleted",
                role.name
            )));
        }

        self.panel = Panel::ConfirmDelete(id);

        Ok(())
    }

    pub fn cancel(&mut self) {
        self.panel = Panel::Closed;
    }

    // --- Submission ---

    /// Submit the open form. Returns `Ok(true)` when the role was
    /// committed and the panel closed, `Ok(false)` when validation kept
    /// the form open with its issues.
    pub fn submit(&mut self) -> Result<bool, InternalError> {
        match std::mem::take(&mut self.panel) {
            Panel::Create { draft, .. } => {
                if let Err(issues) = draft.validate() {
                    obs::record_validation_rejection(Role::ENTITY_NAME);
                    self.panel = Panel::Create { draft, issues };
                    return Ok(false);
                }

                self.store.insert(draft.into_role(RecordId::generate()))?;
                self.notifier.notify(Notice::success(
                    "Rol creado",
                    "El nuevo rol ha sido creado exitosamente.",
                ));

                Ok(true)
            }
            Panel::Edit { id, draft, .. } => {
                if let Err(issues) = draft.validate() {
                    obs::record_validation_rejection(Role::ENTITY_NAME);
                    self.panel = Panel::Edit { id, draft, issues };
                    return Ok(false);
                }

                let existing = self
                    .store
                    .record(id)
                    .ok_or_else(|| InternalError::store_not_found(Role::ENTITY_NAME, id))?;
                let updated = draft.into_role_update(existing);

                self.store.replace(updated)?;
                self.notifier.notify(Notice::success(
                    "Rol actualizado",
                    "El rol ha sido actualizado exitosamente.",
                ));

                Ok(true)
            }
            other => {
                self.panel = other;

                Err(InternalError::session_invariant(
                    "submit without an open role form",
                ))
            }
        }
    }

    /// Remove the role the confirmation panel points at.
    pub fn confirm_delete(&mut self) -> Result<Role, InternalError> {
        match std::mem::take(&mut self.panel) {
            Panel::ConfirmDelete(id) => {
                let removed = self.store.remove(id)?;
                self.notifier.notify(Notice::success(
                    "Rol eliminado",
                    "El rol ha sido eliminado exitosamente.",
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
    use crate::domain::role::{ModuleKey, PermissionSet};
    use raiz_core::error::ErrorClass;

    fn filled_draft(name: &str) -> RoleDraft {
        let mut draft = RoleDraft::default();
        draft.name = name.into();
        draft.description = "Solo lectura de reportes".into();
        draft.permissions.grant(
            ModuleKey::Reports,
            PermissionSet {
                create: true,
                edit: false,
                delete: false,
            },
        );

        draft
    }

    #[test]
    fn create_flow_starts_with_zero_users() {
        let mut session = RoleSession::seeded().unwrap();

        session.open_create();
        *session.draft_mut().unwrap() = filled_draft("Analista");
        assert!(session.submit().unwrap());

        let created = session
            .roles()
            .into_iter()
            .find(|r| r.name == "Analista")
            .unwrap();
        assert_eq!(created.user_count, 0);
        assert!(!created.is_system);
    }

    #[test]
    fn a_role_without_permissions_is_rejected() {
        let mut session = RoleSession::new();

        session.open_create();
        session.draft_mut().unwrap().name = "Vacío".into();

        assert!(!session.submit().unwrap());
        assert_eq!(
            session.panel().issues().unwrap().get("permissions"),
            Some("Debe seleccionar al menos un permiso")
        );
    }

    #[test]
    fn system_roles_cannot_be_edited_or_deleted() {
        let mut session = RoleSession::seeded().unwrap();
        let admin = fixtures::administrador_id();

        let err = session.open_edit(admin).unwrap_err();
        assert_eq!(err.class, ErrorClass::Immutable);

        let err = session.open_delete(admin).unwrap_err();
        assert_eq!(err.class, ErrorClass::Immutable);

        // inspection stays allowed
        session.open_view(admin).unwrap();
        assert_eq!(session.panel(), &Panel::View(admin));
    }

    #[test]
    fn editing_preserves_user_count_and_system_flag() {
        let mut session = RoleSession::seeded().unwrap();
        let vendedor = session
            .roles()
            .into_iter()
            .find(|r| r.name == "Vendedor")
            .unwrap();

        session.open_edit(vendedor.id).unwrap();
        session.draft_mut().unwrap().description = "Equipo comercial".into();
        assert!(session.submit().unwrap());

        let updated = session.store().record(vendedor.id).unwrap();
        assert_eq!(updated.description, "Equipo comercial");
        assert_eq!(updated.user_count, 5);
        assert!(!updated.is_system);
    }

    #[test]
    fn search_matches_name_or_description() {
        let mut session = RoleSession::seeded().unwrap();

        session.set_search("vendedor");
        assert_eq!(session.roles().len(), 1);

        session.set_search("acceso completo");
        assert_eq!(session.roles()[0].name, "Administrador");

        session.set_search("");
        assert_eq!(session.roles().len(), 2);
    }

    #[test]
    fn delete_flow_removes_a_custom_role() {
        let mut session = RoleSession::seeded().unwrap();
        let vendedor = session
            .roles()
            .into_iter()
            .find(|r| r.name == "Vendedor")
            .unwrap();

        session.open_delete(vendedor.id).unwrap();
        let removed = session.confirm_delete().unwrap();

        assert_eq!(removed.name, "Vendedor");
        assert_eq!(session.store().len(), 1);
    }
}
