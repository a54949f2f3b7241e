use derive_more::{Deref, DerefMut};
use raiz_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// ModuleKey
///
/// A functional area permissions are toggled against.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKey {
    Properties,
    Appointments,
    Users,
    Reports,
}

impl ModuleKey {
    pub const ALL: [Self; 4] = [
        Self::Properties,
        Self::Appointments,
        Self::Users,
        Self::Reports,
    ];

    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Appointments => "appointments",
            Self::Users => "users",
            Self::Reports => "reports",
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Properties => "Gestión de Inmuebles",
            Self::Appointments => "Gestión de Citas",
            Self::Users => "Gestión de Usuarios",
            Self::Reports => "Reportes",
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

///
/// PermissionSet
///
/// The create/edit/delete toggles for one module.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PermissionSet {
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl PermissionSet {
    pub const NONE: Self = Self {
        create: false,
        edit: false,
        delete: false,
    };

    pub const FULL: Self = Self {
        create: true,
        edit: true,
        delete: true,
    };

    #[must_use]
    pub const fn any(&self) -> bool {
        self.create || self.edit || self.delete
    }

    /// Number of granted toggles, out of 3.
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.create as u8 + self.edit as u8 + self.delete as u8
    }
}

///
/// PermissionMatrix
///
/// Module-keyed permission sets. Modules absent from the map grant
/// nothing.
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, PartialEq, Serialize)]
pub struct PermissionMatrix(BTreeMap<ModuleKey, PermissionSet>);

impl PermissionMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every module fully granted (the Administrador matrix).
    #[must_use]
    pub fn full() -> Self {
        Self(
            ModuleKey::ALL
                .into_iter()
                .map(|module| (module, PermissionSet::FULL))
                .collect(),
        )
    }

    /// The permission set for a module; absent modules grant nothing.
    #[must_use]
    pub fn module(&self, module: ModuleKey) -> PermissionSet {
        self.0.get(&module).copied().unwrap_or(PermissionSet::NONE)
    }

    /// Set one module's permission set.
    pub fn grant(&mut self, module: ModuleKey, set: PermissionSet) {
        self.0.insert(module, set);
    }

    /// True when at least one toggle anywhere in the matrix is granted.
    #[must_use]
    pub fn any(&self) -> bool {
        self.0.values().any(PermissionSet::any)
    }

    /// Number of modules with at least one grant.
    #[must_use]
    pub fn modules_with_grants(&self) -> usize {
        self.0.values().filter(|set| set.any()).count()
    }
}

///
/// Role
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Role {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub permissions: PermissionMatrix,
    pub user_count: u32,
    /// Built-in roles are exempt from edit and delete.
    pub is_system: bool,
}

impl Record for Role {
    const ENTITY_NAME: &'static str = "role";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl FieldValues for Role {
    fn field_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Id(self.id),
            "name" => Value::Text(self.name.clone()),
            "description" => Value::Text(self.description.clone()),
            "user_count" => Value::Uint(u64::from(self.user_count)),
            "is_system" => Value::Bool(self.is_system),
            _ => return None,
        };

        Some(value)
    }
}

///
/// RoleDraft
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleDraft {
    pub name: String,
    pub description: String,
    pub permissions: PermissionMatrix,
}

impl RoleDraft {
    /// Prefill the form for editing an existing record.
    #[must_use]
    pub fn from_role(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone(),
            permissions: role.permissions.clone(),
        }
    }

    /// Materialize a brand-new role: zero assigned users, never a system
    /// role.
    #[must_use]
    pub fn into_role(self, id: RecordId) -> Role {
        Role {
            id,
            name: self.name,
            description: self.description,
            permissions: self.permissions,
            user_count: 0,
            is_system: false,
        }
    }

    /// Materialize an edit of `existing`, preserving its id, user count,
    /// and system flag.
    #[must_use]
    pub fn into_role_update(self, existing: &Role) -> Role {
        Role {
            id: existing.id,
            name: self.name,
            description: self.description,
            permissions: self.permissions,
            user_count: existing.user_count,
            is_system: existing.is_system,
        }
    }
}

impl ValidateDraft for RoleDraft {
    fn validate(&self) -> Result<(), Issues> {
        let mut issues = Issues::new();

        issues.require_text("name", &self.name, "El nombre del rol es requerido");
        issues.require(
            "permissions",
            self.permissions.any(),
            "Debe seleccionar al menos un permiso",
        );

        issues.into_result()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn seller_matrix() -> PermissionMatrix {
        let mut matrix = PermissionMatrix::new();
        matrix.grant(
            ModuleKey::Properties,
            PermissionSet {
                create: true,
                edit: true,
                delete: false,
            },
        );
        matrix.grant(ModuleKey::Appointments, PermissionSet::FULL);

        matrix
    }

    #[test]
    fn draft_without_grants_is_rejected() {
        let draft = RoleDraft {
            name: "Editor".into(),
            ..RoleDraft::default()
        };

        let issues = draft.validate().unwrap_err();
        assert_eq!(
            issues.get("permissions"),
            Some("Debe seleccionar al menos un permiso")
        );
    }

    #[test]
    fn draft_with_one_grant_passes() {
        let draft = RoleDraft {
            name: "Vendedor".into(),
            permissions: seller_matrix(),
            ..RoleDraft::default()
        };

        assert!(draft.validate().is_ok());
    }

    #[test]
    fn new_roles_are_never_system() {
        let draft = RoleDraft {
            name: "Vendedor".into(),
            permissions: seller_matrix(),
            ..RoleDraft::default()
        };

        let role = draft.into_role(RecordId::from_parts(1, 1));
        assert!(!role.is_system);
        assert_eq!(role.user_count, 0);
    }

    #[test]
    fn updates_preserve_user_count_and_system_flag() {
        let existing = Role {
            id: RecordId::from_parts(1, 1),
            name: "Vendedor".into(),
            description: String::new(),
            permissions: seller_matrix(),
            user_count: 5,
            is_system: false,
        };

        let updated = RoleDraft {
            name: "Vendedor Senior".into(),
            description: "Gestión ampliada".into(),
            permissions: seller_matrix(),
        }
        .into_role_update(&existing);

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.user_count, 5);
        assert!(!updated.is_system);
    }

    #[test]
    fn matrix_counts_grants() {
        let matrix = seller_matrix();

        assert!(matrix.any());
        assert_eq!(matrix.modules_with_grants(), 2);
        assert_eq!(matrix.module(ModuleKey::Properties).count(), 2);
        assert_eq!(matrix.module(ModuleKey::Users), PermissionSet::NONE);
        assert_eq!(PermissionMatrix::full().modules_with_grants(), 4);
    }
}
