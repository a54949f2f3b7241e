//! Per-page sessions. Each session owns its store, the active filters,
//! the page cursor and the modal panel, and pushes notices through the
//! page's [`Notifier`](crate::notify::Notifier) after every committed
//! action.

pub mod appointments;
pub mod properties;
pub mod roles;

use raiz_core::{id::RecordId, validate::Issues};

///
/// Panel
///
/// The modal layer of a management page. At most one panel is open at a
/// time; opening a new one replaces whatever was showing.
///
/// `D` is the page's form-draft type. `Create` and `Edit` carry the draft
/// being typed plus the field issues from the last rejected submit.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Panel<D> {
    #[default]
    Closed,
    Create {
        draft: D,
        issues: Issues,
    },
    Edit {
        id: RecordId,
        draft: D,
        issues: Issues,
    },
    View(RecordId),
    ConfirmDelete(RecordId),
}

impl<D> Panel<D> {
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// The draft under edit, if a form panel is open.
    #[must_use]
    pub const fn draft(&self) -> Option<&D> {
        match self {
            Self::Create { draft, .. } | Self::Edit { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Mutable access to the open form draft, for field-by-field typing.
    pub const fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            Self::Create { draft, .. } | Self::Edit { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Field issues from the last rejected submit, if a form panel is open.
    #[must_use]
    pub const fn issues(&self) -> Option<&Issues> {
        match self {
            Self::Create { issues, .. } | Self::Edit { issues, .. } => Some(issues),
            _ => None,
        }
    }

    /// Dismiss one field's issue; called when the user edits that field.
    pub fn clear_issue(&mut self, field: &str) {
        if let Self::Create { issues, .. } | Self::Edit { issues, .. } = self {
            issues.clear(field);
        }
    }
}

///
/// TESTS
///
