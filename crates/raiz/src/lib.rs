//! ## Crate layout
//! - `domain`: entities, label enums, form drafts, and draft validation.
//! - `session`: one stateful session per back-office page (filters, panel
//!   lifecycle, submission flows).
//! - `dashboard`: analytics summary built over the sessions' stores.
//! - `fixtures`: the hard-coded seed dataset.
//! - `notify`: the transient-notice collaborator surface.
//!
//! The `prelude` module mirrors the surface a page frame consumes.
#![warn(unreachable_pub)]

pub use raiz_core as core;

pub mod dashboard;
pub mod domain;
pub mod fixtures;
pub mod notify;
pub mod session;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::{
            error::InternalError,
            id::RecordId,
            page::{PageRequest, Paged},
            validate::{Issues, ValidateDraft as _},
        },
        dashboard::{DashboardSummary, TimeRange},
        domain::{
            appointment::{Appointment, AppointmentDraft, AppointmentStatus, TimeSlot},
            property::{ListingStatus, Property, PropertyDraft, PropertyKind, Stratum},
            role::{ModuleKey, PermissionMatrix, PermissionSet, Role, RoleDraft},
        },
        notify::{MemoryNotifier, Notice, NoticeKind, Notifier},
        session::{
            appointments::AppointmentSession, properties::PropertySession, roles::RoleSession,
            Panel,
        },
    };
}
