use serde::{Deserialize, Serialize};
use std::{cell::RefCell, fmt};

///
/// NoticeKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
}

///
/// Notice
///
/// One transient message surfaced to the user after an action.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}

///
/// Notifier
///
/// The show-a-message collaborator the page frame provides. Sessions only
/// ever push notices through it; display and dismissal are its concern.
///

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

///
/// MemoryNotifier
///
/// Records notices instead of displaying them. The default collaborator
/// and the one the tests assert against.
///

#[derive(Debug, Default)]
pub struct MemoryNotifier(RefCell<Vec<Notice>>);

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.0.borrow().clone()
    }

    /// The most recent notice, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.0.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notice::success("Propiedad creada", "ok"));
        notifier.notify(Notice::info("Cita programada", "ok"));

        assert_eq!(notifier.notices().len(), 2);
        assert_eq!(notifier.last().unwrap().title, "Cita programada");

        notifier.clear();
        assert!(notifier.last().is_none());
    }
}
