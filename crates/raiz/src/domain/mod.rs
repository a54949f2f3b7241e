//! Back-office entities and their form drafts.
//!
//! Label enums serialize and display with the exact Spanish strings the
//! seeded data uses, so filters comparing on labels behave like the
//! original dataset.

pub mod appointment;
pub mod property;
pub mod role;
