//! Core runtime for Raíz: record ids, values, filters, pagination, stores,
//! validation issues, and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

pub mod error;
pub mod filter;
pub mod id;
pub mod obs;
pub mod page;
pub mod store;
pub mod validate;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or counters are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::{Cmp, FilterExpr},
        id::RecordId,
        page::{PageRequest, Paged},
        store::Record,
        validate::{Issues, ValidateDraft},
        value::{FieldValue, FieldValues, Value},
    };
}
