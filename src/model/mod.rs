//! Sales data model
//!
//! - `SalesRecord`: one immutable transaction row
//! - `SalesField`: the enumerated field catalog (label, column, kind)

mod field;
mod record;

pub use field::{validate_catalog, FieldKind, SalesField};
pub use record::{FieldValue, SalesRecord};
