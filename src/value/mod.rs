//! Form values and their two representations.
//!
//! A [`FormValue`] tree structurally mirrors a schema tree. The **wire**
//! representation is plain JSON with dates as `"YYYY-MM-DD"` strings; the
//! **edit** representation keeps dates as [`chrono::NaiveDate`] so widgets can
//! work with a real calendar value. Conversion between the two is schema-driven
//! and lossless for everything that is not a date.

mod convert;
mod form_value;

pub use convert::{canonical_string, wire_to_edit, DATE_FORMAT};
pub use form_value::FormValue;

pub(crate) use form_value::json_number;
