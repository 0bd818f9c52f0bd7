//! Pure predicates over decoded JSON
//!
//! No I/O and no errors: every unknown or malformed shape is a non-match.

mod array;
mod structure;
mod types;
mod value;

pub use array::matches_array;
pub use structure::matches_structure;
pub use types::{matches_primitive, matches_type};
pub use value::{json_equal, matches_value};
