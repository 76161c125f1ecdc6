//! Recast copies same-named, same-typed fields from one record type to
//! another without hand-written mapping code.
//!
//! ## Crate layout
//! - `copy`: the engine — single-record adaptation, override policies,
//!   freshness, and bulk wrappers.
//! - `traits`: the capability contract (`Record`, `FieldValue`, `FieldSpec`)
//!   that `#[derive(Record)]` generates.
//! - `types`: finite-float newtypes usable as record fields.
//! - `value`: the runtime value model exchanged at the field boundary.
//!
//! The `prelude` module mirrors the surface a typical caller needs.

pub mod copy;
pub mod traits;
pub mod types;
pub mod value;

// export so the derive's emitted paths resolve inside this crate too
extern crate self as recast;

pub use copy::{
    OverridePolicy, adapt, adapt_all, adapt_into, adapt_into_reporting, adapt_iter,
    adapt_reporting, adapt_vec, is_fresh,
};
pub use recast_derive::Record;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        copy::{
            OverridePolicy, adapt, adapt_all, adapt_into, adapt_into_reporting, adapt_iter,
            adapt_reporting, adapt_vec, is_fresh,
        },
        traits::{FieldSpec, FieldValue as _, Record},
        types::{Float32, Float64},
        value::Value,
    };
    pub use recast_derive::Record;
}
