//! bidds-core: primitive field types and the validation vocabulary for Bid-DS documents.
//!
//! Contains:
//! - indicator (strict 0/1 integer flags)
//! - blocks (fixed-arity tuple fields: cost blocks, startup states, interval windows)
//! - numeric (Real + finiteness helpers)
//! - gate (flag-gated conditional fields)
//! - check (per-field and cross-field predicates that feed a report)
//! - error (validation error taxonomy and batch report)

pub mod blocks;
pub mod check;
pub mod error;
pub mod gate;
pub mod indicator;
pub mod numeric;

pub use blocks::*;
pub use check::Checks;
pub use error::{EntityRef, ErrorClass, ValidationError, ValidationReport};
pub use gate::{ConditionalFieldsError, FlagGate, PresenceError};
pub use indicator::Indicator;
pub use numeric::*;
