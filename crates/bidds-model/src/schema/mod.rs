//! Record types of the input and output documents.
//!
//! Field names match the JSON format exactly; upper-case reserve fields are
//! renamed to snake_case in Rust.

/// A uniquely identified record of a document collection.
pub trait Entity {
    /// Collection name used to locate errors.
    const COLLECTION: &'static str;

    fn uid(&self) -> &str;
}

/// Per-period arrays of a record with their lengths.
pub trait Horizon {
    fn lengths(&self) -> Vec<(&'static str, usize)>;
}

macro_rules! entity {
    ($ty:ty, $collection:literal) => {
        impl $crate::schema::Entity for $ty {
            const COLLECTION: &'static str = $collection;

            fn uid(&self) -> &str {
                &self.uid
            }
        }
    };
}

pub mod capability;
pub mod document;
pub mod general;
pub mod initial;
pub mod network;
pub mod output;
pub mod reliability;
pub mod time_series;

pub use capability::*;
pub use document::*;
pub use general::*;
pub use initial::*;
pub use network::*;
pub use output::*;
pub use reliability::*;
pub use time_series::*;
