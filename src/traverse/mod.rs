//! Traversal core: element reduction, filtering, and the reader stack.

pub mod filter;
pub mod value;

pub(crate) mod engine;
pub(crate) mod record;

pub use filter::FilterPolicy;
pub use record::UrlRecord;
pub use value::ElementValue;
