//! Map adapters: a read-only view over an optional map and a property bag
//! with configurable null handling.

pub mod dictionary;
pub mod property_bag;

pub use dictionary::DictionaryView;
pub use property_bag::PropertyBag;
