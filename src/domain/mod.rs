//! Domain model consumed by the catalog query engine.

pub mod criteria;
pub mod item;
pub mod types;
