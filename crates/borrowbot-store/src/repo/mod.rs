//! Repository layer - read-only queries feeding record construction

pub mod hydration;
pub mod lookup;
pub mod row;

pub use hydration::{fetch_children, hydrate_children};
pub use lookup::lookup;
