//! Value objects - immutable types that represent domain concepts

mod filter;
mod priority;

pub use filter::Filter;
pub use priority::PriorityAxis;
