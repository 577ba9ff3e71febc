//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `ParamStore`: every parameter value discovered so far, growing monotonically
//! - `Bindings`: the Cartesian product of an endpoint's dependency values
//! - `IssuedSet`: the (endpoint, binding) pairs already requested
//!
//! Both stores live inside one scheduler for the length of a crawl and are
//! dropped with it; nothing is shared between crawls.

mod issued;
mod params;

// Re-export main types
pub use issued::{IssuedKey, IssuedSet};
pub use params::{Bindings, MergeOutcome, ParamStore};
