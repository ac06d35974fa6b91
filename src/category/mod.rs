//! Categorical structure shared by the graphs of this crate.
pub mod traits;

pub use traits::*;
