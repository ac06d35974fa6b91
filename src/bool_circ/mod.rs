//! Boolean circuits as open graphs labelled by [`Gate`]s, and their evaluation by local
//! rewriting.
//!
//! ```
//! use open_digraphs::bool_circ::BoolCirc;
//!
//! let mut c = BoolCirc::from_formula(&["((x0)&(x1))|(~(x0))"]).unwrap();
//! assert!(c.is_well_formed());
//!
//! c.set_input_bits("01").unwrap();
//! assert_eq!(c.evaluate().unwrap(), "1");
//! c.set_input_bits("10").unwrap();
//! assert_eq!(c.evaluate().unwrap(), "0");
//! ```
pub mod circuit;
pub mod eval;
pub mod formula;
pub mod gate;
pub mod rewrite;

pub use circuit::BoolCirc;
pub use eval::EvalOptions;
pub use gate::Gate;
