//! justcalc - the expression accumulator and restricted arithmetic engine
//! behind the JustCalculate window.

pub mod accumulator;
pub mod engine;
pub mod format;
pub mod input;
pub mod settings;

pub use accumulator::{Accumulator, Display};
pub use engine::{evaluate_str, CalcError, CalcResult, ErrorKind};
pub use input::Token;
