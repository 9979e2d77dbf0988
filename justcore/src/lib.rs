//! justcore - shared library for JustCalculate

pub mod logging;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use theme::CalcTheme;
