pub mod rsi;
pub mod screen;
