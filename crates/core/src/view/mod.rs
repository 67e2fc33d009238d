pub mod region;
pub mod render;

pub use region::{Block, DisplayRegion, ViewNode};
pub use render::{render, PLACEHOLDER_TEXT};
