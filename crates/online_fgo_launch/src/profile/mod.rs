//! Configuration profiles and their on-disk layout

mod layer;
mod locator;
mod resolver;

pub use layer::*;
pub use locator::*;
pub use resolver::*;
