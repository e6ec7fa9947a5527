//! Composer configuration

mod composer;

pub use composer::*;
