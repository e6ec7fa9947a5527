//! Launch description model and its composition

mod argument;
mod launch;
mod parameters;
mod plan;
mod process;

pub use argument::*;
pub use launch::*;
pub use parameters::*;
pub use plan::*;
pub use process::*;
