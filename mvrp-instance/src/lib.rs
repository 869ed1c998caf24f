mod instance;
mod solution;

pub use instance::*;
pub use solution::*;
