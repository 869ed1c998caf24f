mod dzn;
mod model;
mod solver;

pub use dzn::*;
pub use model::*;
pub use solver::*;
