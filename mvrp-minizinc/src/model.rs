/// The routing model, embedded as a fixed artifact. Solver behavior is
/// pinned by its constraint set and search annotation; [`crate::instance_dzn`]
/// binds its five parameters per instance.
pub const CVRP_MODEL: &str = include_str!("cvrp.mzn");
