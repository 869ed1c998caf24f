use mvrp_instance::{
    decode_routes, distance_matrix, verify_solution, Instance, InstanceParams,
};
use mvrp_minizinc::Minizinc;
use rand::{rngs::SmallRng, SeedableRng};

// These tests shell out to a real `minizinc` with the gecode solver.
// Run them with: cargo test -p mvrp-minizinc -- --ignored

// Four customers of demand 10 on the corners of a 10x10 square with the
// depot in the middle: one vehicle cannot carry 40, so the optimum is two
// routes of two adjacent corners each, 24 + 24 = 48.
#[test]
#[ignore = "needs a minizinc installation with the gecode solver"]
fn finds_the_square_optimum() {
    let positions = vec![(0, 0), (10, 0), (10, 10), (0, 10), (5, 5)];
    let instance = Instance {
        distance_matrix: distance_matrix(&positions),
        demands: vec![10, 10, 10, 10, 0],
        positions,
        params: InstanceParams {
            customers: 4,
            fleet_size: 2,
            capacity: 30,
            grid_size: 100,
        },
    };

    let solver = Minizinc::lookup("minizinc", "gecode").unwrap();
    let solution = solver.solve(&instance).unwrap();

    assert_eq!(verify_solution(&instance, &solution).unwrap(), 48);
    assert_eq!(solution.vehicles_used, 2);
    let routes = decode_routes(&solution, instance.params.depot()).unwrap();
    assert_eq!(routes.len(), 2);
    let served: usize = routes.iter().map(|r| r.stops.len()).sum();
    assert_eq!(served, 4);
}

// With one vehicle per customer any demand draw fits, so a generated
// instance always has a solution to verify.
#[test]
#[ignore = "needs a minizinc installation with the gecode solver"]
fn solves_a_generated_instance() {
    let params = InstanceParams::new(4, 4, 30);
    let mut rng = SmallRng::seed_from_u64(10);
    let instance = Instance::generate(&params, &mut rng).unwrap();

    let solver = Minizinc::lookup("minizinc", "gecode").unwrap();
    let solution = solver.solve(&instance).unwrap();

    let total = verify_solution(&instance, &solution).unwrap();
    assert_eq!(total, solution.distance_travelled);
    let routes = decode_routes(&solution, params.depot()).unwrap();
    let served: usize = routes.iter().map(|r| r.stops.len()).sum();
    assert_eq!(served, 4);
}
