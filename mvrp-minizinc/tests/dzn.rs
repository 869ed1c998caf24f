use mvrp_instance::{distance_matrix, Instance, InstanceParams};
use mvrp_minizinc::instance_dzn;

#[test]
fn renders_the_five_model_parameters() {
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
    let expected = r#"n = 4;
m = 2;
capacity = 30;
demand = [10, 10, 10, 10, 0];
distance = [| 0, 10, 14, 10, 7
            | 10, 0, 10, 14, 7
            | 14, 10, 0, 10, 7
            | 10, 14, 10, 0, 7
            | 7, 7, 7, 7, 0 |];
"#;
    assert_eq!(instance_dzn(&instance), expected);
}

#[test]
fn a_single_customer_renders_a_two_by_two_matrix() {
    let positions = vec![(0, 0), (3, 4)];
    let instance = Instance {
        distance_matrix: distance_matrix(&positions),
        demands: vec![5, 0],
        positions,
        params: InstanceParams {
            customers: 1,
            fleet_size: 1,
            capacity: 10,
            grid_size: 100,
        },
    };
    let expected = r#"n = 1;
m = 1;
capacity = 10;
demand = [5, 0];
distance = [| 0, 5
            | 5, 0 |];
"#;
    assert_eq!(instance_dzn(&instance), expected);
}
