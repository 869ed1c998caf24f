use mvrp_instance::Instance;

/// Renders the model's five parameters as DataZinc assignments.
pub fn instance_dzn(instance: &Instance) -> String {
    let rows: Vec<String> = instance
        .distance_matrix
        .iter()
        .map(|row| int_list(row))
        .collect();
    format!(
        "n = {};\nm = {};\ncapacity = {};\ndemand = [{}];\ndistance = [| {} |];\n",
        instance.params.customers,
        instance.params.fleet_size,
        instance.params.capacity,
        int_list(&instance.demands),
        rows.join("\n            | "),
    )
}

fn int_list(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
