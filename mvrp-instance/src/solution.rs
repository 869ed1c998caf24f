use crate::instance::Instance;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A solution as the solver reports it: one successor row per vehicle over
/// 1-based node ids. `succ[v][c - 1] == c` means vehicle `v + 1` never
/// visits node `c`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoutingSolution {
    #[serde(rename = "distanceTravelled")]
    pub distance_travelled: i64,
    #[serde(rename = "vehiclesUsed")]
    pub vehicles_used: usize,
    pub succ: Vec<Vec<usize>>,
    pub load: Vec<i64>,
}

/// The depot-to-depot visiting order of one used vehicle, depot excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub vehicle: usize,
    pub stops: Vec<usize>,
}

/// Walks each used vehicle's successor chain from the depot back to the
/// depot. A row whose depot entry is a self-loop is an unused vehicle.
pub fn decode_routes(solution: &RoutingSolution, depot: usize) -> Result<Vec<Route>> {
    let mut routes = Vec::new();
    for (row, succ) in solution.succ.iter().enumerate() {
        let vehicle = row + 1;
        if succ.len() < depot {
            return Err(anyhow!(
                "vehicle {} has {} successor entries, expected at least {}",
                vehicle,
                succ.len(),
                depot
            ));
        }
        if succ[depot - 1] == depot {
            continue;
        }
        let mut stops = Vec::new();
        let mut current = succ[depot - 1];
        while current != depot {
            if current == 0 || current > succ.len() {
                return Err(anyhow!(
                    "vehicle {} moves to node {}, outside 1..={}",
                    vehicle,
                    current,
                    succ.len()
                ));
            }
            stops.push(current);
            if stops.len() >= succ.len() {
                return Err(anyhow!("vehicle {} never returns to the depot", vehicle));
            }
            current = succ[current - 1];
        }
        routes.push(Route { vehicle, stops });
    }
    Ok(routes)
}

/// Checks a reported solution against the instance and returns the total
/// distance recomputed from the distance matrix.
pub fn verify_solution(instance: &Instance, solution: &RoutingSolution) -> Result<i64> {
    let num_nodes = instance.params.num_nodes();
    let depot = instance.params.depot();
    let fleet_size = instance.params.fleet_size;

    if solution.succ.len() != fleet_size {
        return Err(anyhow!(
            "solution has {} successor rows for a fleet of {}",
            solution.succ.len(),
            fleet_size
        ));
    }
    if solution.load.len() != fleet_size {
        return Err(anyhow!(
            "solution reports {} loads for a fleet of {}",
            solution.load.len(),
            fleet_size
        ));
    }
    for (row, succ) in solution.succ.iter().enumerate() {
        if succ.len() != num_nodes {
            return Err(anyhow!(
                "vehicle {} has {} successor entries, expected {}",
                row + 1,
                succ.len(),
                num_nodes
            ));
        }
        if let Some(&bad) = succ.iter().find(|&&s| s == 0 || s > num_nodes) {
            return Err(anyhow!(
                "vehicle {} has successor {}, outside 1..={}",
                row + 1,
                bad,
                num_nodes
            ));
        }
    }

    let routes = decode_routes(solution, depot)?;
    if routes.len() != solution.vehicles_used {
        return Err(anyhow!(
            "solution reports {} vehicles used but {} routes leave the depot",
            solution.vehicles_used,
            routes.len()
        ));
    }

    let mut visits = vec![0usize; num_nodes];
    for route in &routes {
        for &stop in &route.stops {
            visits[stop - 1] += 1;
        }
    }
    for customer in 1..depot {
        match visits[customer - 1] {
            1 => {}
            0 => return Err(anyhow!("customer {} is never visited", customer)),
            n => return Err(anyhow!("customer {} is visited {} times", customer, n)),
        }
    }

    // Nodes a vehicle does not reach from the depot must stay self-loops,
    // otherwise the row hides a detached subtour.
    let mut on_tour: Vec<HashSet<usize>> = vec![HashSet::new(); fleet_size];
    for route in &routes {
        let nodes = &mut on_tour[route.vehicle - 1];
        nodes.insert(depot);
        nodes.extend(route.stops.iter().copied());
    }
    for (row, succ) in solution.succ.iter().enumerate() {
        for node in 1..=num_nodes {
            if succ[node - 1] != node && !on_tour[row].contains(&node) {
                return Err(anyhow!(
                    "vehicle {} skips node {} but points it at {}",
                    row + 1,
                    node,
                    succ[node - 1]
                ));
            }
        }
    }

    let mut total = 0i64;
    for route in &routes {
        let mut load = 0i64;
        let mut from = depot;
        for &stop in &route.stops {
            load += instance.demands[stop - 1] as i64;
            total += instance.distance_matrix[from - 1][stop - 1] as i64;
            from = stop;
        }
        total += instance.distance_matrix[from - 1][depot - 1] as i64;
        if load > instance.params.capacity as i64 {
            return Err(anyhow!(
                "vehicle {} carries {} with capacity {}",
                route.vehicle,
                load,
                instance.params.capacity
            ));
        }
        if load != solution.load[route.vehicle - 1] {
            return Err(anyhow!(
                "vehicle {} reports load {} but its stops demand {}",
                route.vehicle,
                solution.load[route.vehicle - 1],
                load
            ));
        }
    }
    for (row, &load) in solution.load.iter().enumerate() {
        if !on_tour[row].contains(&depot) && load != 0 {
            return Err(anyhow!(
                "vehicle {} stays at the depot but reports load {}",
                row + 1,
                load
            ));
        }
    }
    if total != solution.distance_travelled {
        return Err(anyhow!(
            "solution reports distance {} but its routes total {}",
            solution.distance_travelled,
            total
        ));
    }
    Ok(total)
}
