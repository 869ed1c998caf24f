use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng};
use serde::{Deserialize, Serialize};

pub const GRID_SIZE: i32 = 100;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InstanceParams {
    pub customers: usize,
    pub fleet_size: usize,
    pub capacity: i32,
    pub grid_size: i32,
}

impl InstanceParams {
    pub fn new(customers: usize, fleet_size: usize, capacity: i32) -> Self {
        Self {
            customers,
            fleet_size,
            capacity,
            grid_size: GRID_SIZE,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.customers + 1
    }

    /// 1-based id of the depot, always the last node.
    pub fn depot(&self) -> usize {
        self.customers + 1
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub params: InstanceParams,
    pub positions: Vec<(i32, i32)>,
    pub demands: Vec<i32>,
    pub distance_matrix: Vec<Vec<i32>>,
}

impl Instance {
    pub fn generate(params: &InstanceParams, rng: &mut SmallRng) -> Result<Self> {
        if params.customers == 0 {
            return Err(anyhow!("at least one customer is required"));
        }
        if params.fleet_size == 0 {
            return Err(anyhow!("at least one vehicle is required"));
        }
        if params.capacity < 2 {
            return Err(anyhow!(
                "vehicle capacity must be at least 2, got {}",
                params.capacity
            ));
        }
        if params.grid_size <= 0 {
            return Err(anyhow!(
                "grid size must be positive, got {}",
                params.grid_size
            ));
        }

        let positions: Vec<(i32, i32)> = (0..params.num_nodes())
            .map(|_| {
                (
                    rng.gen_range(0..params.grid_size),
                    rng.gen_range(0..params.grid_size),
                )
            })
            .collect();
        // Customer demands are uniform in [1, capacity - 1]; the depot is
        // the last node and demands nothing.
        let mut demands: Vec<i32> = (0..params.customers)
            .map(|_| rng.gen_range(1..params.capacity))
            .collect();
        demands.push(0);

        Ok(Self {
            distance_matrix: distance_matrix(&positions),
            params: params.clone(),
            positions,
            demands,
        })
    }
}

/// Pairwise Euclidean distances truncated toward zero, as the model
/// expects. Symmetric with a zero diagonal.
pub fn distance_matrix(positions: &[(i32, i32)]) -> Vec<Vec<i32>> {
    positions
        .iter()
        .map(|&(x1, y1)| {
            positions
                .iter()
                .map(|&(x2, y2)| {
                    let dx = (x1 - x2) as f64;
                    let dy = (y1 - y2) as f64;
                    dx.hypot(dy) as i32
                })
                .collect()
        })
        .collect()
}
