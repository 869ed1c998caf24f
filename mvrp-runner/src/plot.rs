use mvrp_instance::{Instance, Route};
use plotters::prelude::*;
use rand::{rngs::SmallRng, seq::SliceRandom};
use std::error::Error;
use std::path::Path;

/// A named color so the console report can say which vehicle is which.
#[derive(Debug, Clone, Copy)]
pub struct VehicleColor {
    pub name: &'static str,
    pub color: RGBColor,
}

const PALETTE: &[VehicleColor] = &[
    VehicleColor { name: "crimson", color: RGBColor(220, 20, 60) },
    VehicleColor { name: "royalblue", color: RGBColor(65, 105, 225) },
    VehicleColor { name: "seagreen", color: RGBColor(46, 139, 87) },
    VehicleColor { name: "darkorange", color: RGBColor(255, 140, 0) },
    VehicleColor { name: "mediumorchid", color: RGBColor(186, 85, 211) },
    VehicleColor { name: "teal", color: RGBColor(0, 128, 128) },
    VehicleColor { name: "goldenrod", color: RGBColor(218, 165, 32) },
    VehicleColor { name: "firebrick", color: RGBColor(178, 34, 34) },
    VehicleColor { name: "steelblue", color: RGBColor(70, 130, 180) },
    VehicleColor { name: "olivedrab", color: RGBColor(107, 142, 35) },
    VehicleColor { name: "hotpink", color: RGBColor(255, 105, 180) },
    VehicleColor { name: "slateblue", color: RGBColor(106, 90, 205) },
    VehicleColor { name: "chocolate", color: RGBColor(210, 105, 30) },
    VehicleColor { name: "cadetblue", color: RGBColor(95, 158, 160) },
    VehicleColor { name: "indigo", color: RGBColor(75, 0, 130) },
    VehicleColor { name: "tomato", color: RGBColor(255, 99, 71) },
    VehicleColor { name: "darkcyan", color: RGBColor(0, 139, 139) },
    VehicleColor { name: "maroon", color: RGBColor(128, 0, 0) },
    VehicleColor { name: "forestgreen", color: RGBColor(34, 139, 34) },
    VehicleColor { name: "deeppink", color: RGBColor(255, 20, 147) },
];

/// Draws one color per vehicle without replacement, so a fixed seed always
/// yields the same assignment. Fleets larger than the palette wrap around.
pub fn assign_colors(fleet_size: usize, rng: &mut SmallRng) -> Vec<VehicleColor> {
    let mut order: Vec<usize> = (0..PALETTE.len()).collect();
    order.shuffle(rng);
    (0..fleet_size)
        .map(|v| PALETTE[order[v % order.len()]])
        .collect()
}

/// Renders every node with its id and each used vehicle's depot-to-depot
/// chain as directed colored segments labelled with the leg distance.
pub fn plot_routes(
    instance: &Instance,
    routes: &[Route],
    colors: &[VehicleColor],
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let depot = instance.params.depot();
    let span = instance.params.grid_size as f64;
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Path found by the solver", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(28)
        .y_label_area_size(32)
        .build_cartesian_2d(-5.0..span + 5.0, -5.0..span + 5.0)?;
    chart.configure_mesh().draw()?;

    for route in routes {
        let color = colors[route.vehicle - 1].color;
        let style = color.stroke_width(2);
        for (from, to) in route_legs(route, depot) {
            let a = position(instance, from);
            let b = position(instance, to);
            chart.draw_series(LineSeries::new(vec![a, b], style))?;
            chart.draw_series(std::iter::once(PathElement::new(arrow_head(a, b), style)))?;
            let label = instance.distance_matrix[from - 1][to - 1].to_string();
            let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
            chart.draw_series(std::iter::once(Text::new(
                label,
                mid,
                ("sans-serif", 13).into_font().color(&color),
            )))?;
        }
    }

    chart.draw_series(instance.positions.iter().enumerate().map(|(i, &(x, y))| {
        let node = i + 1;
        let marker = if node == depot {
            Circle::new((0, 0), 5, BLACK.filled())
        } else {
            Circle::new((0, 0), 4, BLUE.filled())
        };
        EmptyElement::at((x as f64, y as f64))
            + marker
            + Text::new(node.to_string(), (6, -14), ("sans-serif", 14))
    }))?;

    root.present()?;
    Ok(())
}

fn route_legs(route: &Route, depot: usize) -> Vec<(usize, usize)> {
    let mut legs = Vec::with_capacity(route.stops.len() + 1);
    let mut from = depot;
    for &stop in &route.stops {
        legs.push((from, stop));
        from = stop;
    }
    legs.push((from, depot));
    legs
}

fn position(instance: &Instance, node: usize) -> (f64, f64) {
    let (x, y) = instance.positions[node - 1];
    (x as f64, y as f64)
}

// Two short strokes angled off the leg, pulled back so the tip clears the
// node marker.
fn arrow_head(from: (f64, f64), to: (f64, f64)) -> Vec<(f64, f64)> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-6 {
        return Vec::new();
    }
    let (ux, uy) = (dx / len, dy / len);
    let tip = (to.0 - 2.0 * ux, to.1 - 2.0 * uy);
    let size = 2.5;
    let left = (
        tip.0 - size * (ux * 0.866 - uy * 0.5),
        tip.1 - size * (uy * 0.866 + ux * 0.5),
    );
    let right = (
        tip.0 - size * (ux * 0.866 + uy * 0.5),
        tip.1 - size * (uy * 0.866 - ux * 0.5),
    );
    vec![left, tip, right]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvrp_instance::{distance_matrix, InstanceParams};
    use rand::SeedableRng;

    fn small_instance() -> Instance {
        let positions = vec![(0, 0), (10, 0), (10, 10), (0, 10), (5, 5)];
        Instance {
            distance_matrix: distance_matrix(&positions),
            demands: vec![10, 10, 10, 10, 0],
            positions,
            params: InstanceParams {
                customers: 4,
                fleet_size: 2,
                capacity: 30,
                grid_size: 100,
            },
        }
    }

    #[test]
    fn color_assignment_is_deterministic_per_seed() {
        let mut a = SmallRng::seed_from_u64(96);
        let mut b = SmallRng::seed_from_u64(96);
        let first: Vec<&str> = assign_colors(10, &mut a).iter().map(|c| c.name).collect();
        let second: Vec<&str> = assign_colors(10, &mut b).iter().map(|c| c.name).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn colors_within_the_palette_are_distinct() {
        let mut rng = SmallRng::seed_from_u64(3);
        let colors = assign_colors(PALETTE.len(), &mut rng);
        let mut names: Vec<&str> = colors.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PALETTE.len());
    }

    #[test]
    fn a_fleet_larger_than_the_palette_wraps_around() {
        let mut rng = SmallRng::seed_from_u64(3);
        let colors = assign_colors(PALETTE.len() + 2, &mut rng);
        assert_eq!(colors.len(), PALETTE.len() + 2);
        assert_eq!(colors[0].name, colors[PALETTE.len()].name);
    }

    #[test]
    fn legs_run_depot_to_depot() {
        let route = Route {
            vehicle: 1,
            stops: vec![1, 2],
        };
        assert_eq!(route_legs(&route, 5), vec![(5, 1), (1, 2), (2, 5)]);
    }

    #[test]
    fn arrow_heads_vanish_on_zero_length_legs() {
        assert!(arrow_head((3.0, 3.0), (3.0, 3.0)).is_empty());
        assert_eq!(arrow_head((0.0, 0.0), (10.0, 0.0)).len(), 3);
    }

    #[test]
    #[ignore = "renders text through the system font stack"]
    fn renders_routes_to_a_png() {
        let instance = small_instance();
        let routes = vec![
            Route {
                vehicle: 1,
                stops: vec![1, 2],
            },
            Route {
                vehicle: 2,
                stops: vec![3, 4],
            },
        ];
        let mut rng = SmallRng::seed_from_u64(96);
        let colors = assign_colors(2, &mut rng);
        let path = std::env::temp_dir().join("mvrp-routes-test.png");
        plot_routes(&instance, &routes, &colors, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        let _ = std::fs::remove_file(&path);
    }
}
