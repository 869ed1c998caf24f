mod plot;

use anyhow::{anyhow, Result};
use clap::{arg, ArgMatches, Command};
use mvrp_instance::{
    decode_routes, verify_solution, Instance, InstanceParams, Route, RoutingSolution,
};
use mvrp_minizinc::Minizinc;
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("mvrp-runner")
        .about("Generates a random routing instance, solves it with MiniZinc, and plots the routes")
        .arg(
            arg!(--customers [COUNT] "Number of customers to serve, depot excluded")
                .default_value("7")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--vehicles [COUNT] "Number of vehicles available")
                .default_value("10")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--capacity [UNITS] "Carrying capacity of each vehicle")
                .default_value("30")
                .value_parser(clap::value_parser!(i32)),
        )
        .arg(
            arg!(--"instance-seed" [SEED] "Seed for customer positions and demands")
                .default_value("10")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--"color-seed" [SEED] "Seed for the vehicle color assignment")
                .default_value("96")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(arg!(--solver [TAG] "MiniZinc solver tag to run the model with").default_value("gecode"))
        .arg(
            arg!(--minizinc [PATH] "Path to the minizinc executable")
                .default_value("minizinc")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--plot [FILE] "Where to write the route plot")
                .default_value("routes.png")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--output [FILE] "Also write the instance and solution as JSON")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn main() {
    let matches = cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let customers = *matches.get_one::<usize>("customers").unwrap();
    let vehicles = *matches.get_one::<usize>("vehicles").unwrap();
    let capacity = *matches.get_one::<i32>("capacity").unwrap();
    let instance_seed = *matches.get_one::<u64>("instance-seed").unwrap();
    let color_seed = *matches.get_one::<u64>("color-seed").unwrap();
    let solver_tag = matches.get_one::<String>("solver").unwrap();
    let minizinc_path = matches.get_one::<PathBuf>("minizinc").unwrap();
    let plot_path = matches.get_one::<PathBuf>("plot").unwrap();

    let params = InstanceParams::new(customers, vehicles, capacity);
    let mut instance_rng = SmallRng::seed_from_u64(instance_seed);
    let instance = Instance::generate(&params, &mut instance_rng)?;
    print_instance(&instance);

    let solver = Minizinc::lookup(minizinc_path, solver_tag)?;
    let solution = solver.solve(&instance)?;
    verify_solution(&instance, &solution)?;
    let routes = decode_routes(&solution, params.depot())?;

    let mut color_rng = SmallRng::seed_from_u64(color_seed);
    let colors = plot::assign_colors(vehicles, &mut color_rng);
    print_solution(&instance, &solution, &routes, &colors);

    if let Some(path) = matches.get_one::<PathBuf>("output") {
        let output = RunOutput {
            instance: &instance,
            solution: &solution,
        };
        fs::write(path, serde_json::to_string_pretty(&output)?)?;
        println!("Wrote {}", path.display());
    }

    plot::plot_routes(&instance, &routes, &colors, plot_path)
        .map_err(|e| anyhow!("could not render {}: {}", plot_path.display(), e))?;
    println!("Wrote {}", plot_path.display());
    Ok(())
}

fn print_instance(instance: &Instance) {
    let ruler = "#".repeat(50);
    println!("{}", ruler);
    println!("Number of customers: {}", instance.params.customers);
    println!("Demands at each node: {:?}", instance.demands);
    println!(
        "Number of vehicles available: {}",
        instance.params.fleet_size
    );
    println!(
        "Maximum capacity of each vehicle: {}",
        instance.params.capacity
    );
    println!("{}", ruler);
    println!();
}

fn print_solution(
    instance: &Instance,
    solution: &RoutingSolution,
    routes: &[Route],
    colors: &[plot::VehicleColor],
) {
    println!("{} SOLUTION FOUND {}", "#".repeat(10), "#".repeat(20));
    println!("Distance Travelled: {}", solution.distance_travelled);
    println!("Number of Vehicles used: {}", solution.vehicles_used);
    for route in routes {
        let stops = route
            .stops
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        let load: i64 = route
            .stops
            .iter()
            .map(|&s| instance.demands[s - 1] as i64)
            .sum();
        println!(
            "Vehicle {} [{}]: depot -> {} -> depot (load {}/{})",
            route.vehicle,
            colors[route.vehicle - 1].name,
            stops,
            load,
            instance.params.capacity
        );
    }
    println!("{}", "#".repeat(50));
}

#[derive(Serialize)]
struct RunOutput<'a> {
    instance: &'a Instance,
    solution: &'a RoutingSolution,
}
