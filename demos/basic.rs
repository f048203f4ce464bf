//! Basic example: run GSEMO on an rMNK instance and dump the anytime
//! trace as CSV.

use rmnk_anytime::anytime::write_csv;
use rmnk_anytime::config::GsemoConfig;
use rmnk_anytime::gsemo::Gsemo;
use rmnk_anytime::instance::RmnkInstance;
use std::env;
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let instance_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("instances/rmnk_0.0_2_64_1_0.dat");

    println!("Loading instance from: {}", instance_path);
    let instance = RmnkInstance::from_file(instance_path)?;
    println!(
        "Loaded rMNK instance: rho = {}, M = {}, N = {}, K = {}",
        instance.rho(),
        instance.objectives(),
        instance.bits(),
        instance.epistasis()
    );

    let config = GsemoConfig::new()
        .with_max_evaluations(10_000)
        .with_seed(42);

    let mut driver = Gsemo::new(instance, config)?;
    driver.run();

    println!("Archive size: {}", driver.archive().len());
    println!("Final hypervolume: {}", driver.hypervolume());
    println!("Anytime rows: {}", driver.anytime().len());

    let output_path = format!("{}.anytime.csv", instance_path);
    println!("Writing anytime trace to: {}", output_path);
    write_csv(driver.anytime(), File::create(&output_path)?)?;

    Ok(())
}
