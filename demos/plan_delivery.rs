use flightpath::format::to_geojson_feature;
use flightpath::{DeliveryPlanner, DeliveryRequest, EngineConfig, Position, RegionRegistry};
use std::env;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flightpath=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 && args.len() != 4 {
        eprintln!("Usage: {} <regions.json> [<restaurant-lng> <restaurant-lat>]", args[0]);
        std::process::exit(1);
    }

    let registry = RegionRegistry::from_path(&args[1])?;
    let planner = DeliveryPlanner::new(Arc::new(registry), EngineConfig::default());

    // Sora Lella Vegan Restaurant, west of the central area
    let restaurant = match args.get(2..4) {
        Some([lng, lat]) => Position::new(lng.parse()?, lat.parse()?),
        _ => Position::new(-3.202541470527649, 55.943284737579376),
    };

    let delivery = planner.plan_delivery(&DeliveryRequest::new(restaurant))?;

    eprintln!(
        "{} moves, pickup at waypoint {}",
        delivery.path().move_count(),
        delivery.pickup_index()
    );

    let feature = to_geojson_feature(delivery.path())?;
    println!("{}", serde_json::to_string_pretty(&feature)?);

    Ok(())
}
