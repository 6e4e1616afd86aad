use claims::{assert_err, assert_matches, assert_ok};
use flightpath::geometry::{DEFAULT_CLOSENESS_THRESHOLD, distance, is_close};
use flightpath::motion::DEFAULT_STEP_LENGTH;
use flightpath::{
    Confinement, DEFAULT_DEPOT, DeliveryPath, DeliveryPlanner, DeliveryRequest, EngineConfig,
    Error, Position, RegionRegistry, SearchFailure,
};
use insta::assert_debug_snapshot;
use std::sync::Arc;
use std::thread;

const SORA_LELLA: Position = Position::new(-3.202541470527649, 55.943284737579376);
const CIVERINOS: Position = Position::new(-3.1912869215011597, 55.945535152517735);

fn registry() -> Arc<RegionRegistry> {
    let registry = RegionRegistry::from_path("tests/fixtures/edinburgh.json")
        .expect("Failed to load region fixture");
    Arc::new(registry)
}

fn planner() -> DeliveryPlanner {
    DeliveryPlanner::new(registry(), EngineConfig::default())
}

/// Check the flight properties every planned delivery must have
fn assert_valid_delivery(registry: &RegionRegistry, request: &DeliveryRequest, delivery: &DeliveryPath) {
    let path = delivery.path();

    assert_eq!(path.start(), request.depot);
    assert!(is_close(delivery.pickup(), request.restaurant, DEFAULT_CLOSENESS_THRESHOLD));
    assert!(is_close(path.end(), request.dropoff(), DEFAULT_CLOSENESS_THRESHOLD));

    for (i, (from, to)) in path.segments().enumerate() {
        let step = distance(from, to);
        assert!(
            (step - DEFAULT_STEP_LENGTH).abs() < 1e-12,
            "segment {i} has length {step}"
        );
        assert!(!registry.is_in_no_fly_zone(to), "waypoint {} is in a no-fly zone", i + 1);
        assert!(
            registry.is_legal_move(from, to, Confinement::Free),
            "segment {i} crosses a no-fly zone"
        );
    }

    let legs = [
        (delivery.outbound(), request.restaurant),
        (delivery.inbound(), request.dropoff()),
    ];
    for (leg, target) in legs {
        if !registry.is_in_central_area(target) {
            continue;
        }

        if let Some(entered) = leg.iter().position(|&p| registry.is_in_central_area(p)) {
            assert!(
                leg[entered..].iter().all(|&p| registry.is_in_central_area(p)),
                "leg left the central area after entering it"
            );
        }
    }
}

#[test]
fn fixture_regions() {
    let registry = registry();

    assert_eq!(registry.central_area().name(), "central");

    let names: Vec<_> = registry.no_fly_zones().iter().map(|zone| zone.name()).collect();
    assert_debug_snapshot!(names, @r#"
    [
        "George Square Area",
        "Dr Elsie Inglis Quadrangle",
        "Bristo Square Open Area",
        "Bayes Central Area",
    ]
    "#);

    assert!(registry.is_in_central_area(DEFAULT_DEPOT));
    assert!(!registry.is_in_no_fly_zone(DEFAULT_DEPOT));
    assert!(!registry.is_in_central_area(SORA_LELLA));
    assert!(registry.is_in_central_area(CIVERINOS));
}

#[test]
fn delivery_from_outside_central_area() {
    let registry = registry();
    let planner = DeliveryPlanner::new(registry.clone(), EngineConfig::default());
    let request = DeliveryRequest::new(SORA_LELLA);

    let delivery = assert_ok!(planner.plan_delivery(&request));

    assert_valid_delivery(&registry, &request, &delivery);
    assert!(!registry.is_in_central_area(delivery.pickup()));
}

#[test]
fn delivery_inside_central_area() {
    let registry = registry();
    let planner = DeliveryPlanner::new(registry.clone(), EngineConfig::default());
    let request = DeliveryRequest::new(CIVERINOS);

    let delivery = assert_ok!(planner.plan_delivery(&request));

    assert_valid_delivery(&registry, &request, &delivery);
    assert!(delivery.path().waypoints().iter().all(|&p| registry.is_in_central_area(p)));
}

#[test]
fn delivery_with_dropoff() {
    let registry = registry();
    let planner = DeliveryPlanner::new(registry.clone(), EngineConfig::default());
    let request = DeliveryRequest::new(CIVERINOS).with_dropoff(Position::new(-3.1860, 55.9430));

    let delivery = assert_ok!(planner.plan_delivery(&request));

    assert_valid_delivery(&registry, &request, &delivery);
}

#[test]
fn single_leg() {
    let registry = registry();
    let planner = DeliveryPlanner::new(registry.clone(), EngineConfig::default());

    let path = assert_ok!(planner.plan_leg(DEFAULT_DEPOT, CIVERINOS));

    assert_eq!(path.start(), DEFAULT_DEPOT);
    assert!(is_close(path.end(), CIVERINOS, DEFAULT_CLOSENESS_THRESHOLD));
    for (from, to) in path.segments() {
        assert!(registry.is_legal_move(from, to, Confinement::CentralArea));
    }
}

#[test]
fn restaurant_inside_no_fly_zone() {
    let planner = planner();
    let george_square = Position::new(-3.1888, 55.9437);

    // The leg is confined, so the search runs out of central-area positions
    let err = assert_err!(planner.plan_delivery(&DeliveryRequest::new(george_square)));
    assert_matches!(
        err,
        Error::PathUnreachable {
            reason: SearchFailure::Exhausted,
            ..
        }
    );
    assert!(err.is_client_error());
}

#[test]
fn restaurant_outside_central_area_inside_no_fly_zone() {
    let registry = RegionRegistry::from_json(
        r#"{
            "centralArea": {
                "name": "central",
                "vertices": [
                    {"lng": -3.192473, "lat": 55.946233},
                    {"lng": -3.192473, "lat": 55.942617},
                    {"lng": -3.184319, "lat": 55.942617},
                    {"lng": -3.184319, "lat": 55.946233},
                    {"lng": -3.192473, "lat": 55.946233}
                ]
            },
            "noFlyZones": [{
                "name": "Meadows",
                "vertices": [
                    {"lng": -3.196, "lat": 55.940},
                    {"lng": -3.196, "lat": 55.942},
                    {"lng": -3.193, "lat": 55.942},
                    {"lng": -3.193, "lat": 55.940},
                    {"lng": -3.196, "lat": 55.940}
                ]
            }]
        }"#,
    )
    .unwrap();
    let planner = DeliveryPlanner::new(
        Arc::new(registry),
        EngineConfig::default().with_max_expansions(5_000),
    );

    let err = assert_err!(planner.plan_delivery(&DeliveryRequest::new(Position::new(-3.1945, 55.941))));
    assert_matches!(
        err,
        Error::PathUnreachable {
            reason: SearchFailure::BudgetExceeded,
            expansions: 5_001,
        }
    );
}

#[test]
fn concurrent_deliveries_share_registry() {
    let planner = planner();
    let expected = assert_ok!(planner.plan_delivery(&DeliveryRequest::new(SORA_LELLA)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let planner = planner.clone();
            thread::spawn(move || planner.plan_delivery(&DeliveryRequest::new(SORA_LELLA)))
        })
        .collect();

    for handle in handles {
        let delivery = assert_ok!(handle.join().unwrap());
        assert_eq!(delivery, expected);
    }
}
