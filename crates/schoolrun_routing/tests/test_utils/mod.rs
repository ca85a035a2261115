#![allow(dead_code)]

use schoolrun_routing::{GeoPoint, Router, RouterParams};

pub fn seeded_router(seed: u64) -> Router {
    Router::new(RouterParams {
        seed: Some(seed),
        ..RouterParams::default()
    })
}

pub fn place_point(router: &Router, name: &str) -> GeoPoint {
    router
        .gazetteer()
        .place(name)
        .map(|place| place.point)
        .unwrap_or_else(|| panic!("{} should be in the gazetteer", name))
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} to be within {} of {}",
        actual,
        tolerance,
        expected
    );
}
