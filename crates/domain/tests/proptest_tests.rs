//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{Category, Coordinate, EventType, FerryType, Geometry};
use proptest::prelude::*;

// ============================================================================
// Coordinate Property Tests
// ============================================================================

mod coordinate_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_accepted(
            lon in -180.0f64..=180.0f64,
            lat in -90.0f64..=90.0f64
        ) {
            let coordinate = Coordinate::new(lon, lat).unwrap();
            prop_assert!((coordinate.longitude() - lon).abs() < f64::EPSILON);
            prop_assert!((coordinate.latitude() - lat).abs() < f64::EPSILON);
        }

        #[test]
        fn out_of_range_latitude_rejected(
            lon in -180.0f64..=180.0f64,
            lat in prop_oneof![(-1000.0f64..-90.1f64), (90.1f64..1000.0f64)]
        ) {
            prop_assert!(Coordinate::new(lon, lat).is_err());
        }

        #[test]
        fn out_of_range_longitude_rejected(
            lon in prop_oneof![(-1000.0f64..-180.1f64), (180.1f64..1000.0f64)],
            lat in -90.0f64..=90.0f64
        ) {
            prop_assert!(Coordinate::new(lon, lat).is_err());
        }

        #[test]
        fn kml_tuple_is_lon_lat_zero(
            lon in -180.0f64..=180.0f64,
            lat in -90.0f64..=90.0f64
        ) {
            let tuple = Coordinate::new(lon, lat).unwrap().to_kml_tuple();
            let parts: Vec<&str> = tuple.split(',').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert_eq!(parts[0].parse::<f64>().unwrap(), lon);
            prop_assert_eq!(parts[1].parse::<f64>().unwrap(), lat);
            prop_assert_eq!(parts[2], "0");
        }
    }

    #[test]
    fn non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 49.0).is_err());
        assert!(Coordinate::new(-123.0, f64::INFINITY).is_err());
    }
}

// ============================================================================
// Geometry Property Tests
// ============================================================================

mod geometry_tests {
    use super::*;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-180.0f64..=180.0f64, -90.0f64..=90.0f64)
            .prop_map(|(lon, lat)| Coordinate::new(lon, lat).unwrap())
    }

    proptest! {
        #[test]
        fn geometry_keeps_every_vertex(points in prop::collection::vec(coordinate(), 1..50)) {
            let geometry = Geometry::from_coordinates(points.clone()).unwrap();
            prop_assert_eq!(geometry.coordinates(), points.as_slice());
            prop_assert_eq!(geometry.is_point(), points.len() == 1);
            prop_assert_eq!(
                geometry.to_kml_coordinates().split(' ').count(),
                points.len()
            );
        }
    }

    #[test]
    fn empty_geometry_rejected() {
        assert!(Geometry::from_coordinates(Vec::new()).is_err());
    }
}

// ============================================================================
// Classification Property Tests
// ============================================================================

mod classification_tests {
    use super::*;

    proptest! {
        #[test]
        fn any_event_type_string_classifies(raw in ".*") {
            let event_type = EventType::from_api(&raw);
            prop_assert!(EventType::ALL.contains(&event_type));
        }

        #[test]
        fn any_ferry_type_string_classifies(raw in ".*") {
            let ferry_type = FerryType::from_api(&raw);
            prop_assert!(FerryType::ALL.contains(&ferry_type));
        }

        #[test]
        fn event_keys_round_trip(index in 0usize..EventType::ALL.len()) {
            let event_type = EventType::ALL[index];
            prop_assert_eq!(EventType::from_api(event_type.key()), event_type);
        }
    }

    #[test]
    fn style_keys_are_unique() {
        let mut keys: Vec<String> = Category::all().iter().map(Category::style_key).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }
}
