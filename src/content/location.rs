//! Location record generation.
//!
//! A location message either names one of a few fixed real-world points
//! or carries a freshly generated uniform-random coordinate labeled
//! "Location".

use rand::Rng;

use crate::api::GeoPoint;

/// Fixed named points a location draw can land on.
const NAMED_POINTS: [(f64, f64, &str); 3] = [
    (48.85837, 2.294481, "Party"),
    (40.7128, -74.0060, "New York"),
    (-22.9068, -43.1729, "Rio de Janeiro"),
];

/// Draw one location record: uniformly one of the named points or a
/// random coordinate.
pub fn random_location<R: Rng>(rng: &mut R) -> GeoPoint {
    match rng.gen_range(0..=NAMED_POINTS.len()) {
        0 => GeoPoint {
            latitude: rng.gen_range(-90.0..=90.0),
            longitude: rng.gen_range(-180.0..=180.0),
            name: "Location".to_string(),
        },
        slot => {
            let (latitude, longitude, name) = NAMED_POINTS[slot - 1];
            GeoPoint {
                latitude,
                longitude,
                name: name.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::thread_rng;

    use super::*;

    #[test]
    fn test_coordinates_stay_in_range() {
        let mut rng = thread_rng();
        for _ in 0..5_000 {
            let point = random_location(&mut rng);
            assert!((-90.0..=90.0).contains(&point.latitude));
            assert!((-180.0..=180.0).contains(&point.longitude));
            assert!(!point.name.is_empty());
        }
    }

    #[test]
    fn test_generated_points_are_labeled_location() {
        let mut rng = thread_rng();
        let named: Vec<&str> = NAMED_POINTS.iter().map(|(_, _, name)| *name).collect();
        for _ in 0..1_000 {
            let point = random_location(&mut rng);
            if !named.contains(&point.name.as_str()) {
                assert_eq!(point.name, "Location");
            }
        }
    }
}
