use foundation::coordinate::Coordinate;
use foundation::math::distance;

use crate::truck::Truck;

/// Attach `distance` (miles from `user_location`) to a copy of every truck.
///
/// Without a location the trucks are returned as they are; a missing
/// location is a normal state, not an error. The input is never touched.
pub fn annotate(trucks: &[Truck], user_location: Option<Coordinate>) -> Vec<Truck> {
    let Some(origin) = user_location else {
        return trucks.to_vec();
    };

    trucks
        .iter()
        .map(|t| Truck {
            distance: Some(distance(origin, t.coordinate)),
            ..t.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::annotate;
    use crate::truck::Truck;
    use foundation::coordinate::Coordinate;
    use foundation::math::distance;
    use pretty_assertions::assert_eq;

    fn trucks() -> Vec<Truck> {
        vec![
            Truck::new("a", "A", Coordinate::new(37.78, -122.41)).with_rating(4.0),
            Truck::new("b", "B", Coordinate::new(37.70, -122.45)).with_categories(["Tacos"]),
        ]
    }

    #[test]
    fn without_location_returns_trucks_unchanged() {
        let input = trucks();
        let out = annotate(&input, None);
        assert_eq!(out, input);
        assert!(out.iter().all(|t| t.distance.is_none()));
    }

    #[test]
    fn attaches_distance_from_user() {
        let user = Coordinate::new(37.77, -122.42);
        let out = annotate(&trucks(), Some(user));
        assert_eq!(out[0].distance, Some(distance(user, out[0].coordinate)));
        assert_eq!(out[1].distance, Some(distance(user, out[1].coordinate)));
        assert_eq!(out[0].rating, Some(4.0));
        assert!(out[1].categories.contains("Tacos"));
    }

    #[test]
    fn is_pure_and_deterministic() {
        let input = trucks();
        let snapshot = input.clone();
        let user = Some(Coordinate::new(37.0, -122.0));

        let first = annotate(&input, user);
        let second = annotate(&input, user);
        assert_eq!(input, snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn reannotating_replaces_old_distance() {
        let near = annotate(&trucks(), Some(Coordinate::new(37.78, -122.41)));
        assert_eq!(near[0].distance, Some(0.0));
        let far = annotate(&near, Some(Coordinate::new(40.0, -120.0)));
        assert!(far[0].distance.unwrap() > 100.0);
    }
}
