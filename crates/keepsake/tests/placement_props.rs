use keepsake::geometry::{Point, Rect, Size};
use keepsake::placement::{PlacementBounds, compute_placement};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn arena() -> impl Strategy<Value = (Rect, Size)> {
    (200.0f64..800.0, 150.0f64..600.0, 40.0f64..120.0, 20.0f64..60.0).prop_map(
        |(w, h, bw, bh)| (Rect::new(30.0, 60.0, w, h), Size::new(bw, bh)),
    )
}

fn roomy_arena() -> impl Strategy<Value = (Rect, Size)> {
    (600.0f64..900.0, 400.0f64..700.0, 40.0f64..80.0, 20.0f64..40.0).prop_map(
        |(w, h, bw, bh)| (Rect::new(0.0, 0.0, w, h), Size::new(bw, bh)),
    )
}

proptest! {
    #[test]
    fn placement_stays_in_range(
        (container, button) in arena(),
        px in 0.0f64..900.0,
        py in 0.0f64..700.0,
        seed in any::<u64>(),
    ) {
        let bounds = PlacementBounds::new(container, button, 8.0).unwrap();
        let obstacle = Rect::new(20.0, 20.0, 60.0, 30.0);
        let mut rng = StdRng::seed_from_u64(seed);
        let p = compute_placement(&bounds, &obstacle, Some(Point::new(px, py)), 80.0, &mut rng);
        prop_assert!(bounds.contains(p));
    }

    #[test]
    fn small_obstacle_is_never_overlapped(
        (container, button) in roomy_arena(),
        ox in 0.0f64..1.0,
        oy in 0.0f64..1.0,
        seed in any::<u64>(),
    ) {
        // A corner obstacle blocks only a few percent of the range, so 30
        // attempts always find a clear spot.
        let bounds = PlacementBounds::new(container, button, 8.0).unwrap();
        let obstacle = Rect::new(8.0 + ox * 10.0, 8.0 + oy * 10.0, 10.0, 10.0);
        let mut rng = StdRng::seed_from_u64(seed);
        let p = compute_placement(&bounds, &obstacle, None, 80.0, &mut rng);
        prop_assert_eq!(p.rect(button).intersection_area(&obstacle), 0.0);
    }
}
