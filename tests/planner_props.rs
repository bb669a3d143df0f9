//! Property tests for the resize planner.

use proptest::prelude::*;

use image_compressor::processing::plan::{plan_resize, MAX_DIMENSION};

proptest! {
    #[test]
    fn output_dimensions_stay_positive(
        w in 1..20_000i32,
        h in 1..20_000i32,
        tw in 0..8_000i32,
        th in 0..8_000i32,
    ) {
        let plan = plan_resize(w, h, tw, th, MAX_DIMENSION);
        prop_assert!(plan.scale > 0.0);
        prop_assert!(plan.width >= 1);
        prop_assert!(plan.height >= 1);
    }

    #[test]
    fn no_targets_under_the_cap_is_identity(
        w in 1..=MAX_DIMENSION,
        h in 1..=MAX_DIMENSION,
    ) {
        let plan = plan_resize(w, h, 0, 0, MAX_DIMENSION);
        prop_assert!(!plan.needs_resize);
        prop_assert_eq!(plan.scale, 1.0);
        prop_assert_eq!((plan.width, plan.height), (w, h));
    }

    #[test]
    fn capped_output_never_exceeds_the_cap(
        w in 1..40_000i32,
        h in 1..40_000i32,
    ) {
        let plan = plan_resize(w, h, 0, 0, MAX_DIMENSION);
        prop_assert!(plan.width.max(plan.height) <= MAX_DIMENSION);
    }

    #[test]
    fn both_targets_never_overshoot_the_requested_box(
        w in 1..20_000i32,
        h in 1..20_000i32,
        tw in 1..8_000i32,
        th in 1..8_000i32,
    ) {
        let plan = plan_resize(w, h, tw, th, MAX_DIMENSION);
        // Rounding may land one pixel over on the non-driving axis.
        prop_assert!(plan.width <= tw + 1);
        prop_assert!(plan.height <= th + 1);
    }

    #[test]
    fn planning_is_deterministic(
        w in 1..20_000i32,
        h in 1..20_000i32,
        tw in 0..8_000i32,
        th in 0..8_000i32,
    ) {
        let a = plan_resize(w, h, tw, th, MAX_DIMENSION);
        let b = plan_resize(w, h, tw, th, MAX_DIMENSION);
        prop_assert_eq!(a, b);
    }
}
