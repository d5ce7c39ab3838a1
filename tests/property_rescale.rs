use gym_rescale::{BoxSpace, DynSpace, GymError, RangeRescaler};
use ndarray::{Array1, ArrayD};
use proptest::prelude::*;

// Per-element (source low, source width, position in [0, 1]).
fn elements() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    proptest::collection::vec((-100.0f64..100.0, 0.1f64..100.0, 0.0f64..=1.0), 1..6)
}

fn source_of(elems: &[(f64, f64, f64)]) -> BoxSpace<f64> {
    let low: Vec<f64> = elems.iter().map(|e| e.0).collect();
    let high: Vec<f64> = elems.iter().map(|e| e.0 + e.1).collect();
    BoxSpace::new(Array1::from(low).into_dyn(), Array1::from(high).into_dyn()).unwrap()
}

fn dyn_array(values: impl IntoIterator<Item = f64>) -> ArrayD<f64> {
    Array1::from(values.into_iter().collect::<Vec<_>>()).into_dyn()
}

proptest! {
    // rescale(s_low) == low and rescale(s_high) == high
    #[test]
    fn boundaries_map_exactly(elems in elements(), t_low in -50.0f64..50.0, t_width in 0.1f64..50.0) {
        let src = source_of(&elems);
        let r = RangeRescaler::new(&DynSpace::Box(src.clone()), t_low, t_low + t_width).unwrap();
        let at_low = r.rescale(&src, src.low()).unwrap();
        let at_high = r.rescale(&src, src.high()).unwrap();
        for (&a, &b) in at_low.iter().zip(at_high.iter()) {
            prop_assert_eq!(a, t_low);
            prop_assert!((b - (t_low + t_width)).abs() < 1e-9);
        }
    }

    // Inputs inside the source box land inside the target range.
    #[test]
    fn inside_values_stay_in_range(elems in elements(), t_low in -50.0f64..50.0, t_width in 0.1f64..50.0) {
        let src = source_of(&elems);
        let r = RangeRescaler::new(&DynSpace::Box(src.clone()), t_low, t_low + t_width).unwrap();
        let v = dyn_array(elems.iter().map(|e| e.0 + e.1 * e.2));
        let out = r.rescale(&src, &v).unwrap();
        prop_assert!(r.output_space().low().iter().zip(out.iter()).all(|(l, x)| l <= x));
        prop_assert!(r.output_space().high().iter().zip(out.iter()).all(|(h, x)| x <= h));
    }

    // Inputs outside the source box are clamped to the nearest target bound.
    #[test]
    fn outside_values_clamp_to_nearest_bound(elems in elements(), overshoot in 0.01f64..1e6, below in any::<bool>()) {
        let src = source_of(&elems);
        let r = RangeRescaler::new(&DynSpace::Box(src.clone()), 0.0f64, 1.0f64).unwrap();
        let v = if below {
            dyn_array(elems.iter().map(|e| e.0 - overshoot))
        } else {
            dyn_array(elems.iter().map(|e| e.0 + e.1 + overshoot))
        };
        let out = r.rescale(&src, &v).unwrap();
        let expected = if below { 0.0 } else { 1.0 };
        prop_assert!(out.iter().all(|&x| x == expected));
    }

    // Rescaling forward and back recovers interior values.
    #[test]
    fn round_trip_recovers_interior_values(elems in elements(), t_low in -50.0f64..50.0, t_width in 0.1f64..50.0) {
        let src = source_of(&elems);
        let fwd = RangeRescaler::new(&DynSpace::Box(src.clone()), t_low, t_low + t_width).unwrap();
        let mid = fwd.output_space().clone();
        let back = RangeRescaler::new(&DynSpace::Box(mid.clone()), src.low().clone(), src.high().clone()).unwrap();

        // Keep strictly inside so clamping never engages.
        let v = dyn_array(elems.iter().map(|e| e.0 + e.1 * (0.01 + 0.98 * e.2)));
        let there = fwd.rescale(&src, &v).unwrap();
        let again = back.rescale(&mid, &there).unwrap();
        for (a, b) in v.iter().zip(again.iter()) {
            prop_assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    // Ordered inputs give ordered outputs.
    #[test]
    fn rescale_is_monotone(elems in elements(), a in -200.0f64..200.0, d in 0.0f64..200.0) {
        let src = source_of(&elems);
        let r = RangeRescaler::new(&DynSpace::Box(src.clone()), -1.0f64, 1.0f64).unwrap();
        let n = elems.len();
        let lo = r.rescale(&src, &dyn_array(std::iter::repeat(a).take(n))).unwrap();
        let hi = r.rescale(&src, &dyn_array(std::iter::repeat(a + d).take(n))).unwrap();
        prop_assert!(lo.iter().zip(hi.iter()).all(|(x, y)| x <= y));
    }

    // Any target with high <= low somewhere is rejected.
    #[test]
    fn inverted_targets_are_rejected(elems in elements(), t in -10.0f64..10.0, gap in 0.0f64..10.0) {
        let src = DynSpace::Box(source_of(&elems));
        let err = RangeRescaler::new(&src, t, t - gap).unwrap_err();
        prop_assert!(matches!(err, GymError::InvalidBounds(_)));
    }
}

#[test]
fn nan_low_is_rejected() {
    let src = DynSpace::Box(BoxSpace::from_bounds(-1.0f64, 1.0, &[2]).unwrap());
    let err = RangeRescaler::new(&src, f64::NAN, 1.0f64).unwrap_err();
    assert!(matches!(err, GymError::InvalidBounds(_)));
}
