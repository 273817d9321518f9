use dashboard_core::engine::{classify, compute_displacement, compute_ratio, EngineClass, EngineSpec};
use dashboard_core::CoreError;
use proptest::prelude::*;

#[test]
fn test_reference_engine_end_to_end() {
    let spec = EngineSpec::new(80.0, 70.0, 4).unwrap();
    let result = spec.evaluate().unwrap();

    assert_eq!(result.displacement_cc, 1407.43);
    assert_eq!(result.ratio, 0.571);
    assert_eq!(result.class, EngineClass::MediumStroke);
    assert_eq!(result.class.label(), "medium-stroke");
}

#[test]
fn test_classification_boundaries() {
    assert_eq!(classify(0.4999).unwrap(), EngineClass::LongStroke);
    assert_eq!(classify(0.5).unwrap(), EngineClass::MediumStroke);
    assert_eq!(classify(0.7999).unwrap(), EngineClass::MediumStroke);
    assert_eq!(classify(0.8).unwrap(), EngineClass::ShortStroke);
}

#[test]
fn test_invalid_parameters_are_typed() {
    let err = compute_ratio(80.0, 0.0).unwrap_err();
    assert!(matches!(err, CoreError::InvalidParameter { name: "stroke", .. }));

    let err = EngineSpec::new(-80.0, 70.0, 4).unwrap_err();
    assert!(matches!(err, CoreError::InvalidParameter { name: "bore", .. }));
}

#[test]
fn test_oversquare_and_long_stroke_engines() {
    // 100 mm bore over 60 mm stroke: 50/60 = 0.833
    let short = EngineSpec::new(100.0, 60.0, 2).unwrap().evaluate().unwrap();
    assert_eq!(short.class, EngineClass::ShortStroke);

    // 70 mm bore over 90 mm stroke: 35/90 = 0.389
    let long = EngineSpec::new(70.0, 90.0, 1).unwrap().evaluate().unwrap();
    assert_eq!(long.class, EngineClass::LongStroke);
}

proptest! {
    #[test]
    fn prop_displacement_scales_with_cylinders(
        bore in 1.0f64..200.0,
        stroke in 1.0f64..200.0,
        cylinders in 1u32..=16,
    ) {
        let single = compute_displacement(bore, stroke, 1).unwrap();
        let total = compute_displacement(bore, stroke, cylinders).unwrap();
        // Both sides are rounded to 0.01 independently.
        let tolerance = 0.005 * f64::from(cylinders) + 0.005 + 1e-9;
        prop_assert!((total - single * f64::from(cylinders)).abs() <= tolerance);
    }

    #[test]
    fn prop_displacement_monotonic(
        bore in 20.0f64..200.0,
        stroke in 20.0f64..200.0,
        cylinders in 1u32..16,
        step in 1.0f64..20.0,
    ) {
        let base = compute_displacement(bore, stroke, cylinders).unwrap();
        prop_assert!(compute_displacement(bore + step, stroke, cylinders).unwrap() > base);
        prop_assert!(compute_displacement(bore, stroke + step, cylinders).unwrap() > base);
        prop_assert!(compute_displacement(bore, stroke, cylinders + 1).unwrap() > base);
    }

    #[test]
    fn prop_classify_is_total_over_finite_ratios(ratio in 0.0f64..10.0) {
        prop_assert!(classify(ratio).is_ok());
    }
}
