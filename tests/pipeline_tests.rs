/// Integration tests for request validation and the prediction pipeline
///
/// Run with: cargo test --test pipeline_tests -- --nocapture

mod common;

use weather_predictor::{
    dataset::{self, RawRecord},
    error::{Field, PredictError},
    pipeline::validate,
    plot,
    trainer::{self, TrainOptions},
    types::{format_percent, PredictionForm},
    Predictor, Weather,
};

fn form(t: &str, h: &str, w: &str) -> PredictionForm {
    PredictionForm::new(t, h, w)
}

fn assert_two_decimals(s: &str) {
    let body = s.strip_suffix('%').unwrap_or_else(|| panic!("{:?} lacks %", s));
    let (_, frac) = body.split_once('.').unwrap_or_else(|| panic!("{:?} lacks decimals", s));
    assert_eq!(frac.len(), 2, "{:?}", s);
    assert!(body.parse::<f64>().is_ok(), "{:?}", s);
}

#[test]
fn test_missing_field() {
    let p = common::fixed_predictor(0.3);
    assert!(matches!(p.predict(&form("", "50", "10")), Err(PredictError::MissingField)));
    assert!(matches!(p.predict(&form("25", "", "10")), Err(PredictError::MissingField)));
    assert!(matches!(p.predict(&form("25", "50", "")), Err(PredictError::MissingField)));
    assert_eq!(PredictError::MissingField.to_string(), "All fields must be filled.");
}

#[test]
fn test_invalid_number() {
    let err = validate(&form("abc", "50", "10")).unwrap_err();
    match &err {
        PredictError::InvalidNumber { field, input, .. } => {
            assert_eq!(*field, Field::Temperature);
            assert_eq!(input, "abc");
        }
        other => panic!("expected InvalidNumber, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Value error:"), "{}", err);

    // whitespace alone is present but not a number
    assert!(matches!(validate(&form("25", " ", "10")), Err(PredictError::InvalidNumber { field: Field::Humidity, .. })));
    // surrounding whitespace is tolerated
    assert!(validate(&form(" 25 ", "50", "10")).is_ok());
}

#[test]
fn test_range_checks_in_order() {
    assert!(matches!(validate(&form("25", "150", "10")), Err(PredictError::OutOfRange(Field::Humidity))));
    assert!(matches!(validate(&form("51", "150", "101")), Err(PredictError::OutOfRange(Field::Temperature))));
    assert!(matches!(validate(&form("-50", "0", "101")), Err(PredictError::OutOfRange(Field::WindSpeed))));
    assert!(matches!(validate(&form("NaN", "50", "10")), Err(PredictError::OutOfRange(Field::Temperature))));

    let edge = validate(&form("50", "100", "0")).unwrap();
    assert_eq!(edge.features(), [50.0, 100.0, 0.0]);

    assert_eq!(
        PredictError::OutOfRange(Field::Humidity).to_string(),
        "Humidity must be between 0 and 100%."
    );
}

#[test]
fn test_result_from_fixed_model() {
    let p = common::fixed_predictor(0.8734);
    let r = p.predict(&form("18", "90", "12")).unwrap();
    assert_eq!(r.label, Weather::Rainy);
    assert_eq!(r.confidence(), "87.34%");
    assert_eq!(r.rainy(), "87.34%");
    assert_eq!(r.sunny(), "12.66%");
    assert_eq!(r.plot.mime, "image/svg+xml");
    assert!(r.plot.data_url().starts_with("data:image/svg+xml;base64,"));

    let p = common::fixed_predictor(0.1);
    let r = p.predict(&form("35", "30", "4")).unwrap();
    assert_eq!(r.label, Weather::Sunny);
    assert_eq!(r.confidence(), "90.00%");
}

#[test]
fn test_model_failure_is_unexpected() {
    let p = common::broken_predictor();
    let err = p.predict(&form("25", "50", "10")).unwrap_err();
    assert!(!err.is_validation());
    assert!(err.to_string().starts_with("Unexpected error:"), "{}", err);

    // validation still runs before the model is touched
    assert!(matches!(p.predict(&form("", "50", "10")), Err(PredictError::MissingField)));
}

#[test]
fn test_percent_format() {
    for v in [0.0, 3.14159, 50.0, 99.999, 100.0, 12.345] {
        assert_two_decimals(&format_percent(v));
    }
    assert_eq!(format_percent(99.999), "100.00%");
}

#[test]
fn test_plot_is_deterministic_svg() {
    let reference = common::reference();
    let a = plot::render_svg(&reference, 80.0, 15.0).unwrap();
    let b = plot::render_svg(&reference, 80.0, 15.0).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("<svg"));
    assert!(a.contains("Weather Prediction Visualization"));
    assert!(a.contains("Your Input"));
    // the request point is a star, not another circle
    assert!(a.contains("<polygon"), "star marker is drawn as a polygon");
    assert_eq!(a.matches("<circle").count(), reference.len() + 2, "reference points and two legend dots");

    // empty reference data still renders the request point
    assert!(plot::render_comparison(&[], 50.0, 10.0).is_ok());
}

#[test]
fn test_trained_bundle_prediction() {
    println!("\n=== Test: Trained Bundle Prediction ===");
    let records: Vec<RawRecord> = dataset::generate(3000, 42).into_iter().map(RawRecord::from).collect();
    let (bundle, _) = trainer::train(&records, &TrainOptions::default()).unwrap();
    let predictor = Predictor::from_bundle(bundle);
    assert!(!predictor.reference().is_empty());

    let r = predictor.predict(&form("25", "80", "15")).unwrap();
    println!("✓ {} sunny={} rainy={}", r.label, r.sunny(), r.rainy());
    assert!((r.sunny_percent + r.rainy_percent - 100.0).abs() < 1e-9);
    assert!((0.0..=100.0).contains(&r.sunny_percent));
    assert!((0.0..=100.0).contains(&r.rainy_percent));
    assert_two_decimals(&r.confidence());

    let dry = predictor.predict(&form("44", "20", "1")).unwrap();
    assert_eq!(dry.label, Weather::Sunny);
    assert_eq!(dry.label == Weather::Rainy, dry.rainy_percent > 50.0);
}

#[test]
fn test_plot_thins_large_reference_sets() {
    println!("\n=== Test: Plot Thinning ===");
    let reference = dataset::generate(5000, 42);
    let svg = plot::render_svg(&reference, 80.0, 15.0).unwrap();
    let circles = svg.matches("<circle").count();
    println!("✓ {} circles, {} bytes", circles, svg.len());
    assert!(circles <= plot::MAX_PLOT_POINTS + 2, "{} circles drawn", circles);
    assert!(circles > plot::MAX_PLOT_POINTS / 2);
    // both classes survive the stride
    assert!(svg.contains("Sunny") && svg.contains("Rainy"));

    let small = dataset::generate(300, 7);
    let svg = plot::render_svg(&small, 50.0, 10.0).unwrap();
    assert_eq!(svg.matches("<circle").count(), 300 + 2, "small sets are drawn in full");
}
