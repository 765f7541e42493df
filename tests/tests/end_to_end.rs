use medisurv_form::{
    build_feature_vector, Outcome, PredictError, PredictionHandler, RawInputs, FEATURE_COUNT,
};
use medisurv_model::StandardScaler;
use pretty_assertions::assert_eq;
use tests::{bundled_artifacts, constant_forest, identity_scaler, stump, ArtifactDir};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn documented_example() -> RawInputs {
    RawInputs {
        age: 55,
        tumor_size: 30.0,
        grade: 2,
        tumor_stage: "Stage II".into(),
        er_status: "Positive".into(),
        pr_status: "Negative".into(),
        her2_status: "Negative".into(),
        hormone_therapy: "Yes".into(),
        radio_therapy: "No".into(),
    }
}

#[test]
fn documented_example_renders_per_label() {
    init_logger();
    let raw = documented_example();
    assert_eq!(
        build_feature_vector(&raw).unwrap().as_slice(),
        &[55.0, 30.0, 2.0, 2.0, 1.0, 0.0, 0.0, 1.0, 0.0]
    );

    for (label, expected) in [
        (1, Outcome::LikelySurvival),
        (0, Outcome::MortalityRisk),
        (2, Outcome::MortalityRisk),
    ] {
        let artifacts = ArtifactDir::with(&identity_scaler(), &constant_forest(label));
        let handler =
            PredictionHandler::from_artifacts(artifacts.classifier_path(), artifacts.scaler_path())
                .unwrap();
        let prediction = handler.submit(&raw).unwrap();
        assert_eq!(prediction.label, label);
        assert_eq!(prediction.outcome, expected);
    }
}

#[test]
fn classifier_sees_scaled_features() {
    init_logger();
    // Age column standardized around 50 with unit 10: 55 -> 0.5, 45 -> -0.5.
    let mut mean = vec![0.0; FEATURE_COUNT];
    let mut scale = vec![1.0; FEATURE_COUNT];
    mean[0] = 50.0;
    scale[0] = 10.0;
    let scaler = StandardScaler::new(mean, scale).unwrap();
    let artifacts = ArtifactDir::with(&scaler, &stump(0, 0.0, 1, 0));
    let handler =
        PredictionHandler::from_artifacts(artifacts.classifier_path(), artifacts.scaler_path())
            .unwrap();

    let older = handler.submit(&documented_example()).unwrap();
    assert_eq!(older.outcome, Outcome::MortalityRisk);

    let younger = RawInputs {
        age: 45,
        ..documented_example()
    };
    assert_eq!(handler.submit(&younger).unwrap().outcome, Outcome::LikelySurvival);
}

#[test]
fn repeated_submissions_are_identical() {
    init_logger();
    let artifacts = ArtifactDir::with(&identity_scaler(), &stump(4, 0.5, 0, 1));
    let handler =
        PredictionHandler::from_artifacts(artifacts.classifier_path(), artifacts.scaler_path())
            .unwrap();
    let raw = documented_example();
    let first = handler.submit(&raw).unwrap();
    for _ in 0..10 {
        assert_eq!(handler.submit(&raw).unwrap(), first);
    }
}

#[test]
fn handler_is_shareable_across_threads() {
    init_logger();
    let artifacts = ArtifactDir::with(&identity_scaler(), &stump(4, 0.5, 0, 1));
    let handler = std::sync::Arc::new(
        PredictionHandler::from_artifacts(artifacts.classifier_path(), artifacts.scaler_path())
            .unwrap(),
    );
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handler = handler.clone();
            std::thread::spawn(move || handler.submit(&documented_example()).unwrap().outcome)
        })
        .collect();
    for worker in workers {
        assert_eq!(worker.join().unwrap(), Outcome::LikelySurvival);
    }
}

#[test]
fn invalid_input_is_reported_not_predicted() {
    init_logger();
    let artifacts = ArtifactDir::with(&identity_scaler(), &constant_forest(1));
    let handler =
        PredictionHandler::from_artifacts(artifacts.classifier_path(), artifacts.scaler_path())
            .unwrap();
    let raw = RawInputs {
        age: 19,
        ..documented_example()
    };
    assert!(matches!(handler.submit(&raw), Err(PredictError::Form(_))));
}

#[test]
fn bundled_artifacts_serve_predictions() {
    init_logger();
    let (model, scaler) = bundled_artifacts();
    let handler = PredictionHandler::from_artifacts(model, scaler).unwrap();
    let young = RawInputs::default();
    assert_eq!(handler.submit(&young).unwrap().outcome, Outcome::LikelySurvival);
    let advanced = RawInputs {
        age: 85,
        tumor_size: 120.0,
        grade: 3,
        tumor_stage: "Stage IV".into(),
        ..RawInputs::default()
    };
    assert_eq!(handler.submit(&advanced).unwrap().outcome, Outcome::MortalityRisk);
}
