use medisurv_form::{PredictError, PredictionHandler, FEATURE_COUNT, FEATURE_NAMES};
use medisurv_model::{ModelError, RandomForest, StandardScaler};
use tests::{constant_forest, identity_scaler, ArtifactDir};

fn load(artifacts: &ArtifactDir) -> Result<PredictionHandler, PredictError> {
    PredictionHandler::from_artifacts(artifacts.classifier_path(), artifacts.scaler_path())
}

#[test]
fn corrupt_classifier_fails_startup() {
    let artifacts = ArtifactDir::with(&identity_scaler(), &constant_forest(1));
    artifacts.corrupt_classifier(b"{\"n_features\": 9, \"classes\": [0, 1], \"trees\": [");
    assert!(matches!(
        load(&artifacts),
        Err(PredictError::Model(ModelError::Parse { .. }))
    ));
}

#[test]
fn pickled_classifier_fails_startup() {
    let artifacts = ArtifactDir::with(&identity_scaler(), &constant_forest(1));
    artifacts.corrupt_classifier(b"\x80\x04\x95\x00\x00\x00\x00sklearn.ensemble._forest");
    assert!(matches!(load(&artifacts), Err(PredictError::Model(_))));
}

#[test]
fn missing_scaler_fails_startup() {
    let artifacts = ArtifactDir::new();
    artifacts.write_classifier(&constant_forest(1));
    assert!(matches!(
        load(&artifacts),
        Err(PredictError::Model(ModelError::Io { .. }))
    ));
}

#[test]
fn classifier_of_wrong_width_fails_startup() {
    let eight_wide = RandomForest::new(8, vec![1], constant_forest(1).trees).unwrap();
    let artifacts = ArtifactDir::with(&identity_scaler(), &eight_wide);
    assert!(matches!(
        load(&artifacts),
        Err(PredictError::Width {
            artifact: "classifier",
            expected: 9,
            got: 8
        })
    ));
}

#[test]
fn scaler_fitted_on_other_columns_fails_startup() {
    let mut names: Vec<String> = FEATURE_NAMES.iter().map(|n| n.to_string()).collect();
    names[1] = "Tumor Size (mm)".into();
    let scaler = StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])
        .unwrap()
        .with_feature_names(names)
        .unwrap();
    let artifacts = ArtifactDir::with(&scaler, &constant_forest(1));
    let err = load(&artifacts).unwrap_err();
    assert!(err.to_string().contains("Tumor Size (mm)"));
}
