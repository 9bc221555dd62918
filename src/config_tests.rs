use crate::config::Config;
use std::collections::HashMap;
use std::path::PathBuf;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.model_path, PathBuf::from("model/vehicle_price_model.json"));
    assert_eq!(config.export_dir, PathBuf::from("."));
    assert_eq!(config.reference_year, 2025);
}

#[test]
fn test_config_overrides() {
    let config = Config::from_lookup(lookup_from(&[
        ("VEHICLE_MODEL_PATH", "/tmp/models/rf.json"),
        ("VEHICLE_EXPORT_DIR", "exports"),
        ("VEHICLE_REFERENCE_YEAR", " 2026 "),
    ]))
    .unwrap();

    assert_eq!(config.model_path, PathBuf::from("/tmp/models/rf.json"));
    assert_eq!(config.export_dir, PathBuf::from("exports"));
    assert_eq!(config.reference_year, 2026);
}

#[test]
fn test_invalid_reference_year_is_fatal() {
    let err = Config::from_lookup(lookup_from(&[("VEHICLE_REFERENCE_YEAR", "next")])).unwrap_err();
    assert!(err.to_string().contains("VEHICLE_REFERENCE_YEAR"));
}
