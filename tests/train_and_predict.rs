use std::fs;
use std::path::PathBuf;
use vehicle_price::application::ml::pipeline::ForestParams;
use vehicle_price::application::ml::predictor::PricePredictor;
use vehicle_price::application::ml::smartcore_predictor::SmartCorePricePredictor;
use vehicle_price::application::ml::trainer::{TrainerConfig, train};
use vehicle_price::application::session::{ActionOutcome, PredictionSession, SessionAction};
use vehicle_price::domain::history::{HISTORY_COLUMNS, HistoryEntry};
use vehicle_price::domain::ml::feature_registry::record_to_row;
use vehicle_price::domain::vehicle::{
    BodyType, Drivetrain, FuelType, Transmission, VehicleRecord, VehicleSpec,
};
use vehicle_price::infrastructure::dataset_loader::load_dataset;
use vehicle_price::infrastructure::model_store::ModelStore;

fn work_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vehicle-price-it-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_dataset(dir: &PathBuf) -> PathBuf {
    let vehicles = [
        ("Toyota", "Camry", "Sedan", "Front-wheel Drive", 24_000),
        ("Ford", "F-150", "Pickup Truck", "Four-wheel Drive", 35_000),
        ("BMW", "X5", "SUV", "All-wheel Drive", 52_000),
        ("Honda", "Civic", "Sedan", "Front-wheel Drive", 21_000),
        ("Kia", "Rio", "Hatchback", "Front-wheel Drive", 15_000),
    ];
    let fuels = ["Gasoline", "Diesel", "Hybrid"];

    let mut csv = String::from(
        "make,model,year,mileage,cylinders,fuel,transmission,body,doors,drivetrain,price\n",
    );
    for i in 0..100 {
        let (make, model, body, drive, base) = vehicles[i % vehicles.len()];
        let year = 2008 + (i % 17);
        let mileage = (2024 - year) * 11_000 + (i * 731) % 5_000;
        let price = base as i64 - ((2024 - year) as i64) * 900 - (mileage as i64) / 50;
        let price = price.max(2_000);
        let fuel = fuels[i % fuels.len()];
        // Every tenth row has no price and must be ignored
        let price_cell = if i % 10 == 9 { String::new() } else { price.to_string() };
        csv.push_str(&format!(
            "{make},{model},{year},{mileage},{},{fuel},Automatic,{body},4,{drive},{price_cell}\n",
            if base > 30_000 { 6 } else { 4 }
        ));
    }

    let path = dir.join("dataset.csv");
    fs::write(&path, csv).unwrap();
    path
}

fn trained_predictor(name: &str) -> (SmartCorePricePredictor, PathBuf) {
    let dir = work_dir(name);
    let dataset = load_dataset(&write_dataset(&dir)).unwrap();
    assert_eq!(dataset.dropped, 10);

    let config = TrainerConfig {
        forest: ForestParams {
            n_trees: 30,
            ..ForestParams::default()
        },
        ..TrainerConfig::default()
    };
    let outcome = train(dataset, &config).unwrap();
    assert_eq!(outcome.report.labelled_rows, 90);
    assert!(outcome.report.metrics.is_some());

    let model_path = dir.join("model").join("vehicle_price_model.json");
    ModelStore::new(&model_path).save(&outcome.pipeline).unwrap();

    (SmartCorePricePredictor::load(&model_path).unwrap(), dir)
}

fn camry() -> VehicleSpec {
    VehicleSpec {
        make: "Toyota".to_string(),
        model: "Camry".to_string(),
        year: 2020,
        mileage: 30_000,
        cylinders: 4,
        fuel: FuelType::Gasoline,
        transmission: Transmission::Automatic,
        body: BodyType::Sedan,
        doors: 4,
        drivetrain: Drivetrain::FrontWheel,
    }
}

#[test]
fn test_camry_scenario_end_to_end() {
    let (predictor, _dir) = trained_predictor("camry");
    let mut session = PredictionSession::default();

    let outcome = session.handle(&predictor, SessionAction::Submit(camry()));
    let prediction = match outcome {
        ActionOutcome::Predicted(p) => p,
        other => panic!("unexpected outcome: {:?}", other),
    };

    assert!(prediction.price > 0.0);
    assert!(prediction.formatted().starts_with('$'));
    assert_eq!(session.history().len(), 1);

    let entry = &session.history().entries()[0];
    assert_eq!(entry.make, "Toyota");
    assert_eq!(entry.model, "Camry");
    assert_eq!(entry.year, 2020);
    assert_eq!(entry.mileage, 30_000);
    assert_eq!(entry.body, BodyType::Sedan);
    assert_eq!(entry.predicted_price, (prediction.price * 100.0).round() / 100.0);
}

#[test]
fn test_boundary_and_unknown_inputs_predict() {
    let (predictor, _dir) = trained_predictor("bounds");
    let mut session = PredictionSession::default();

    let specs = vec![
        VehicleSpec { year: 1990, ..camry() },
        VehicleSpec { year: 2025, ..camry() },
        VehicleSpec { mileage: 0, ..camry() },
        VehicleSpec {
            make: "Lada".to_string(),
            model: "Niva".to_string(),
            fuel: FuelType::Electric,
            ..camry()
        },
        VehicleSpec {
            make: String::new(),
            model: String::new(),
            ..camry()
        },
    ];

    for spec in specs {
        let prediction = session.submit(&predictor, spec.clone()).unwrap();
        assert!(prediction.price.is_finite(), "non-finite for {:?}", spec);
        assert!(prediction.price >= 0.0, "negative for {:?}", spec);
    }
    assert_eq!(session.history().len(), 5);
}

#[test]
fn test_reloaded_artifact_predicts_identically() {
    let (predictor, dir) = trained_predictor("reload");
    let reloaded =
        SmartCorePricePredictor::load(&dir.join("model").join("vehicle_price_model.json")).unwrap();

    for year in [1995, 2005, 2015, 2024] {
        let record = VehicleRecord::new(VehicleSpec { year, ..camry() }).unwrap();
        let row = record_to_row(&record, 2025);
        let a = predictor.predict(&row).unwrap();
        let b = reloaded.predict(&row).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_history_export_and_clear() {
    let (predictor, _dir) = trained_predictor("export");
    let mut session = PredictionSession::default();

    for mileage in [1_000, 50_000, 120_000] {
        session.submit(&predictor, VehicleSpec { mileage, ..camry() }).unwrap();
    }

    let bytes = match session.handle(&predictor, SessionAction::ExportCsv) {
        ActionOutcome::Exported(bytes) => bytes,
        other => panic!("unexpected outcome: {:?}", other),
    };

    let mut rdr = csv::Reader::from_reader(bytes.as_slice());
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, HISTORY_COLUMNS);
    let rows: Vec<HistoryEntry> = rdr.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows, session.history().entries());

    assert_eq!(
        session.handle(&predictor, SessionAction::ClearHistory),
        ActionOutcome::Cleared { removed: 3 }
    );
    assert_eq!(session.history().len(), 0);
}
