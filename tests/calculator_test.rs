//! End-to-end scenarios through the public calculator API.

use std::fs;
use std::sync::{Arc, Mutex};

use reckon::{
    Calculation, CalculationObserver, Calculator, CalculatorError, JsonHistoryStore,
    OperationError, Settings, StepOutcome, ValidationError,
};
use tempfile::TempDir;

fn settings_in(dir: &TempDir) -> Arc<Settings> {
    Arc::new(Settings {
        history_dir: dir.path().join("data"),
        log_dir: dir.path().join("logs"),
        ..Settings::default()
    })
}

#[derive(Default)]
struct Seen(Mutex<Vec<String>>);

impl CalculationObserver for Seen {
    fn name(&self) -> &str {
        "seen"
    }

    fn notify(&self, calculation: &Calculation) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(calculation.to_string());
        Ok(())
    }
}

struct AlwaysFails;

impl CalculationObserver for AlwaysFails {
    fn name(&self) -> &str {
        "always-fails"
    }

    fn notify(&self, _calculation: &Calculation) -> anyhow::Result<()> {
        anyhow::bail!("observer is broken")
    }
}

#[test]
fn add_then_undo_then_redo() {
    let mut calc = Calculator::new(Arc::new(Settings::default()));

    let record = calc.calculate("add", 2, 3).unwrap();
    assert_eq!(record.result(), 5.0);
    assert_eq!(calc.history().len(), 1);

    assert_eq!(calc.undo(), StepOutcome::Emptied);
    assert!(calc.history().is_empty());

    assert_eq!(calc.redo(), StepOutcome::Restored);
    assert_eq!(calc.history().len(), 1);
    assert_eq!(calc.history()[0].result(), 5.0);
}

#[test]
fn new_calculation_invalidates_redo() {
    let mut calc = Calculator::new(Arc::new(Settings::default()));
    calc.calculate("add", 1, 1).unwrap();
    calc.calculate("add", 2, 2).unwrap();
    calc.undo();
    calc.calculate("multiply", 3, 3).unwrap();

    assert_eq!(calc.redo(), StepOutcome::Nothing);
    let results: Vec<f64> = calc.history().iter().map(Calculation::result).collect();
    assert_eq!(results, vec![2.0, 9.0]);
}

#[test]
fn history_is_bounded() {
    let settings = Arc::new(Settings {
        max_history_size: 3,
        ..Settings::default()
    });
    let mut calc = Calculator::new(settings);
    for i in 0..5 {
        calc.calculate("add", i, 0).unwrap();
    }
    let results: Vec<f64> = calc.history().iter().map(Calculation::result).collect();
    assert_eq!(results, vec![2.0, 3.0, 4.0]);
}

#[test]
fn divide_by_zero_leaves_history_unchanged() {
    let mut calc = Calculator::new(Arc::new(Settings::default()));
    calc.calculate("subtract", 10, 4).unwrap();

    let err = calc.calculate("divide", 1, 0).unwrap_err();
    assert!(matches!(
        err,
        CalculatorError::Operation(OperationError::DivisionByZero)
    ));
    assert_eq!(err.to_string(), "Division by zero");
    assert_eq!(calc.history().len(), 1);
}

#[test]
fn string_operands_are_validated() {
    let mut calc = Calculator::new(Arc::new(Settings::default()));
    assert_eq!(calc.calculate("power", " 2 ", "10").unwrap().result(), 1024.0);

    assert!(matches!(
        calc.calculate("add", "two", 1),
        Err(CalculatorError::Validation(ValidationError::NotANumber { .. }))
    ));
    assert!(matches!(
        calc.calculate("add", 1e13, 1),
        Err(CalculatorError::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert_eq!(calc.history().len(), 1);
}

#[test]
fn observers_see_each_success_once_despite_failures() {
    let mut calc = Calculator::new(Arc::new(Settings::default()));
    let seen = Arc::new(Seen::default());
    calc.register_observer(Arc::new(AlwaysFails));
    calc.register_observer(seen.clone());

    calc.calculate("add", 1, 2).unwrap();
    let _ = calc.calculate("log", -4, 0);
    calc.calculate_unary("abs", -9).unwrap();

    let seen = seen.0.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].starts_with("add(1, 2) = 3 at "));
    assert!(seen[1].starts_with("abs(-9, 0) = 9 at "));
}

#[test]
fn session_history_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_in(&temp_dir);

    {
        let mut calc = Calculator::open(settings.clone());
        calc.calculate("add", 2, 3).unwrap();
        calc.calculate("modulus", -7, 3).unwrap();
    }

    let mut calc = Calculator::open(settings.clone());
    let results: Vec<f64> = calc.history().iter().map(Calculation::result).collect();
    assert_eq!(results, vec![5.0, 2.0]);

    // Loaded records can be stepped back like any others
    assert_eq!(calc.undo(), StepOutcome::Restored);
    assert_eq!(calc.history().len(), 1);

    // The journal keeps every calculation even after undo
    let journal = fs::read_to_string(settings.journal_path()).unwrap();
    assert_eq!(journal.lines().count(), 2);
}

#[test]
fn load_skips_malformed_records() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mixed.json");
    fs::write(
        &path,
        r#"[
  {"operation": "add", "a": 1, "b": 2, "result": 3, "timestamp": "2024-05-01T10:00:00"},
  {"operation": "add", "a": "oops", "b": 2, "result": 3},
  {"operation": "Multiply", "a": "2", "b": "4", "result": 8}
]"#,
    )
    .unwrap();

    let mut calc = Calculator::new(Arc::new(Settings::default()));
    let report = calc.load_history(Some(&path)).unwrap();
    assert_eq!(report.loaded(), 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(calc.history()[1].operation(), "multiply");
}

#[test]
fn save_writes_json_array() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out/history.json");

    let mut calc = Calculator::new(Arc::new(Settings::default()));
    calc.calculate("percent", 25, 200).unwrap();
    calc.save_history(Some(&path)).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["operation"], "percent");
    assert_eq!(records[0]["result"], 12.5);
}

#[test]
fn corrupt_history_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let settings = settings_in(&temp_dir);
    fs::create_dir_all(&settings.history_dir).unwrap();
    fs::write(settings.history_path(), "not json at all").unwrap();

    let mut calc = Calculator::open(settings);
    assert!(calc.history().is_empty());
    assert_eq!(calc.calculate("add", 1, 1).unwrap().result(), 2.0);
}

#[test]
fn explicit_store_receives_autosave() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.json");
    let mut calc = Calculator::new(Arc::new(Settings::default()))
        .with_store(Box::new(JsonHistoryStore::new(&path)));

    calc.calculate("int_divide", 7, 2).unwrap();
    assert_eq!(calc.store_path(), Some(path.as_path()));
    assert!(fs::read_to_string(&path).unwrap().contains("int_divide"));
}

#[test]
fn cube_root_through_facade() {
    let mut calc = Calculator::new(Arc::new(Settings::default()));
    let record = calc.calculate("root", 27, 3).unwrap();
    assert_eq!(record.result(), 3.0);
    assert_eq!(calc.calculate("root", -27, 3).unwrap().result(), -3.0);
    assert_eq!(calc.history().len(), 2);
}

#[test]
fn non_finite_results_survive_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");

    let mut calc = Calculator::new(Arc::new(Settings::default()));
    assert!(calc.calculate_unary("exp", 1000).unwrap().result().is_infinite());
    assert!(calc.calculate("power", -8, 0.5).unwrap().result().is_nan());
    calc.calculate("add", 1, 1).unwrap();
    calc.save_history(Some(&path)).unwrap();

    let mut restored = Calculator::new(Arc::new(Settings::default()));
    let report = restored.load_history(Some(&path)).unwrap();
    assert_eq!(report.loaded(), 3);
    assert_eq!(report.skipped, 0);

    let history = restored.history();
    assert_eq!(history[0].result(), f64::INFINITY);
    assert!(history[1].result().is_nan());
    assert_eq!(history[2].result(), 2.0);
}
