//! History and Clear commands.

use crate::calculator::Calculator;

/// Print the history, either as a numbered list or as a JSON array.
pub fn run_history(calculator: &Calculator, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(calculator.history())?);
        return Ok(());
    }

    if calculator.history().is_empty() {
        println!("No calculations yet");
        return Ok(());
    }
    for (i, record) in calculator.history().iter().enumerate() {
        println!("{:>4}. {record}", i + 1);
    }
    Ok(())
}

/// Clear the history and persist the empty state.
pub fn run_clear(calculator: &mut Calculator) {
    let count = calculator.history().len();
    calculator.clear_history();
    if !calculator.settings().auto_save {
        if let Err(e) = calculator.save_history(None) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
    println!("Cleared {count} records");
}
