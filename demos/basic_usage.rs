// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with `--features logging` to see integrity warnings on stderr, and
// with `--features serde` for the JSON encoding.

use calc_record::prelude::*;
use rust_decimal::Decimal;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Calculation Record Example ===\n");

    let config = CalculatorConfig::new().with_precision(6);

    // Build a few records from raw input
    println!("Calculations:");
    let inputs = [
        ("add", "2", "3"),
        ("subtract", "0.3", "0.1"),
        ("multiply", "1.5", "4"),
        ("divide", "22", "7"),
        ("power", "2", "0.5"),
        ("root", "27", "3"),
    ];

    let mut history = Vec::new();
    for (op, a, b) in inputs {
        match CalculationRecord::from_input(op, a, b, &config) {
            Ok(calc) => {
                println!("  {}  (formatted: {})", calc, calc.format_with(&config));
                history.push(calc);
            },
            Err(err) => println!("  {} {} {} failed: {}", a, op, b, err),
        }
    }

    // Failures surface as typed errors
    println!("\nFailures:");
    let failing = [
        ("divide", Decimal::from(10), Decimal::ZERO),
        ("power", Decimal::from(2), Decimal::from(-1)),
        ("root", Decimal::from(-4), Decimal::from(2)),
        ("modulo", Decimal::from(7), Decimal::from(2)),
        ("multiply", Decimal::new(1, 20), Decimal::new(1, 20)),
    ];
    for (op, a, b) in failing {
        if let Err(err) = CalculationRecord::create(op, a, b) {
            println!("  {} {} {}: {}", a, op, b, err);
        }
    }

    // Persist and restore through the key-value form
    println!("\n=== Stored Form ===");
    let stored: Vec<CalculationData> = history.iter().map(|c| c.serialize()).collect();
    for data in &stored {
        println!("  {:?}", data);
    }

    let restored: Vec<CalculationRecord> = stored
        .iter()
        .filter_map(|data| CalculationRecord::deserialize(data).ok())
        .collect();
    println!(
        "\nRestored {} of {} records intact: {}",
        restored.len(),
        history.len(),
        restored == history
    );

    // A tampered result is accepted with a warning
    println!("\n=== Tampered Record ===");
    if let Some(first) = stored.first() {
        let mut tampered = first.clone();
        tampered.insert("result".to_string(), "6".to_string());
        if let Ok(calc) = CalculationRecord::deserialize(&tampered) {
            println!("  Restored as: {}", calc);
        }
        let strict = CalculatorConfig::strict();
        if let Err(err) =
            CalculationRecord::deserialize_with_config(&tampered, &strict, &LoggingIntegrityHandler)
        {
            println!("  Strict restore: {}", err);
        }
    }

    #[cfg(feature = "serde")]
    {
        println!("\n=== JSON ===");
        for calc in &history {
            if let Ok(json) = calc.to_json() {
                println!("  {}", json);
            }
        }
    }
}
