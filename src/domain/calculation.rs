// ============================================================================
// Calculation Record
// One completed arithmetic operation with its result and timestamp
// ============================================================================

use super::config::{CalculatorConfig, IntegrityPolicy, DEFAULT_PRECISION, MAX_PRECISION};
use super::operation::Operation;
use crate::errors::{CalcResult, CalculatorError, OperationError};
use crate::interfaces::{IntegrityEvent, IntegrityHandler, LoggingIntegrityHandler};
use crate::numeric::{self, NumericError};
use crate::utils::InputValidator;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Flat key-value form of a record; the only durable representation.
pub type CalculationData = BTreeMap<String, String>;

pub const KEY_OPERATION: &str = "operation";
pub const KEY_OPERAND1: &str = "num1";
pub const KEY_OPERAND2: &str = "num2";
pub const KEY_RESULT: &str = "result";
pub const KEY_TIMESTAMP: &str = "timestamp";

/// An immutable, fully evaluated calculation.
///
/// The result is computed once when the record is built. Restoring a record
/// from [`CalculationData`] recomputes it rather than trusting the stored
/// value.
///
/// # Example
/// ```
/// use calc_record::prelude::*;
/// use rust_decimal::Decimal;
///
/// let calc = CalculationRecord::create("add", Decimal::from(2), Decimal::from(3)).unwrap();
/// assert_eq!(calc.result(), Decimal::from(5));
/// assert_eq!(calc.to_string(), "2 add 3 = 5");
///
/// let restored = CalculationRecord::deserialize(&calc.serialize()).unwrap();
/// assert_eq!(restored, calc);
/// ```
#[derive(Debug, Clone)]
pub struct CalculationRecord {
    operation: Operation,
    operand1: Decimal,
    operand2: Decimal,
    result: Decimal,
    timestamp: DateTime<Utc>,
}

impl CalculationRecord {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a record from an operation tag.
    ///
    /// # Errors
    /// Returns an operation error if the tag is unknown or evaluation fails.
    pub fn create(operation: &str, operand1: Decimal, operand2: Decimal) -> CalcResult<Self> {
        let operation = Operation::from_str(operation)?;
        Self::new(operation, operand1, operand2)
    }

    /// Build a record from a typed operation, stamped with the current time.
    ///
    /// # Errors
    /// Returns an operation error if evaluation fails.
    pub fn new(operation: Operation, operand1: Decimal, operand2: Decimal) -> CalcResult<Self> {
        let result = operation.apply(operand1, operand2)?;
        tracing::debug!(%operation, %operand1, %operand2, %result, "calculation created");
        Ok(Self {
            operation,
            operand1,
            operand2,
            result,
            timestamp: Utc::now(),
        })
    }

    /// Build a record from raw user input, validated against `config`.
    ///
    /// # Errors
    /// - Validation error for malformed or out-of-range input
    /// - Operation error if evaluation fails
    pub fn from_input(
        operation: &str,
        operand1: &str,
        operand2: &str,
        config: &CalculatorConfig,
    ) -> CalcResult<Self> {
        let operation = InputValidator::validate_operation(operation)?;
        let operand1 = InputValidator::validate_operand(operand1, config)?;
        let operand2 = InputValidator::validate_operand(operand2, config)?;
        Self::new(operation, operand1, operand2)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[inline]
    pub fn operand1(&self) -> Decimal {
        self.operand1
    }

    #[inline]
    pub fn operand2(&self) -> Decimal {
        self.operand2
    }

    #[inline]
    pub fn result(&self) -> Decimal {
        self.result
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Flatten the record into its five string fields.
    pub fn serialize(&self) -> CalculationData {
        let mut data = CalculationData::new();
        data.insert(KEY_OPERATION.to_string(), self.operation.tag().to_string());
        data.insert(KEY_OPERAND1.to_string(), self.operand1.to_string());
        data.insert(KEY_OPERAND2.to_string(), self.operand2.to_string());
        data.insert(KEY_RESULT.to_string(), self.result.to_string());
        data.insert(
            KEY_TIMESTAMP.to_string(),
            self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        );
        data
    }

    /// Restore a record, logging any stored-result mismatch as a warning.
    ///
    /// # Errors
    /// - `InvalidData` for a missing key, non-decimal number or bad timestamp
    /// - Any operation error raised while recomputing the result
    pub fn deserialize(data: &CalculationData) -> CalcResult<Self> {
        Self::deserialize_with(data, &LoggingIntegrityHandler)
    }

    /// Restore a record, reporting stored-result mismatches to `handler`.
    pub fn deserialize_with(
        data: &CalculationData,
        handler: &dyn IntegrityHandler,
    ) -> CalcResult<Self> {
        Self::deserialize_with_config(data, &CalculatorConfig::default(), handler)
    }

    /// Restore a record under the integrity policy of `config`.
    ///
    /// With [`IntegrityPolicy::Reject`] a mismatch fails with
    /// `OperationError::ResultMismatch` instead of reaching `handler`.
    pub fn deserialize_with_config(
        data: &CalculationData,
        config: &CalculatorConfig,
        handler: &dyn IntegrityHandler,
    ) -> CalcResult<Self> {
        let operation = Operation::from_str(required(data, KEY_OPERATION)?)?;
        let operand1 = parse_decimal(data, KEY_OPERAND1)?;
        let operand2 = parse_decimal(data, KEY_OPERAND2)?;
        let stored = parse_decimal(data, KEY_RESULT)?;
        let timestamp = parse_timestamp(required(data, KEY_TIMESTAMP)?)?;

        let mut record = Self::new(operation, operand1, operand2)?;
        record.timestamp = timestamp;
        tracing::debug!(%operation, %timestamp, "calculation restored");

        if stored != record.result {
            match config.integrity_policy {
                IntegrityPolicy::Warn => handler.on_event(IntegrityEvent::ResultMismatch {
                    operation,
                    operand1,
                    operand2,
                    stored,
                    computed: record.result,
                }),
                IntegrityPolicy::Reject => {
                    return Err(OperationError::ResultMismatch {
                        stored: stored.to_string(),
                        computed: record.result.to_string(),
                    }
                    .into());
                },
            }
        }

        Ok(record)
    }

    // ========================================================================
    // Formatting
    // ========================================================================

    /// Render the result rounded to `precision` places without trailing zeros.
    ///
    /// Falls back to the unrounded text when `precision` is beyond the
    /// decimal scale limit.
    pub fn format_result(&self, precision: u32) -> String {
        if precision > MAX_PRECISION {
            return self.result.to_string();
        }
        self.result.round_dp(precision).normalize().to_string()
    }

    /// [`format_result`](Self::format_result) at the default precision of 10.
    pub fn format_result_default(&self) -> String {
        self.format_result(DEFAULT_PRECISION)
    }

    /// [`format_result`](Self::format_result) at the configured precision.
    pub fn format_with(&self, config: &CalculatorConfig) -> String {
        self.format_result(config.precision)
    }
}

// ============================================================================
// JSON Encoding
// ============================================================================

#[cfg(feature = "serde")]
impl CalculationRecord {
    /// Encode the key-value form as a JSON object.
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string(&self.serialize())
            .map_err(|e| OperationError::InvalidData(e.to_string()).into())
    }

    /// Decode a JSON object of string fields and restore the record.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let data: CalculationData = serde_json::from_str(json)
            .map_err(|e| CalculatorError::from(OperationError::InvalidData(e.to_string())))?;
        Self::deserialize(&data)
    }
}

// ============================================================================
// Field Parsing
// ============================================================================

fn invalid_data(msg: String) -> CalculatorError {
    OperationError::InvalidData(msg).into()
}

fn required<'a>(data: &'a CalculationData, key: &str) -> CalcResult<&'a str> {
    data.get(key)
        .map(String::as_str)
        .ok_or_else(|| invalid_data(format!("missing field '{}'", key)))
}

fn parse_decimal(data: &CalculationData, key: &str) -> CalcResult<Decimal> {
    let text = required(data, key)?.trim();
    numeric::parse_decimal(text).map_err(|err| match err {
        NumericError::InvalidInput => {
            invalid_data(format!("field '{}' is not a decimal: {}", key, text))
        },
        _ => invalid_data(format!(
            "field '{}' is out of decimal range (max {}): {}",
            key,
            Decimal::MAX,
            text
        )),
    })
}

/// Date-time layouts accepted with an explicit offset, then without one (UTC).
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepts RFC 3339, ISO-8601 with a `T` or space separator (naive values
/// taken as UTC), or a bare date.
fn parse_timestamp(text: &str) -> CalcResult<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid_data(format!("invalid timestamp: {}", text)))
}

// ============================================================================
// Trait Implementations
// ============================================================================

/// Timestamps do not take part in equality.
impl PartialEq for CalculationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.operation == other.operation
            && self.operand1 == other.operand1
            && self.operand2 == other.operand2
            && self.result == other.result
    }
}

impl Eq for CalculationRecord {}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = {}",
            self.operand1, self.operation, self.operand2, self.result
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NoOpIntegrityHandler;
    use crate::test_support::capture_logs;
    use chrono::TimeZone;
    use std::sync::Mutex;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn op_err(result: CalcResult<CalculationRecord>) -> OperationError {
        match result {
            Err(CalculatorError::Operation(err)) => err,
            other => panic!("expected operation error, got {:?}", other),
        }
    }

    fn stored(op: &str, num1: &str, num2: &str, result: &str, ts: &str) -> CalculationData {
        [
            (KEY_OPERATION, op),
            (KEY_OPERAND1, num1),
            (KEY_OPERAND2, num2),
            (KEY_RESULT, result),
            (KEY_TIMESTAMP, ts),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[derive(Default)]
    struct CollectingHandler {
        events: Mutex<Vec<IntegrityEvent>>,
    }

    impl IntegrityHandler for CollectingHandler {
        fn on_event(&self, event: IntegrityEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_create_add() {
        let before = Utc::now();
        let calc = CalculationRecord::create("add", d(2), d(3)).unwrap();

        assert_eq!(calc.operation(), Operation::Add);
        assert_eq!(calc.operand1(), d(2));
        assert_eq!(calc.operand2(), d(3));
        assert_eq!(calc.result(), d(5));
        assert!(calc.timestamp() >= before);
    }

    #[test]
    fn test_create_failures() {
        assert_eq!(
            op_err(CalculationRecord::create("divide", d(10), d(0))),
            OperationError::DivisionByZero
        );
        assert_eq!(
            op_err(CalculationRecord::create("power", d(2), d(-1))),
            OperationError::NegativeExponent
        );
        assert_eq!(
            op_err(CalculationRecord::create("root", d(-4), d(2))),
            OperationError::NegativeRoot
        );
        assert_eq!(
            op_err(CalculationRecord::create("modulo", d(1), d(2))),
            OperationError::InvalidOperation("modulo".to_string())
        );
    }

    #[test]
    fn test_create_below_decimal_scale_fails() {
        let tiny = Decimal::new(1, 20);
        assert_eq!(
            op_err(CalculationRecord::create("multiply", tiny, tiny)),
            OperationError::CalculationFailed(NumericError::Underflow)
        );
        assert_eq!(
            op_err(CalculationRecord::create("power", Decimal::new(1, 1), d(30))),
            OperationError::CalculationFailed(NumericError::Underflow)
        );
    }

    #[test]
    fn test_create_logs_at_debug() {
        let (calc, logs) = capture_logs(|| CalculationRecord::create("add", d(2), d(3)));

        assert!(calc.is_ok());
        assert!(logs.contains("DEBUG"), "no debug line in {:?}", logs);
        assert!(logs.contains("calculation created"));
        assert!(logs.contains("result=5"));
    }

    #[test]
    fn test_serialize_fields() {
        let calc = CalculationRecord::create("multiply", Decimal::new(15, 1), d(4)).unwrap();
        let data = calc.serialize();

        assert_eq!(data.len(), 5);
        assert_eq!(data[KEY_OPERATION], "multiply");
        assert_eq!(data[KEY_OPERAND1], "1.5");
        assert_eq!(data[KEY_OPERAND2], "4");
        assert_eq!(data[KEY_RESULT], "6.0");
        assert!(DateTime::parse_from_rfc3339(&data[KEY_TIMESTAMP]).is_ok());
    }

    #[test]
    fn test_round_trip_preserves_timestamp() {
        let calc = CalculationRecord::create("divide", d(1), d(3)).unwrap();
        let restored = CalculationRecord::deserialize(&calc.serialize()).unwrap();

        assert_eq!(restored, calc);
        assert_eq!(restored.timestamp(), calc.timestamp());
        assert_eq!(restored.result(), calc.result());
    }

    #[test]
    fn test_round_trip_float_detour() {
        let calc = CalculationRecord::create("root", d(2), d(2)).unwrap();
        let restored = CalculationRecord::deserialize_with(&calc.serialize(), &NoOpIntegrityHandler)
            .unwrap();
        assert_eq!(restored, calc);
    }

    #[test]
    fn test_deserialize_legacy_naive_timestamp() {
        let data = stored("add", "2", "3", "5", "2024-03-01T12:30:45.123456");
        let calc = CalculationRecord::deserialize(&data).unwrap();

        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap()
            + chrono::Duration::microseconds(123_456);
        assert_eq!(calc.timestamp(), expected);
        assert_eq!(calc.result(), d(5));
    }

    #[test]
    fn test_deserialize_space_separated_timestamp() {
        let data = stored("add", "2", "3", "5", "2024-03-01 12:00:00");
        let calc = CalculationRecord::deserialize(&data).unwrap();
        assert_eq!(
            calc.timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );

        let data = stored("add", "2", "3", "5", "2024-03-01 12:00:00.250");
        let calc = CalculationRecord::deserialize(&data).unwrap();
        assert_eq!(
            calc.timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
                + chrono::Duration::milliseconds(250)
        );

        let data = stored("add", "2", "3", "5", "2024-03-01 14:00:00+02:00");
        let calc = CalculationRecord::deserialize(&data).unwrap();
        assert_eq!(
            calc.timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_deserialize_date_only_timestamp() {
        let data = stored("add", "2", "3", "5", "2024-03-01");
        let calc = CalculationRecord::deserialize(&data).unwrap();
        assert_eq!(
            calc.timestamp(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_deserialize_scientific_result() {
        let data = stored("multiply", "10", "10", "1E+2", "2024-03-01T00:00:00Z");
        let handler = CollectingHandler::default();
        let calc = CalculationRecord::deserialize_with(&data, &handler).unwrap();

        assert_eq!(calc.result(), d(100));
        assert!(handler.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_mismatch_reports_event() {
        let data = stored("add", "2", "3", "6", "2024-03-01T00:00:00Z");
        let handler = CollectingHandler::default();
        let calc = CalculationRecord::deserialize_with(&data, &handler).unwrap();

        assert_eq!(calc.result(), d(5));
        let events = handler.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![IntegrityEvent::ResultMismatch {
                operation: Operation::Add,
                operand1: d(2),
                operand2: d(3),
                stored: d(6),
                computed: d(5),
            }]
        );
    }

    #[test]
    fn test_deserialize_full_float_expansion() {
        // Exact expansion of the f64 nearest to sqrt(2)
        let data = stored(
            "power",
            "2",
            "0.5",
            "1.4142135623730951454746218587388284504413604736328125",
            "2024-03-01T00:00:00Z",
        );
        let handler = CollectingHandler::default();
        let calc = CalculationRecord::deserialize_with(&data, &handler).unwrap();

        assert_eq!(calc.result().to_string(), "1.4142135623730951454746218587");
        assert!(handler.events.lock().unwrap().is_empty());

        let strict =
            CalculationRecord::deserialize_with_config(&data, &CalculatorConfig::strict(), &handler);
        assert!(strict.is_ok());
    }

    #[test]
    fn test_deserialize_mismatch_logged_by_default() {
        let data = stored("add", "2", "3", "6", "2024-03-01T00:00:00Z");
        let (calc, logs) = capture_logs(|| CalculationRecord::deserialize(&data));

        assert_eq!(calc.unwrap().result(), d(5));
        assert!(logs.contains("WARN"), "no warning in {:?}", logs);
        assert!(logs.contains("stored result (6) does not match computed result (5)"));
        assert!(logs.contains("calculation restored"));
    }

    #[test]
    fn test_deserialize_matching_result_does_not_warn() {
        let data = stored("add", "2", "3", "5", "2024-03-01T00:00:00Z");
        let (calc, logs) = capture_logs(|| CalculationRecord::deserialize(&data));

        assert!(calc.is_ok());
        assert!(!logs.contains("WARN"), "unexpected warning in {:?}", logs);
    }

    #[test]
    fn test_deserialize_mismatch_rejected_by_strict_config() {
        let data = stored("add", "2", "3", "6", "2024-03-01T00:00:00Z");
        let handler = CollectingHandler::default();
        let result =
            CalculationRecord::deserialize_with_config(&data, &CalculatorConfig::strict(), &handler);

        assert_eq!(
            op_err(result),
            OperationError::ResultMismatch {
                stored: "6".to_string(),
                computed: "5".to_string(),
            }
        );
        assert!(handler.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_missing_field() {
        for key in [KEY_OPERATION, KEY_OPERAND1, KEY_OPERAND2, KEY_RESULT, KEY_TIMESTAMP] {
            let mut data = stored("add", "2", "3", "5", "2024-03-01T00:00:00Z");
            data.remove(key);
            match op_err(CalculationRecord::deserialize(&data)) {
                OperationError::InvalidData(msg) => assert!(msg.contains(key)),
                other => panic!("expected invalid data, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_deserialize_malformed_fields() {
        let bad_number = stored("add", "two", "3", "5", "2024-03-01T00:00:00Z");
        assert!(matches!(
            op_err(CalculationRecord::deserialize(&bad_number)),
            OperationError::InvalidData(_)
        ));

        let bad_result = stored("add", "2", "3", "five", "2024-03-01T00:00:00Z");
        assert!(matches!(
            op_err(CalculationRecord::deserialize(&bad_result)),
            OperationError::InvalidData(_)
        ));

        let bad_scientific = stored("add", "2", "3", "5E", "2024-03-01T00:00:00Z");
        assert_eq!(
            op_err(CalculationRecord::deserialize(&bad_scientific)),
            OperationError::InvalidData("field 'result' is not a decimal: 5E".to_string())
        );

        let bad_timestamp = stored("add", "2", "3", "5", "yesterday");
        assert_eq!(
            op_err(CalculationRecord::deserialize(&bad_timestamp)),
            OperationError::InvalidData("invalid timestamp: yesterday".to_string())
        );
    }

    #[test]
    fn test_deserialize_out_of_range_result() {
        let data = stored(
            "power",
            "2",
            "100",
            "1267650600228229401496703205376",
            "2024-03-01T00:00:00Z",
        );
        match op_err(CalculationRecord::deserialize(&data)) {
            OperationError::InvalidData(msg) => {
                assert!(msg.contains("field 'result'"), "{}", msg);
                assert!(msg.contains("out of decimal range"), "{}", msg);
                assert!(!msg.contains("not a decimal"), "{}", msg);
            },
            other => panic!("expected invalid data, got {:?}", other),
        }

        let data = stored("add", "1E+40", "1", "1E+40", "2024-03-01T00:00:00Z");
        match op_err(CalculationRecord::deserialize(&data)) {
            OperationError::InvalidData(msg) => assert!(msg.contains("out of decimal range")),
            other => panic!("expected invalid data, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_unknown_operation() {
        let data = stored("modulo", "2", "3", "5", "2024-03-01T00:00:00Z");
        assert_eq!(
            op_err(CalculationRecord::deserialize(&data)),
            OperationError::InvalidOperation("modulo".to_string())
        );
    }

    #[test]
    fn test_deserialize_recomputation_failure() {
        let data = stored("divide", "1", "0", "0", "2024-03-01T00:00:00Z");
        assert_eq!(
            op_err(CalculationRecord::deserialize(&data)),
            OperationError::DivisionByZero
        );
    }

    #[test]
    fn test_equality_ignores_timestamp() {
        let a = CalculationRecord::create("add", d(2), d(3)).unwrap();
        let data = stored("add", "2", "3", "5", "2001-01-01T00:00:00Z");
        let b = CalculationRecord::deserialize(&data).unwrap();

        assert_ne!(a.timestamp(), b.timestamp());
        assert_eq!(a, b);

        let c = CalculationRecord::create("add", d(3), d(2)).unwrap();
        assert_ne!(a, c);

        let e = CalculationRecord::create("multiply", d(2), d(3)).unwrap();
        assert_ne!(a, e);
    }

    #[test]
    fn test_equality_is_numeric() {
        let a = CalculationRecord::create("add", Decimal::new(20, 1), d(3)).unwrap();
        let b = CalculationRecord::create("add", d(2), d(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let calc = CalculationRecord::create("add", d(2), d(3)).unwrap();
        assert_eq!(calc.to_string(), "2 add 3 = 5");

        let calc = CalculationRecord::create("subtract", Decimal::new(55, 1), d(-2)).unwrap();
        assert_eq!(calc.to_string(), "5.5 subtract -2 = 7.5");
    }

    #[test]
    fn test_debug_names_all_fields() {
        let calc = CalculationRecord::create("add", d(2), d(3)).unwrap();
        let debug = format!("{:?}", calc);
        for field in ["operation", "operand1", "operand2", "result", "timestamp"] {
            assert!(debug.contains(field), "missing {} in {}", field, debug);
        }
    }

    #[test]
    fn test_format_result() {
        let third = CalculationRecord::create("divide", d(1), d(3)).unwrap();
        assert_eq!(third.format_result(2), "0.33");
        assert_eq!(third.format_result_default(), "0.3333333333");

        let exact = CalculationRecord::create("multiply", Decimal::new(25, 1), d(4)).unwrap();
        assert_eq!(exact.format_result(5), "10");

        let half = CalculationRecord::create("divide", d(1), d(8)).unwrap();
        assert_eq!(half.format_result(2), "0.12");
    }

    #[test]
    fn test_format_result_fallback() {
        let third = CalculationRecord::create("divide", d(1), d(3)).unwrap();
        assert_eq!(third.format_result(40), third.result().to_string());
    }

    #[test]
    fn test_format_with_config() {
        let third = CalculationRecord::create("divide", d(2), d(3)).unwrap();
        let config = CalculatorConfig::new().with_precision(3);
        assert_eq!(third.format_with(&config), "0.667");
    }

    #[test]
    fn test_from_input() {
        let config = CalculatorConfig::new().with_max_input_value(d(100));
        let calc = CalculationRecord::from_input(" Power ", "2", "10", &config).unwrap();
        assert_eq!(calc.result(), d(1024));

        let err = CalculationRecord::from_input("add", "1000", "1", &config).unwrap_err();
        assert!(err.is_validation());

        let err = CalculationRecord::from_input("divide", "1", "0", &config).unwrap_err();
        assert_eq!(err.as_operation(), Some(&OperationError::DivisionByZero));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let calc = CalculationRecord::create("power", d(2), Decimal::new(5, 1)).unwrap();
        let json = calc.to_json().unwrap();
        let restored = CalculationRecord::from_json(&json).unwrap();

        assert_eq!(restored, calc);
        assert_eq!(restored.timestamp(), calc.timestamp());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_rejects_non_string_fields() {
        let json = r#"{"operation":"add","num1":2,"num2":"3","result":"5","timestamp":"2024-03-01T00:00:00Z"}"#;
        assert!(matches!(
            op_err(CalculationRecord::from_json(json)),
            OperationError::InvalidData(_)
        ));
    }
}
