//! Output formatting for human and JSON modes

use biolog_core::domain::TelemetryRecord;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn record(&self, index: usize, record: &TelemetryRecord);
    fn print_json(&self, value: &serde_json::Value);
}

/// Human-readable output with status marks and indentation
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn record(&self, index: usize, record: &TelemetryRecord) {
        println!("  {:>3}. {}", index + 1, describe_record(record));
    }
    fn print_json(&self, _value: &serde_json::Value) {}
}

/// JSON output; only structured values are printed to stdout
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn warn(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"level": "warning", "message": message})
        );
    }
    fn info(&self, _message: &str) {}
    fn record(&self, _index: usize, _record: &TelemetryRecord) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter),
    }
}

/// One-line summary of a record for human output
pub fn describe_record(record: &TelemetryRecord) -> String {
    let latency = match record.latency_ms() {
        Some(-1) => " latency=n/a".to_string(),
        Some(ms) => format!(" latency={}ms", ms),
        None => String::new(),
    };
    let detail = match record {
        TelemetryRecord::Acquired(r) => format!(
            "info={} vendor={} subject={}",
            r.acquired_info, r.vendor_code, r.subject
        ),
        TelemetryRecord::Error(r) => format!(
            "error={} vendor={} subject={}",
            r.error, r.vendor_code, r.subject
        ),
        TelemetryRecord::Authenticated(r) => format!(
            "state={} crypto={} subject={}",
            r.state.as_str(),
            r.is_crypto,
            r.subject
        ),
        TelemetryRecord::Enrolled(r) => format!(
            "success={} subject={}",
            r.success, r.subject
        ),
    };
    format!(
        "{:<13} {:<11} {}{}",
        record.event(),
        record.modality().as_str(),
        detail,
        latency
    )
}
