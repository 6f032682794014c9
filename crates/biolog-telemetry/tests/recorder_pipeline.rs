//! Integration test: recorder -> fan-out -> Prometheus, memory and file sinks

use std::sync::Arc;

use biolog_core::{
    config::TelemetryConfig,
    domain::{
        AcquiredInfo, Action, Classification, ClientCategory, ErrorCode, Modality, SubjectId,
        TelemetryRecord, VendorCode,
    },
    ports::ManualClock,
    usecases::{OperationRecorder, TelemetryContext},
};
use biolog_telemetry::{FanoutSink, MemorySink, PrometheusMetricsSink, RecordLogSink};
use tempfile::TempDir;

const T0: i64 = 1_700_000_000_000;

struct Pipeline {
    _dir: TempDir,
    metrics: Arc<PrometheusMetricsSink>,
    memory: Arc<MemorySink>,
    log: Arc<RecordLogSink>,
    clock: Arc<ManualClock>,
    context: TelemetryContext,
}

fn pipeline() -> Pipeline {
    let dir = TempDir::new().unwrap();
    let metrics = Arc::new(PrometheusMetricsSink::new(&TelemetryConfig::default()).unwrap());
    let memory = Arc::new(MemorySink::new());
    let log = Arc::new(RecordLogSink::open(dir.path().join("records.jsonl")).unwrap());
    let fanout = FanoutSink::new()
        .with_sink(metrics.clone())
        .with_sink(memory.clone())
        .with_sink(log.clone());
    let clock = Arc::new(ManualClock::new(T0));
    let context = TelemetryContext::new(Arc::new(fanout)).with_clock(clock.clone());

    Pipeline {
        _dir: dir,
        metrics,
        memory,
        log,
        clock,
        context,
    }
}

#[test]
fn test_face_prompt_attempt_reaches_every_sink() {
    let p = pipeline();
    let mut recorder = OperationRecorder::new(
        p.context.clone(),
        Classification::new(
            Modality::Face,
            Action::Authenticate,
            ClientCategory::BiometricPrompt,
        ),
    )
    .with_crypto_operation(true);

    recorder.report_acquired(AcquiredInfo::FACE_START, VendorCode::new(0), SubjectId::new(0));
    p.clock.advance(300);
    recorder.report_authenticated(false, true, SubjectId::new(0), true);
    p.clock.advance(260);
    recorder.report_authenticated(true, true, SubjectId::new(0), true);

    assert_eq!(p.memory.len(), 3);

    let count = |state: &str| {
        p.metrics
            .authentications_total
            .with_label_values(&["face", "biometric_prompt", state, "true"])
            .get()
    };
    assert_eq!(count("rejected"), 1);
    assert_eq!(count("pending_confirmation"), 1);

    let histogram = p
        .metrics
        .operation_latency_ms
        .with_label_values(&["authenticated", "face"]);
    assert_eq!(histogram.get_sample_count(), 2);
    assert_eq!(histogram.get_sample_sum(), 860.0);

    let content = std::fs::read_to_string(p.log.path()).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_unknown_classification_reaches_no_sink() {
    let p = pipeline();
    let mut recorder = OperationRecorder::new(
        p.context.clone(),
        Classification::new(
            Modality::Fingerprint,
            Action::Authenticate,
            ClientCategory::Unknown,
        ),
    );

    recorder.report_acquired(
        AcquiredInfo::FINGERPRINT_START,
        VendorCode::new(0),
        SubjectId::new(0),
    );
    p.clock.advance(100);
    recorder.report_error(ErrorCode::new(5), VendorCode::new(0), SubjectId::new(0));

    assert!(p.memory.is_empty());
    assert!(std::fs::read_to_string(p.log.path()).unwrap().is_empty());
    assert!(!p.metrics.encode().unwrap().contains("errors_total{"));
}

#[test]
fn test_error_without_signal_counts_missing_latency() {
    let p = pipeline();
    let recorder = OperationRecorder::new(
        p.context.clone(),
        Classification::new(Modality::Iris, Action::Authenticate, ClientCategory::Keyguard),
    );

    recorder.report_error(ErrorCode::new(5), VendorCode::new(0), SubjectId::new(0));

    match &p.memory.records()[0] {
        TelemetryRecord::Error(record) => assert_eq!(record.latency_ms, -1),
        other => panic!("unexpected record {other:?}"),
    }
    assert_eq!(
        p.metrics
            .missing_latency_total
            .with_label_values(&["error"])
            .get(),
        1
    );
}
