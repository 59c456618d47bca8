//! Operation log serialization and replay.

use bpmnt_journal::{log_to_model, model_to_log, JournalError, DEFAULT_NAMESPACE};
use bpmnt_session::replay_document;
use bpmnt_tests::prelude::*;
use pretty_assertions::assert_eq;

/// A session touching every kind of operation.
fn busy_session() -> Tailoring {
    bpmnt_tests::init_tracing();
    let mut tailoring =
        Tailoring::extend(&fixtures::long_chain(), TailoringConfig::default()).unwrap();
    tailoring.rename("A", "Receive order").unwrap();
    tailoring.modify("B", "performer", "clerk").unwrap();
    tailoring.delete("C").unwrap();
    tailoring
        .insert(Some("B"), Some("D"), fixtures::task("X"))
        .unwrap();
    tailoring.move_node("X", Some("A"), Some("B")).unwrap();
    tailoring.parallelize("X", "B").unwrap();
    tailoring
        .conditional_insert("D", "End", fixtures::catalog_fragment("Y", "Z"), "late", false)
        .unwrap();
    tailoring.split("D", fixtures::sub_model()).unwrap();
    tailoring.replace("A", fixtures::task("A2")).unwrap();
    tailoring
}

// ========== TEST: document_layout ==========
#[test]
fn test_document_layout() {
    // GIVEN a session with graph-free and graph-carrying operations
    let tailoring = busy_session();

    // WHEN converting the log to a document
    let document = tailoring.convert_log_to_model().unwrap();

    // THEN graph-free records are process extensions
    let process = document.process().unwrap();
    assert_eq!(process.id(), "BPMNt_Process_1");
    let names: Vec<&str> = process
        .extensions()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["extend", "rename", "modify", "delete", "move", "parallelize"]
    );

    // AND each payload sits in its own container
    let containers: Vec<String> = process.nodes().map(|n| n.id.to_string()).collect();
    assert_eq!(
        containers,
        vec![
            "BPMNt_Process_1_op4",
            "BPMNt_Process_1_op7",
            "BPMNt_Process_1_op8",
            "BPMNt_Process_1_op9",
        ]
    );
    let split = process.node("BPMNt_Process_1_op8").unwrap();
    let element = &split.kind.body().unwrap().extensions()[0];
    assert_eq!(element.name, "split");
    assert_eq!(element.get("taskId"), Some("D"));
    assert_eq!(element.get("order"), Some("8"));
}

// ========== TEST: round_trip_replay ==========
#[test]
fn test_round_trip_replay() {
    // GIVEN a tailored model and its log
    let tailoring = busy_session();

    // WHEN the log goes through its document form and is replayed
    let document = log_to_model(tailoring.operation_log(), DEFAULT_NAMESPACE).unwrap();
    let log = model_to_log(&document, DEFAULT_NAMESPACE).unwrap();
    let replayed = replay(&fixtures::long_chain(), &log, TailoringConfig::default()).unwrap();

    // THEN the log survives unchanged and ids, kinds and flows match
    assert_eq!(&log, tailoring.operation_log());
    assert_eq!(replayed.model(), tailoring.model());
}

// ========== TEST: reused_id_survives_the_document ==========
#[test]
fn test_reused_id_survives_the_document() {
    // GIVEN X inserted, deleted and inserted again
    let base = fixtures::linear();
    let mut tailoring = Tailoring::extend(&base, TailoringConfig::default()).unwrap();
    tailoring.insert(Some("A"), None, fixtures::task("X")).unwrap();
    tailoring.delete("X").unwrap();
    tailoring.insert(Some("B"), None, fixtures::task("X")).unwrap();

    // WHEN the log goes through its document form
    let document = tailoring.convert_log_to_model().unwrap();
    let log = model_to_log(&document, DEFAULT_NAMESPACE).unwrap();

    // THEN both contributions keep their own container and replay agrees
    assert!(document.contains_id("BPMNt_Process_1_op1_X"));
    assert!(document.contains_id("BPMNt_Process_1_op3_X"));
    assert_eq!(&log, tailoring.operation_log());
    let replayed = replay_document(&base, &document, TailoringConfig::default()).unwrap();
    assert_eq!(replayed.model(), tailoring.model());
}

// ========== TEST: single_node_fragment_round_trip ==========
#[test]
fn test_single_node_fragment_round_trip() {
    // GIVEN a one-node region of a foreign process inserted as a fragment
    let base = fixtures::linear();
    let mut tailoring = Tailoring::extend(&base, TailoringConfig::default()).unwrap();
    tailoring
        .insert(Some("A"), Some("B"), fixtures::catalog_fragment("Y", "Y"))
        .unwrap();

    // WHEN the log goes through its document form
    let document = tailoring.convert_log_to_model().unwrap();
    let log = model_to_log(&document, DEFAULT_NAMESPACE).unwrap();

    // THEN the payload is still a fragment
    assert_eq!(&log, tailoring.operation_log());
    assert!(matches!(
        log.records()[1].op.payload(),
        Some(Payload::Fragment(_))
    ));
}

// ========== TEST: replayed_session_continues ==========
#[test]
fn test_replayed_session_continues() {
    let tailoring = busy_session();
    let document = tailoring.convert_log_to_model().unwrap();

    let mut replayed =
        replay_document(&fixtures::long_chain(), &document, TailoringConfig::default()).unwrap();
    let order = replayed.operation_log().next_order();
    replayed.delete("Y").unwrap();

    assert_eq!(order, 10);
    assert_eq!(replayed.operation_log().len(), 11);
}

// ========== TEST: custom_namespace_and_prefix ==========
#[test]
fn test_custom_namespace_and_prefix() {
    // GIVEN a session configured from TOML
    let config = TailoringConfig::from_toml_str(
        r#"
        process_prefix = "Tailored"
        namespace = "urn:example:tailoring"
        "#,
    )
    .unwrap();
    let mut tailoring = Tailoring::extend(&fixtures::linear(), config.clone()).unwrap();
    tailoring.delete("A").unwrap();

    // WHEN reading the document back with either namespace
    let document = tailoring.convert_log_to_model().unwrap();
    let own = model_to_log(&document, &config.namespace).unwrap();
    let foreign = model_to_log(&document, DEFAULT_NAMESPACE);

    // THEN only the configured namespace yields the log
    assert_eq!(own.new_process_id(), "Tailored_Process_1");
    assert_eq!(&own, tailoring.operation_log());
    assert_eq!(
        foreign.err(),
        Some(JournalError::invalid_format("empty operation log"))
    );
}

// ========== TEST: replay_on_wrong_base ==========
#[test]
fn test_replay_on_wrong_base() {
    let tailoring = busy_session();

    let result = replay(
        &fixtures::linear(),
        tailoring.operation_log(),
        TailoringConfig::default(),
    );

    assert!(matches!(result, Err(SessionError::Tailor(_))));
}
