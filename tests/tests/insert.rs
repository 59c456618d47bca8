//! Insertion scenarios.

use bpmnt_tests::prelude::*;

mod delete_then_insert {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("delete_then_insert")
            .base(fixtures::linear())
            .step("delete_a", |t| t.delete("A"), |a| a.absent("A"))
            .step(
                "insert_c_after_start",
                |t| t.insert(Some("Start"), None, fixtures::task("C")),
                |a| a.created_id("C").nodes(4).path(&["Start", "C", "B", "End"]),
            )
    }

    #[test]
    fn test_delete_then_insert() {
        let tailoring = scenario().run().unwrap();

        let log = tailoring.operation_log();
        let names: Vec<&str> = log.records().iter().map(|r| r.op.element_name()).collect();
        assert_eq!(names, vec!["extend", "delete", "insert"]);
        assert_eq!(
            log.records()[2].op,
            TailoringOperation::Insert {
                after_of: Some(NodeId::new("Start")),
                before_of: None,
                payload: fixtures::task("C"),
            }
        );
    }
}

mod serial_insert {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("serial_insert")
            .base(fixtures::linear())
            .step(
                "insert_between_connected",
                |t| t.insert(Some("A"), Some("B"), fixtures::task("X")),
                |a| {
                    a.created(2)
                        .removed(0)
                        .nodes(5)
                        .path(&["A", "X", "B"])
                        .disconnected("A", "B")
                },
            )
            .step(
                "insert_before_end",
                |t| t.insert(None, Some("End"), fixtures::catalog_fragment("X", "Z")),
                |a| a.error("Duplicate element: X"),
            )
            .step(
                "insert_fragment_before_end",
                |t| t.insert(None, Some("End"), fixtures::catalog_fragment("Y", "Z")),
                |a| a.nodes(7).path(&["B", "Y", "Z", "End"]),
            )
    }

    #[test]
    fn test_serial_insert() {
        scenario().run().unwrap();
    }
}

mod parallel_insert {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("parallel_insert")
            .base(fixtures::long_chain())
            .step(
                "insert_between_a_and_d",
                |t| t.insert(Some("A"), Some("D"), fixtures::task("X")),
                |a| {
                    a.created_id("Gateway_1_1")
                        .created_id("Gateway_1_2")
                        .out_degree("Gateway_1_1", 2)
                        .in_degree("Gateway_1_2", 2)
                        .path(&["A", "Gateway_1_1", "B", "C", "Gateway_1_2", "D"])
                        .path(&["Gateway_1_1", "X", "Gateway_1_2"])
                },
            )
    }

    #[test]
    fn test_insert_between_distant_nodes_opens_parallel_branch() {
        let tailoring = scenario().run().unwrap();
        let split = tailoring.model().node("Gateway_1_1").unwrap();
        assert_eq!(split.kind.gateway_kind(), Some(GatewayKind::Parallel));
    }
}

mod reuse_gateways {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("reuse_gateways")
            .base(fixtures::diamond())
            .step(
                "insert_third_branch",
                |t| t.insert(Some("A"), Some("D"), fixtures::task("X")),
                |a| {
                    a.created(3)
                        .out_degree("Split", 3)
                        .in_degree("Join", 3)
                        .path(&["Split", "X", "Join"])
                },
            )
    }

    #[test]
    fn test_existing_gateways_are_reused() {
        scenario().run().unwrap();
    }
}

mod misordered_anchors {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("misordered_anchors")
            .base(fixtures::long_chain())
            .step(
                "same_anchor",
                |t| t.insert(Some("A"), Some("A"), fixtures::task("X")),
                |a| a.error("afterOf and beforeOf must be different nodes"),
            )
            .step(
                "reversed_anchors",
                |t| t.insert(Some("C"), Some("A"), fixtures::task("X")),
                |a| a.error("beforeOf must lie downstream of afterOf"),
            )
            .step(
                "reversed_conditional",
                |t| t.conditional_insert("D", "B", fixtures::task("X"), "late", false),
                |a| a.error_matching("^Invalid argument"),
            )
            .step(
                "forward_anchors",
                |t| t.insert(Some("A"), Some("C"), fixtures::task("X")),
                |a| {
                    a.path(&["A", "Gateway_1_1", "X", "Gateway_1_2", "C"])
                        .path(&["Gateway_1_1", "B", "Gateway_1_2"])
                },
            )
    }

    #[test]
    fn test_anchors_must_follow_the_flow() {
        let tailoring = scenario().run().unwrap();
        assert_eq!(tailoring.operation_log().len(), 2);
    }
}

mod rejected_inserts {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("rejected_inserts")
            .base(fixtures::diamond())
            .step(
                "before_start",
                |t| t.insert(None, Some("Start"), fixtures::task("X")),
                |a| a.error("beforeOf cannot be a start event"),
            )
            .step(
                "after_end",
                |t| t.insert(Some("End"), None, fixtures::task("X")),
                |a| a.error("afterOf cannot be an end event"),
            )
            .step(
                "after_divergent_without_before",
                |t| t.insert(Some("Split"), None, fixtures::task("X")),
                |a| a.error("divergent gateway"),
            )
            .step(
                "before_convergent_without_after",
                |t| t.insert(None, Some("Join"), fixtures::task("X")),
                |a| a.error("convergent gateway"),
            )
            .step(
                "no_anchor",
                |t| t.insert(None::<&str>, None, fixtures::task("X")),
                |a| a.error("cannot both be missing"),
            )
            .step(
                "existing_id",
                |t| t.insert(Some("A"), None, fixtures::task("B")),
                |a| a.error("Duplicate element: B"),
            )
            .step(
                "gateway_payload",
                |t| {
                    t.insert(
                        Some("D"),
                        None,
                        Payload::Node(FlowNode::gateway("G", GatewayKind::Exclusive)),
                    )
                },
                |a| a.error("cannot be a gateway"),
            )
    }

    #[test]
    fn test_rejected_inserts() {
        let tailoring = scenario().run().unwrap();
        assert_eq!(tailoring.operation_log().len(), 1);
        assert_eq!(tailoring.model().node_count(), 8);
    }
}
