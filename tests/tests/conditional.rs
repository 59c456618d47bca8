//! Conditional insertion scenarios.

use bpmnt_tests::prelude::*;

fn condition_between(model: &Model, source: &str, target: &str) -> Option<String> {
    model
        .scope_of(source)
        .and_then(|scope| scope.flow_between(source, target))
        .and_then(|flow| flow.condition.clone())
}

mod exclusive_branch {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("exclusive_branch")
            .base(fixtures::linear())
            .step(
                "optional_check",
                |t| t.conditional_insert("A", "B", fixtures::task("X"), "amount > 100", false),
                |a| {
                    a.created_id("Gateway_1_1")
                        .created_id("Gateway_1_2")
                        .path(&["A", "Gateway_1_1", "X", "Gateway_1_2", "B"])
                        .connected("Gateway_1_1", "Gateway_1_2")
                        .disconnected("A", "B")
                        .check(|model| {
                            condition_between(model, "Gateway_1_1", "X").as_deref()
                                == Some("amount > 100")
                                && condition_between(model, "Gateway_1_1", "Gateway_1_2").is_none()
                        })
                },
            )
    }

    #[test]
    fn test_condition_guards_the_new_branch() {
        let tailoring = scenario().run().unwrap();
        let split = tailoring.model().node("Gateway_1_1").unwrap();
        assert_eq!(split.kind.gateway_kind(), Some(GatewayKind::Exclusive));
    }
}

mod loop_insert {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("loop_insert")
            .base(fixtures::linear())
            .step(
                "repeat_review",
                |t| t.conditional_insert("A", "B", fixtures::task("Review"), "rejected", true),
                |a| {
                    a.path(&["A", "Gateway_1_1", "Review", "Gateway_1_2", "B"])
                        .connected("Gateway_1_2", "Gateway_1_1")
                        .in_degree("Gateway_1_1", 2)
                        .out_degree("Gateway_1_2", 2)
                        .check(|model| {
                            condition_between(model, "Gateway_1_2", "Gateway_1_1").as_deref()
                                == Some("rejected")
                        })
                },
            )
    }

    #[test]
    fn test_loop_repeats_the_payload() {
        scenario().run().unwrap();
    }
}

mod distant_anchors {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("distant_anchors")
            .base(fixtures::long_chain())
            .step(
                "branch_around_b_c",
                |t| t.conditional_insert("A", "D", fixtures::task("X"), "express", false),
                |a| {
                    a.out_degree("Gateway_1_1", 2)
                        .in_degree("Gateway_1_2", 2)
                        .path(&["A", "Gateway_1_1", "B", "C", "Gateway_1_2", "D"])
                        .path(&["Gateway_1_1", "X", "Gateway_1_2"])
                },
            )
            .step(
                "loop_needs_connected_anchors",
                |t| t.conditional_insert("A", "D", fixtures::task("Y"), "again", true),
                |a| a.error("must be directly connected"),
            )
            .step(
                "missing_anchor",
                |t| t.conditional_insert("A", "Nope", fixtures::task("Y"), "c", false),
                |a| a.error("Element not found: Nope"),
            )
    }

    #[test]
    fn test_distant_anchors_get_exclusive_gateways() {
        let tailoring = scenario().run().unwrap();
        let join = tailoring.model().node("Gateway_1_2").unwrap();
        assert_eq!(join.kind.gateway_kind(), Some(GatewayKind::Exclusive));
    }
}

mod mixed_gateway_kinds {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("mixed_gateway_kinds")
            .base(fixtures::diamond())
            .step(
                "exclusive_from_parallel_split",
                |t| t.conditional_insert("Split", "Join", fixtures::task("X"), "c", false),
                |a| a.error("another kind"),
            )
    }

    #[test]
    fn test_parallel_gateways_are_not_reused_for_conditions() {
        scenario().run().unwrap();
    }
}
