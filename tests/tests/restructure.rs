//! Move, parallelize, replace and split scenarios.

use bpmnt_tests::prelude::*;

mod parallelize {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("parallelize")
            .base(fixtures::long_chain())
            .step("parallelize_b_d", |t| t.parallelize("B", "D"), |a| {
                a.created(8)
                    .removed(2)
                    .out_degree("Gateway_1_1", 3)
                    .in_degree("Gateway_1_2", 3)
                    .path(&["Start", "A", "Gateway_1_1"])
                    .path(&["Gateway_1_2", "End"])
                    .path(&["Gateway_1_1", "B", "Gateway_1_2"])
                    .path(&["Gateway_1_1", "C", "Gateway_1_2"])
                    .path(&["Gateway_1_1", "D", "Gateway_1_2"])
                    .disconnected("B", "C")
                    .disconnected("C", "D")
            })
            .step("parallelize_gateways", |t| t.parallelize("A", "Gateway_1_2"), |a| {
                a.error("gateways cannot be the target")
            })
            .step("parallelize_single", |t| t.parallelize("A", "A"), |a| {
                a.error("must be different")
            })
    }

    #[test]
    fn test_parallelize_builds_parallel_block() {
        let tailoring = scenario().run().unwrap();
        let join = tailoring.model().node("Gateway_1_2").unwrap();
        assert_eq!(join.kind.gateway_kind(), Some(GatewayKind::Parallel));
    }
}

mod move_node {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("move_node")
            .base(fixtures::long_chain())
            .step("move_a_forward", |t| t.move_node("A", Some("C"), Some("D")), |a| {
                a.nodes(6).path(&["Start", "B", "C", "A", "D", "End"])
            })
            .step("move_d_to_front", |t| t.move_node("D", None, Some("B")), |a| {
                a.path(&["Start", "D", "B", "C", "A", "End"])
            })
            .step("anchors_apart", |t| t.move_node("A", Some("Start"), Some("C")), |a| {
                a.error("must be directly connected")
            })
            .step("anchor_is_node", |t| t.move_node("A", Some("C"), Some("A")), |a| {
                a.error("outside the moved element")
            })
            .step("move_start", |t| t.move_node("Start", Some("C"), Some("A")), |a| {
                a.error("start and end events")
            })
    }

    #[test]
    fn test_move_node() {
        scenario().run().unwrap();
    }
}

mod move_fragment {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("move_fragment")
            .base(fixtures::long_chain())
            .step(
                "move_b_c_after_d",
                |t| t.move_fragment("B", "C", Some("D"), None),
                |a| a.nodes(6).path(&["Start", "A", "D", "B", "C", "End"]),
            )
    }

    #[test]
    fn test_move_fragment_keeps_inner_flows() {
        let tailoring = scenario().run().unwrap();
        let process = tailoring.process().unwrap();
        assert!(process.get_flow("Flow_B_C").is_some());
    }
}

mod replace {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("replace")
            .base(fixtures::long_chain())
            .step("replace_a", |t| t.replace("A", fixtures::task("R")), |a| {
                a.absent("A").present("R").path(&["Start", "R", "B"])
            })
            .step(
                "replace_b_c",
                |t| t.replace_fragment("B", "C", fixtures::catalog_fragment("X", "Y")),
                |a| {
                    a.absent("B")
                        .absent("C")
                        .nodes(6)
                        .path(&["Start", "R", "X", "Y", "D", "End"])
                },
            )
            .step(
                "replace_start_by_task",
                |t| t.replace("Start", fixtures::task("T")),
                |a| a.error("start events can only be replaced by start events"),
            )
            .step(
                "replace_start_by_start",
                |t| t.replace("Start", Payload::Node(FlowNode::start_event("Begin"))),
                |a| a.absent("Start").path(&["Begin", "R"]),
            )
    }

    #[test]
    fn test_replace() {
        scenario().run().unwrap();
    }
}

mod split {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("split")
            .base(fixtures::linear())
            .step("split_a", |t| t.split("A", fixtures::sub_model()), |a| {
                a.nodes(8)
                    .present("T1")
                    .path(&["Start", "A", "B"])
                    .path(&["S1", "T1", "T2", "E1"])
                    .check(|model| {
                        model.find_node("A").map_or(false, |n| {
                            n.kind.is_sub_process() && n.name.as_deref() == Some("A")
                        })
                    })
            })
            .step("split_again", |t| t.split("A", fixtures::sub_model()), |a| {
                a.error("split requires a task")
            })
            .step("edit_inside", |t| t.delete("T1"), |a| {
                a.nodes(7).path(&["S1", "T2", "E1"])
            })
    }

    #[test]
    fn test_split_turns_task_into_sub_process() {
        let tailoring = scenario().run().unwrap();
        assert_eq!(tailoring.model().scope_of("T2").unwrap().id(), "A");
    }
}

mod rename_and_modify {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("rename_and_modify")
            .base(fixtures::linear())
            .step("rename_b", |t| t.rename("B", "Approve order"), |a| {
                a.check(|model| {
                    model.find_node("B").and_then(|n| n.name.as_deref()) == Some("Approve order")
                })
            })
            .step("modify_attribute", |t| t.modify("A", "performer", "clerk"), |a| {
                a.check(|model| {
                    model
                        .find_node("A")
                        .and_then(|n| n.attributes.get("performer"))
                        .map(String::as_str)
                        == Some("clerk")
                })
            })
            .step("modify_condition", |t| t.modify("Flow_A_B", "condition", "ok"), |a| {
                a.check(|model| {
                    model
                        .process()
                        .and_then(|p| p.get_flow("Flow_A_B"))
                        .and_then(|f| f.condition.as_deref())
                        == Some("ok")
                })
            })
            .step("modify_id", |t| t.modify("A", "id", "Z"), |a| {
                a.error("cannot be modified")
            })
            .step("suppress_b", |t| t.suppress("B"), |a| {
                a.absent("B").absent("Flow_A_B").out_degree("A", 0)
            })
    }

    #[test]
    fn test_in_place_edits() {
        let tailoring = scenario().run().unwrap();
        assert_eq!(tailoring.operation_log().len(), 5);
    }
}
