//! Deletion scenarios.

use bpmnt_tests::prelude::*;

mod delete_node {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("delete_node")
            .base(fixtures::linear())
            .step("delete_a", |t| t.delete("A"), |a| {
                a.created(1)
                    .created_id("Flow_1_1")
                    .removed(3)
                    .removed_id("A")
                    .nodes(3)
                    .absent("A")
                    .path(&["Start", "B", "End"])
            })
            .step("delete_again", |t| t.delete("A"), |a| a.error("Element not found: A"))
    }

    #[test]
    fn test_delete_heals_the_gap() {
        scenario().run().unwrap();
    }
}

mod delete_branch {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("delete_branch")
            .base(fixtures::diamond())
            .step("delete_b", |t| t.delete("B"), |a| {
                a.absent("B")
                    .absent("Split")
                    .absent("Join")
                    .nodes(5)
                    .path(&["Start", "A", "C", "D", "End"])
            })
    }

    #[test]
    fn test_deleting_a_branch_collapses_its_gateways() {
        scenario().run().unwrap();
    }
}

mod delete_exclusive_branch {
    use super::*;

    fn bypass_condition(model: &Model) -> Option<String> {
        model
            .process()
            .and_then(|p| p.flow_between("Choice", "Merge"))
            .and_then(|f| f.condition.clone())
    }

    pub fn scenario() -> Scenario {
        Scenario::new("delete_exclusive_branch")
            .base(fixtures::choice())
            .step("delete_c", |t| t.delete("C"), |a| {
                a.created(1)
                    .removed(3)
                    .nodes(8)
                    .absent("C")
                    .present("Choice")
                    .present("Merge")
                    .connected("Choice", "Merge")
                    .out_degree("Choice", 3)
                    .in_degree("Merge", 3)
                    .check(|model| bypass_condition(model).as_deref() == Some("c"))
            })
            .step("delete_b", |t| t.delete("B"), |a| {
                a.created(0)
                    .removed(3)
                    .out_degree("Choice", 2)
                    .in_degree("Merge", 2)
                    .path(&["Choice", "D", "Merge"])
            })
    }

    #[test]
    fn test_deleting_an_exclusive_branch_keeps_its_condition_path() {
        scenario().run().unwrap();
    }
}

mod delete_fragment {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("delete_fragment")
            .base(fixtures::long_chain())
            .step("delete_b_c", |t| t.delete_fragment("B", "C"), |a| {
                a.removed(5)
                    .created(1)
                    .nodes(4)
                    .path(&["Start", "A", "D", "End"])
            })
    }

    #[test]
    fn test_delete_fragment_reconnects_outside() {
        scenario().run().unwrap();
    }
}

mod delete_gateway_block {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("delete_gateway_block")
            .base(fixtures::diamond())
            .step("delete_split_join", |t| t.delete_fragment("Split", "Join"), |a| {
                a.nodes(4).path(&["Start", "A", "D", "End"]).absent("C")
            })
    }

    #[test]
    fn test_delete_balanced_gateway_block() {
        scenario().run().unwrap();
    }
}

mod rejected_deletes {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("rejected_deletes")
            .base(fixtures::diamond())
            .step("delete_start", |t| t.delete("Start"), |a| a.error("Invalid argument"))
            .step("delete_gateway", |t| t.delete("Split"), |a| a.error("Invalid argument"))
            .step("fragment_reaching_end", |t| t.delete_fragment("A", "B"), |a| {
                a.error_matching("^Illegal fragment")
            })
            .step("open_branch", |t| t.delete_fragment("Split", "B"), |a| {
                a.error_matching("^Illegal fragment")
            })
            .step("nothing_changed", |t| t.rename("A", "A"), |a| a.nodes(8))
    }

    #[test]
    fn test_rejected_deletes_leave_the_model_alone() {
        let tailoring = scenario().run().unwrap();
        assert_eq!(tailoring.operation_log().len(), 2);
    }
}
