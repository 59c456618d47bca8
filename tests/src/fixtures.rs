//! Models shared by the scenarios.

use bpmnt_core::GatewayKind;
use bpmnt_graph::{FlowNode, ForeignFragment, Model, Payload, ProcessBuilder, ProcessGraph};

fn model(process: ProcessBuilder) -> Model {
    match process.build() {
        Ok(graph) => Model::with_process("Definitions_1", graph),
        Err(err) => panic!("fixture does not build: {}", err),
    }
}

/// `Start -> A -> B -> End`.
pub fn linear() -> Model {
    model(ProcessBuilder::new("Process_1").chain(&["Start", "A", "B", "End"]))
}

/// `Start -> A -> B -> C -> D -> End`.
pub fn long_chain() -> Model {
    model(ProcessBuilder::new("Process_1").chain(&["Start", "A", "B", "C", "D", "End"]))
}

/// `Start -> A -> Split -> {B, C} -> Join -> D -> End` with parallel gateways.
pub fn diamond() -> Model {
    model(
        ProcessBuilder::new("Process_1")
            .start("Start")
            .task("A")
            .gateway("Split", GatewayKind::Parallel)
            .task("B")
            .task("C")
            .gateway("Join", GatewayKind::Parallel)
            .task("D")
            .end("End")
            .chain(&["Start", "A", "Split"])
            .chain(&["Split", "B", "Join"])
            .chain(&["Split", "C", "Join"])
            .chain(&["Join", "D", "End"]),
    )
}

/// `Start -> A -> Choice -> {B [b], C [c], D [d]} -> Merge -> E -> End` with
/// exclusive gateways.
pub fn choice() -> Model {
    model(
        ProcessBuilder::new("Process_1")
            .start("Start")
            .task("A")
            .gateway("Choice", GatewayKind::Exclusive)
            .task("B")
            .task("C")
            .task("D")
            .gateway("Merge", GatewayKind::Exclusive)
            .task("E")
            .end("End")
            .chain(&["Start", "A", "Choice"])
            .conditional_flow("Choice", "B", "b")
            .conditional_flow("Choice", "C", "c")
            .conditional_flow("Choice", "D", "d")
            .chain(&["B", "Merge"])
            .chain(&["C", "Merge"])
            .chain(&["D", "Merge"])
            .chain(&["Merge", "E", "End"]),
    )
}

/// A foreign process to take fragments from: `S -> X -> Y -> Z -> E`.
pub fn catalog() -> ProcessGraph {
    match ProcessBuilder::new("Catalog")
        .chain(&["S", "X", "Y", "Z", "E"])
        .build()
    {
        Ok(graph) => graph,
        Err(err) => panic!("fixture does not build: {}", err),
    }
}

/// The region `[start, end]` of [`catalog`].
pub fn catalog_fragment(start: &str, end: &str) -> Payload {
    match ForeignFragment::from_graph(&catalog(), start, end) {
        Ok(fragment) => Payload::Fragment(fragment),
        Err(err) => panic!("fixture fragment [{}, {}]: {}", start, end, err),
    }
}

/// A single new task.
pub fn task(id: &str) -> Payload {
    Payload::Node(FlowNode::task(id))
}

/// A model whose process is `S1 -> T1 -> T2 -> E1`, used as split body.
pub fn sub_model() -> Model {
    model(ProcessBuilder::new("Detail").chain(&["S1", "T1", "T2", "E1"]))
}
