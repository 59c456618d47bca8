//! Tailoring session.

use bpmnt_core::{IdStamper, NodeId};
use bpmnt_graph::{check_model, Model, Payload, ProcessGraph};
use bpmnt_journal::{log_to_model, OperationLog, Order, TailoringOperation};
use bpmnt_mutation::{EditOutcome, TailoringExecutor};

use crate::config::TailoringConfig;
use crate::error::{SessionError, SessionResult};
use crate::node_ref::NodeRef;

/// A tailored copy of a base process together with its operation log.
///
/// Every edit either succeeds and appends one record to the log, or fails
/// and leaves model and log untouched.
#[derive(Debug, Clone)]
pub struct Tailoring {
    config: TailoringConfig,
    model: Model,
    log: OperationLog,
    stamper: IdStamper,
}

impl Tailoring {
    /// Start tailoring the first process of `base`.
    ///
    /// The base model is copied; its process is renamed to
    /// `<process_prefix>_<baseProcessId>`.
    pub fn extend(base: &Model, config: TailoringConfig) -> SessionResult<Self> {
        config.check()?;
        let base_process_id = base
            .process()
            .map(|p| p.id().to_string())
            .ok_or_else(|| SessionError::no_process(base.id()))?;
        let new_process_id = config.tailored_process_id(&base_process_id);
        let log = OperationLog::new(base_process_id, new_process_id);
        let session = Self::from_parts(base, log, config)?;
        tracing::info!(
            "Extended {} into {}",
            session.log.base_process_id(),
            session.log.new_process_id()
        );
        Ok(session)
    }

    /// Continue a session from a tailored model and the log that produced it.
    pub fn resume(model: Model, log: OperationLog, config: TailoringConfig) -> SessionResult<Self> {
        config.check()?;
        let process_id = model
            .process()
            .map(|p| p.id().to_string())
            .ok_or_else(|| SessionError::no_process(model.id()))?;
        if process_id != log.new_process_id() {
            return Err(SessionError::not_extended(log.new_process_id(), process_id));
        }
        let stamper = IdStamper::new(config.stamp_prefix.as_str())?;
        Ok(Self {
            config,
            model,
            log,
            stamper,
        })
    }

    /// Copy `base` and rename its process to the log's tailored process id.
    pub(crate) fn from_parts(
        base: &Model,
        log: OperationLog,
        config: TailoringConfig,
    ) -> SessionResult<Self> {
        let mut model = base.clone();
        let process = model
            .process_mut()
            .ok_or_else(|| SessionError::no_process(base.id()))?;
        process.set_id(log.new_process_id());
        Self::resume(model, log, config)
    }

    // ==================== Accessors ====================

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// The tailored process.
    pub fn process(&self) -> SessionResult<&ProcessGraph> {
        self.model
            .process()
            .ok_or_else(|| SessionError::no_process(self.model.id()))
    }

    pub fn operation_log(&self) -> &OperationLog {
        &self.log
    }

    pub fn config(&self) -> &TailoringConfig {
        &self.config
    }

    /// The log as a BPMN document of extension elements.
    pub fn convert_log_to_model(&self) -> SessionResult<Model> {
        Ok(log_to_model(&self.log, &self.config.namespace)?)
    }

    /// Copy of `payload` with fresh ids, for contributing a region twice or
    /// a region of the tailored process itself.
    pub fn stamped(&mut self, payload: &Payload) -> SessionResult<Payload> {
        Ok(payload.restamped(&mut self.stamper)?)
    }

    // ==================== Edits ====================

    /// Remove a node and its flows without healing.
    pub fn suppress(&mut self, node: impl NodeRef) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::Suppress {
            node_id: id_of(&node),
        })
    }

    pub fn rename(&mut self, node: impl NodeRef, new_name: &str) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::Rename {
            element_id: id_of(&node),
            new_name: new_name.to_string(),
        })
    }

    /// Set a node attribute, a node name or a flow condition.
    pub fn modify(&mut self, id: &str, property: &str, value: &str) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::Modify {
            modified_id: id.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        })
    }

    pub fn delete(&mut self, node: impl NodeRef) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::DeleteNode {
            node_id: id_of(&node),
        })
    }

    pub fn delete_fragment(
        &mut self,
        start: impl NodeRef,
        end: impl NodeRef,
    ) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::DeleteFragment {
            starting_node_id: id_of(&start),
            ending_node_id: id_of(&end),
        })
    }

    pub fn replace(&mut self, node: impl NodeRef, payload: Payload) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::ReplaceNode {
            replaced_node_id: id_of(&node),
            payload,
        })
    }

    pub fn replace_fragment(
        &mut self,
        start: impl NodeRef,
        end: impl NodeRef,
        payload: Payload,
    ) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::ReplaceFragment {
            starting_node_id: id_of(&start),
            ending_node_id: id_of(&end),
            payload,
        })
    }

    /// Move a node between two anchors. A missing anchor is inferred from
    /// the single neighbour of the other one.
    pub fn move_node<N: NodeRef>(
        &mut self,
        node: impl NodeRef,
        after_of: Option<N>,
        before_of: Option<N>,
    ) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::MoveNode {
            node_id: id_of(&node),
            after_of: after_of.map(|n| id_of(&n)),
            before_of: before_of.map(|n| id_of(&n)),
        })
    }

    pub fn move_fragment<N: NodeRef>(
        &mut self,
        start: impl NodeRef,
        end: impl NodeRef,
        after_of: Option<N>,
        before_of: Option<N>,
    ) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::MoveFragment {
            starting_node_id: id_of(&start),
            ending_node_id: id_of(&end),
            after_of: after_of.map(|n| id_of(&n)),
            before_of: before_of.map(|n| id_of(&n)),
        })
    }

    pub fn parallelize(
        &mut self,
        start: impl NodeRef,
        end: impl NodeRef,
    ) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::Parallelize {
            starting_node_id: id_of(&start),
            ending_node_id: id_of(&end),
        })
    }

    /// Turn a task into a sub-process whose body is the first process of
    /// `sub_model`.
    pub fn split(&mut self, task: impl NodeRef, sub_model: Model) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::Split {
            task_id: id_of(&task),
            sub_model,
        })
    }

    pub fn insert<N: NodeRef>(
        &mut self,
        after_of: Option<N>,
        before_of: Option<N>,
        payload: Payload,
    ) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::Insert {
            after_of: after_of.map(|n| id_of(&n)),
            before_of: before_of.map(|n| id_of(&n)),
            payload,
        })
    }

    /// Insert a payload on a branch guarded by `condition`, or on a loop
    /// repeated while `condition` holds.
    pub fn conditional_insert(
        &mut self,
        after_of: impl NodeRef,
        before_of: impl NodeRef,
        payload: Payload,
        condition: &str,
        in_loop: bool,
    ) -> SessionResult<EditOutcome> {
        self.apply(TailoringOperation::ConditionalInsert {
            after_of: id_of(&after_of),
            before_of: id_of(&before_of),
            payload,
            condition: condition.to_string(),
            in_loop,
        })
    }

    // ==================== Execution ====================

    /// Run an operation and log it, restoring the model on failure.
    fn apply(&mut self, op: TailoringOperation) -> SessionResult<EditOutcome> {
        let order = self.log.next_order();
        let outcome = self.run(order, &op)?;
        self.log.append(op)?;
        Ok(outcome)
    }

    /// Run an operation with a given order without logging it.
    pub(crate) fn run(
        &mut self,
        order: Order,
        op: &TailoringOperation,
    ) -> SessionResult<EditOutcome> {
        let snapshot = self.model.clone();
        let result = execute(&mut self.model, order, op).and_then(|outcome| {
            if self.config.validate_edits {
                check_model(&self.model)?;
            }
            Ok(outcome)
        });
        match result {
            Ok(outcome) => {
                tracing::debug!("Applied {} as operation {}", op.element_name(), order);
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(
                    "Operation {} ({}) failed, restoring model: {}",
                    order,
                    op.element_name(),
                    err
                );
                self.model = snapshot;
                Err(err)
            }
        }
    }
}

fn id_of(node: &impl NodeRef) -> NodeId {
    NodeId::new(node.node_id())
}

/// Dispatch one operation to a fresh executor.
fn execute(model: &mut Model, order: Order, op: &TailoringOperation) -> SessionResult<EditOutcome> {
    let mut executor = TailoringExecutor::new(model, order);
    let outcome = match op {
        TailoringOperation::Extend { .. } => {
            return Err(bpmnt_journal::JournalError::out_of_order(
                order,
                "extend may only appear first",
            )
            .into())
        }
        TailoringOperation::Suppress { node_id } => executor.suppress(node_id.as_str()),
        TailoringOperation::Rename {
            element_id,
            new_name,
        } => executor.rename(element_id.as_str(), new_name),
        TailoringOperation::Modify {
            modified_id,
            property,
            value,
        } => executor.modify(modified_id, property, value),
        TailoringOperation::DeleteNode { node_id } => executor.delete_node(node_id.as_str()),
        TailoringOperation::DeleteFragment {
            starting_node_id,
            ending_node_id,
        } => executor.delete_fragment(starting_node_id.as_str(), ending_node_id.as_str()),
        TailoringOperation::ReplaceNode {
            replaced_node_id,
            payload,
        } => executor.replace_node(replaced_node_id.as_str(), payload),
        TailoringOperation::ReplaceFragment {
            starting_node_id,
            ending_node_id,
            payload,
        } => executor.replace_fragment(
            starting_node_id.as_str(),
            ending_node_id.as_str(),
            payload,
        ),
        TailoringOperation::MoveNode {
            node_id,
            after_of,
            before_of,
        } => executor.move_node(
            node_id.as_str(),
            after_of.as_ref().map(NodeId::as_str),
            before_of.as_ref().map(NodeId::as_str),
        ),
        TailoringOperation::MoveFragment {
            starting_node_id,
            ending_node_id,
            after_of,
            before_of,
        } => executor.move_fragment(
            starting_node_id.as_str(),
            ending_node_id.as_str(),
            after_of.as_ref().map(NodeId::as_str),
            before_of.as_ref().map(NodeId::as_str),
        ),
        TailoringOperation::Parallelize {
            starting_node_id,
            ending_node_id,
        } => executor.parallelize(starting_node_id.as_str(), ending_node_id.as_str()),
        TailoringOperation::Split { task_id, sub_model } => {
            executor.split(task_id.as_str(), sub_model)
        }
        TailoringOperation::Insert {
            after_of,
            before_of,
            payload,
        } => executor.insert(
            after_of.as_ref().map(NodeId::as_str),
            before_of.as_ref().map(NodeId::as_str),
            payload,
        ),
        TailoringOperation::ConditionalInsert {
            after_of,
            before_of,
            payload,
            condition,
            in_loop,
        } => executor.conditional_insert(
            Some(after_of.as_str()),
            Some(before_of.as_str()),
            payload,
            condition,
            *in_loop,
        ),
    };
    Ok(outcome?)
}
