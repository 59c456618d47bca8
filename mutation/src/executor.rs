//! Tailoring executor - coordinates edit operations.
//!
//! The executor resolves the scope owning the edited nodes and delegates to
//! the operation modules in `ops/`:
//! - `ops/suppress.rs`, `ops/rename.rs`, `ops/modify.rs` - in-place edits
//! - `ops/delete.rs` - node and fragment deletion with healing
//! - `ops/replace.rs` - node and fragment replacement
//! - `ops/relocate.rs` - node and fragment moves
//! - `ops/parallelize.rs`, `ops/split.rs` - restructuring
//! - `ops/insert.rs` - plain and conditional insertion

use bpmnt_core::messages::{ERR_CONDITIONAL_ANCHORS, ERR_NO_ANCHOR};
use bpmnt_core::{TailorError, TailorResult};
use bpmnt_graph::{Model, Payload, ProcessGraph};

use crate::ids::ElementIds;
use crate::ops;
use crate::result::EditOutcome;

/// Executes one edit on a document.
///
/// Generated ids derive from `order`, so a fresh executor is created for
/// every edit.
pub struct TailoringExecutor<'m> {
    model: &'m mut Model,
    ids: ElementIds,
}

impl<'m> TailoringExecutor<'m> {
    /// Create a new executor for the edit with the given execution order.
    pub fn new(model: &'m mut Model, order: u64) -> Self {
        let ids = ElementIds::for_model(model, order);
        Self { model, ids }
    }

    pub fn order(&self) -> u64 {
        self.ids.order()
    }

    /// Remove a node and its flows without healing.
    pub fn suppress(&mut self, id: &str) -> TailorResult<EditOutcome> {
        self.in_scope(&[id], |graph, _| ops::suppress(graph, id))
    }

    /// Set a node's display name.
    pub fn rename(&mut self, id: &str, name: &str) -> TailorResult<EditOutcome> {
        self.in_scope(&[id], |graph, _| ops::rename(graph, id, name))
    }

    /// Set a property of a node or a flow.
    pub fn modify(&mut self, id: &str, property: &str, value: &str) -> TailorResult<EditOutcome> {
        if self.model.find_node(id).is_some() {
            return self.in_scope(&[id], |graph, _| ops::modify_node(graph, id, property, value));
        }
        let before = self.model.all_ids();
        let scope = self
            .model
            .scope_of_flow_mut(id)
            .ok_or_else(|| TailorError::not_found(id))?;
        ops::modify_flow(scope, id, property, value)?;
        Ok(EditOutcome::diff(&before, &self.model.all_ids()))
    }

    /// Delete a node and heal the flow around it.
    pub fn delete_node(&mut self, id: &str) -> TailorResult<EditOutcome> {
        self.in_scope(&[id], |graph, ids| ops::delete_node(graph, ids, id))
    }

    /// Delete the fragment `[start, end]`.
    pub fn delete_fragment(&mut self, start: &str, end: &str) -> TailorResult<EditOutcome> {
        self.in_scope(&[start, end], |graph, ids| {
            ops::delete_fragment(graph, ids, start, end)
        })
    }

    /// Replace a node by a payload.
    pub fn replace_node(&mut self, id: &str, payload: &Payload) -> TailorResult<EditOutcome> {
        self.in_scope(&[id], |graph, ids| ops::replace_node(graph, ids, id, payload))
    }

    /// Replace the fragment `[start, end]` by a payload.
    pub fn replace_fragment(
        &mut self,
        start: &str,
        end: &str,
        payload: &Payload,
    ) -> TailorResult<EditOutcome> {
        self.in_scope(&[start, end], |graph, ids| {
            ops::replace_fragment(graph, ids, start, end, payload)
        })
    }

    /// Move a node between two anchors.
    pub fn move_node(
        &mut self,
        id: &str,
        after: Option<&str>,
        before: Option<&str>,
    ) -> TailorResult<EditOutcome> {
        let scope_ids = with_anchors(&[id], after, before);
        self.in_scope(&scope_ids, |graph, ids| {
            ops::move_node(graph, ids, id, after, before)
        })
    }

    /// Move the fragment `[start, end]` between two anchors.
    pub fn move_fragment(
        &mut self,
        start: &str,
        end: &str,
        after: Option<&str>,
        before: Option<&str>,
    ) -> TailorResult<EditOutcome> {
        let scope_ids = with_anchors(&[start, end], after, before);
        self.in_scope(&scope_ids, |graph, ids| {
            ops::move_fragment(graph, ids, start, end, after, before)
        })
    }

    /// Put the nodes of `[start, end]` on parallel branches.
    pub fn parallelize(&mut self, start: &str, end: &str) -> TailorResult<EditOutcome> {
        self.in_scope(&[start, end], |graph, ids| {
            ops::parallelize(graph, ids, start, end)
        })
    }

    /// Turn a task into a sub-process whose body comes from `sub_model`.
    pub fn split(&mut self, task: &str, sub_model: &Model) -> TailorResult<EditOutcome> {
        self.in_scope(&[task], |graph, ids| ops::split(graph, ids, task, sub_model))
    }

    /// Insert a payload between two anchors.
    pub fn insert(
        &mut self,
        after: Option<&str>,
        before: Option<&str>,
        payload: &Payload,
    ) -> TailorResult<EditOutcome> {
        let scope_ids = with_anchors(&[], after, before);
        if scope_ids.is_empty() {
            return Err(TailorError::invalid_argument(ERR_NO_ANCHOR));
        }
        self.in_scope(&scope_ids, |graph, ids| {
            ops::insert(graph, ids, after, before, payload)
        })
    }

    /// Insert a payload on a conditional branch or loop.
    pub fn conditional_insert(
        &mut self,
        after: Option<&str>,
        before: Option<&str>,
        payload: &Payload,
        condition: &str,
        in_loop: bool,
    ) -> TailorResult<EditOutcome> {
        let scope_ids = with_anchors(&[], after, before);
        if scope_ids.len() != 2 {
            return Err(TailorError::invalid_argument(ERR_CONDITIONAL_ANCHORS));
        }
        self.in_scope(&scope_ids, |graph, ids| {
            ops::conditional_insert(graph, ids, after, before, payload, condition, in_loop)
        })
    }

    /// Run `edit` on the scope owning every id in `node_ids`.
    fn in_scope<F>(&mut self, node_ids: &[&str], edit: F) -> TailorResult<EditOutcome>
    where
        F: FnOnce(&mut ProcessGraph, &mut ElementIds) -> TailorResult<()>,
    {
        let owner = self.common_scope(node_ids)?;
        let before = self.model.all_ids();
        let scope = self
            .model
            .scope_of_mut(owner)
            .ok_or_else(|| TailorError::not_found(owner))?;
        edit(scope, &mut self.ids)?;
        let outcome = EditOutcome::diff(&before, &self.model.all_ids());
        tracing::debug!(
            "Edit {} created {:?}, removed {:?}",
            self.ids.order(),
            outcome.created,
            outcome.removed
        );
        Ok(outcome)
    }

    /// Check that all nodes live in the same scope and return the first id.
    fn common_scope<'a>(&self, node_ids: &[&'a str]) -> TailorResult<&'a str> {
        let first = *node_ids
            .first()
            .ok_or_else(|| TailorError::invalid_argument("no element given"))?;
        let scope_id = |id: &str| {
            self.model
                .scope_of(id)
                .map(|scope| scope.id().to_string())
                .ok_or_else(|| TailorError::not_found(id))
        };
        let expected = scope_id(first)?;
        for &id in node_ids.iter().skip(1) {
            if scope_id(id)? != expected {
                return Err(TailorError::invalid_argument(format!(
                    "{} and {} are not in the same process scope",
                    first, id
                )));
            }
        }
        Ok(first)
    }
}

fn with_anchors<'a>(
    node_ids: &[&'a str],
    after: Option<&'a str>,
    before: Option<&'a str>,
) -> Vec<&'a str> {
    let mut result = node_ids.to_vec();
    result.extend(after);
    result.extend(before);
    result
}
