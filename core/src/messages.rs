//! Common error messages used across BPMNt components.
//!
//! These constants keep precondition failures worded the same way in the
//! executor, the session and the tests.

/// Error: gateways cannot be edited directly.
pub const ERR_GATEWAY_NOT_ALLOWED: &str = "gateways cannot be the target of this operation";

/// Error: start and end events cannot be edited directly.
pub const ERR_BOUNDARY_EVENT_NOT_ALLOWED: &str =
    "start and end events cannot be the target of this operation";

/// Error: both anchors are missing.
pub const ERR_NO_ANCHOR: &str = "afterOf and beforeOf cannot both be missing";

/// Error: anchors must be directly connected.
pub const ERR_ANCHORS_NOT_CONNECTED: &str = "afterOf must be directly connected to beforeOf";

/// Error: both anchors name the same node.
pub const ERR_IDENTICAL_ANCHORS: &str = "afterOf and beforeOf must be different nodes";

/// Error: beforeOf lies upstream of afterOf.
pub const ERR_ANCHORS_REVERSED: &str = "beforeOf must lie downstream of afterOf";

/// Error: nothing may be placed before a start event.
pub const ERR_BEFORE_START: &str = "beforeOf cannot be a start event";

/// Error: nothing may be placed after an end event.
pub const ERR_AFTER_END: &str = "afterOf cannot be an end event";

/// Error: a divergent gateway needs an explicit beforeOf.
pub const ERR_AFTER_DIVERGENT: &str =
    "afterOf cannot be a divergent gateway when beforeOf is missing";

/// Error: a convergent gateway needs an explicit afterOf.
pub const ERR_BEFORE_CONVERGENT: &str =
    "beforeOf cannot be a convergent gateway when afterOf is missing";

/// Error: start and end of a range must differ.
pub const ERR_IDENTICAL_BOUNDS: &str = "starting and ending node must be different";

/// Error: split only accepts tasks.
pub const ERR_SPLIT_REQUIRES_TASK: &str = "split requires a task";

/// Error: a split body is the span between one start and one end event.
pub const ERR_SUB_MODEL_SPAN: &str =
    "sub-model process needs exactly one start event and one end event";

/// Error: events can only be replaced by the same event kind.
pub const ERR_EVENT_KIND_MISMATCH: &str =
    "start events can only be replaced by start events and end events by end events";

/// Error: conditional insertion needs both anchors.
pub const ERR_CONDITIONAL_ANCHORS: &str =
    "conditional insert requires both afterOf and beforeOf";

/// Error: an anchor cannot be part of the element being moved.
pub const ERR_ANCHOR_INSIDE_TARGET: &str =
    "afterOf and beforeOf must lie outside the moved element";

/// Error: a gateway cannot be contributed as a single node.
pub const ERR_GATEWAY_PAYLOAD: &str = "a single-node payload cannot be a gateway";
