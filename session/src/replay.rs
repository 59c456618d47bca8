//! Rebuilding a tailored model from a base model and a log.

use bpmnt_graph::Model;
use bpmnt_journal::{model_to_log, OperationLog};

use crate::config::TailoringConfig;
use crate::error::{SessionError, SessionResult};
use crate::session::Tailoring;

/// Re-execute every record of `log` against a copy of `base`.
///
/// Records keep their orders, so generated ids match the original session.
/// The returned session holds a copy of `log` and can be edited further.
pub fn replay(
    base: &Model,
    log: &OperationLog,
    config: TailoringConfig,
) -> SessionResult<Tailoring> {
    let found = base
        .process()
        .map(|p| p.id().to_string())
        .ok_or_else(|| SessionError::no_process(base.id()))?;
    if found != log.base_process_id() {
        return Err(SessionError::base_mismatch(log.base_process_id(), found));
    }

    let mut tailoring = Tailoring::from_parts(base, log.clone(), config)?;
    for record in log.edits() {
        tailoring.run(record.order, &record.op)?;
    }
    tracing::info!(
        "Replayed {} operations onto {}",
        log.len() - 1,
        log.new_process_id()
    );
    Ok(tailoring)
}

/// Read a log document and replay it against `base`.
pub fn replay_document(
    base: &Model,
    document: &Model,
    config: TailoringConfig,
) -> SessionResult<Tailoring> {
    let log = model_to_log(document, &config.namespace)?;
    replay(base, &log, config)
}
