//! Append-only operation log.

use crate::entry::{OperationRecord, Order, TailoringOperation};
use crate::error::{JournalError, JournalResult};

/// Ordered record of a tailoring session.
///
/// The first record is always `Extend` with order 0; every later record has
/// a strictly greater order than its predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationLog {
    /// All recorded operations.
    records: Vec<OperationRecord>,
    /// Next order to assign.
    next_order: Order,
    base_process_id: String,
    new_process_id: String,
}

impl OperationLog {
    /// Start a log with its extend record.
    pub fn new(base_process_id: impl Into<String>, new_process_id: impl Into<String>) -> Self {
        let base_process_id = base_process_id.into();
        let new_process_id = new_process_id.into();
        let extend = TailoringOperation::Extend {
            base_process_id: base_process_id.clone(),
            new_process_id: new_process_id.clone(),
        };
        Self {
            records: vec![OperationRecord::new(0, extend)],
            next_order: 1,
            base_process_id,
            new_process_id,
        }
    }

    /// Rebuild a log from records, checking their ordering.
    pub fn from_records(records: Vec<OperationRecord>) -> JournalResult<Self> {
        let (base_process_id, new_process_id) = match records.first() {
            Some(OperationRecord {
                order: 0,
                op:
                    TailoringOperation::Extend {
                        base_process_id,
                        new_process_id,
                    },
            }) => (base_process_id.clone(), new_process_id.clone()),
            Some(record) => {
                return Err(JournalError::out_of_order(
                    record.order,
                    "the log must start with an extend record of order 0",
                ))
            }
            None => return Err(JournalError::invalid_format("empty operation log")),
        };

        for pair in records.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            if current.order <= previous.order {
                return Err(JournalError::out_of_order(
                    current.order,
                    format!("follows operation {}", previous.order),
                ));
            }
            if current.op.is_extend() {
                return Err(JournalError::out_of_order(
                    current.order,
                    "extend may only appear first",
                ));
            }
        }

        let next_order = records.last().map_or(1, |r| r.order + 1);
        Ok(Self {
            records,
            next_order,
            base_process_id,
            new_process_id,
        })
    }

    /// Append an operation and return its order.
    pub fn append(&mut self, op: TailoringOperation) -> JournalResult<Order> {
        if op.is_extend() {
            return Err(JournalError::out_of_order(
                self.next_order,
                "extend may only appear first",
            ));
        }
        let order = self.next_order;
        self.next_order += 1;
        tracing::debug!("Logged {} as operation {}", op.element_name(), order);
        self.records.push(OperationRecord::new(order, op));
        Ok(order)
    }

    /// Order the next appended operation will get.
    pub fn next_order(&self) -> Order {
        self.next_order
    }

    /// Get all records, extend included.
    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    /// Records after the extend record.
    pub fn edits(&self) -> impl Iterator<Item = &OperationRecord> + '_ {
        self.records.iter().skip(1)
    }

    /// Get record by order.
    pub fn get(&self, order: Order) -> Option<&OperationRecord> {
        self.records.iter().find(|r| r.order == order)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// A log always holds its extend record, so it is never empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn base_process_id(&self) -> &str {
        &self.base_process_id
    }

    pub fn new_process_id(&self) -> &str {
        &self.new_process_id
    }
}
