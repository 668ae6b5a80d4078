//! 退货业务指标

use metrics::{counter, gauge};

use crate::domain::ledger::LedgerSnapshot;

pub fn record_created() {
    counter!("retur_created_total").increment(1);
}

pub fn record_approved() {
    counter!("retur_approved_total").increment(1);
}

pub fn record_disapproved() {
    counter!("retur_disapproved_total").increment(1);
}

pub fn record_deleted() {
    counter!("retur_deleted_total").increment(1);
}

pub fn record_restored() {
    counter!("retur_restored_total").increment(1);
}

/// 记录撤销栈深度与已释放 ID 数量
pub fn record_ledger(snapshot: &LedgerSnapshot) {
    gauge!("retur_undo_depth").set(snapshot.undo_depth as f64);
    gauge!("retur_free_ids").set(snapshot.free_ids.len() as f64);
}
