//! 数据库行到领域对象的转换

use cuba_errors::{AppError, AppResult};

use crate::domain::entities::Retur;
use crate::domain::enums::{RefundMethod, ReturStatus};
use crate::domain::value_objects::ReturId;

use super::rows::ReturRow;

/// 将 ReturRow 转换为 Retur，无法识别的枚举值视为数据库错误
pub fn retur_from_row(row: ReturRow) -> AppResult<Retur> {
    let status: ReturStatus = row
        .status
        .parse()
        .map_err(|e| AppError::database(format!("Corrupt return {}: {}", row.id, e)))?;
    let refund_method: RefundMethod = row
        .pengembalian
        .parse()
        .map_err(|e| AppError::database(format!("Corrupt return {}: {}", row.id, e)))?;

    Ok(Retur::restore(
        ReturId(row.id),
        row.barang,
        row.alasan,
        status,
        refund_method,
    ))
}
