//! 数据库行映射结构

use sqlx::FromRow;

/// 退货单数据库行
#[derive(Debug, FromRow)]
pub struct ReturRow {
    pub id: i32,
    pub barang: String,
    pub alasan: String,
    pub status: String,
    pub pengembalian: String,
}
