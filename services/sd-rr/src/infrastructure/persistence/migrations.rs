//! returs 表结构

use cuba_adapter_postgres::Migration;

const CREATE_RETURS: &str = r#"
CREATE TABLE IF NOT EXISTS returs (
    id INTEGER PRIMARY KEY,
    barang TEXT NOT NULL DEFAULT '',
    alasan TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'Dalam Proses',
    pengembalian TEXT NOT NULL DEFAULT ''
)
"#;

/// 服务启动时应用的迁移
pub fn migrations() -> Vec<Migration> {
    vec![Migration::new(1, "create_returs", CREATE_RETURS)]
}
