//! 实体模块

mod retur;

pub use retur::Retur;
