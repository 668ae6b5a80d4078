//! sd-rr Service - Return Records
//!
//! 退货单的创建、审批、删除与撤销删除

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
