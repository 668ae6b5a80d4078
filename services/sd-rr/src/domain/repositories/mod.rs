//! 仓储接口模块

mod retur_repository;

pub use retur_repository::ReturRepository;
#[cfg(test)]
pub use retur_repository::MockReturRepository;
