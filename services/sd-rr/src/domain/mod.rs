//! 领域层
//!
//! 退货实体、枚举、仓储接口，以及删除撤销所需的内存账本

pub mod entities;
pub mod enums;
pub mod ledger;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use enums::*;
pub use ledger::*;
pub use repositories::*;
pub use value_objects::*;
