//! 请求与响应 DTO

use serde::{Deserialize, Serialize};

use crate::application::{ApproveReturCommand, CreateReturCommand};
use crate::domain::entities::Retur;
use crate::domain::value_objects::ReturId;

/// 退货单响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturResponse {
    pub id: i32,
    pub barang: String,
    pub alasan: String,
    pub status: String,
    pub pengembalian: String,
}

impl From<&Retur> for ReturResponse {
    fn from(retur: &Retur) -> Self {
        Self {
            id: retur.id().value(),
            barang: retur.item().to_string(),
            alasan: retur.reason().to_string(),
            status: retur.status().as_str().to_string(),
            pengembalian: retur.refund_method().as_str().to_string(),
        }
    }
}

/// 创建请求；缺失或为 null 的字段按空字符串处理
///
/// 其余字段（id、status、pengembalian）被忽略
#[derive(Debug, Default, Deserialize)]
pub struct CreateReturRequest {
    #[serde(default)]
    pub barang: Option<String>,
    #[serde(default)]
    pub alasan: Option<String>,
}

impl From<CreateReturRequest> for CreateReturCommand {
    fn from(req: CreateReturRequest) -> Self {
        Self {
            item: req.barang.unwrap_or_default(),
            reason: req.alasan.unwrap_or_default(),
        }
    }
}

/// 批准请求
#[derive(Debug, Default, Deserialize)]
pub struct ApproveReturRequest {
    #[serde(default)]
    pub pengembalian: Option<String>,
}

impl ApproveReturRequest {
    pub fn into_command(self, id: ReturId) -> ApproveReturCommand {
        ApproveReturCommand {
            id,
            pengembalian: self.pengembalian.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<ServiceCheck>,
}

#[derive(Debug, Serialize)]
pub struct ServiceCheck {
    pub name: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
