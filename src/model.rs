//! 数据模型模块
//!
//! 所有实体都是服务端响应的只读投影：客户端不持久化它们（会话除外）。
//! 服务端可能省略的字段一律显式建模为 `Option`，"字段缺失"是一等情况，
//! 而不是偶然的兜底。状态字段保持为不透明字符串，具体取值的分支逻辑
//! 集中在 `order_view` 模块。

use serde::{Deserialize, Serialize};

// =========================================================
// 响应实体 (Server Projections)
// =========================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub ram: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub camera: Option<String>,
    #[serde(default)]
    pub processor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u64,
    #[serde(default)]
    pub quantity: u32,
    pub product: Product,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: u64,
    #[serde(default)]
    pub quantity: u32,
    /// 下单时的单价，与商品当前价格无关
    #[serde(default)]
    pub price: f64,
    pub product: Product,
}

/// 用户订单
///
/// 各状态字段是相互独立的枚举串，组合起来决定可用操作（见 `order_view`）。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub refund_status: Option<String>,
    #[serde(default)]
    pub return_status: Option<String>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub return_reason: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// 管理端订单投影
///
/// 后端在不同版本里用过 `orderStatus` 和 `status` 两个字段名，
/// 读取时以 `orderStatus` 优先（见 [`AdminOrder::effective_status`]）。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub order_id: u64,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub refund_status: Option<String>,
    #[serde(default)]
    pub return_status: Option<String>,
    #[serde(default)]
    pub return_reason: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminOrder {
    /// `orderStatus` 优先，缺失时回落到 `status`
    pub fn effective_status(&self) -> &str {
        self.order_status
            .as_deref()
            .or(self.status.as_deref())
            .unwrap_or("")
    }
}

/// 退款单：每个符合条件的已取消+已支付订单至多一条
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub id: u64,
    #[serde(default)]
    pub order: Option<OrderRef>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
    pub id: u64,
}

/// 退货/换货申请：每个订单至多一条活跃记录
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub id: u64,
    #[serde(default)]
    pub order_id: Option<u64>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub requested_at: Option<String>,
}

/// 分页响应外壳
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: usize,
}

// =========================================================
// 请求体 (Request Bodies)
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// email 或用户名，后端统一按 email 字段接收
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub cart_item_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: u64,
    pub payment_method: String,
}

/// 退货/换货申请的类型（请求侧是封闭枚举，响应侧保持字符串）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Return,
    Replacement,
}

impl ReturnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnKind::Return => "RETURN",
            ReturnKind::Replacement => "REPLACEMENT",
        }
    }
}

#[cfg(test)]
mod tests;
