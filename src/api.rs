//! 后端 API 封装
//!
//! 固定目录的类型化请求函数，每个后端操作一个方法，全部建立在
//! `web::http::ApiClient` 之上。无重试、无缓存、无请求合并；
//! 凭证注入与 401/403 处理都在适配器层完成。

use leptos::prelude::*;

use crate::model::{
    AdminOrder, CartItem, CheckoutRequest, LoginRequest, LoginResponse, Order, Paged,
    PaymentRequest, Product, Refund, RegisterRequest, ReturnKind, ReturnRequest,
};
use crate::web::http::{ApiClient, ApiError, Method};

/// 后端基地址
pub const API_BASE: &str = "http://localhost:8080";

/// 对查询参数值做最小化的百分号编码
///
/// 覆盖退货原因这类带空格的取值；非保留字符原样保留。
fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopApi {
    client: ApiClient,
}

impl ShopApi {
    pub const fn new(base_url: &'static str) -> Self {
        Self {
            client: ApiClient::new(base_url),
        }
    }

    // =========================================================
    // 认证
    // =========================================================

    pub async fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.client
            .send_json(Method::Post, "/api/auth/login", body)
            .await
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<(), ApiError> {
        self.client
            .send_unit(Method::Post, "/api/users/register", body)
            .await
    }

    // =========================================================
    // 商品
    // =========================================================

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.client.request_json(Method::Get, "/api/products").await
    }

    /// 管理端库存增补
    pub async fn update_stock(&self, product_id: u64, quantity: u32) -> Result<(), ApiError> {
        let path = format!("/api/products/{}/stock?quantity={}", product_id, quantity);
        self.client.request_unit(Method::Put, &path).await
    }

    // =========================================================
    // 购物车
    // =========================================================

    pub async fn cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.client.request_json(Method::Get, "/api/cart").await
    }

    pub async fn add_to_cart(&self, product_id: u64, quantity: u32) -> Result<(), ApiError> {
        let path = format!("/api/cart/add/{}/quantity/{}", product_id, quantity);
        self.client.request_unit(Method::Post, &path).await
    }

    pub async fn update_cart_quantity(
        &self,
        cart_item_id: u64,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let path = format!("/api/cart/update/{}/quantity/{}", cart_item_id, quantity);
        self.client.request_unit(Method::Put, &path).await
    }

    pub async fn remove_cart_item(&self, cart_item_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/cart/remove/{}", cart_item_id);
        self.client.request_unit(Method::Delete, &path).await
    }

    // =========================================================
    // 订单
    // =========================================================

    pub async fn checkout(&self, body: &CheckoutRequest) -> Result<(), ApiError> {
        self.client
            .send_unit(Method::Post, "/api/orders/checkout", body)
            .await
    }

    pub async fn my_orders(&self, page: usize, size: usize) -> Result<Paged<Order>, ApiError> {
        let path = format!("/api/orders/paged?page={}&size={}", page, size);
        self.client.request_json(Method::Get, &path).await
    }

    pub async fn cancel_order(&self, order_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/orders/{}/cancel", order_id);
        self.client.request_unit(Method::Put, &path).await
    }

    // =========================================================
    // 支付
    // =========================================================

    pub async fn pay(&self, body: &PaymentRequest) -> Result<(), ApiError> {
        self.client
            .send_unit(Method::Post, "/api/payments/pay", body)
            .await
    }

    // =========================================================
    // 退款
    // =========================================================

    pub async fn request_refund(&self, order_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/refunds/{}/request", order_id);
        self.client.request_unit(Method::Post, &path).await
    }

    pub async fn admin_refunds(&self) -> Result<Vec<Refund>, ApiError> {
        self.client
            .request_json(Method::Get, "/api/admin/refunds")
            .await
    }

    pub async fn complete_refund(&self, refund_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/admin/refunds/{}/complete", refund_id);
        self.client.request_unit(Method::Put, &path).await
    }

    // =========================================================
    // 退货 / 换货
    // =========================================================

    pub async fn request_return(
        &self,
        order_id: u64,
        kind: ReturnKind,
        reason: &str,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/api/returns/request?orderId={}&type={}&reason={}",
            order_id,
            kind.as_str(),
            encode_query(reason)
        );
        self.client.request_unit(Method::Post, &path).await
    }

    pub async fn admin_returns(&self) -> Result<Vec<ReturnRequest>, ApiError> {
        self.client
            .request_json(Method::Get, "/api/admin/returns")
            .await
    }

    pub async fn process_return(&self, request_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/admin/returns/{}/process", request_id);
        self.client.request_unit(Method::Put, &path).await
    }

    // =========================================================
    // 管理端订单
    // =========================================================

    pub async fn admin_orders(
        &self,
        page: usize,
        size: usize,
    ) -> Result<Paged<AdminOrder>, ApiError> {
        let path = format!("/api/admin/orders?page={}&size={}", page, size);
        self.client.request_json(Method::Get, &path).await
    }

    pub async fn ship_order(&self, order_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/admin/orders/{}/ship", order_id);
        self.client.request_unit(Method::Put, &path).await
    }

    pub async fn deliver_order(&self, order_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/admin/orders/{}/deliver", order_id);
        self.client.request_unit(Method::Put, &path).await
    }

    pub async fn admin_cancel_order(&self, order_id: u64) -> Result<(), ApiError> {
        let path = format!("/api/admin/orders/{}/cancel", order_id);
        self.client.request_unit(Method::Put, &path).await
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> ShopApi {
    use_context::<ShopApi>().expect("ShopApi should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query_spaces() {
        assert_eq!(encode_query("Damaged item"), "Damaged%20item");
        assert_eq!(encode_query("Accessory missing"), "Accessory%20missing");
    }

    #[test]
    fn test_encode_query_unreserved_passthrough() {
        assert_eq!(encode_query("RETURN"), "RETURN");
        assert_eq!(encode_query("a-b_c.d~e"), "a-b_c.d~e");
    }
}
