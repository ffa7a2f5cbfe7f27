use super::*;

// =========================================================
// 稀疏响应反序列化测试
// 服务端省略的字段必须落到 None / 默认值，而不是报错
// =========================================================

#[test]
fn test_order_with_all_optional_fields_absent() {
    let json = r#"{"id": 7, "status": "PLACED", "totalAmount": 999.0, "items": []}"#;
    let order: Order = serde_json::from_str(json).unwrap();

    assert_eq!(order.id, 7);
    assert_eq!(order.status, "PLACED");
    assert_eq!(order.payment_status, None);
    assert_eq!(order.payment_method, None);
    assert_eq!(order.refund_status, None);
    assert_eq!(order.return_status, None);
    assert_eq!(order.return_type, None);
    assert!(order.items.is_empty());
}

#[test]
fn test_order_with_null_fields_treated_as_absent() {
    let json = r#"{
        "id": 8,
        "status": "CANCELLED",
        "paymentStatus": null,
        "paymentMethod": "COD",
        "refundStatus": null,
        "totalAmount": 100.0
    }"#;
    let order: Order = serde_json::from_str(json).unwrap();

    assert_eq!(order.payment_status, None);
    assert_eq!(order.payment_method.as_deref(), Some("COD"));
    assert_eq!(order.refund_status, None);
}

#[test]
fn test_order_items_nest_product_and_unit_price() {
    let json = r#"{
        "id": 9,
        "status": "DELIVERED",
        "totalAmount": 2400.0,
        "items": [
            {"id": 1, "quantity": 2, "price": 1200.0,
             "product": {"id": 5, "name": "Phone X", "price": 1300.0, "stock": 3}}
        ]
    }"#;
    let order: Order = serde_json::from_str(json).unwrap();

    assert_eq!(order.items.len(), 1);
    let item = &order.items[0];
    assert_eq!(item.quantity, 2);
    // 下单价独立于商品当前价
    assert_eq!(item.price, 1200.0);
    assert_eq!(item.product.name, "Phone X");
}

#[test]
fn test_product_without_specs() {
    let json = r#"{"id": 1, "name": "Phone", "price": 500.0, "stock": 0}"#;
    let product: Product = serde_json::from_str(json).unwrap();

    assert_eq!(product.stock, 0);
    assert_eq!(product.ram, None);
    assert_eq!(product.image_url, None);
    assert_eq!(product.color, None);
}

#[test]
fn test_paged_defaults_when_fields_missing() {
    let paged: Paged<Order> = serde_json::from_str("{}").unwrap();

    assert!(paged.content.is_empty());
    assert_eq!(paged.total_pages, 0);
}

#[test]
fn test_paged_orders_round() {
    let json = r#"{"content": [{"id": 1, "status": "PLACED", "totalAmount": 10.0}], "totalPages": 4}"#;
    let paged: Paged<Order> = serde_json::from_str(json).unwrap();

    assert_eq!(paged.content.len(), 1);
    assert_eq!(paged.total_pages, 4);
}

// =========================================================
// AdminOrder 状态字段兼容
// =========================================================

#[test]
fn test_admin_order_prefers_order_status() {
    let json = r#"{"orderId": 3, "orderStatus": "SHIPPED", "status": "PLACED"}"#;
    let order: AdminOrder = serde_json::from_str(json).unwrap();

    assert_eq!(order.effective_status(), "SHIPPED");
}

#[test]
fn test_admin_order_falls_back_to_status() {
    let json = r#"{"orderId": 3, "status": "PLACED"}"#;
    let order: AdminOrder = serde_json::from_str(json).unwrap();

    assert_eq!(order.effective_status(), "PLACED");
}

#[test]
fn test_admin_order_without_any_status() {
    let json = r#"{"orderId": 3}"#;
    let order: AdminOrder = serde_json::from_str(json).unwrap();

    assert_eq!(order.effective_status(), "");
}

// =========================================================
// 退款 / 退换货
// =========================================================

#[test]
fn test_refund_with_missing_order_link() {
    let json = r#"{"id": 11, "amount": 250.0, "status": "REQUESTED"}"#;
    let refund: Refund = serde_json::from_str(json).unwrap();

    assert_eq!(refund.order, None);
    assert_eq!(refund.status, "REQUESTED");
}

#[test]
fn test_return_request_type_field_rename() {
    let json = r#"{
        "id": 2, "orderId": 9, "userEmail": "a@b.com",
        "type": "REPLACEMENT", "reason": "Damaged item",
        "status": "REQUESTED", "requestedAt": "2026-08-01T10:00:00"
    }"#;
    let req: ReturnRequest = serde_json::from_str(json).unwrap();

    assert_eq!(req.kind, "REPLACEMENT");
    assert_eq!(req.order_id, Some(9));
    assert_eq!(req.reason.as_deref(), Some("Damaged item"));
}

#[test]
fn test_login_response_without_role() {
    let json = r#"{"token": "jwt-abc"}"#;
    let res: LoginResponse = serde_json::from_str(json).unwrap();

    assert_eq!(res.token, "jwt-abc");
    assert_eq!(res.role, "");
}

// =========================================================
// 请求体序列化
// =========================================================

#[test]
fn test_checkout_request_uses_camel_case() {
    let body = CheckoutRequest {
        cart_item_ids: vec![1, 2, 3],
    };
    let json = serde_json::to_string(&body).unwrap();

    assert_eq!(json, r#"{"cartItemIds":[1,2,3]}"#);
}

#[test]
fn test_payment_request_shape() {
    let body = PaymentRequest {
        order_id: 42,
        payment_method: "UPI".to_string(),
    };
    let json = serde_json::to_string(&body).unwrap();

    assert_eq!(json, r#"{"orderId":42,"paymentMethod":"UPI"}"#);
}
