use super::*;
use crate::model::{AdminOrder, Order, Refund};

// =========================================================
// 辅助函数
// =========================================================

fn base_order(status: &str) -> Order {
    Order {
        id: 1,
        status: status.to_string(),
        payment_status: None,
        payment_method: None,
        refund_status: None,
        return_status: None,
        return_type: None,
        return_reason: None,
        total_amount: 100.0,
        created_at: None,
        items: Vec::new(),
    }
}

fn base_admin_order(status: &str) -> AdminOrder {
    AdminOrder {
        order_id: 1,
        user_email: Some("shopper@example.com".to_string()),
        order_status: Some(status.to_string()),
        status: None,
        payment_status: None,
        payment_method: None,
        refund_status: None,
        return_status: None,
        return_reason: None,
        total_amount: 100.0,
        created_at: None,
    }
}

// =========================================================
// 标签格式化测试
// =========================================================

#[test]
fn test_format_label_partially_refunded() {
    assert_eq!(format_label("PARTIALLY_REFUNDED"), "Partially Refunded");
}

#[test]
fn test_format_label_out_for_delivery() {
    assert_eq!(format_label("OUT_FOR_DELIVERY"), "Out For Delivery");
}

#[test]
fn test_format_label_single_word() {
    assert_eq!(format_label("CANCELLED"), "Cancelled");
}

#[test]
fn test_format_label_empty() {
    assert_eq!(format_label(""), "");
}

// =========================================================
// 展示状态覆盖测试
// =========================================================

#[test]
fn test_display_status_plain_passthrough() {
    let order = base_order(STATUS_SHIPPED);
    assert_eq!(display_status(&order), STATUS_SHIPPED);
}

#[test]
fn test_display_status_replacement_delivered_override() {
    let mut order = base_order(STATUS_DELIVERED);
    order.return_type = Some(RETURN_TYPE_REPLACEMENT.to_string());
    order.return_status = Some(RETURN_COMPLETED.to_string());

    assert_eq!(display_status(&order), STATUS_REPLACEMENT_DELIVERED);
}

#[test]
fn test_display_override_does_not_affect_eligibility() {
    // 换货完成的订单：标签被覆盖，但操作可用性看原始字段
    let mut order = base_order(STATUS_DELIVERED);
    order.return_type = Some(RETURN_TYPE_REPLACEMENT.to_string());
    order.return_status = Some(RETURN_COMPLETED.to_string());
    order.payment_status = Some(PAYMENT_PAID.to_string());
    order.payment_method = Some("UPI".to_string());

    let flags = OrderFlags::derive(&order);
    // 已存在退换货记录，不能再次申请
    assert!(!flags.can_return_or_replace);
    // 原始状态不是 CANCELLED，不能退款
    assert!(!flags.can_request_refund);
    assert!(!flags.is_cancelled);
}

#[test]
fn test_completed_return_is_not_replacement_delivered() {
    let mut order = base_order(STATUS_DELIVERED);
    order.return_type = Some(RETURN_TYPE_RETURN.to_string());
    order.return_status = Some(RETURN_COMPLETED.to_string());

    assert_eq!(display_status(&order), STATUS_DELIVERED);
    assert!(OrderFlags::derive(&order).return_completed);
}

// =========================================================
// 操作可用性测试
// =========================================================

#[test]
fn test_can_cancel_only_placed_or_confirmed() {
    assert!(OrderFlags::derive(&base_order(STATUS_PLACED)).can_cancel);
    assert!(OrderFlags::derive(&base_order(STATUS_CONFIRMED)).can_cancel);
    assert!(!OrderFlags::derive(&base_order(STATUS_SHIPPED)).can_cancel);
    assert!(!OrderFlags::derive(&base_order(STATUS_DELIVERED)).can_cancel);
    assert!(!OrderFlags::derive(&base_order(STATUS_CANCELLED)).can_cancel);
}

#[test]
fn test_payment_options_only_before_payment_method() {
    let order = base_order(STATUS_PLACED);
    assert!(OrderFlags::derive(&order).show_payment_options);

    let mut paid = base_order(STATUS_PLACED);
    paid.payment_method = Some("CARD".to_string());
    assert!(!OrderFlags::derive(&paid).show_payment_options);

    assert!(!OrderFlags::derive(&base_order(STATUS_SHIPPED)).show_payment_options);
    assert!(!OrderFlags::derive(&base_order(STATUS_CANCELLED)).show_payment_options);
}

#[test]
fn test_cancelled_cod_order_cannot_refund_and_shows_unpaid() {
    let mut order = base_order(STATUS_CANCELLED);
    order.payment_method = Some(METHOD_COD.to_string());
    // paymentStatus 未设置

    let flags = OrderFlags::derive(&order);
    assert!(!flags.can_request_refund);
    assert_eq!(flags.payment_status_label, "Unpaid");
}

#[test]
fn test_cancelled_paid_cod_still_shows_unpaid() {
    // COD 取消时货款从未收取，即便后端标了 PAID 也显示 Unpaid
    let mut order = base_order(STATUS_CANCELLED);
    order.payment_method = Some(METHOD_COD.to_string());
    order.payment_status = Some(PAYMENT_PAID.to_string());

    let flags = OrderFlags::derive(&order);
    assert!(!flags.can_request_refund);
    assert_eq!(flags.payment_status_label, "Unpaid");
}

#[test]
fn test_refund_eligibility_requires_all_conditions() {
    let mut order = base_order(STATUS_CANCELLED);
    order.payment_method = Some("UPI".to_string());
    order.payment_status = Some(PAYMENT_PAID.to_string());
    assert!(OrderFlags::derive(&order).can_request_refund);

    // 已有退款记录则不可再次申请
    order.refund_status = Some(REFUND_REQUESTED.to_string());
    assert!(!OrderFlags::derive(&order).can_request_refund);

    // 未支付不可退款
    let mut unpaid = base_order(STATUS_CANCELLED);
    unpaid.payment_method = Some("UPI".to_string());
    assert!(!OrderFlags::derive(&unpaid).can_request_refund);
}

#[test]
fn test_return_or_replace_only_delivered_without_prior_request() {
    assert!(OrderFlags::derive(&base_order(STATUS_DELIVERED)).can_return_or_replace);
    assert!(!OrderFlags::derive(&base_order(STATUS_SHIPPED)).can_return_or_replace);

    let mut requested = base_order(STATUS_DELIVERED);
    requested.return_status = Some(RETURN_REQUESTED.to_string());
    requested.return_type = Some(RETURN_TYPE_RETURN.to_string());
    assert!(!OrderFlags::derive(&requested).can_return_or_replace);
}

#[test]
fn test_non_cod_payment_label_is_formatted() {
    let mut order = base_order(STATUS_DELIVERED);
    order.payment_status = Some(PAYMENT_PAID.to_string());

    assert_eq!(OrderFlags::derive(&order).payment_status_label, "Paid");
}

// =========================================================
// 管理端规则测试
// =========================================================

#[test]
fn test_admin_ship_deliver_matrix() {
    assert!(admin_can_ship(STATUS_PLACED));
    assert!(admin_can_ship(STATUS_CONFIRMED));
    assert!(!admin_can_ship(STATUS_SHIPPED));
    assert!(!admin_can_ship(STATUS_CANCELLED));

    assert!(admin_can_deliver(STATUS_SHIPPED));
    assert!(!admin_can_deliver(STATUS_PLACED));
    assert!(!admin_can_deliver(STATUS_DELIVERED));
}

#[test]
fn test_admin_cancel_blocked_by_terminal_states() {
    assert!(admin_can_cancel(&base_admin_order(STATUS_PLACED)));
    assert!(admin_can_cancel(&base_admin_order(STATUS_SHIPPED)));
    assert!(!admin_can_cancel(&base_admin_order(STATUS_DELIVERED)));
    assert!(!admin_can_cancel(&base_admin_order(STATUS_CANCELLED)));
}

#[test]
fn test_admin_cancel_blocked_by_return_flow() {
    let mut order = base_admin_order(STATUS_SHIPPED);
    order.return_status = Some(RETURN_REQUESTED.to_string());
    assert!(!admin_can_cancel(&order));

    order.return_status = Some(RETURN_COMPLETED.to_string());
    assert!(!admin_can_cancel(&order));
}

#[test]
fn test_admin_refund_badge_visibility() {
    let mut order = base_admin_order(STATUS_CANCELLED);
    assert!(!admin_show_refund(&order));

    order.payment_status = Some(PAYMENT_PAID.to_string());
    assert!(admin_show_refund(&order));
    assert!(!refund_completed(order.refund_status.as_deref()));

    order.refund_status = Some(REFUND_REFUNDED.to_string());
    assert!(refund_completed(order.refund_status.as_deref()));
}

#[test]
fn test_username_from_email() {
    assert_eq!(
        username_from_email(Some("shopper@example.com")),
        "shopper"
    );
    assert_eq!(username_from_email(None), "");
    assert_eq!(username_from_email(Some("no-at-sign")), "no-at-sign");
}

// =========================================================
// 退款完成流程模拟（管理端列表语义的端到端检查）
// =========================================================

struct FakeRefundBackend {
    refunds: Vec<Refund>,
}

impl FakeRefundBackend {
    fn list(&self) -> Vec<Refund> {
        self.refunds.clone()
    }

    fn complete(&mut self, refund_id: u64) {
        if let Some(r) = self.refunds.iter_mut().find(|r| r.id == refund_id) {
            r.status = REFUND_REFUNDED.to_string();
        }
    }
}

#[test]
fn test_completing_refund_removes_action_after_reload() {
    let mut backend = FakeRefundBackend {
        refunds: vec![Refund {
            id: 11,
            order: None,
            user_email: Some("shopper@example.com".to_string()),
            amount: 250.0,
            status: REFUND_REQUESTED.to_string(),
        }],
    };

    // 初始加载：Complete Refund 按钮可见
    let listed = backend.list();
    assert!(refund_needs_action(&listed[0].status));

    // 管理员完成退款后重新加载
    backend.complete(11);
    let reloaded = backend.list();

    assert_eq!(reloaded[0].status, REFUND_REFUNDED);
    assert!(!refund_needs_action(&reloaded[0].status));
}
