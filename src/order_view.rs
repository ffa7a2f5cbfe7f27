//! 订单展示规则模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 订单的各状态字段组合决定了每张卡片上出现哪些操作；
//! 所有派生布尔量都在每次渲染时重新计算，不做缓存。

use crate::model::{AdminOrder, Order};

// =========================================================
// 状态常量 (服务端权威取值，客户端按字面值分支)
// =========================================================

pub const STATUS_PLACED: &str = "PLACED";
pub const STATUS_CONFIRMED: &str = "CONFIRMED";
pub const STATUS_SHIPPED: &str = "SHIPPED";
pub const STATUS_DELIVERED: &str = "DELIVERED";
pub const STATUS_CANCELLED: &str = "CANCELLED";
/// 仅用于展示的合成状态，不存在于服务端
pub const STATUS_REPLACEMENT_DELIVERED: &str = "REPLACEMENT_DELIVERED";

pub const PAYMENT_PAID: &str = "PAID";
pub const METHOD_COD: &str = "COD";

pub const REFUND_REQUESTED: &str = "REQUESTED";
pub const REFUND_REFUNDED: &str = "REFUNDED";

pub const RETURN_REQUESTED: &str = "REQUESTED";
pub const RETURN_COMPLETED: &str = "COMPLETED";
pub const RETURN_TYPE_RETURN: &str = "RETURN";
pub const RETURN_TYPE_REPLACEMENT: &str = "REPLACEMENT";

/// 退货/换货的封闭原因集合，提交前必须选中其一
pub const RETURN_REASONS: [&str; 2] = ["Damaged item", "Accessory missing"];

fn opt_eq(value: Option<&str>, expected: &str) -> bool {
    value == Some(expected)
}

// =========================================================
// 标签格式化
// =========================================================

/// 将原始枚举串转为人类可读标签
///
/// 下划线换空格、全部小写、每个单词首字母大写：
/// `OUT_FOR_DELIVERY` → `Out For Delivery`。
/// 未知取值同样适用，客户端不维护取值白名单。
pub fn format_label(raw: &str) -> String {
    let lowered = raw.replace('_', " ").to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut at_word_start = true;
    for c in lowered.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c == ' ';
    }
    out
}

/// 展示状态：仅在"换货已完成"时覆盖原始订单状态
///
/// 覆盖只影响标签；操作可用性检查仍基于原始字段。
pub fn display_status(order: &Order) -> String {
    if opt_eq(order.return_type.as_deref(), RETURN_TYPE_REPLACEMENT)
        && opt_eq(order.return_status.as_deref(), RETURN_COMPLETED)
    {
        STATUS_REPLACEMENT_DELIVERED.to_string()
    } else {
        order.status.clone()
    }
}

// =========================================================
// 用户订单卡片的派生标志
// =========================================================

/// 单张订单卡片上所有条件渲染所需的派生量
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFlags {
    pub is_cancelled: bool,
    /// 自助取消仅在 PLACED / CONFIRMED 两个状态下提供
    pub can_cancel: bool,
    pub show_payment_options: bool,
    pub can_request_refund: bool,
    pub can_return_or_replace: bool,
    /// 退货完成或退款完成时隐藏支付信息行
    pub return_completed: bool,
    pub refund_completed: bool,
    pub payment_status_label: String,
}

impl OrderFlags {
    pub fn derive(order: &Order) -> Self {
        let display = display_status(order);
        let is_cancelled = display == STATUS_CANCELLED;
        let is_cod = opt_eq(order.payment_method.as_deref(), METHOD_COD);
        let is_paid = opt_eq(order.payment_status.as_deref(), PAYMENT_PAID);

        let can_cancel = display == STATUS_PLACED || display == STATUS_CONFIRMED;

        let show_payment_options = !is_cancelled
            && order.payment_method.is_none()
            && (order.status == STATUS_PLACED || order.status == STATUS_CONFIRMED);

        let can_request_refund =
            is_cancelled && !is_cod && is_paid && order.refund_status.is_none();

        let can_return_or_replace =
            display == STATUS_DELIVERED && order.return_status.is_none();

        let return_completed = opt_eq(order.return_status.as_deref(), RETURN_COMPLETED)
            && opt_eq(order.return_type.as_deref(), RETURN_TYPE_RETURN);

        let refund_completed =
            is_cancelled && opt_eq(order.refund_status.as_deref(), REFUND_REFUNDED);

        // COD 订单被取消时货款从未收取，固定显示 Unpaid
        let payment_status_label = if is_cod && is_cancelled {
            "Unpaid".to_string()
        } else {
            format_label(order.payment_status.as_deref().unwrap_or(""))
        };

        Self {
            is_cancelled,
            can_cancel,
            show_payment_options,
            can_request_refund,
            can_return_or_replace,
            return_completed,
            refund_completed,
            payment_status_label,
        }
    }
}

// =========================================================
// 管理端订单规则
// =========================================================

pub fn admin_can_ship(status: &str) -> bool {
    status == STATUS_PLACED || status == STATUS_CONFIRMED
}

pub fn admin_can_deliver(status: &str) -> bool {
    status == STATUS_SHIPPED
}

/// 管理端取消：未送达、未取消，且不存在进行中或已完成的退换货流程
pub fn admin_can_cancel(order: &AdminOrder) -> bool {
    let status = order.effective_status();
    let has_return_flow = opt_eq(order.return_status.as_deref(), RETURN_REQUESTED)
        || opt_eq(order.return_status.as_deref(), RETURN_COMPLETED);
    status != STATUS_DELIVERED && status != STATUS_CANCELLED && !has_return_flow
}

/// 退款行仅在"已取消且已支付"时展示
pub fn admin_show_refund(order: &AdminOrder) -> bool {
    order.effective_status() == STATUS_CANCELLED
        && opt_eq(order.payment_status.as_deref(), PAYMENT_PAID)
}

/// Completed 与 Pending 以字面退款状态区分
pub fn refund_completed(refund_status: Option<&str>) -> bool {
    refund_status == Some(REFUND_REFUNDED)
}

/// 退款单是否仍需管理员处理
pub fn refund_needs_action(status: &str) -> bool {
    status == REFUND_REQUESTED
}

/// 退换货申请是否仍需管理员处理
pub fn return_needs_action(status: &str) -> bool {
    status == RETURN_REQUESTED
}

/// 邮箱本地部分作为展示用户名
pub fn username_from_email(email: Option<&str>) -> String {
    email
        .and_then(|e| e.split('@').next())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests;
