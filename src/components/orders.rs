//! 我的订单页组件
//!
//! 每张卡片的操作集合由 `order_view::OrderFlags` 派生；
//! 任何变更成功后整页重新加载，列表始终渲染最近一次响应。
//! 退货/换货表单同一时刻只为一张订单展开，原因必须从封闭集合中选择。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::navbar::Navbar;
use crate::model::{Order, PaymentRequest, ReturnKind};
use crate::order_view::{
    OrderFlags, RETURN_REASONS, RETURN_TYPE_RETURN, display_status, format_label,
};
use crate::session::use_api_failure;
use crate::toast::use_toast;

const PAGE_SIZE: usize = 10;

fn payment_method_class(method: Option<&str>) -> &'static str {
    match method {
        Some("COD") => "payment-cod",
        Some("UPI") => "payment-upi",
        Some("CARD") => "payment-card",
        _ => "",
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let on_failure = use_api_failure();

    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (total_pages, set_total_pages) = signal(0usize);
    let page = RwSignal::new(0usize);

    // 取消确认框中的订单 id
    let confirm_id = RwSignal::new(None::<u64>);
    // 当前展开退货/换货表单的订单 id，同时只有一个
    let active_order = RwSignal::new(None::<u64>);
    let reason = RwSignal::new(String::new());

    let load = move || async move {
        match api.my_orders(page.get_untracked(), PAGE_SIZE).await {
            Ok(paged) => {
                set_orders.set(paged.content);
                set_total_pages.set(paged.total_pages);
            }
            Err(err) => on_failure(err, "Failed to load orders"),
        }
    };
    Effect::new(move |_| {
        page.track();
        spawn_local(load());
    });

    let pay = move |order_id: u64, method: &'static str| {
        spawn_local(async move {
            let body = PaymentRequest {
                order_id,
                payment_method: method.to_string(),
            };
            match api.pay(&body).await {
                Ok(()) => {
                    toast.success("Payment successful");
                    load().await;
                }
                Err(err) => on_failure(err, "Payment failed"),
            }
        });
    };

    let confirm_cancel = move |_| {
        let Some(order_id) = confirm_id.get_untracked() else {
            return;
        };
        confirm_id.set(None);
        spawn_local(async move {
            match api.cancel_order(order_id).await {
                Ok(()) => {
                    toast.success("Order cancelled successfully");
                    load().await;
                }
                Err(err) => on_failure(err, "Failed to cancel order"),
            }
        });
    };

    let request_refund = move |order_id: u64| {
        spawn_local(async move {
            match api.request_refund(order_id).await {
                Ok(()) => {
                    toast.success("Refund request submitted");
                    load().await;
                }
                Err(err) => on_failure(err, "Refund request failed"),
            }
        });
    };

    let submit_return = move |order_id: u64, kind: ReturnKind| {
        let selected_reason = reason.get_untracked();
        if selected_reason.is_empty() {
            toast.warning("Please select a reason");
            return;
        }
        spawn_local(async move {
            match api.request_return(order_id, kind, &selected_reason).await {
                Ok(()) => {
                    toast.success(match kind {
                        ReturnKind::Return => "Return request submitted",
                        ReturnKind::Replacement => "Replacement request submitted",
                    });
                    active_order.set(None);
                    reason.set(String::new());
                    load().await;
                }
                Err(err) => on_failure(err, "Request failed"),
            }
        });
    };

    let render_order = move |o: Order| {
        let order_id = o.id;
        let flags = OrderFlags::derive(&o);
        let display = display_status(&o);
        let hide_payment_rows = flags.return_completed || flags.refund_completed;
        let can_return_or_replace = flags.can_return_or_replace;
        let method_class = payment_method_class(o.payment_method.as_deref());

        let payment_status_class = format!(
            "payment-status-{}",
            o.payment_status.as_deref().unwrap_or("")
        );
        let return_label = if o.return_type.as_deref() == Some(RETURN_TYPE_RETURN) {
            "Return:"
        } else {
            "Replacement:"
        };

        view! {
            <div class="order-card">
                <p>
                    <strong>"Order ID: "</strong>
                    {order_id}
                </p>

                <p class=format!("status-{}", display)>
                    <strong>"Status: "</strong>
                    {format_label(&display)}
                </p>

                // 退货或退款完成后不再展示支付信息行
                {(!hide_payment_rows)
                    .then(|| {
                        view! {
                            <p class=payment_status_class>
                                <strong>"Payment Status: "</strong>
                                {flags.payment_status_label.clone()}
                            </p>

                            {o
                                .payment_method
                                .clone()
                                .map(|method| {
                                    view! {
                                        <p>
                                            <strong>"Payment Method: "</strong>
                                            <span class=method_class>{format_label(&method)}</span>
                                        </p>
                                    }
                                })}
                        }
                    })}

                {o
                    .return_status
                    .clone()
                    .map(|status| {
                        view! {
                            <p class=format!("return-{}", status)>
                                <strong>{return_label}</strong>
                                " "
                                {format_label(&status)}
                            </p>

                            {o
                                .return_reason
                                .clone()
                                .map(|r| {
                                    view! {
                                        <p class="return-reason">
                                            <strong>"Reason: "</strong>
                                            {format_label(&r)}
                                        </p>
                                    }
                                })}
                        }
                    })}

                {o
                    .refund_status
                    .clone()
                    .map(|status| {
                        view! {
                            <p class=format!("payment-status-{}", status)>
                                <strong>"Refund Status: "</strong>
                                {format_label(&status)}
                            </p>
                        }
                    })}

                <p>
                    <strong>"Placed At: "</strong>
                    {o.created_at.clone().unwrap_or_default()}
                </p>

                <div class="order-items">
                    <strong>"Items :"</strong>
                    {o
                        .items
                        .iter()
                        .map(|item| {
                            view! {
                                <div class="order-item">
                                    {item.product.name.clone()} " "
                                    <strong>"[" {item.quantity} "]"</strong> " = "
                                    {format!("₹{}", item.price * item.quantity as f64)}
                                </div>
                            }
                        })
                        .collect_view()}
                </div>

                <p class="order-total">
                    <strong>"Total Amount: "</strong>
                    {format!("₹{}", o.total_amount)}
                </p>

                {flags
                    .show_payment_options
                    .then(|| {
                        view! {
                            <div class="order-actions payment-options">
                                <p>
                                    <strong>"Payment Options:"</strong>
                                </p>
                                <button on:click=move |_| pay(
                                    order_id,
                                    "COD",
                                )>"Cash on Delivery"</button>
                                <button on:click=move |_| pay(order_id, "UPI")>"UPI"</button>
                                <button on:click=move |_| pay(order_id, "CARD")>"Card"</button>
                            </div>
                        }
                    })}

                {flags
                    .can_cancel
                    .then(|| {
                        view! {
                            <div class="order-actions">
                                <button on:click=move |_| {
                                    confirm_id.set(Some(order_id))
                                }>"Cancel Order"</button>
                            </div>
                        }
                    })}

                {flags
                    .can_request_refund
                    .then(|| {
                        view! {
                            <div class="order-actions">
                                <button
                                    class="refund-btn"
                                    on:click=move |_| request_refund(order_id)
                                >
                                    "Request Refund"
                                </button>
                            </div>
                        }
                    })}

                {can_return_or_replace
                    .then(|| {
                        view! {
                            <div class="order-actions">
                                <button on:click=move |_| {
                                    active_order
                                        .update(|a| {
                                            *a = if *a == Some(order_id) {
                                                None
                                            } else {
                                                Some(order_id)
                                            };
                                        })
                                }>"Return / Replace"</button>
                            </div>
                        }
                    })}

                <Show when=move || {
                    can_return_or_replace && active_order.get() == Some(order_id)
                }>
                    <div class="order-actions">
                        <select
                            class="return-reason-select"
                            prop:value=move || reason.get()
                            on:change=move |ev| reason.set(event_target_value(&ev))
                        >
                            <option value="">"Select reason"</option>
                            {RETURN_REASONS
                                .iter()
                                .map(|r| view! { <option value=*r>{*r}</option> })
                                .collect_view()}
                        </select>

                        <Show when=move || !reason.with(|r| r.is_empty())>
                            <button
                                class="return-btn"
                                on:click=move |_| submit_return(order_id, ReturnKind::Return)
                            >
                                "Return"
                            </button>

                            <button
                                class="replace-btn"
                                on:click=move |_| submit_return(order_id, ReturnKind::Replacement)
                            >
                                "Replacement"
                            </button>
                        </Show>
                    </div>
                </Show>
            </div>
        }
    };

    view! {
        <Navbar />

        <div class="page">
            <h2>"My Orders"</h2>

            <Show when=move || orders.with(|o| o.is_empty())>
                <p class="empty">"No orders found"</p>
            </Show>

            <div class="orders-transition">
                {move || orders.get().into_iter().map(render_order).collect_view()}
            </div>

            <Show when=move || { total_pages.get() > 1 }>
                <div class="pagination">
                    <button
                        disabled=move || page.get() == 0
                        on:click=move |_| page.update(|p| *p -= 1)
                    >
                        "< Prev"
                    </button>

                    {move || {
                        (0..total_pages.get())
                            .map(|index| {
                                view! {
                                    <button
                                        class=("active-page", move || page.get() == index)
                                        on:click=move |_| page.set(index)
                                    >
                                        {index + 1}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}

                    <button
                        disabled=move || page.get() + 1 >= total_pages.get()
                        on:click=move |_| page.update(|p| *p += 1)
                    >
                        "Next >"
                    </button>
                </div>
            </Show>
        </div>

        <Show when=move || confirm_id.get().is_some()>
            <ConfirmDialog
                title="Cancel Order"
                message="Are you sure you want to cancel this order?"
                on_confirm=Callback::new(confirm_cancel)
                on_cancel=Callback::new(move |_| confirm_id.set(None))
            />
        </Show>
    }
}
