//! 管理端订单页组件
//!
//! 单页拉取前 100 条；发货/送达按钮由订单状态决定，
//! 取消按钮在退换货流程存在时隐藏（见 `order_view::admin_can_cancel`）。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::navbar::Navbar;
use crate::model::AdminOrder;
use crate::order_view::{
    admin_can_cancel, admin_can_deliver, admin_can_ship, admin_show_refund, format_label,
    refund_completed, username_from_email,
};
use crate::session::use_api_failure;
use crate::toast::use_toast;

#[component]
pub fn AdminOrdersPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let on_failure = use_api_failure();

    let (orders, set_orders) = signal(Vec::<AdminOrder>::new());
    let (loading, set_loading) = signal(true);
    let confirm_id = RwSignal::new(None::<u64>);

    let load = move || async move {
        match api.admin_orders(0, 100).await {
            Ok(paged) => set_orders.set(paged.content),
            Err(err) => on_failure(err, "Failed to load admin orders"),
        }
        set_loading.set(false);
    };
    Effect::new(move |_| spawn_local(load()));

    let ship = move |order_id: u64| {
        spawn_local(async move {
            match api.ship_order(order_id).await {
                Ok(()) => {
                    toast.success("Order shipped successfully");
                    load().await;
                }
                Err(err) => on_failure(err, "Failed to ship order"),
            }
        });
    };

    let deliver = move |order_id: u64| {
        spawn_local(async move {
            match api.deliver_order(order_id).await {
                Ok(()) => {
                    toast.success("Order delivered successfully");
                    load().await;
                }
                Err(err) => on_failure(err, "Failed to deliver order"),
            }
        });
    };

    let confirm_cancel = move |_| {
        let Some(order_id) = confirm_id.get_untracked() else {
            return;
        };
        confirm_id.set(None);
        spawn_local(async move {
            match api.admin_cancel_order(order_id).await {
                Ok(()) => {
                    toast.success("Order cancelled successfully");
                    load().await;
                }
                Err(err) => on_failure(err, "Cancel failed"),
            }
        });
    };

    let render_order = move |o: AdminOrder| {
        let order_id = o.order_id;
        let status = o.effective_status().to_string();
        let can_ship = admin_can_ship(&status);
        let can_deliver = admin_can_deliver(&status);
        let can_cancel = admin_can_cancel(&o);
        let show_refund = admin_show_refund(&o);
        let refund_done = refund_completed(o.refund_status.as_deref());

        let payment_status_class = format!(
            "payment-status-{}",
            o.payment_status.as_deref().unwrap_or("")
        );

        view! {
            <div class="order-card admin-order-card">
                <p>
                    <strong>"Order ID: "</strong>
                    {order_id}
                </p>

                <p>
                    <strong>"User: "</strong>
                    {username_from_email(o.user_email.as_deref())}
                </p>

                <p class=format!("status-{}", status)>
                    <strong>"Status: "</strong>
                    {format_label(&status)}
                </p>

                <p class=payment_status_class>
                    <strong>"Payment Status: "</strong>
                    {format_label(o.payment_status.as_deref().unwrap_or(""))}
                </p>

                {o
                    .payment_method
                    .clone()
                    .map(|method| {
                        view! {
                            <p>
                                <strong>"Payment Method: "</strong>
                                <span class=format!(
                                    "payment-{}",
                                    method.to_lowercase(),
                                )>{format_label(&method)}</span>
                            </p>
                        }
                    })}

                {o
                    .return_status
                    .clone()
                    .map(|ret| {
                        view! {
                            <p class=format!("return-{}", ret)>
                                <strong>"Return: "</strong>
                                {format_label(&ret)}
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

                {show_refund
                    .then(|| {
                        view! {
                            <p class=if refund_done {
                                "refund-status refund-REFUNDED"
                            } else {
                                "refund-status refund-PENDING"
                            }>
                                <strong>"Refund: "</strong>
                                {if refund_done { "Completed" } else { "Pending" }}
                            </p>
                        }
                    })}

                <p>
                    <strong>"Total: "</strong>
                    {format!("₹{}", o.total_amount)}
                </p>

                <p>
                    <strong>"Placed At: "</strong>
                    {o.created_at.clone().unwrap_or_default()}
                </p>

                <div class="order-actions admin-order-actions">
                    {can_ship
                        .then(|| {
                            view! { <button on:click=move |_| ship(order_id)>"Ship"</button> }
                        })}

                    {can_deliver
                        .then(|| {
                            view! {
                                <button on:click=move |_| deliver(order_id)>"Deliver"</button>
                            }
                        })}

                    {can_cancel
                        .then(|| {
                            view! {
                                <button
                                    class="admin-cancel-btn"
                                    on:click=move |_| confirm_id.set(Some(order_id))
                                >
                                    "Cancel Order"
                                </button>
                            }
                        })}
                </div>
            </div>
        }
    };

    view! {
        <Navbar />

        <div class="page admin-orders-page">
            <h2>"Admin Orders"</h2>

            <Show when=move || loading.get()>
                <p>"Loading..."</p>
            </Show>

            <Show when=move || !loading.get() && orders.with(|o| o.is_empty())>
                <p class="empty">"No orders found"</p>
            </Show>

            {move || orders.get().into_iter().map(render_order).collect_view()}
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
