//! 管理端退货/换货页组件
//!
//! 处理按钮与成功提示的文案随申请类型变化：
//! 退货确认收货，换货标记已送达。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::navbar::Navbar;
use crate::model::ReturnRequest;
use crate::order_view::{RETURN_TYPE_RETURN, return_needs_action};
use crate::session::use_api_failure;
use crate::toast::use_toast;

#[component]
pub fn AdminReturnsPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let on_failure = use_api_failure();

    let (requests, set_requests) = signal(Vec::<ReturnRequest>::new());

    let load = move || async move {
        match api.admin_returns().await {
            Ok(list) => set_requests.set(list),
            Err(err) => on_failure(err, "Failed to load return requests"),
        }
    };
    Effect::new(move |_| spawn_local(load()));

    let process = move |request_id: u64, is_return: bool| {
        spawn_local(async move {
            match api.process_return(request_id).await {
                Ok(()) => {
                    toast.success(if is_return {
                        "Return processed successfully"
                    } else {
                        "Replacement marked as delivered"
                    });
                    load().await;
                }
                Err(err) => on_failure(err, "Action failed"),
            }
        });
    };

    let render_request = move |r: ReturnRequest| {
        let request_id = r.id;
        let is_return = r.kind == RETURN_TYPE_RETURN;
        let needs_action = return_needs_action(&r.status);
        let status_class = if needs_action {
            "refund-PENDING"
        } else {
            "refund-REFUNDED"
        };
        let kind_class = if is_return {
            "refund-PENDING"
        } else {
            "status-CONFIRMED"
        };

        view! {
            <div class="order-card admin-order-card">
                <p>
                    <strong>"Order ID: "</strong>
                    {r.order_id.unwrap_or_default()}
                </p>

                <p>
                    <strong>"User: "</strong>
                    {r.user_email.clone().unwrap_or_default()}
                </p>

                <p>
                    <strong>"Type: "</strong>
                    <span class=kind_class>{r.kind.clone()}</span>
                </p>

                <p>
                    <strong>"Reason: "</strong>
                    {r.reason.clone().unwrap_or_default()}
                </p>

                <p>
                    <strong>"Status: "</strong>
                    <span class=status_class>{r.status.clone()}</span>
                </p>

                <p>
                    <strong>"Requested At: "</strong>
                    {r.requested_at.clone().unwrap_or_else(|| "N/A".to_string())}
                </p>

                {needs_action
                    .then(|| {
                        view! {
                            <div class="order-actions">
                                <button on:click=move |_| process(request_id, is_return)>
                                    {if is_return {
                                        "Mark Return Received"
                                    } else {
                                        "Send Replacement"
                                    }}
                                </button>
                            </div>
                        }
                    })}
            </div>
        }
    };

    view! {
        <Navbar />

        <div class="page">
            <h2>"Return / Replacement Requests"</h2>

            <Show when=move || requests.with(|r| r.is_empty())>
                <p class="empty">"No requests found"</p>
            </Show>

            {move || requests.get().into_iter().map(render_request).collect_view()}
        </div>
    }
}
