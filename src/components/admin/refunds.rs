//! 管理端退款页组件
//!
//! 只有 REQUESTED 状态的退款单展示完成按钮，处理后重载列表。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::navbar::Navbar;
use crate::model::Refund;
use crate::order_view::{format_label, refund_needs_action, username_from_email};
use crate::session::use_api_failure;
use crate::toast::use_toast;

#[component]
pub fn AdminRefundsPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let on_failure = use_api_failure();

    let (refunds, set_refunds) = signal(Vec::<Refund>::new());
    let (loading, set_loading) = signal(true);

    let load = move || async move {
        match api.admin_refunds().await {
            Ok(list) => set_refunds.set(list),
            Err(err) => on_failure(err, "Failed to load refunds"),
        }
        set_loading.set(false);
    };
    Effect::new(move |_| spawn_local(load()));

    let complete = move |refund_id: u64| {
        spawn_local(async move {
            match api.complete_refund(refund_id).await {
                Ok(()) => {
                    toast.success("Refund completed successfully");
                    load().await;
                }
                Err(err) => on_failure(err, "Failed to complete refund"),
            }
        });
    };

    let render_refund = move |r: Refund| {
        let refund_id = r.id;
        let needs_action = refund_needs_action(&r.status);

        view! {
            <div class="order-card admin-refund-card">
                <p>
                    <strong>"Order ID: "</strong>
                    {r.order.as_ref().map(|o| o.id).unwrap_or_default()}
                </p>

                <p>
                    <strong>"User: "</strong>
                    {username_from_email(r.user_email.as_deref())}
                </p>

                <p>
                    <strong>"Amount: "</strong>
                    {format!("₹{}", r.amount)}
                </p>

                <p>
                    <strong>"Status: "</strong>
                    <span class=format!("refund-{}", r.status)>{format_label(&r.status)}</span>
                </p>

                {needs_action
                    .then(|| {
                        view! {
                            <div class="order-actions admin-refund-actions">
                                <button on:click=move |_| complete(refund_id)>
                                    "Complete Refund"
                                </button>
                            </div>
                        }
                    })}
            </div>
        }
    };

    view! {
        <Navbar />

        <div class="page admin-refunds-page">
            <h2>"Refund Requests"</h2>

            <Show when=move || loading.get()>
                <p>"Loading..."</p>
            </Show>

            <Show when=move || !loading.get() && refunds.with(|r| r.is_empty())>
                <p class="empty">"No refund requests"</p>
            </Show>

            {move || refunds.get().into_iter().map(render_refund).collect_view()}
        </div>
    }
}
