//! 确认对话框组件
//!
//! 模态覆盖层，阻塞式二次确认。调用方负责可见性控制，
//! 这里只渲染并回调 Yes / No。

use leptos::prelude::*;

#[component]
pub fn ConfirmDialog(
    /// 对话框标题
    #[prop(into)]
    title: String,
    /// 确认问题正文
    #[prop(into)]
    message: String,
    /// 点击 Yes 时的回调
    on_confirm: Callback<()>,
    /// 点击 No 时的回调
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="confirm-overlay">
            <div class="confirm-box">
                <h3>{title}</h3>
                <p>{message}</p>

                <div class="confirm-actions">
                    <button class="confirm-yes" on:click=move |_| on_confirm.run(())>
                        "Yes"
                    </button>

                    <button class="confirm-no" on:click=move |_| on_cancel.run(())>
                        "No"
                    </button>
                </div>
            </div>
        </div>
    }
}
