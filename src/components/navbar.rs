//! 顶部导航栏组件
//!
//! 链接集合随会话角色变化；匿名用户点击受保护入口时
//! 提示登录并跳转登录页，不发起导航请求。

use leptos::prelude::*;

use crate::session::{self, Role, use_session};
use crate::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let toast = use_toast();
    let navigate = use_navigate();

    let role = session.role;
    let has_token = session.has_token_signal();
    let is_admin = move || role.get() == Some(Role::Admin);

    // 匿名用户点击 Cart / Orders 时统一走这里
    let guarded_navigate = move |target: AppRoute| {
        if has_token.get_untracked() {
            navigate(target);
        } else {
            toast.error("Please login to continue");
            navigate(AppRoute::Login);
        }
    };

    let on_logout = move |_| {
        session::logout(&session);
        navigate(AppRoute::Login);
    };

    view! {
        <nav class=move || {
            if is_admin() { "navbar admin-navbar" } else { "navbar user-navbar" }
        }>
            <div class="navbar-links">
                <a on:click=move |_| navigate(AppRoute::Products)>"Products"</a>

                // 用户侧入口（匿名也可见，点击时检查凭证）
                <Show when=move || !is_admin()>
                    <a on:click=move |_| guarded_navigate(AppRoute::Cart)>"Cart"</a>
                    <a on:click=move |_| guarded_navigate(AppRoute::Orders)>"Orders"</a>
                </Show>

                // 管理端入口
                <Show when=is_admin>
                    <a on:click=move |_| navigate(AppRoute::AdminOrders)>"Admin Orders"</a>
                    <a on:click=move |_| navigate(AppRoute::AdminRefunds)>"Refunds"</a>
                    <a on:click=move |_| navigate(AppRoute::AdminReturns)>"Returns"</a>
                </Show>
            </div>

            <div class="navbar-right">
                <div class="brand-logo">"YO CART"</div>

                <Show
                    when=move || has_token.get()
                    fallback=move || {
                        view! {
                            <button class="logout-btn" on:click=move |_| navigate(AppRoute::Login)>
                                "Login"
                            </button>
                        }
                    }
                >
                    <button class="logout-btn" on:click=on_logout>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
