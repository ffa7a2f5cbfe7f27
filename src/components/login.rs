//! 登录页组件

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::model::LoginRequest;
use crate::session::{self, Role, use_session};
use crate::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let session = use_session();
    let router = use_router();

    // 标识符可以是邮箱或用户名，提交时统一按 email 字段发送
    let (identifier, set_identifier) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let id = identifier.get_untracked();
        let pw = password.get_untracked();
        if id.is_empty() || pw.is_empty() {
            toast.warning("Email/Username and password are required");
            return;
        }

        set_loading.set(true);
        spawn_local(async move {
            let result = api
                .login(&LoginRequest {
                    email: id,
                    password: pw,
                })
                .await;
            set_loading.set(false);

            match result {
                // 角色无法识别时视为登录失败，不写入任何凭证
                Ok(resp) => match Role::parse(&resp.role) {
                    Some(role) => {
                        session::login(&session, resp.token, role);
                        toast.success("Login successful");
                        // 登录前被守卫拦下的目标优先，否则回商品目录
                        let target = router.take_return_to().unwrap_or(AppRoute::Products);
                        router.navigate(target);
                    }
                    None => toast.error("Invalid email/username or password"),
                },
                Err(_) => toast.error("Invalid email/username or password"),
            }
        });
    };

    let navigate_register = {
        let router = router;
        move |_| router.navigate(AppRoute::Register)
    };

    view! {
        <div class="login-page">
            <div class="auth-wrapper">
                <div class="auth-brand">"YO CART"</div>

                <div class="login-card">
                    <h2 class="login-title">"Login"</h2>

                    <form on:submit=on_submit>
                        <input
                            type="text"
                            class="login-input"
                            placeholder="Email or Username"
                            prop:value=move || identifier.get()
                            on:input=move |ev| set_identifier.set(event_target_value(&ev))
                        />

                        <input
                            type="password"
                            class="login-input"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />

                        <button type="submit" class="login-btn" disabled=move || loading.get()>
                            {move || if loading.get() { "Logging in..." } else { "Login" }}
                        </button>
                    </form>

                    <p class="login-footer">
                        "Don't have an account? " <a on:click=navigate_register>"Register"</a>
                    </p>
                </div>
            </div>
        </div>
    }
}
