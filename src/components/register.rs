//! 注册页组件

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::model::RegisterRequest;
use crate::toast::use_toast;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let toast = use_toast();
    let navigate = use_navigate();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let name = name.get_untracked();
        let email = email.get_untracked();
        let password = password.get_untracked();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            toast.warning("All fields required");
            return;
        }

        set_loading.set(true);
        spawn_local(async move {
            let result = api
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                })
                .await;
            set_loading.set(false);

            match result {
                Ok(()) => {
                    toast.success("Registration successful. Please login");
                    navigate(AppRoute::Login);
                }
                Err(err) => toast.error(err.message_or("Registration failed")),
            }
        });
    };

    view! {
        <div class="register-page">
            <div class="auth-wrapper">
                <div class="auth-brand">"YO CART"</div>

                <div class="register-card">
                    <h2 class="register-title">"Register"</h2>

                    <form on:submit=on_submit>
                        <input
                            class="register-input"
                            placeholder="Name"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />

                        <input
                            class="register-input"
                            placeholder="Email"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />

                        <input
                            type="password"
                            class="register-input"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />

                        <button type="submit" class="register-btn" disabled=move || loading.get()>
                            {move || if loading.get() { "Creating account..." } else { "Register" }}
                        </button>
                    </form>

                    <p class="register-footer">
                        "Already have an account? "
                        <a on:click=move |_| navigate(AppRoute::Login)>"Login"</a>
                    </p>
                </div>
            </div>
        </div>
    }
}
