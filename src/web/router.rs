//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"请求 -> 守卫 -> 处理 -> 加载"的导航流程，
//! 守卫规则本身是纯函数（见 `route::guard`），这里只负责执行判定结果。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardOutcome, guard};
use crate::session::Role;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话信号（凭证存在 + 角色）实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 凭证存在信号（注入）
    has_token: Signal<bool>,
    /// 角色信号（注入）
    role: Signal<Option<Role>>,
    /// 被守卫拦下的原始目标，登录成功后尽力恢复
    return_to: RwSignal<Option<AppRoute>>,
}

impl RouterService {
    fn new(has_token: Signal<bool>, role: Signal<Option<Role>>) -> Self {
        // 初始路由从 URL 解析；守卫由 setup_session_redirect 的首次运行补上
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            has_token,
            role,
            return_to: RwSignal::new(None),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 取出登录前被拦下的目标路由（一次性）
    pub fn take_return_to(&self) -> Option<AppRoute> {
        self.return_to.try_update(|v| v.take()).flatten()
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, target: AppRoute) {
        self.navigate_to_route(target, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let apply = |route: AppRoute| {
            if use_push {
                push_history_state(route.to_path());
            } else {
                replace_history_state(route.to_path());
            }
            self.set_route.set(route);
        };

        match guard(
            target,
            self.has_token.get_untracked(),
            self.role.get_untracked(),
        ) {
            GuardOutcome::Allow => apply(target),
            GuardOutcome::RedirectLogin => {
                web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
                self.return_to.set(Some(target));
                apply(AppRoute::Login);
            }
            GuardOutcome::RedirectCatalog => {
                web_sys::console::log_1(&"[Router] Role mismatch. Redirecting to catalog.".into());
                apply(AppRoute::Products);
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let has_token = self.has_token;
        let role = self.role;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());

            // popstate 时也执行守卫逻辑
            match guard(target, has_token.get_untracked(), role.get_untracked()) {
                GuardOutcome::Allow => set_route.set(target),
                GuardOutcome::RedirectLogin => {
                    replace_history_state(AppRoute::Login.to_path());
                    set_route.set(AppRoute::Login);
                }
                GuardOutcome::RedirectCatalog => {
                    replace_history_state(AppRoute::Products.to_path());
                    set_route.set(AppRoute::Products);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化时对当前路由重新执行守卫
    ///
    /// 首次运行即覆盖"直接输入受保护 URL"的情况；
    /// 注销发生在受保护页面上时自动退回登录页。
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let has_token = self.has_token;
        let role = self.role;
        let return_to = self.return_to;

        Effect::new(move |_| {
            let token_present = has_token.get();
            let current_role = role.get();
            let route = current_route.get_untracked();

            match guard(route, token_present, current_role) {
                GuardOutcome::Allow => {}
                GuardOutcome::RedirectLogin => {
                    web_sys::console::log_1(
                        &"[Router] Session ended. Redirecting to login.".into(),
                    );
                    return_to.set(Some(route));
                    replace_history_state(AppRoute::Login.to_path());
                    set_route.set(AppRoute::Login);
                }
                GuardOutcome::RedirectCatalog => {
                    replace_history_state(AppRoute::Products.to_path());
                    set_route.set(AppRoute::Products);
                }
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(has_token: Signal<bool>, role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(has_token, role);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(AppRoute) + Copy + 'static {
    let router = use_router();
    move |to: AppRoute| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 凭证存在信号
    has_token: Signal<bool>,
    /// 角色信号
    role: Signal<Option<Role>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(has_token, role);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
