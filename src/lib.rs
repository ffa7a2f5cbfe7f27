//! YoCart 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话状态管理
//! - `toast`: 全局通知通道
//! - `api`: 后端 API 封装
//! - `components`: UI 组件层
//!
//! 所有业务状态均在后端；本客户端只渲染最近一次响应并发起变更请求。

mod api;
mod components {
    pub mod cart;
    pub mod confirm_dialog;
    pub mod login;
    pub mod navbar;
    pub mod orders;
    pub mod products;
    pub mod register;
    pub mod admin {
        pub mod orders;
        pub mod refunds;
        pub mod returns;
    }
}
mod model;
mod order_view;
mod session;
mod toast;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 路由基于 History API 手写实现，HTTP 适配器集中承载凭证注入与 401/403 处理。
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
}

use crate::api::{API_BASE, ShopApi};
use crate::components::admin::orders::AdminOrdersPage;
use crate::components::admin::refunds::AdminRefundsPage;
use crate::components::admin::returns::AdminReturnsPage;
use crate::components::cart::CartPage;
use crate::components::login::LoginPage;
use crate::components::orders::OrdersPage;
use crate::components::products::ProductsPage;
use crate::components::register::RegisterPage;
use crate::session::SessionContext;
use crate::toast::{ToastContext, ToastHost};
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
/// 守卫已在路由服务中完成，这里只做纯粹的映射。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::Orders => view! { <OrdersPage /> }.into_any(),
        AppRoute::AdminOrders => view! { <AdminOrdersPage /> }.into_any(),
        AppRoute::AdminRefunds => view! { <AdminRefundsPage /> }.into_any(),
        AppRoute::AdminReturns => view! { <AdminReturnsPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建全局通知通道
    let toast_ctx = ToastContext::new();
    provide_context(toast_ctx);

    // 2. 创建会话上下文并从 LocalStorage 恢复
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);
    session::hydrate(&session_ctx);

    // 3. API 客户端（无状态，凭证由适配器逐请求读取）
    provide_context(ShopApi::new(API_BASE));

    // 4. 获取会话信号，用于注入路由服务（解耦！）
    let has_token = session_ctx.has_token_signal();
    let role = session_ctx.role_signal();

    view! {
        // 5. 路由器组件：注入会话信号实现守卫
        <Router has_token=has_token role=role>
            <RouterOutlet matcher=route_matcher />
            <ToastHost />
        </Router>
    }
}
