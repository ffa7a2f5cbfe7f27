//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、各自要求的角色，以及守卫判定。

use std::fmt::Display;

use crate::session::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 商品目录（默认路由，也是未知路径与越权访问的回落目标）
    #[default]
    Products,
    Login,
    Register,
    /// 购物车（需要 USER 角色）
    Cart,
    /// 我的订单（需要 USER 角色）
    Orders,
    /// 管理端订单（需要 ADMIN 角色）
    AdminOrders,
    AdminRefunds,
    AdminReturns,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/products" => Self::Products,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/cart" => Self::Cart,
            "/orders" => Self::Orders,
            "/admin/orders" => Self::AdminOrders,
            "/admin/refunds" => Self::AdminRefunds,
            "/admin/returns" => Self::AdminReturns,
            // 未知路径回落到商品目录
            _ => Self::Products,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Products => "/products",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Cart => "/cart",
            Self::Orders => "/orders",
            Self::AdminOrders => "/admin/orders",
            Self::AdminRefunds => "/admin/refunds",
            Self::AdminReturns => "/admin/returns",
        }
    }

    /// 该路由要求的角色；公开路由返回 None，完全绕过守卫
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::Cart | Self::Orders => Some(Role::User),
            Self::AdminOrders | Self::AdminRefunds | Self::AdminReturns => Some(Role::Admin),
            Self::Products | Self::Login | Self::Register => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    /// 无凭证：去登录页
    RedirectLogin,
    /// 角色不符：回商品目录
    RedirectCatalog,
}

/// **核心守卫逻辑**，按顺序判定：
/// 1. 无会话凭证 → 登录页；
/// 2. 角色与路由要求不完全一致 → 商品目录；
/// 3. 其余情况放行。
pub fn guard(route: AppRoute, has_token: bool, role: Option<Role>) -> GuardOutcome {
    let Some(required) = route.required_role() else {
        return GuardOutcome::Allow;
    };
    if !has_token {
        return GuardOutcome::RedirectLogin;
    }
    if role != Some(required) {
        return GuardOutcome::RedirectCatalog;
    }
    GuardOutcome::Allow
}

#[cfg(test)]
mod tests;
