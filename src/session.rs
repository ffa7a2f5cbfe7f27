//! 会话状态模块
//!
//! 管理当前登录身份（凭证 + 角色），与路由系统解耦：
//! 路由服务只通过注入的信号检查会话状态。
//! 凭证与角色持久化在 LocalStorage 的 `token` / `role` 两个键下，
//! 二者总是一起写入、一起清除。

use leptos::prelude::*;

use gloo_storage::{LocalStorage, Storage};

use crate::toast::use_toast;
use crate::web::http::ApiError;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

pub const KEY_TOKEN: &str = "token";
pub const KEY_ROLE: &str = "role";

/// 会话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

/// 过滤持久层中的凭证哨兵值
///
/// 历史上前端曾把字符串 `"null"` / `"undefined"` 写进过存储，
/// 它们和空串一样视为"无凭证"。
pub fn filter_credential(raw: Option<String>) -> Option<String> {
    match raw {
        Some(t) if !t.is_empty() && t != "null" && t != "undefined" => Some(t),
        _ => None,
    }
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub token: RwSignal<Option<String>>,
    pub role: RwSignal<Option<Role>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            token: RwSignal::new(None),
            role: RwSignal::new(None),
        }
    }

    /// 凭证存在信号（用于路由服务注入）
    pub fn has_token_signal(&self) -> Signal<bool> {
        let token = self.token;
        Signal::derive(move || token.with(|t| t.is_some()))
    }

    /// 角色信号（用于路由服务注入）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let role = self.role;
        Signal::derive(move || role.get())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 恢复判定：凭证与角色必须同时有效，残缺组合一律视为匿名
fn restored_session(token: Option<String>, role: Option<Role>) -> Option<(String, Role)> {
    Some((token?, role?))
}

/// 初始化会话状态：从 LocalStorage 恢复上次登录
///
/// 两个键总是成对生效；只剩一半时持久层同步清空，
/// 否则残留的 token 还会被 HTTP 适配器当作 Bearer 凭证带出去。
pub fn hydrate(ctx: &SessionContext) {
    let token = filter_credential(LocalStorage::get::<String>(KEY_TOKEN).ok());
    let role = LocalStorage::get::<String>(KEY_ROLE)
        .ok()
        .and_then(|r| Role::parse(&r));

    match restored_session(token, role) {
        Some((token, role)) => {
            ctx.token.set(Some(token));
            ctx.role.set(Some(role));
        }
        None => {
            LocalStorage::delete(KEY_TOKEN);
            LocalStorage::delete(KEY_ROLE);
            ctx.token.set(None);
            ctx.role.set(None);
        }
    }
}

/// 登录：先持久化，再原子地更新内存状态
///
/// 之后发出的 API 请求与路由守卫立即看到新身份。
pub fn login(ctx: &SessionContext, token: String, role: Role) {
    let _ = LocalStorage::set(KEY_TOKEN, &token);
    let _ = LocalStorage::set(KEY_ROLE, role.as_str());
    ctx.token.set(Some(token));
    ctx.role.set(Some(role));
}

/// 注销：清除持久化数据与内存状态
///
/// 导航由调用方（或路由服务的会话监听）处理。
pub fn logout(ctx: &SessionContext) {
    LocalStorage::delete(KEY_TOKEN);
    LocalStorage::delete(KEY_ROLE);
    ctx.token.set(None);
    ctx.role.set(None);
}

/// 统一的 API 失败处理闭包
///
/// - `Unauthorized`：HTTP 适配器已清除持久化凭证，这里同步内存态
///   并导航到登录页，不弹出通知；
/// - 其余错误：弹出错误通知，优先使用服务端消息，否则用调用方
///   提供的操作兜底文案。屏幕数据保持上一次成功加载的状态。
pub fn use_api_failure() -> impl Fn(ApiError, &str) + Copy + 'static {
    let session = use_session();
    let toast = use_toast();
    let router = use_router();

    move |err: ApiError, fallback: &str| match err {
        ApiError::Unauthorized => {
            logout(&session);
            router.navigate(AppRoute::Login);
        }
        other => toast.error(other.message_or(fallback)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("user"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse(Role::Admin.as_str()), Some(Role::Admin));
    }

    #[test]
    fn test_filter_credential_sentinels() {
        assert_eq!(filter_credential(None), None);
        assert_eq!(filter_credential(Some(String::new())), None);
        assert_eq!(filter_credential(Some("null".to_string())), None);
        assert_eq!(filter_credential(Some("undefined".to_string())), None);
        assert_eq!(
            filter_credential(Some("jwt-abc".to_string())),
            Some("jwt-abc".to_string())
        );
    }

    #[test]
    fn test_restored_session_requires_both_parts() {
        assert_eq!(restored_session(Some("jwt-abc".to_string()), None), None);
        assert_eq!(restored_session(None, Some(Role::User)), None);
        assert_eq!(restored_session(None, None), None);
        assert_eq!(
            restored_session(Some("jwt-abc".to_string()), Some(Role::Admin)),
            Some(("jwt-abc".to_string(), Role::Admin))
        );
    }
}
