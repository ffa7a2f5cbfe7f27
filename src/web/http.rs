//! HTTP 客户端适配器模块
//!
//! 基于 `gloo-net` 封装，集中承载两个横切行为：
//! - 发出前从持久层读取凭证（过滤哨兵值），有则附加 Bearer 头；
//! - 收到 401/403 时清除持久化凭证并返回 [`ApiError::Unauthorized`]。
//!   导航不在这里发生 —— 适配器只上报这种可区分的错误，
//!   由外壳（`session::use_api_failure`）观察并跳转登录页。
//!
//! 无重试、无缓存、无请求合并；其余非 2xx 状态原样上抛给调用方。

use gloo_net::http::{Method as HttpMethod, RequestBuilder, Response};
use gloo_storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::session::{KEY_ROLE, KEY_TOKEN, filter_credential};

/// HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn to_gloo(self) -> HttpMethod {
        match self {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Delete => HttpMethod::DELETE,
        }
    }
}

/// API 错误类型
#[derive(Debug)]
pub enum ApiError {
    /// 401/403：持久化凭证已被清除，外壳负责跳转登录页
    Unauthorized,
    /// 其余非 2xx 响应，`message` 取自响应体的 `message` 字段（如可解析）
    Server {
        status: u16,
        message: Option<String>,
    },
    /// 请求构建失败（序列化请求体等）
    RequestBuild(String),
    /// 网络请求失败
    Network(String),
    /// 响应解析失败
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "未授权 (401/403)"),
            ApiError::Server { status, message } => match message {
                Some(msg) => write!(f, "服务端错误 {}: {}", status, msg),
                None => write!(f, "服务端错误 {}", status),
            },
            ApiError::RequestBuild(msg) => write!(f, "请求构建失败: {}", msg),
            ApiError::Network(msg) => write!(f, "网络错误: {}", msg),
            ApiError::Decode(msg) => write!(f, "响应解析失败: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// 服务端消息优先，否则使用调用方提供的兜底文案
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(msg), ..
            } => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// 服务端错误体约定：`{"message": "..."}`
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok()?.message
}

/// 由持久层凭证构造 Authorization 头的值
///
/// 凭证缺失或为哨兵值（`"null"` / `"undefined"` / 空串）时返回 None，
/// 此时请求完全不携带该头。
fn bearer_for(raw: Option<String>) -> Option<String> {
    filter_credential(raw).map(|token| format!("Bearer {}", token))
}

fn stored_bearer() -> Option<String> {
    bearer_for(LocalStorage::get::<String>(KEY_TOKEN).ok())
}

/// 轻量级 API 客户端
///
/// 只持有基地址；凭证逐请求从持久层读取，登录/注销立即生效。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiClient {
    base_url: &'static str,
}

impl ApiClient {
    pub const fn new(base_url: &'static str) -> Self {
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// 无请求体，期待 JSON 响应
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(method, path, None::<&()>).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 无请求体，丢弃响应体
    pub async fn request_unit(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.dispatch(method, path, None::<&()>).await.map(|_| ())
    }

    /// JSON 请求体，期待 JSON 响应
    pub async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(method, path, Some(body)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// JSON 请求体，丢弃响应体
    pub async fn send_unit<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.dispatch(method, path, Some(body)).await.map(|_| ())
    }

    async fn dispatch<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        let mut builder = RequestBuilder::new(&url)
            .method(method.to_gloo())
            .header("Content-Type", "application/json");

        if let Some(bearer) = stored_bearer() {
            builder = builder.header("Authorization", &bearer);
        }

        let sent = match body {
            Some(b) => builder
                .json(b)
                .map_err(|e| ApiError::RequestBuild(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == 401 || status == 403 {
            // 全局拦截：与触发请求无关，凭证一律作废
            LocalStorage::delete(KEY_TOKEN);
            LocalStorage::delete(KEY_ROLE);
            return Err(ApiError::Unauthorized);
        }
        if !response.ok() {
            let message = match response.text().await {
                Ok(text) => extract_message(&text),
                Err(_) => None,
            };
            return Err(ApiError::Server { status, message });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================
    // Bearer 头构造
    // =========================================================

    #[test]
    fn test_bearer_omitted_for_sentinels() {
        assert_eq!(bearer_for(None), None);
        assert_eq!(bearer_for(Some(String::new())), None);
        assert_eq!(bearer_for(Some("null".to_string())), None);
        assert_eq!(bearer_for(Some("undefined".to_string())), None);
    }

    #[test]
    fn test_bearer_attached_for_real_token() {
        assert_eq!(
            bearer_for(Some("jwt-abc".to_string())),
            Some("Bearer jwt-abc".to_string())
        );
    }

    // =========================================================
    // 服务端错误消息提取
    // =========================================================

    #[test]
    fn test_extract_message_present() {
        assert_eq!(
            extract_message(r#"{"message": "Order already cancelled"}"#),
            Some("Order already cancelled".to_string())
        );
    }

    #[test]
    fn test_extract_message_absent_or_invalid() {
        assert_eq!(extract_message(r#"{"error": "boom"}"#), None);
        assert_eq!(extract_message("not json"), None);
        assert_eq!(extract_message(""), None);
    }

    #[test]
    fn test_message_or_prefers_server_message() {
        let err = ApiError::Server {
            status: 409,
            message: Some("Stock exhausted".to_string()),
        };
        assert_eq!(err.message_or("Checkout failed"), "Stock exhausted");

        let bare = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(bare.message_or("Checkout failed"), "Checkout failed");

        let network = ApiError::Network("timeout".to_string());
        assert_eq!(network.message_or("Checkout failed"), "Checkout failed");
    }

    // =========================================================
    // URL 拼接
    // =========================================================

    #[test]
    fn test_url_joins_with_and_without_slash() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(
            client.url("/api/products"),
            "http://localhost:8080/api/products"
        );
        assert_eq!(
            client.url("api/products"),
            "http://localhost:8080/api/products"
        );
    }
}
