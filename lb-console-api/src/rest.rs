//! REST 实现
//!
//! 走宿主平台的同源 REST 接口：会话 Cookie 鉴权，写操作回放
//! 平台下发的 CSRF Token（`X-CSRFToken` 头）。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::error::{ApiError, ApiResult};
use crate::http::HttpUtils;
use crate::traits::LoadBalancerApi;
use crate::types::{
    ApiContext, HealthMonitor, HealthMonitorEnvelope, Listener, ListenersEnvelope, LoadBalancer,
    LoadBalancerEnvelope, LoadBalancerPayload, LoadBalancersEnvelope, OptionSets, Pool,
    PoolsEnvelope,
};

/// 平台下发 CSRF Token 的 Cookie 名
const CSRF_COOKIE: &str = "csrftoken";

/// 写操作携带 Token 的请求头
const CSRF_HEADER: &str = "X-CSRFToken";

/// 请求超时（重试策略属于宿主平台，这里只兜底）
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST 客户端
pub struct RestLoadBalancerApi {
    client: reqwest::Client,
    base_url: String,
    /// 最近一次响应中的 CSRF Token
    csrf_token: RwLock<Option<String>>,
}

impl RestLoadBalancerApi {
    /// 创建客户端
    ///
    /// # Arguments
    /// * `base_url` - 平台地址，如 `https://console.example.com`
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::NetworkError {
                detail: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// 记录响应里的 CSRF Cookie（平台在任意响应中都可能轮换）
    async fn remember_csrf(&self, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            if let Some(token) = csrf_from_set_cookie(raw) {
                *self.csrf_token.write().await = Some(token.to_string());
            }
        }
    }

    /// 为写操作附加 CSRF 头
    async fn with_csrf(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.csrf_token.read().await.as_deref() {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    /// 执行请求并解析 JSON 响应
    async fn request_json<T>(&self, builder: RequestBuilder, target: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let response = HttpUtils::send(builder, target).await?;
        self.remember_csrf(response.headers()).await;

        let (status, body) = HttpUtils::read_body(response, target).await?;
        if let Some(err) = HttpUtils::error_for_status(status, &body) {
            return Err(err);
        }
        HttpUtils::parse_json(&body)
    }

    /// 执行请求，只关心成败
    async fn request_ack(&self, builder: RequestBuilder, target: &str) -> ApiResult<()> {
        let response = HttpUtils::send(builder, target).await?;
        self.remember_csrf(response.headers()).await;

        let (status, body) = HttpUtils::read_body(response, target).await?;
        match HttpUtils::error_for_status(status, &body) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LoadBalancerApi for RestLoadBalancerApi {
    async fn list_load_balancers(&self, ctx: &ApiContext) -> ApiResult<Vec<LoadBalancer>> {
        let url = self.url("/api/loadbalancers");
        let builder = self.client.get(&url).query(&ctx.as_query());
        let envelope: LoadBalancersEnvelope =
            self.request_json(builder, "GET /api/loadbalancers").await?;
        Ok(envelope.loadbalancers)
    }

    async fn get_load_balancer(&self, id: &str, ctx: &ApiContext) -> ApiResult<LoadBalancer> {
        let url = self.url(&format!("/api/loadbalancers/{id}"));
        let builder = self.client.get(&url).query(&ctx.as_query());
        let envelope: LoadBalancerEnvelope =
            self.request_json(builder, "GET /api/loadbalancers/{id}").await?;
        Ok(envelope.loadbalancer)
    }

    async fn create_load_balancer(&self, payload: &LoadBalancerPayload) -> ApiResult<()> {
        let url = self.url("/api/loadbalancers");
        let builder = self.with_csrf(self.client.post(&url)).await.json(payload);
        self.request_ack(builder, "POST /api/loadbalancers").await
    }

    async fn update_load_balancer(
        &self,
        id: &str,
        payload: &LoadBalancerPayload,
    ) -> ApiResult<()> {
        let url = self.url(&format!("/api/loadbalancers/{id}"));
        let builder = self.with_csrf(self.client.put(&url)).await.json(payload);
        self.request_ack(builder, "PUT /api/loadbalancers/{id}").await
    }

    async fn delete_load_balancer(&self, id: &str, network_id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/api/loadbalancers/{id}"));
        let builder = self
            .with_csrf(self.client.delete(&url))
            .await
            .query(&[("networkId", network_id)]);
        self.request_ack(builder, "DELETE /api/loadbalancers/{id}")
            .await
    }

    async fn list_listeners(&self, lb_id: &str, ctx: &ApiContext) -> ApiResult<Vec<Listener>> {
        let url = self.url(&format!("/api/loadbalancers/{lb_id}/listeners"));
        let builder = self.client.get(&url).query(&ctx.as_query());
        let envelope: ListenersEnvelope = self
            .request_json(builder, "GET /api/loadbalancers/{id}/listeners")
            .await?;
        Ok(envelope.listeners)
    }

    async fn list_pools(&self, lb_id: &str, ctx: &ApiContext) -> ApiResult<Vec<Pool>> {
        let url = self.url(&format!("/api/loadbalancers/{lb_id}/pools"));
        let builder = self.client.get(&url).query(&ctx.as_query());
        let envelope: PoolsEnvelope = self
            .request_json(builder, "GET /api/loadbalancers/{id}/pools")
            .await?;
        Ok(envelope.pools)
    }

    async fn get_health_monitor(
        &self,
        lb_id: &str,
        ctx: &ApiContext,
    ) -> ApiResult<Option<HealthMonitor>> {
        let url = self.url(&format!("/api/loadbalancers/{lb_id}/healthmonitor"));
        let builder = self.client.get(&url).query(&ctx.as_query());
        let envelope: HealthMonitorEnvelope = self
            .request_json(builder, "GET /api/loadbalancers/{id}/healthmonitor")
            .await?;
        Ok(envelope.monitor)
    }

    async fn list_options(
        &self,
        network_id: &str,
        instance_id: Option<&str>,
    ) -> ApiResult<OptionSets> {
        let url = self.url("/api/lboptions");
        let mut query = vec![("networkId", network_id.to_string())];
        if let Some(id) = instance_id {
            query.push(("instanceId", id.to_string()));
        }

        let builder = self.client.get(&url).query(&query);
        let options: OptionSets = self.request_json(builder, "GET /api/lboptions").await?;

        // 形状校验收在协作者边界，控制器永远拿到干净数据
        options.validate()?;
        Ok(options)
    }
}

/// 从 Set-Cookie 头里摘出 CSRF Token
fn csrf_from_set_cookie(raw: &str) -> Option<&str> {
    let rest = raw.trim_start().strip_prefix(CSRF_COOKIE)?;
    let value = rest.trim_start().strip_prefix('=')?;
    let token = value.split(';').next()?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csrf_cookie_parses_value_with_attributes() {
        let raw = "csrftoken=abc123; Path=/; HttpOnly";
        assert_eq!(csrf_from_set_cookie(raw), Some("abc123"));
    }

    #[test]
    fn csrf_cookie_ignores_other_cookies() {
        assert_eq!(csrf_from_set_cookie("sessionid=xyz; Path=/"), None);
    }

    #[test]
    fn csrf_cookie_rejects_empty_value() {
        assert_eq!(csrf_from_set_cookie("csrftoken=; Path=/"), None);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = RestLoadBalancerApi::new("https://console.example.com/").unwrap();
        assert_eq!(
            api.url("/api/loadbalancers"),
            "https://console.example.com/api/loadbalancers"
        );
    }
}
