use async_trait::async_trait;

use crate::error::ApiResult;
use crate::types::{
    ApiContext, HealthMonitor, Listener, LoadBalancer, LoadBalancerPayload, OptionSets, Pool,
};

/// 负载均衡平台 API Trait
///
/// 面板消费的唯一协作者接口。平台实现：
/// - REST: [`RestLoadBalancerApi`](crate::rest::RestLoadBalancerApi)（会话 Cookie + CSRF）
/// - 测试: 各消费方自带的 in-memory mock
///
/// 所有方法失败时返回携带人类可读消息的 [`ApiError`](crate::error::ApiError)，
/// 调用方不接触传输层状态码。
#[async_trait]
pub trait LoadBalancerApi: Send + Sync {
    /// 列出当前上下文下的负载均衡器
    async fn list_load_balancers(&self, ctx: &ApiContext) -> ApiResult<Vec<LoadBalancer>>;

    /// 获取单个负载均衡器详情
    ///
    /// # Arguments
    /// * `id` - 负载均衡器 ID
    async fn get_load_balancer(&self, id: &str, ctx: &ApiContext) -> ApiResult<LoadBalancer>;

    /// 创建负载均衡器（含可选的 listener / pool / monitor 子资源）
    async fn create_load_balancer(&self, payload: &LoadBalancerPayload) -> ApiResult<()>;

    /// 更新负载均衡器
    ///
    /// # Arguments
    /// * `id` - 负载均衡器 ID
    async fn update_load_balancer(&self, id: &str, payload: &LoadBalancerPayload)
    -> ApiResult<()>;

    /// 删除负载均衡器
    ///
    /// # Arguments
    /// * `id` - 负载均衡器 ID
    /// * `network_id` - 所属网络 ID
    async fn delete_load_balancer(&self, id: &str, network_id: &str) -> ApiResult<()>;

    /// 列出负载均衡器下的监听器
    async fn list_listeners(&self, lb_id: &str, ctx: &ApiContext) -> ApiResult<Vec<Listener>>;

    /// 列出负载均衡器下的资源池
    async fn list_pools(&self, lb_id: &str, ctx: &ApiContext) -> ApiResult<Vec<Pool>>;

    /// 获取负载均衡器的健康检查器（可能不存在）
    async fn get_health_monitor(
        &self,
        lb_id: &str,
        ctx: &ApiContext,
    ) -> ApiResult<Option<HealthMonitor>>;

    /// 拉取向导下拉框所需的选项集合
    ///
    /// # Arguments
    /// * `network_id` - 网络 ID
    /// * `instance_id` - 云主机 ID（实例页签下）
    async fn list_options(
        &self,
        network_id: &str,
        instance_id: Option<&str>,
    ) -> ApiResult<OptionSets>;
}
