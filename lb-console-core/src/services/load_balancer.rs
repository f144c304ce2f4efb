//! 负载均衡器服务
//!
//! 面向前端的统一入口：列表、提交、删除、编辑水合、选项拉取。
//! 只依赖协作者 Trait，不关心传输细节。

use std::sync::Arc;

use futures::try_join;

use lb_console_api::{
    ApiContext, ApiError, HealthMonitor, Listener, LoadBalancer, LoadBalancerApi,
    LoadBalancerPayload, OptionSets, Pool,
};

use crate::error::{CoreError, CoreResult};
use crate::wizard::WizardMode;

/// 编辑水合取回的子资源。三个请求并发发出、整体合流：
/// 任何一个失败都不产出部分数据。
#[derive(Debug, Clone, Default)]
pub struct HydrationData {
    /// 第一个监听器（面板不支持一对多）
    pub listener: Option<Listener>,
    /// 第一个资源池
    pub pool: Option<Pool>,
    pub monitor: Option<HealthMonitor>,
}

/// 负载均衡器服务
pub struct LoadBalancerService {
    api: Arc<dyn LoadBalancerApi>,
}

impl LoadBalancerService {
    #[must_use]
    pub fn new(api: Arc<dyn LoadBalancerApi>) -> Self {
        Self { api }
    }

    /// 列出当前上下文下的负载均衡器
    pub async fn list(&self, ctx: &ApiContext) -> CoreResult<Vec<LoadBalancer>> {
        self.api
            .list_load_balancers(ctx)
            .await
            .map_err(|e| logged("list load balancers", e))
    }

    /// 拉取向导选项集合（形状已在协作者边界校验过）
    pub async fn load_options(&self, ctx: &ApiContext) -> CoreResult<OptionSets> {
        let network_id = ctx.network_id.clone().unwrap_or_default();
        self.api
            .list_options(&network_id, ctx.instance_id.as_deref())
            .await
            .map_err(|e| logged("load options", e))
    }

    /// 编辑水合：三个子资源请求并发合流，只取每组第一个实例。
    /// 任何一个失败让整次水合失败，绝不应用部分结果。
    pub async fn hydrate(&self, lb_id: &str, ctx: &ApiContext) -> CoreResult<HydrationData> {
        let (listeners, pools, monitor) = try_join!(
            self.api.list_listeners(lb_id, ctx),
            self.api.list_pools(lb_id, ctx),
            self.api.get_health_monitor(lb_id, ctx),
        )
        .map_err(|e| logged("hydrate load balancer", e))?;

        Ok(HydrationData {
            listener: listeners.into_iter().next(),
            pool: pools.into_iter().next(),
            monitor,
        })
    }

    /// 提交向导载荷：按模式走创建或更新
    pub async fn submit(
        &self,
        mode: &WizardMode,
        payload: &LoadBalancerPayload,
    ) -> CoreResult<()> {
        let result = match mode {
            WizardMode::Create => self.api.create_load_balancer(payload).await,
            WizardMode::Edit { load_balancer_id } => {
                self.api
                    .update_load_balancer(load_balancer_id, payload)
                    .await
            }
        };
        result.map_err(|e| logged("submit load balancer", e))
    }

    /// 删除负载均衡器。网络 ID 优先取记录自带的，缺省回退到上下文。
    pub async fn delete(&self, lb: &LoadBalancer, ctx: &ApiContext) -> CoreResult<()> {
        let network_id = lb
            .network_id
            .clone()
            .or_else(|| ctx.network_id.clone())
            .ok_or_else(|| CoreError::MissingContext("network id for delete".to_string()))?;

        self.api
            .delete_load_balancer(&lb.id, &network_id)
            .await
            .map_err(|e| logged("delete load balancer", e))
    }
}

/// 按错误分类记日志后向上抛
fn logged(operation: &str, error: ApiError) -> CoreError {
    if error.is_expected() {
        log::warn!("{operation} failed: {error}");
    } else {
        log::error!("{operation} failed: {error}");
    }
    CoreError::Api(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        sample_listener, sample_load_balancer, sample_monitor, sample_pool, MockLoadBalancerApi,
    };
    use crate::FieldModel;
    use crate::payload::build_payload;

    fn service_with(api: Arc<MockLoadBalancerApi>) -> LoadBalancerService {
        LoadBalancerService::new(api)
    }

    #[tokio::test]
    async fn hydrate_takes_first_of_each_collection() {
        let api = Arc::new(MockLoadBalancerApi::new());
        {
            let mut listeners = api.listeners.write().await;
            listeners.push(sample_listener("l-1"));
            listeners.push(sample_listener("l-2"));
            let mut pools = api.pools.write().await;
            pools.push(sample_pool("p-1"));
            pools.push(sample_pool("p-2"));
            *api.monitor.write().await = Some(sample_monitor("hm-1"));
        }

        let svc = service_with(api);
        let ctx = ApiContext::for_network("net-1");
        let data = svc.hydrate("lb-1", &ctx).await.unwrap();

        assert_eq!(data.listener.unwrap().id, "l-1");
        assert_eq!(data.pool.unwrap().id, "p-1");
        assert_eq!(data.monitor.unwrap().id, "hm-1");
    }

    #[tokio::test]
    async fn hydrate_with_no_subresources_is_all_none() {
        let api = Arc::new(MockLoadBalancerApi::new());
        let svc = service_with(api);
        let ctx = ApiContext::for_network("net-1");

        let data = svc.hydrate("lb-1", &ctx).await.unwrap();
        assert!(data.listener.is_none());
        assert!(data.pool.is_none());
        assert!(data.monitor.is_none());
    }

    #[tokio::test]
    async fn hydrate_fails_whole_when_one_fetch_fails() {
        let api = Arc::new(MockLoadBalancerApi::new());
        {
            api.listeners.write().await.push(sample_listener("l-1"));
            api.set_fail_pools(Some("backend unavailable".to_string()))
                .await;
        }

        let svc = service_with(api);
        let ctx = ApiContext::for_network("net-1");
        let err = svc.hydrate("lb-1", &ctx).await.unwrap_err();
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[tokio::test]
    async fn submit_routes_create_and_update_by_mode() {
        let api = Arc::new(MockLoadBalancerApi::new());
        let svc = service_with(api.clone());
        let payload = build_payload(&FieldModel::new_create("net-1"));

        svc.submit(&WizardMode::Create, &payload).await.unwrap();
        svc.submit(
            &WizardMode::Edit {
                load_balancer_id: "lb-1".to_string(),
            },
            &payload,
        )
        .await
        .unwrap();

        let calls = api.calls.read().await;
        assert!(calls.iter().any(|c| c == "create"));
        assert!(calls.iter().any(|c| c == "update lb-1"));
    }

    #[tokio::test]
    async fn submit_surfaces_collaborator_message() {
        let api = Arc::new(MockLoadBalancerApi::new());
        api.set_fail_mutations(Some("quota exceeded".to_string()))
            .await;
        let svc = service_with(api);
        let payload = build_payload(&FieldModel::new_create("net-1"));

        let err = svc.submit(&WizardMode::Create, &payload).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert!(err.is_expected());
    }

    #[tokio::test]
    async fn delete_prefers_record_network_id() {
        let api = Arc::new(MockLoadBalancerApi::new());
        let svc = service_with(api.clone());
        let lb = sample_load_balancer("lb-1", "edge");
        let ctx = ApiContext::for_network("net-other");

        svc.delete(&lb, &ctx).await.unwrap();
        let calls = api.calls.read().await;
        assert!(calls.iter().any(|c| c == "delete lb-1 net=net-1"));
    }

    #[tokio::test]
    async fn delete_falls_back_to_context_network_id() {
        let api = Arc::new(MockLoadBalancerApi::new());
        let svc = service_with(api.clone());
        let mut lb = sample_load_balancer("lb-1", "edge");
        lb.network_id = None;
        let ctx = ApiContext::for_network("net-ctx");

        svc.delete(&lb, &ctx).await.unwrap();
        let calls = api.calls.read().await;
        assert!(calls.iter().any(|c| c == "delete lb-1 net=net-ctx"));
    }

    #[tokio::test]
    async fn delete_without_any_network_id_errors() {
        let api = Arc::new(MockLoadBalancerApi::new());
        let svc = service_with(api);
        let mut lb = sample_load_balancer("lb-1", "edge");
        lb.network_id = None;
        let ctx = ApiContext::for_instance("inst-1");

        let err = svc.delete(&lb, &ctx).await.unwrap_err();
        assert!(matches!(err, CoreError::MissingContext(_)));
    }

    #[tokio::test]
    async fn list_passes_context_through() {
        let api = Arc::new(MockLoadBalancerApi::new());
        api.load_balancers
            .write()
            .await
            .push(sample_load_balancer("lb-1", "edge"));
        let svc = service_with(api);

        let items = svc.list(&ApiContext::for_network("net-1")).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "edge");
    }
}
