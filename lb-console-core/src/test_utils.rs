//! 测试辅助模块
//!
//! 提供 mock 协作者和便捷的样例数据工厂。

use async_trait::async_trait;
use tokio::sync::RwLock;

use lb_console_api::{
    ApiContext, ApiError, ApiResult, HealthMonitor, InstanceOption, Listener, ListenerProtocol,
    LoadBalancer, LoadBalancerApi, LoadBalancerPayload, Member, MemberKind, MonitorType,
    OptionSets, Pool, PoolAlgorithm, SessionPersistence, SessionPersistenceKind, SubnetOption,
};

// ===== MockLoadBalancerApi =====

/// In-memory 协作者。字段直接暴露，测试按需填充；
/// `fail_*` 注入失败路径。
pub struct MockLoadBalancerApi {
    pub load_balancers: RwLock<Vec<LoadBalancer>>,
    pub listeners: RwLock<Vec<Listener>>,
    pub pools: RwLock<Vec<Pool>>,
    pub monitor: RwLock<Option<HealthMonitor>>,
    pub options: RwLock<OptionSets>,
    /// 如果 Some，list_pools 返回此网络错误（用于测试合流失败路径）
    fail_pools: RwLock<Option<String>>,
    /// 如果 Some，create/update/delete 返回此平台拒绝消息
    fail_mutations: RwLock<Option<String>>,
    /// 按序记录的调用流水
    pub calls: RwLock<Vec<String>>,
}

impl MockLoadBalancerApi {
    pub fn new() -> Self {
        Self {
            load_balancers: RwLock::new(Vec::new()),
            listeners: RwLock::new(Vec::new()),
            pools: RwLock::new(Vec::new()),
            monitor: RwLock::new(None),
            options: RwLock::new(OptionSets::default()),
            fail_pools: RwLock::new(None),
            fail_mutations: RwLock::new(None),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_fail_pools(&self, err: Option<String>) {
        *self.fail_pools.write().await = err;
    }

    pub async fn set_fail_mutations(&self, err: Option<String>) {
        *self.fail_mutations.write().await = err;
    }

    async fn record(&self, call: impl Into<String>) {
        self.calls.write().await.push(call.into());
    }

    async fn mutation_gate(&self) -> ApiResult<()> {
        if let Some(ref message) = *self.fail_mutations.read().await {
            return Err(ApiError::Endpoint {
                status: 409,
                message: message.clone(),
            });
        }
        Ok(())
    }
}

impl Default for MockLoadBalancerApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoadBalancerApi for MockLoadBalancerApi {
    async fn list_load_balancers(&self, _ctx: &ApiContext) -> ApiResult<Vec<LoadBalancer>> {
        self.record("list").await;
        Ok(self.load_balancers.read().await.clone())
    }

    async fn get_load_balancer(&self, id: &str, _ctx: &ApiContext) -> ApiResult<LoadBalancer> {
        self.record(format!("get {id}")).await;
        self.load_balancers
            .read()
            .await
            .iter()
            .find(|lb| lb.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Endpoint {
                status: 404,
                message: format!("load balancer {id} not found"),
            })
    }

    async fn create_load_balancer(&self, _payload: &LoadBalancerPayload) -> ApiResult<()> {
        self.record("create").await;
        self.mutation_gate().await
    }

    async fn update_load_balancer(
        &self,
        id: &str,
        _payload: &LoadBalancerPayload,
    ) -> ApiResult<()> {
        self.record(format!("update {id}")).await;
        self.mutation_gate().await
    }

    async fn delete_load_balancer(&self, id: &str, network_id: &str) -> ApiResult<()> {
        self.record(format!("delete {id} net={network_id}")).await;
        self.mutation_gate().await
    }

    async fn list_listeners(&self, lb_id: &str, _ctx: &ApiContext) -> ApiResult<Vec<Listener>> {
        self.record(format!("listeners {lb_id}")).await;
        Ok(self.listeners.read().await.clone())
    }

    async fn list_pools(&self, lb_id: &str, _ctx: &ApiContext) -> ApiResult<Vec<Pool>> {
        self.record(format!("pools {lb_id}")).await;
        if let Some(ref detail) = *self.fail_pools.read().await {
            return Err(ApiError::NetworkError {
                detail: detail.clone(),
            });
        }
        Ok(self.pools.read().await.clone())
    }

    async fn get_health_monitor(
        &self,
        lb_id: &str,
        _ctx: &ApiContext,
    ) -> ApiResult<Option<HealthMonitor>> {
        self.record(format!("monitor {lb_id}")).await;
        Ok(self.monitor.read().await.clone())
    }

    async fn list_options(
        &self,
        _network_id: &str,
        _instance_id: Option<&str>,
    ) -> ApiResult<OptionSets> {
        self.record("options").await;
        Ok(self.options.read().await.clone())
    }
}

// ===== 样例数据工厂 =====

pub fn sample_load_balancer(id: &str, name: &str) -> LoadBalancer {
    LoadBalancer {
        id: id.to_string(),
        name: name.to_string(),
        description: Some("edge traffic".to_string()),
        vip_subnet_id: Some("subnet-a".to_string()),
        vip_address: Some("10.0.0.10".to_string()),
        network_id: Some("net-1".to_string()),
        provisioning_status: Some("ACTIVE".to_string()),
        operating_status: Some("ONLINE".to_string()),
        created_at: None,
        updated_at: None,
        listeners: Vec::new(),
        pools: Vec::new(),
    }
}

pub fn sample_listener(id: &str) -> Listener {
    Listener {
        id: id.to_string(),
        name: Some("front".to_string()),
        protocol: Some(ListenerProtocol::TerminatedHttps),
        protocol_port: Some(443),
        connection_limit: Some(1000),
        allowed_cidrs: Some(vec!["10.0.0.0/24".to_string()]),
        timeout_client_data: Some(50000),
        timeout_tcp_inspect: None,
        timeout_member_connect: Some(5000),
        timeout_member_data: Some(50000),
        insert_headers: None,
        tls_ciphers: Some("ECDHE-RSA-AES128-GCM-SHA256".to_string()),
        default_pool_id: None,
    }
}

pub fn sample_pool(id: &str) -> Pool {
    Pool {
        id: id.to_string(),
        name: Some("backend".to_string()),
        description: None,
        protocol: Some(ListenerProtocol::Http),
        lb_algorithm: Some(PoolAlgorithm::RoundRobin),
        session_persistence: Some(SessionPersistence {
            kind: SessionPersistenceKind::AppCookie,
            cookie_name: Some("sid".to_string()),
        }),
        tls_enabled: Some(false),
        tls_ciphers: None,
        members: vec![Member {
            id: "inst-1".to_string(),
            name: Some("web-1".to_string()),
            kind: MemberKind::Internal,
            address: None,
            protocol_port: Some(8080),
            weight: Some(2),
            role: None,
        }],
        healthmonitor_id: Some("hm-1".to_string()),
    }
}

pub fn sample_monitor(id: &str) -> HealthMonitor {
    HealthMonitor {
        id: id.to_string(),
        name: Some("probe".to_string()),
        monitor_type: Some(MonitorType::Http),
        delay: Some(10),
        timeout: Some(5),
        max_retries: Some(3),
        max_retries_down: Some(3),
        http_method: Some("GET".to_string()),
        expected_codes: Some("200".to_string()),
        url_path: Some("/healthz".to_string()),
    }
}

pub fn subnet_option(name: &str, value: &str) -> SubnetOption {
    SubnetOption {
        name: name.to_string(),
        value: value.to_string(),
        cidr: Some("10.0.0.0/24".to_string()),
    }
}

pub fn instance_option(name: &str, value: &str) -> InstanceOption {
    InstanceOption {
        name: name.to_string(),
        value: value.to_string(),
    }
}
