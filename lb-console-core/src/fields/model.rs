//! 向导字段模型
//!
//! 一次向导会话累积的全部配置。自由文本的数字字段以输入串保存，
//! 校验/序列化时再解析；下拉选择用枚举；开关用布尔。

use lb_console_api::{
    ListenerProtocol, LoadBalancer, MemberKind, MemberRole, MonitorType, PoolAlgorithm,
    SessionPersistenceKind,
};

use crate::services::HydrationData;

/// 监听器字段组（`create_listener` 为真时生效）
#[derive(Debug, Clone, Default)]
pub struct ListenerFields {
    pub name: String,
    pub protocol: Option<ListenerProtocol>,
    pub port: String,
    pub connection_limit: String,
    /// 逗号分隔的 CIDR 列表
    pub allowed_cidrs: String,
    pub client_data_timeout: String,
    pub tcp_inspect_timeout: String,
    pub member_connect_timeout: String,
    pub member_data_timeout: String,
    pub insert_x_forwarded_for: bool,
    pub insert_x_forwarded_port: bool,
    pub insert_x_forwarded_proto: bool,
    pub tls_cipher_string: String,
}

/// 资源池字段组（`create_pool` 为真时生效）
#[derive(Debug, Clone)]
pub struct PoolFields {
    pub name: String,
    pub algorithm: PoolAlgorithm,
    pub protocol: ListenerProtocol,
    pub description: String,
    /// None 表示不启用会话保持
    pub persistence: Option<SessionPersistenceKind>,
    pub cookie_name: String,
    pub tls_enabled: bool,
    pub tls_cipher: String,
}

impl Default for PoolFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            algorithm: PoolAlgorithm::RoundRobin,
            protocol: ListenerProtocol::Http,
            description: String::new(),
            persistence: None,
            cookie_name: String::new(),
            tls_enabled: false,
            tls_cipher: String::new(),
        }
    }
}

/// 健康检查字段组（`create_monitor` 为真时生效）
#[derive(Debug, Clone, Default)]
pub struct MonitorFields {
    pub name: String,
    pub monitor_type: Option<MonitorType>,
    pub http_method: String,
    pub expected_codes: String,
    pub url_path: String,
    pub delay: String,
    pub timeout: String,
    pub max_retries: String,
    pub max_retries_down: String,
}

/// 成员列表中的一条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    /// 列表内唯一。内部成员等于云主机 ID，外部成员由控制器生成
    pub id: String,
    pub name: String,
    pub kind: MemberKind,
    /// 内部成员留空，由平台按云主机 ID 解析
    pub address: String,
    pub port: u16,
    pub weight: u32,
    pub role: MemberRole,
}

/// 字段模型：一次向导会话的全部状态
#[derive(Debug, Clone, Default)]
pub struct FieldModel {
    pub name: String,
    pub description: String,
    pub vip_subnet_id: String,
    pub vip_address: String,
    pub network_id: String,

    pub create_listener: bool,
    pub listener: ListenerFields,

    pub create_pool: bool,
    pub pool: PoolFields,
    /// 仅在 `create_pool` 为真时有意义
    pub members: Vec<MemberEntry>,

    pub create_monitor: bool,
    pub monitor: MonitorFields,
}

impl FieldModel {
    /// 创建模式的固定默认值：三个子资源全部启用，HTTP / ROUND_ROBIN
    pub fn new_create(network_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            create_listener: true,
            listener: ListenerFields {
                protocol: Some(ListenerProtocol::Http),
                port: "80".to_string(),
                ..ListenerFields::default()
            },
            create_pool: true,
            pool: PoolFields::default(),
            create_monitor: true,
            monitor: MonitorFields {
                name: String::new(),
                monitor_type: Some(MonitorType::Http),
                http_method: "GET".to_string(),
                expected_codes: "200".to_string(),
                url_path: "/".to_string(),
                delay: "5".to_string(),
                timeout: "5".to_string(),
                max_retries: "3".to_string(),
                max_retries_down: "3".to_string(),
            },
            ..Self::default()
        }
    }

    /// 编辑模式：先从负载均衡器记录播种基础字段，
    /// 子资源字段等水合结果到达后再合并（见 [`Self::apply_hydration`]）
    pub fn seeded_from(lb: &LoadBalancer) -> Self {
        Self {
            name: lb.name.clone(),
            description: lb.description.clone().unwrap_or_default(),
            vip_subnet_id: lb.vip_subnet_id.clone().unwrap_or_default(),
            vip_address: lb.vip_address.clone().unwrap_or_default(),
            network_id: lb.network_id.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// 合并水合结果。只触碰子资源字段组和 `create_*` 开关，
    /// 基础字段保持播种时的值不被覆盖。每组只看取到的第一个实例。
    pub fn apply_hydration(&mut self, data: &HydrationData) {
        self.create_listener = data.listener.is_some();
        if let Some(ref listener) = data.listener {
            self.listener = ListenerFields {
                name: listener.name.clone().unwrap_or_default(),
                protocol: listener.protocol,
                port: listener
                    .protocol_port
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
                connection_limit: listener
                    .connection_limit
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                allowed_cidrs: listener
                    .allowed_cidrs
                    .as_ref()
                    .map(|cidrs| cidrs.join(", "))
                    .unwrap_or_default(),
                client_data_timeout: opt_number(listener.timeout_client_data),
                tcp_inspect_timeout: opt_number(listener.timeout_tcp_inspect),
                member_connect_timeout: opt_number(listener.timeout_member_connect),
                member_data_timeout: opt_number(listener.timeout_member_data),
                insert_x_forwarded_for: listener
                    .insert_headers
                    .and_then(|h| h.x_forwarded_for)
                    .unwrap_or(false),
                insert_x_forwarded_port: listener
                    .insert_headers
                    .and_then(|h| h.x_forwarded_port)
                    .unwrap_or(false),
                insert_x_forwarded_proto: listener
                    .insert_headers
                    .and_then(|h| h.x_forwarded_proto)
                    .unwrap_or(false),
                tls_cipher_string: listener.tls_ciphers.clone().unwrap_or_default(),
            };
        }

        self.create_pool = data.pool.is_some();
        if let Some(ref pool) = data.pool {
            self.pool = PoolFields {
                name: pool.name.clone().unwrap_or_default(),
                algorithm: pool.lb_algorithm.unwrap_or(PoolAlgorithm::RoundRobin),
                protocol: pool.protocol.unwrap_or(ListenerProtocol::Http),
                description: pool.description.clone().unwrap_or_default(),
                persistence: pool.session_persistence.as_ref().map(|p| p.kind),
                cookie_name: pool
                    .session_persistence
                    .as_ref()
                    .and_then(|p| p.cookie_name.clone())
                    .unwrap_or_default(),
                tls_enabled: pool.tls_enabled.unwrap_or(false),
                tls_cipher: pool.tls_ciphers.clone().unwrap_or_default(),
            };
            self.members = pool
                .members
                .iter()
                .map(|m| MemberEntry {
                    id: m.id.clone(),
                    name: m.name.clone().unwrap_or_default(),
                    kind: m.kind,
                    address: m.address.clone().unwrap_or_default(),
                    port: m.protocol_port.unwrap_or(80),
                    weight: m.weight.unwrap_or(1),
                    role: m.role.unwrap_or_default(),
                })
                .collect();
        }

        self.create_monitor = data.monitor.is_some();
        if let Some(ref monitor) = data.monitor {
            self.monitor = MonitorFields {
                name: monitor.name.clone().unwrap_or_default(),
                monitor_type: monitor.monitor_type,
                http_method: monitor.http_method.clone().unwrap_or_default(),
                expected_codes: monitor.expected_codes.clone().unwrap_or_default(),
                url_path: monitor.url_path.clone().unwrap_or_default(),
                delay: opt_number(monitor.delay),
                timeout: opt_number(monitor.timeout),
                max_retries: opt_number(monitor.max_retries),
                max_retries_down: opt_number(monitor.max_retries_down),
            };
        }
    }
}

fn opt_number(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
