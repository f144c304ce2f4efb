//! 字段更新补丁
//!
//! 字段模型的唯一修改入口。每个可编辑字段对应一个变体，
//! 控制器在应用补丁时一并清除校验消息。

use lb_console_api::{ListenerProtocol, MonitorType, PoolAlgorithm, SessionPersistenceKind};

use super::FieldModel;

/// 单字段更新
#[derive(Debug, Clone)]
pub enum FieldUpdate {
    // 基础
    Name(String),
    Description(String),
    VipSubnetId(String),
    VipAddress(String),

    // 监听器
    CreateListener(bool),
    ListenerName(String),
    ListenerProtocol(Option<ListenerProtocol>),
    ListenerPort(String),
    ConnectionLimit(String),
    AllowedCidrs(String),
    ClientDataTimeout(String),
    TcpInspectTimeout(String),
    MemberConnectTimeout(String),
    MemberDataTimeout(String),
    InsertXForwardedFor(bool),
    InsertXForwardedPort(bool),
    InsertXForwardedProto(bool),
    TlsCipherString(String),

    // 资源池
    CreatePool(bool),
    PoolName(String),
    PoolAlgorithm(PoolAlgorithm),
    PoolProtocol(ListenerProtocol),
    PoolDesc(String),
    SessionPersistence(Option<SessionPersistenceKind>),
    CookieName(String),
    PoolTlsEnabled(bool),
    PoolTlsCipher(String),

    // 健康检查
    CreateMonitor(bool),
    MonitorName(String),
    MonitorType(Option<MonitorType>),
    HttpMethod(String),
    ExpectedCodes(String),
    UrlPath(String),
    Delay(String),
    Timeout(String),
    MaxRetries(String),
    MaxRetriesDown(String),
}

impl FieldModel {
    /// 应用一条补丁
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Description(v) => self.description = v,
            FieldUpdate::VipSubnetId(v) => self.vip_subnet_id = v,
            FieldUpdate::VipAddress(v) => self.vip_address = v,

            FieldUpdate::CreateListener(v) => self.create_listener = v,
            FieldUpdate::ListenerName(v) => self.listener.name = v,
            FieldUpdate::ListenerProtocol(v) => self.listener.protocol = v,
            FieldUpdate::ListenerPort(v) => self.listener.port = v,
            FieldUpdate::ConnectionLimit(v) => self.listener.connection_limit = v,
            FieldUpdate::AllowedCidrs(v) => self.listener.allowed_cidrs = v,
            FieldUpdate::ClientDataTimeout(v) => self.listener.client_data_timeout = v,
            FieldUpdate::TcpInspectTimeout(v) => self.listener.tcp_inspect_timeout = v,
            FieldUpdate::MemberConnectTimeout(v) => self.listener.member_connect_timeout = v,
            FieldUpdate::MemberDataTimeout(v) => self.listener.member_data_timeout = v,
            FieldUpdate::InsertXForwardedFor(v) => self.listener.insert_x_forwarded_for = v,
            FieldUpdate::InsertXForwardedPort(v) => self.listener.insert_x_forwarded_port = v,
            FieldUpdate::InsertXForwardedProto(v) => self.listener.insert_x_forwarded_proto = v,
            FieldUpdate::TlsCipherString(v) => self.listener.tls_cipher_string = v,

            FieldUpdate::CreatePool(v) => self.create_pool = v,
            FieldUpdate::PoolName(v) => self.pool.name = v,
            FieldUpdate::PoolAlgorithm(v) => self.pool.algorithm = v,
            FieldUpdate::PoolProtocol(v) => self.pool.protocol = v,
            FieldUpdate::PoolDesc(v) => self.pool.description = v,
            FieldUpdate::SessionPersistence(v) => self.pool.persistence = v,
            FieldUpdate::CookieName(v) => self.pool.cookie_name = v,
            FieldUpdate::PoolTlsEnabled(v) => self.pool.tls_enabled = v,
            FieldUpdate::PoolTlsCipher(v) => self.pool.tls_cipher = v,

            FieldUpdate::CreateMonitor(v) => self.create_monitor = v,
            FieldUpdate::MonitorName(v) => self.monitor.name = v,
            FieldUpdate::MonitorType(v) => self.monitor.monitor_type = v,
            FieldUpdate::HttpMethod(v) => self.monitor.http_method = v,
            FieldUpdate::ExpectedCodes(v) => self.monitor.expected_codes = v,
            FieldUpdate::UrlPath(v) => self.monitor.url_path = v,
            FieldUpdate::Delay(v) => self.monitor.delay = v,
            FieldUpdate::Timeout(v) => self.monitor.timeout = v,
            FieldUpdate::MaxRetries(v) => self.monitor.max_retries = v,
            FieldUpdate::MaxRetriesDown(v) => self.monitor.max_retries_down = v,
        }
    }
}
