use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

// ============ Protocol / algorithm enums ============

/// Front-end protocol of a listener (also used for pools).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListenerProtocol {
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "HTTPS")]
    Https,
    #[serde(rename = "TERMINATED_HTTPS")]
    TerminatedHttps,
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    Udp,
    #[serde(rename = "SCTP")]
    Sctp,
}

impl ListenerProtocol {
    /// 全部协议（按展示顺序）
    pub const ALL: [Self; 6] = [
        Self::Http,
        Self::Https,
        Self::TerminatedHttps,
        Self::Tcp,
        Self::Udp,
        Self::Sctp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
            Self::TerminatedHttps => "TERMINATED_HTTPS",
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Sctp => "SCTP",
        }
    }

    /// Datagram protocols carry no transport timeout knobs.
    pub fn supports_transport_timeouts(self) -> bool {
        !matches!(self, Self::Udp | Self::Sctp)
    }

    /// X-Forwarded-* header insertion only applies where the platform
    /// terminates HTTP.
    pub fn supports_insert_headers(self) -> bool {
        matches!(self, Self::Http | Self::TerminatedHttps)
    }

    /// TLS termination happens on the listener itself.
    pub fn is_terminated_tls(self) -> bool {
        matches!(self, Self::TerminatedHttps)
    }
}

/// Pool balancing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolAlgorithm {
    #[serde(rename = "ROUND_ROBIN")]
    RoundRobin,
    #[serde(rename = "LEAST_CONNECTIONS")]
    LeastConnections,
    #[serde(rename = "SOURCE_IP")]
    SourceIp,
}

impl PoolAlgorithm {
    /// 全部算法（按展示顺序）
    pub const ALL: [Self; 3] = [Self::RoundRobin, Self::LeastConnections, Self::SourceIp];

    pub fn name(self) -> &'static str {
        match self {
            Self::RoundRobin => "ROUND_ROBIN",
            Self::LeastConnections => "LEAST_CONNECTIONS",
            Self::SourceIp => "SOURCE_IP",
        }
    }
}

/// Session persistence flavor. Absence of persistence is modelled as
/// `Option::None` on the enclosing record, not as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPersistenceKind {
    #[serde(rename = "SOURCE_IP")]
    SourceIp,
    #[serde(rename = "HTTP_COOKIE")]
    HttpCookie,
    #[serde(rename = "APP_COOKIE")]
    AppCookie,
}

impl SessionPersistenceKind {
    pub const ALL: [Self; 3] = [Self::SourceIp, Self::HttpCookie, Self::AppCookie];

    pub fn name(self) -> &'static str {
        match self {
            Self::SourceIp => "SOURCE_IP",
            Self::HttpCookie => "HTTP_COOKIE",
            Self::AppCookie => "APP_COOKIE",
        }
    }

    /// APP_COOKIE 需要用户提供 cookie 名称
    pub fn needs_cookie_name(self) -> bool {
        matches!(self, Self::AppCookie)
    }
}

/// Health monitor probe type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorType {
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "HTTPS")]
    Https,
    #[serde(rename = "PING")]
    Ping,
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "TLS-HELLO")]
    TlsHello,
    #[serde(rename = "UDP-CONNECT")]
    UdpConnect,
    #[serde(rename = "SCTP")]
    Sctp,
}

impl MonitorType {
    pub const ALL: [Self; 7] = [
        Self::Http,
        Self::Https,
        Self::Ping,
        Self::Tcp,
        Self::TlsHello,
        Self::UdpConnect,
        Self::Sctp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
            Self::Ping => "PING",
            Self::Tcp => "TCP",
            Self::TlsHello => "TLS-HELLO",
            Self::UdpConnect => "UDP-CONNECT",
            Self::Sctp => "SCTP",
        }
    }

    /// HTTP-flavored probes carry method / expected codes / URL path.
    pub fn is_http_probe(self) -> bool {
        matches!(self, Self::Http | Self::Https)
    }
}

/// Backend member kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    #[serde(rename = "INTERNAL")]
    Internal,
    #[serde(rename = "EXTERNAL")]
    External,
}

/// Backend member role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MemberRole {
    #[default]
    #[serde(rename = "MEMBER")]
    Member,
    #[serde(rename = "BACKUP")]
    Backup,
}

// ============ Context ============

/// Scope every panel call runs under: a network detail tab or an instance
/// detail tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

impl ApiContext {
    pub fn for_network(network_id: impl Into<String>) -> Self {
        Self {
            network_id: Some(network_id.into()),
            instance_id: None,
        }
    }

    pub fn for_instance(instance_id: impl Into<String>) -> Self {
        Self {
            network_id: None,
            instance_id: Some(instance_id.into()),
        }
    }

    /// Query-string pairs for list endpoints.
    pub fn as_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(ref id) = self.network_id {
            query.push(("networkId", id.clone()));
        }
        if let Some(ref id) = self.instance_id {
            query.push(("instanceId", id.clone()));
        }
        query
    }
}

// ============ Resource records ============

/// A load balancer as the platform reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vip_subnet_id: Option<String>,
    #[serde(default)]
    pub vip_address: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub provisioning_status: Option<String>,
    #[serde(default)]
    pub operating_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Present on detail responses, may be omitted from list responses.
    #[serde(default)]
    pub listeners: Vec<Listener>,
    #[serde(default)]
    pub pools: Vec<Pool>,
}

/// Protocol/port front-end accepting client connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listener {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub protocol: Option<ListenerProtocol>,
    #[serde(default)]
    pub protocol_port: Option<u16>,
    #[serde(default)]
    pub connection_limit: Option<i64>,
    #[serde(default)]
    pub allowed_cidrs: Option<Vec<String>>,
    #[serde(default)]
    pub timeout_client_data: Option<u32>,
    #[serde(default)]
    pub timeout_tcp_inspect: Option<u32>,
    #[serde(default)]
    pub timeout_member_connect: Option<u32>,
    #[serde(default)]
    pub timeout_member_data: Option<u32>,
    #[serde(default)]
    pub insert_headers: Option<InsertHeaders>,
    #[serde(default)]
    pub tls_ciphers: Option<String>,
    #[serde(default)]
    pub default_pool_id: Option<String>,
}

/// X-Forwarded-* header insertion switches.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertHeaders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_forwarded_for: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_forwarded_port: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_forwarded_proto: Option<bool>,
}

/// Backend group behind a listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub protocol: Option<ListenerProtocol>,
    #[serde(default)]
    pub lb_algorithm: Option<PoolAlgorithm>,
    #[serde(default)]
    pub session_persistence: Option<SessionPersistence>,
    #[serde(default)]
    pub tls_enabled: Option<bool>,
    #[serde(default)]
    pub tls_ciphers: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub healthmonitor_id: Option<String>,
}

/// Session persistence configuration attached to a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPersistence {
    #[serde(rename = "type")]
    pub kind: SessionPersistenceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
}

/// One backend target in a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: MemberKind,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub protocol_port: Option<u16>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub role: Option<MemberRole>,
}

/// Periodic liveness check attached to a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMonitor {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub monitor_type: Option<MonitorType>,
    #[serde(default)]
    pub delay: Option<u32>,
    #[serde(default)]
    pub timeout: Option<u32>,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub max_retries_down: Option<u32>,
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub expected_codes: Option<String>,
    #[serde(default)]
    pub url_path: Option<String>,
}

// ============ Selectable options ============

/// 项目选项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOption {
    pub name: String,
    pub value: String,
}

/// 子网选项（cidr 仅用于展示）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetOption {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub cidr: Option<String>,
}

/// 云主机选项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceOption {
    pub name: String,
    pub value: String,
}

/// 浮动 IP 池选项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingIpPoolOption {
    pub name: String,
    pub value: String,
}

/// Everything the wizard's selects feed on, fetched in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSets {
    #[serde(default)]
    pub projects: Vec<ProjectOption>,
    #[serde(default)]
    pub subnets: Vec<SubnetOption>,
    #[serde(default)]
    pub instances: Vec<InstanceOption>,
    #[serde(default)]
    pub floating_ip_pools: Vec<FloatingIpPoolOption>,
}

impl OptionSets {
    /// Boundary shape check: every option entry must carry a non-empty
    /// value. Runs right after deserialization so the controller never sees
    /// a half-formed entry.
    pub fn validate(&self) -> ApiResult<()> {
        fn check<'a, I>(what: &str, entries: I) -> ApiResult<()>
        where
            I: Iterator<Item = (&'a str, &'a str)>,
        {
            for (name, value) in entries {
                if value.trim().is_empty() {
                    return Err(ApiError::InvalidShape {
                        what: what.to_string(),
                        detail: format!("entry \"{name}\" has no value"),
                    });
                }
            }
            Ok(())
        }

        check(
            "project option",
            self.projects.iter().map(|o| (o.name.as_str(), o.value.as_str())),
        )?;
        check(
            "subnet option",
            self.subnets.iter().map(|o| (o.name.as_str(), o.value.as_str())),
        )?;
        check(
            "instance option",
            self.instances.iter().map(|o| (o.name.as_str(), o.value.as_str())),
        )?;
        check(
            "floating IP pool option",
            self.floating_ip_pools
                .iter()
                .map(|o| (o.name.as_str(), o.value.as_str())),
        )
    }
}

// ============ Submission payloads ============

/// Composite create/update request body. Sub-resource groups that the user
/// disabled are omitted entirely so the platform never receives stale data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub vip_subnet_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listener: Option<ListenerPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthmonitor: Option<MonitorPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerPayload {
    pub name: String,
    pub protocol: ListenerProtocol,
    pub protocol_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_cidrs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_client_data: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_tcp_inspect: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_member_connect: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_member_data: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_headers: Option<InsertHeaders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ciphers: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub protocol: ListenerProtocol,
    pub lb_algorithm: PoolAlgorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_persistence: Option<SessionPersistence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ciphers: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MemberKind,
    /// Empty for internal members: the platform resolves the instance id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    pub protocol_port: u16,
    pub weight: u32,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub monitor_type: MonitorType,
    pub delay: u32,
    pub timeout: u32,
    pub max_retries: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries_down: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_codes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
}

// ============ Response envelopes ============

#[derive(Debug, Clone, Deserialize)]
pub struct LoadBalancersEnvelope {
    #[serde(default)]
    pub loadbalancers: Vec<LoadBalancer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadBalancerEnvelope {
    pub loadbalancer: LoadBalancer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListenersEnvelope {
    #[serde(default)]
    pub listeners: Vec<Listener>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolsEnvelope {
    #[serde(default)]
    pub pools: Vec<Pool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthMonitorEnvelope {
    #[serde(default)]
    pub monitor: Option<HealthMonitor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_balancer_deserializes_from_camel_case() {
        let value = json!({
            "id": "lb-1",
            "name": "edge",
            "vipSubnetId": "subnet-a",
            "vipAddress": "10.0.0.10",
            "provisioningStatus": "ACTIVE",
            "listeners": [{"id": "l-1", "protocol": "TERMINATED_HTTPS", "protocolPort": 443}]
        });

        let lb: LoadBalancer = serde_json::from_value(value).unwrap();
        assert_eq!(lb.vip_subnet_id.as_deref(), Some("subnet-a"));
        assert_eq!(lb.listeners.len(), 1);
        assert_eq!(
            lb.listeners[0].protocol,
            Some(ListenerProtocol::TerminatedHttps)
        );
        assert_eq!(lb.listeners[0].protocol_port, Some(443));
    }

    #[test]
    fn pool_member_kind_uses_type_key() {
        let value = json!({
            "id": "p-1",
            "members": [{"id": "m-1", "type": "EXTERNAL", "address": "192.0.2.7", "protocolPort": 8080}]
        });

        let pool: Pool = serde_json::from_value(value).unwrap();
        assert_eq!(pool.members[0].kind, MemberKind::External);
        assert_eq!(pool.members[0].address.as_deref(), Some("192.0.2.7"));
    }

    #[test]
    fn option_sets_validate_rejects_empty_value() {
        let sets = OptionSets {
            subnets: vec![SubnetOption {
                name: "private".to_string(),
                value: "  ".to_string(),
                cidr: None,
            }],
            ..OptionSets::default()
        };

        let err = sets.validate().unwrap_err();
        assert!(err.to_string().contains("subnet option"));
        assert!(err.to_string().contains("private"));
    }

    #[test]
    fn option_sets_validate_accepts_well_formed_entries() {
        let sets = OptionSets {
            subnets: vec![SubnetOption {
                name: "private".to_string(),
                value: "subnet-a".to_string(),
                cidr: Some("10.0.0.0/24".to_string()),
            }],
            instances: vec![InstanceOption {
                name: "web-1".to_string(),
                value: "inst-1".to_string(),
            }],
            ..OptionSets::default()
        };

        assert!(sets.validate().is_ok());
    }

    #[test]
    fn payload_omits_disabled_groups() {
        let payload = LoadBalancerPayload {
            name: "edge".to_string(),
            description: None,
            vip_subnet_id: "subnet-a".to_string(),
            vip_address: None,
            network_id: Some("net-1".to_string()),
            listener: None,
            pool: None,
            healthmonitor: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("listener"));
        assert!(!object.contains_key("pool"));
        assert!(!object.contains_key("healthmonitor"));
        assert_eq!(object["vipSubnetId"], "subnet-a");
    }

    #[test]
    fn member_payload_skips_empty_address() {
        let member = MemberPayload {
            id: "inst-1".to_string(),
            name: "web-1".to_string(),
            kind: MemberKind::Internal,
            address: String::new(),
            protocol_port: 80,
            weight: 1,
            role: MemberRole::Member,
        };

        let value = serde_json::to_value(&member).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("address"));
        assert_eq!(object["type"], "INTERNAL");
        assert_eq!(object["protocolPort"], 80);
    }
}
