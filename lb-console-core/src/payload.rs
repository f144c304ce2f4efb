//! 提交载荷组装
//!
//! 把累积的字段模型整理成一份复合创建/更新请求。关闭的组整组剔除，
//! 协议不支持的字段（UDP/SCTP 的超时、非 HTTP 的头插入、非终结 TLS
//! 的加密套件）也一并剔除，避免把陈旧输入发给平台。

use lb_console_api::{
    InsertHeaders, ListenerPayload, ListenerProtocol, LoadBalancerPayload, MemberPayload,
    MonitorPayload, MonitorType, PoolPayload, SessionPersistence,
};

use crate::fields::{FieldModel, ListenerFields, MonitorFields};

/// 端口串异常时的兜底值（与创建默认一致）
const FALLBACK_LISTENER_PORT: u16 = 80;

/// 序列化字段模型
pub fn build_payload(data: &FieldModel) -> LoadBalancerPayload {
    LoadBalancerPayload {
        name: data.name.trim().to_string(),
        description: opt_text(&data.description),
        vip_subnet_id: data.vip_subnet_id.clone(),
        vip_address: opt_text(&data.vip_address),
        network_id: opt_text(&data.network_id),
        listener: data
            .create_listener
            .then(|| listener_payload(&data.listener)),
        pool: data.create_pool.then(|| pool_payload(data)),
        healthmonitor: data.create_monitor.then(|| monitor_payload(&data.monitor)),
    }
}

fn listener_payload(listener: &ListenerFields) -> ListenerPayload {
    let protocol = listener.protocol.unwrap_or(ListenerProtocol::Http);
    let with_timeouts = protocol.supports_transport_timeouts();

    let insert_headers = if protocol.supports_insert_headers()
        && (listener.insert_x_forwarded_for
            || listener.insert_x_forwarded_port
            || listener.insert_x_forwarded_proto)
    {
        Some(InsertHeaders {
            x_forwarded_for: Some(listener.insert_x_forwarded_for),
            x_forwarded_port: Some(listener.insert_x_forwarded_port),
            x_forwarded_proto: Some(listener.insert_x_forwarded_proto),
        })
    } else {
        None
    };

    ListenerPayload {
        name: listener.name.trim().to_string(),
        protocol,
        protocol_port: listener
            .port
            .trim()
            .parse()
            .unwrap_or(FALLBACK_LISTENER_PORT),
        connection_limit: parse_number(&listener.connection_limit),
        allowed_cidrs: split_cidrs(&listener.allowed_cidrs),
        timeout_client_data: with_timeouts
            .then(|| parse_number(&listener.client_data_timeout))
            .flatten(),
        timeout_tcp_inspect: with_timeouts
            .then(|| parse_number(&listener.tcp_inspect_timeout))
            .flatten(),
        timeout_member_connect: with_timeouts
            .then(|| parse_number(&listener.member_connect_timeout))
            .flatten(),
        timeout_member_data: with_timeouts
            .then(|| parse_number(&listener.member_data_timeout))
            .flatten(),
        insert_headers,
        tls_ciphers: protocol
            .is_terminated_tls()
            .then(|| opt_text(&listener.tls_cipher_string))
            .flatten(),
    }
}

fn pool_payload(data: &FieldModel) -> PoolPayload {
    let pool = &data.pool;
    PoolPayload {
        name: pool.name.trim().to_string(),
        description: opt_text(&pool.description),
        protocol: pool.protocol,
        lb_algorithm: pool.algorithm,
        session_persistence: pool.persistence.map(|kind| SessionPersistence {
            kind,
            cookie_name: kind
                .needs_cookie_name()
                .then(|| pool.cookie_name.trim().to_string()),
        }),
        tls_enabled: pool.tls_enabled.then_some(true),
        tls_ciphers: pool
            .tls_enabled
            .then(|| opt_text(&pool.tls_cipher))
            .flatten(),
        members: data
            .members
            .iter()
            .map(|m| MemberPayload {
                id: m.id.clone(),
                name: m.name.clone(),
                kind: m.kind,
                address: m.address.clone(),
                protocol_port: m.port,
                weight: m.weight,
                role: m.role,
            })
            .collect(),
    }
}

fn monitor_payload(monitor: &MonitorFields) -> MonitorPayload {
    let monitor_type = monitor.monitor_type.unwrap_or(MonitorType::Http);
    let http_probe = monitor_type.is_http_probe();

    MonitorPayload {
        name: monitor.name.trim().to_string(),
        monitor_type,
        delay: parse_number(&monitor.delay).unwrap_or_default(),
        timeout: parse_number(&monitor.timeout).unwrap_or_default(),
        max_retries: parse_number(&monitor.max_retries).unwrap_or_default(),
        max_retries_down: parse_number(&monitor.max_retries_down),
        http_method: http_probe
            .then(|| opt_text(&monitor.http_method))
            .flatten(),
        expected_codes: http_probe
            .then(|| opt_text(&monitor.expected_codes))
            .flatten(),
        url_path: http_probe.then(|| opt_text(&monitor.url_path)).flatten(),
    }
}

fn opt_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_number(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

/// 逗号分隔的 CIDR 串拆成列表，空白项丢弃
fn split_cidrs(value: &str) -> Option<Vec<String>> {
    let cidrs: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if cidrs.is_empty() { None } else { Some(cidrs) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lb_console_api::{MemberKind, PoolAlgorithm, SessionPersistenceKind};

    fn filled_model() -> FieldModel {
        let mut data = FieldModel::new_create("net-1");
        data.name = "lb1".to_string();
        data.vip_subnet_id = "subnet-a".to_string();
        data.listener.name = "front".to_string();
        data.pool.name = "backend".to_string();
        data.monitor.name = "probe".to_string();
        data
    }

    #[test]
    fn disabled_groups_are_stripped_even_with_stale_fields() {
        let mut data = filled_model();
        data.create_listener = false;
        data.create_pool = false;
        data.create_monitor = false;
        // 组里残留的旧输入不得出现在载荷里
        data.listener.port = "443".to_string();
        data.pool.name = "stale".to_string();
        data.monitor.delay = "99".to_string();

        let payload = build_payload(&data);
        assert!(payload.listener.is_none());
        assert!(payload.pool.is_none());
        assert!(payload.healthmonitor.is_none());
        assert_eq!(payload.name, "lb1");
    }

    #[test]
    fn udp_listener_drops_transport_timeouts() {
        let mut data = filled_model();
        data.listener.protocol = Some(ListenerProtocol::Udp);
        data.listener.client_data_timeout = "50000".to_string();
        data.listener.member_data_timeout = "50000".to_string();

        let listener = build_payload(&data).listener.unwrap();
        assert!(listener.timeout_client_data.is_none());
        assert!(listener.timeout_member_data.is_none());
    }

    #[test]
    fn tcp_listener_keeps_transport_timeouts() {
        let mut data = filled_model();
        data.listener.protocol = Some(ListenerProtocol::Tcp);
        data.listener.client_data_timeout = "50000".to_string();

        let listener = build_payload(&data).listener.unwrap();
        assert_eq!(listener.timeout_client_data, Some(50000));
        assert!(listener.insert_headers.is_none());
    }

    #[test]
    fn insert_headers_only_for_http_protocols() {
        let mut data = filled_model();
        data.listener.insert_x_forwarded_for = true;

        data.listener.protocol = Some(ListenerProtocol::Http);
        let headers = build_payload(&data).listener.unwrap().insert_headers;
        assert_eq!(headers.unwrap().x_forwarded_for, Some(true));

        data.listener.protocol = Some(ListenerProtocol::Tcp);
        assert!(build_payload(&data).listener.unwrap().insert_headers.is_none());
    }

    #[test]
    fn tls_ciphers_only_for_terminated_https() {
        let mut data = filled_model();
        data.listener.tls_cipher_string = "ECDHE-RSA-AES128-GCM-SHA256".to_string();

        data.listener.protocol = Some(ListenerProtocol::Http);
        assert!(build_payload(&data).listener.unwrap().tls_ciphers.is_none());

        data.listener.protocol = Some(ListenerProtocol::TerminatedHttps);
        assert_eq!(
            build_payload(&data).listener.unwrap().tls_ciphers.as_deref(),
            Some("ECDHE-RSA-AES128-GCM-SHA256")
        );
    }

    #[test]
    fn allowed_cidrs_split_on_commas() {
        let mut data = filled_model();
        data.listener.allowed_cidrs = " 10.0.0.0/24, 192.168.0.0/16 ,,".to_string();

        let listener = build_payload(&data).listener.unwrap();
        assert_eq!(
            listener.allowed_cidrs,
            Some(vec![
                "10.0.0.0/24".to_string(),
                "192.168.0.0/16".to_string()
            ])
        );
    }

    #[test]
    fn persistence_cookie_only_for_app_cookie() {
        let mut data = filled_model();
        data.pool.cookie_name = "sid".to_string();

        data.pool.persistence = Some(SessionPersistenceKind::AppCookie);
        let persistence = build_payload(&data).pool.unwrap().session_persistence.unwrap();
        assert_eq!(persistence.cookie_name.as_deref(), Some("sid"));

        data.pool.persistence = Some(SessionPersistenceKind::SourceIp);
        let persistence = build_payload(&data).pool.unwrap().session_persistence.unwrap();
        assert!(persistence.cookie_name.is_none());

        data.pool.persistence = None;
        assert!(build_payload(&data).pool.unwrap().session_persistence.is_none());
    }

    #[test]
    fn pool_carries_algorithm_and_members() {
        let mut data = filled_model();
        data.pool.algorithm = PoolAlgorithm::LeastConnections;
        data.members.push(crate::fields::MemberEntry {
            id: "inst-1".to_string(),
            name: "web-1".to_string(),
            kind: MemberKind::Internal,
            address: String::new(),
            port: 8080,
            weight: 2,
            role: lb_console_api::MemberRole::Member,
        });

        let pool = build_payload(&data).pool.unwrap();
        assert_eq!(pool.lb_algorithm, PoolAlgorithm::LeastConnections);
        assert_eq!(pool.members.len(), 1);
        assert_eq!(pool.members[0].protocol_port, 8080);
    }

    #[test]
    fn monitor_http_fields_dropped_for_tcp_probe() {
        let mut data = filled_model();
        data.monitor.monitor_type = Some(MonitorType::Tcp);

        let monitor = build_payload(&data).healthmonitor.unwrap();
        assert!(monitor.http_method.is_none());
        assert!(monitor.expected_codes.is_none());
        assert!(monitor.url_path.is_none());
        assert_eq!(monitor.delay, 5);
    }

    #[test]
    fn monitor_http_probe_keeps_http_fields() {
        let data = filled_model();
        let monitor = build_payload(&data).healthmonitor.unwrap();
        assert_eq!(monitor.http_method.as_deref(), Some("GET"));
        assert_eq!(monitor.expected_codes.as_deref(), Some("200"));
        assert_eq!(monitor.url_path.as_deref(), Some("/"));
    }
}
