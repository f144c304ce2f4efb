//! 向导会话状态
//!
//! 控制器（步骤 / 校验 / 字段模型）住在 core；这里只保存渲染和
//! 输入路由需要的视图状态：字段焦点、成员步骤的录入控件、
//! 以及拉回来的选项集合。

use uuid::Uuid;

use lb_console_api::{LoadBalancer, OptionSets};
use lb_console_core::{FieldModel, WizardController, WizardStep};

/// 成员步骤自有的录入控件（不属于字段模型）
#[derive(Debug, Clone)]
pub struct MemberControls {
    /// 内部成员候选下拉的光标
    pub instance_cursor: usize,
    /// 外部成员 IP 输入框
    pub external_ip: String,
    /// 外部成员端口输入框
    pub external_port: String,
    /// 外部成员权重输入框
    pub external_weight: String,
    /// 成员列表光标（用于移除）
    pub list_cursor: usize,
}

impl Default for MemberControls {
    fn default() -> Self {
        Self {
            instance_cursor: 0,
            external_ip: String::new(),
            external_port: "80".to_string(),
            external_weight: "1".to_string(),
            list_cursor: 0,
        }
    }
}

impl MemberControls {
    /// 添加成功后复位录入控件
    pub fn reset_inputs(&mut self) {
        self.instance_cursor = 0;
        self.external_ip.clear();
        self.external_port = "80".to_string();
        self.external_weight = "1".to_string();
    }
}

/// 一次向导会话
pub struct WizardSession {
    pub controller: WizardController,
    /// 选项集合（异步到达前为 None）
    pub options: Option<OptionSets>,
    /// 当前步骤内的字段焦点
    pub focus: usize,
    pub members: MemberControls,
}

impl WizardSession {
    /// 创建模式
    pub fn create(network_id: impl Into<String>) -> Self {
        Self {
            controller: WizardController::new_create(network_id),
            options: None,
            focus: 0,
            members: MemberControls::default(),
        }
    }

    /// 编辑模式
    pub fn edit(lb: &LoadBalancer) -> Self {
        Self {
            controller: WizardController::new_edit(lb),
            options: None,
            focus: 0,
            members: MemberControls::default(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.controller.session()
    }

    /// 当前步骤可见的字段（随开关和协议联动）
    pub fn fields(&self) -> Vec<WizardField> {
        step_fields(self.controller.step(), &self.controller.data)
    }

    /// 焦点字段。步骤切换或开关翻转后字段列表会缩短，
    /// 读取前先收敛。
    pub fn focused(&self) -> Option<WizardField> {
        let fields = self.fields();
        if fields.is_empty() {
            return None;
        }
        fields.get(self.focus.min(fields.len() - 1)).copied()
    }

    pub fn clamp_focus(&mut self) {
        let count = self.fields().len();
        if count == 0 {
            self.focus = 0;
        } else if self.focus >= count {
            self.focus = count - 1;
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focus = if self.focus == 0 { count - 1 } else { self.focus - 1 };
        }
    }
}

/// 向导字段标识。渲染和输入路由共用同一份可见性计算，
/// 二者永远一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardField {
    // 第一步：基础信息
    Name,
    Description,
    VipSubnet,
    VipAddress,

    // 第二步：监听器
    CreateListener,
    ListenerName,
    ListenerProtocol,
    ListenerPort,
    ConnectionLimit,
    AllowedCidrs,
    ClientDataTimeout,
    TcpInspectTimeout,
    MemberConnectTimeout,
    MemberDataTimeout,
    InsertXForwardedFor,
    InsertXForwardedPort,
    InsertXForwardedProto,
    TlsCipherString,

    // 第三步：资源池
    CreatePool,
    PoolName,
    PoolAlgorithm,
    PoolProtocol,
    PoolDesc,
    SessionPersistence,
    CookieName,
    PoolTlsEnabled,
    PoolTlsCipher,

    // 第四步：成员
    MemberInstance,
    ExternalIp,
    ExternalPort,
    ExternalWeight,
    MemberList,

    // 第五步：健康检查
    CreateMonitor,
    MonitorName,
    MonitorType,
    HttpMethod,
    ExpectedCodes,
    UrlPath,
    Delay,
    Timeout,
    MaxRetries,
    MaxRetriesDown,
}

impl WizardField {
    /// 渲染标签
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::VipSubnet => "VIP Subnet",
            Self::VipAddress => "VIP Address",
            Self::CreateListener => "Create Listener",
            Self::ListenerName => "Listener Name",
            Self::ListenerProtocol => "Protocol",
            Self::ListenerPort => "Port",
            Self::ConnectionLimit => "Connection Limit",
            Self::AllowedCidrs => "Allowed CIDRs",
            Self::ClientDataTimeout => "Client Data Timeout",
            Self::TcpInspectTimeout => "TCP Inspect Timeout",
            Self::MemberConnectTimeout => "Member Connect Timeout",
            Self::MemberDataTimeout => "Member Data Timeout",
            Self::InsertXForwardedFor => "Insert X-Forwarded-For",
            Self::InsertXForwardedPort => "Insert X-Forwarded-Port",
            Self::InsertXForwardedProto => "Insert X-Forwarded-Proto",
            Self::TlsCipherString => "TLS Ciphers",
            Self::CreatePool => "Create Pool",
            Self::PoolName => "Pool Name",
            Self::PoolAlgorithm => "Algorithm",
            Self::PoolProtocol => "Pool Protocol",
            Self::PoolDesc => "Pool Description",
            Self::SessionPersistence => "Session Persistence",
            Self::CookieName => "Cookie Name",
            Self::PoolTlsEnabled => "Pool TLS",
            Self::PoolTlsCipher => "Pool TLS Ciphers",
            Self::MemberInstance => "Add Instance",
            Self::ExternalIp => "External IP",
            Self::ExternalPort => "External Port",
            Self::ExternalWeight => "External Weight",
            Self::MemberList => "Members",
            Self::CreateMonitor => "Create Monitor",
            Self::MonitorName => "Monitor Name",
            Self::MonitorType => "Monitor Type",
            Self::HttpMethod => "HTTP Method",
            Self::ExpectedCodes => "Expected Codes",
            Self::UrlPath => "URL Path",
            Self::Delay => "Delay",
            Self::Timeout => "Timeout",
            Self::MaxRetries => "Max Retries",
            Self::MaxRetriesDown => "Max Retries Down",
        }
    }
}

/// 计算某一步当前可见的字段
pub fn step_fields(step: WizardStep, data: &FieldModel) -> Vec<WizardField> {
    use WizardField as F;

    match step {
        WizardStep::Details => vec![F::Name, F::Description, F::VipSubnet, F::VipAddress],

        WizardStep::Listener => {
            let mut fields = vec![F::CreateListener];
            if data.create_listener {
                fields.extend([
                    F::ListenerName,
                    F::ListenerProtocol,
                    F::ListenerPort,
                    F::ConnectionLimit,
                    F::AllowedCidrs,
                ]);
                let protocol = data.listener.protocol;
                if protocol.is_some_and(|p| p.supports_transport_timeouts()) {
                    fields.extend([
                        F::ClientDataTimeout,
                        F::TcpInspectTimeout,
                        F::MemberConnectTimeout,
                        F::MemberDataTimeout,
                    ]);
                }
                if protocol.is_some_and(|p| p.supports_insert_headers()) {
                    fields.extend([
                        F::InsertXForwardedFor,
                        F::InsertXForwardedPort,
                        F::InsertXForwardedProto,
                    ]);
                }
                if protocol.is_some_and(|p| p.is_terminated_tls()) {
                    fields.push(F::TlsCipherString);
                }
            }
            fields
        }

        WizardStep::Pool => {
            let mut fields = vec![F::CreatePool];
            if data.create_pool {
                fields.extend([
                    F::PoolName,
                    F::PoolAlgorithm,
                    F::PoolProtocol,
                    F::PoolDesc,
                    F::SessionPersistence,
                ]);
                if data.pool.persistence.is_some_and(|p| p.needs_cookie_name()) {
                    fields.push(F::CookieName);
                }
                fields.push(F::PoolTlsEnabled);
                if data.pool.tls_enabled {
                    fields.push(F::PoolTlsCipher);
                }
            }
            fields
        }

        // 成员列表只在启用资源池时可编辑
        WizardStep::Members => {
            if data.create_pool {
                vec![
                    F::MemberInstance,
                    F::ExternalIp,
                    F::ExternalPort,
                    F::ExternalWeight,
                    F::MemberList,
                ]
            } else {
                Vec::new()
            }
        }

        WizardStep::Monitor => {
            let mut fields = vec![F::CreateMonitor];
            if data.create_monitor {
                fields.extend([F::MonitorName, F::MonitorType]);
                if data
                    .monitor
                    .monitor_type
                    .is_some_and(|t| t.is_http_probe())
                {
                    fields.extend([F::HttpMethod, F::ExpectedCodes, F::UrlPath]);
                }
                fields.extend([F::Delay, F::Timeout, F::MaxRetries, F::MaxRetriesDown]);
            }
            fields
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lb_console_api::{ListenerProtocol, MonitorType, SessionPersistenceKind};

    #[test]
    fn udp_listener_hides_timeouts_and_headers() {
        let mut data = FieldModel::new_create("net-1");
        data.listener.protocol = Some(ListenerProtocol::Udp);

        let fields = step_fields(WizardStep::Listener, &data);
        assert!(!fields.contains(&WizardField::ClientDataTimeout));
        assert!(!fields.contains(&WizardField::InsertXForwardedFor));
        assert!(!fields.contains(&WizardField::TlsCipherString));
    }

    #[test]
    fn http_listener_shows_headers_but_not_tls() {
        let data = FieldModel::new_create("net-1");

        let fields = step_fields(WizardStep::Listener, &data);
        assert!(fields.contains(&WizardField::InsertXForwardedFor));
        assert!(fields.contains(&WizardField::ClientDataTimeout));
        assert!(!fields.contains(&WizardField::TlsCipherString));
    }

    #[test]
    fn terminated_https_shows_tls_ciphers() {
        let mut data = FieldModel::new_create("net-1");
        data.listener.protocol = Some(ListenerProtocol::TerminatedHttps);

        let fields = step_fields(WizardStep::Listener, &data);
        assert!(fields.contains(&WizardField::TlsCipherString));
    }

    #[test]
    fn disabled_listener_leaves_only_toggle() {
        let mut data = FieldModel::new_create("net-1");
        data.create_listener = false;

        assert_eq!(
            step_fields(WizardStep::Listener, &data),
            vec![WizardField::CreateListener]
        );
    }

    #[test]
    fn cookie_name_appears_only_for_app_cookie() {
        let mut data = FieldModel::new_create("net-1");
        assert!(!step_fields(WizardStep::Pool, &data).contains(&WizardField::CookieName));

        data.pool.persistence = Some(SessionPersistenceKind::AppCookie);
        assert!(step_fields(WizardStep::Pool, &data).contains(&WizardField::CookieName));

        data.pool.persistence = Some(SessionPersistenceKind::SourceIp);
        assert!(!step_fields(WizardStep::Pool, &data).contains(&WizardField::CookieName));
    }

    #[test]
    fn members_step_is_empty_without_pool() {
        let mut data = FieldModel::new_create("net-1");
        data.create_pool = false;

        assert!(step_fields(WizardStep::Members, &data).is_empty());
    }

    #[test]
    fn tcp_monitor_hides_http_fields() {
        let mut data = FieldModel::new_create("net-1");
        data.monitor.monitor_type = Some(MonitorType::Tcp);

        let fields = step_fields(WizardStep::Monitor, &data);
        assert!(!fields.contains(&WizardField::HttpMethod));
        assert!(fields.contains(&WizardField::Delay));
    }

    #[test]
    fn focus_wraps_and_clamps() {
        let mut session = WizardSession::create("net-1");
        let count = session.fields().len();

        session.focus_previous();
        assert_eq!(session.focus, count - 1);
        session.focus_next();
        assert_eq!(session.focus, 0);

        session.focus = 99;
        session.clamp_focus();
        assert_eq!(session.focus, count - 1);
    }
}
