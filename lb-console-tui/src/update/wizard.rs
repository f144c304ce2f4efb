//! 向导更新逻辑
//!
//! 把输入消息路由成控制器操作。文本编辑统一走
//! "读当前值 → 变更 → 通过补丁写回" 的路径，字段模型只有
//! 一个修改入口；成员步骤的录入控件是视图自有状态，直接改。

use lb_console_api::{ListenerProtocol, MonitorType, PoolAlgorithm, SessionPersistenceKind};
use lb_console_core::{FieldUpdate, WizardStep};

use crate::message::WizardMessage;
use crate::model::{App, WizardField, WizardSession};

/// 处理向导消息
pub fn update(app: &mut App, msg: WizardMessage) {
    let Some(session) = app.wizard.as_mut() else {
        return;
    };

    match msg {
        WizardMessage::Close => {
            app.wizard = None;
            app.clear_status();
        }

        WizardMessage::NextStep => {
            if session.controller.go_next() {
                session.focus = 0;
                session.members.list_cursor = 0;
            }
        }

        WizardMessage::PrevStep => {
            session.controller.go_previous();
            session.focus = 0;
            session.members.list_cursor = 0;
        }

        WizardMessage::JumpTo(index) => {
            if let Some(step) = WizardStep::from_index(index) {
                if session.controller.jump_to(step) {
                    session.focus = 0;
                    session.members.list_cursor = 0;
                }
            }
        }

        WizardMessage::FocusNext => {
            session.clamp_focus();
            session.focus_next();
        }

        WizardMessage::FocusPrevious => {
            session.clamp_focus();
            session.focus_previous();
        }

        WizardMessage::Input(c) => {
            input_char(session, c);
        }

        WizardMessage::Backspace => {
            backspace(session);
        }

        WizardMessage::CycleNext => {
            cycle(session, true);
        }

        WizardMessage::CyclePrev => {
            cycle(session, false);
        }

        WizardMessage::Activate => {
            activate(session);
            session.clamp_focus();
        }

        WizardMessage::RemoveSelectedMember => {
            remove_selected_member(session);
        }

        WizardMessage::Submit => {
            if session.controller.is_loading() {
                return;
            }
            if let Some(payload) = session.controller.submit() {
                let session_id = session.session_id();
                let mode = session.controller.mode().clone();
                app.backend.submit(session_id, mode, payload);
            }
        }
    }
}

/// 向焦点字段追加一个字符
fn input_char(session: &mut WizardSession, c: char) {
    if c.is_control() {
        return;
    }
    let Some(field) = session.focused() else {
        return;
    };
    if let Some(mut value) = text_value(session, field) {
        value.push(c);
        apply_text(session, field, value);
    }
}

/// 焦点字段退格
fn backspace(session: &mut WizardSession) {
    let Some(field) = session.focused() else {
        return;
    };
    if let Some(mut value) = text_value(session, field) {
        value.pop();
        apply_text(session, field, value);
    }
}

/// 读出焦点字段的当前文本（非文本字段返回 None）
fn text_value(session: &WizardSession, field: WizardField) -> Option<String> {
    use WizardField as F;

    let data = &session.controller.data;
    let value = match field {
        F::Name => data.name.clone(),
        F::Description => data.description.clone(),
        F::VipAddress => data.vip_address.clone(),
        F::ListenerName => data.listener.name.clone(),
        F::ListenerPort => data.listener.port.clone(),
        F::ConnectionLimit => data.listener.connection_limit.clone(),
        F::AllowedCidrs => data.listener.allowed_cidrs.clone(),
        F::ClientDataTimeout => data.listener.client_data_timeout.clone(),
        F::TcpInspectTimeout => data.listener.tcp_inspect_timeout.clone(),
        F::MemberConnectTimeout => data.listener.member_connect_timeout.clone(),
        F::MemberDataTimeout => data.listener.member_data_timeout.clone(),
        F::TlsCipherString => data.listener.tls_cipher_string.clone(),
        F::PoolName => data.pool.name.clone(),
        F::PoolDesc => data.pool.description.clone(),
        F::CookieName => data.pool.cookie_name.clone(),
        F::PoolTlsCipher => data.pool.tls_cipher.clone(),
        F::MonitorName => data.monitor.name.clone(),
        F::HttpMethod => data.monitor.http_method.clone(),
        F::ExpectedCodes => data.monitor.expected_codes.clone(),
        F::UrlPath => data.monitor.url_path.clone(),
        F::Delay => data.monitor.delay.clone(),
        F::Timeout => data.monitor.timeout.clone(),
        F::MaxRetries => data.monitor.max_retries.clone(),
        F::MaxRetriesDown => data.monitor.max_retries_down.clone(),
        F::ExternalIp => session.members.external_ip.clone(),
        F::ExternalPort => session.members.external_port.clone(),
        F::ExternalWeight => session.members.external_weight.clone(),
        _ => return None,
    };
    Some(value)
}

/// 把编辑后的文本写回焦点字段
fn apply_text(session: &mut WizardSession, field: WizardField, value: String) {
    use WizardField as F;

    let patch = match field {
        F::Name => FieldUpdate::Name(value),
        F::Description => FieldUpdate::Description(value),
        F::VipAddress => FieldUpdate::VipAddress(value),
        F::ListenerName => FieldUpdate::ListenerName(value),
        F::ListenerPort => FieldUpdate::ListenerPort(value),
        F::ConnectionLimit => FieldUpdate::ConnectionLimit(value),
        F::AllowedCidrs => FieldUpdate::AllowedCidrs(value),
        F::ClientDataTimeout => FieldUpdate::ClientDataTimeout(value),
        F::TcpInspectTimeout => FieldUpdate::TcpInspectTimeout(value),
        F::MemberConnectTimeout => FieldUpdate::MemberConnectTimeout(value),
        F::MemberDataTimeout => FieldUpdate::MemberDataTimeout(value),
        F::TlsCipherString => FieldUpdate::TlsCipherString(value),
        F::PoolName => FieldUpdate::PoolName(value),
        F::PoolDesc => FieldUpdate::PoolDesc(value),
        F::CookieName => FieldUpdate::CookieName(value),
        F::PoolTlsCipher => FieldUpdate::PoolTlsCipher(value),
        F::MonitorName => FieldUpdate::MonitorName(value),
        F::HttpMethod => FieldUpdate::HttpMethod(value),
        F::ExpectedCodes => FieldUpdate::ExpectedCodes(value),
        F::UrlPath => FieldUpdate::UrlPath(value),
        F::Delay => FieldUpdate::Delay(value),
        F::Timeout => FieldUpdate::Timeout(value),
        F::MaxRetries => FieldUpdate::MaxRetries(value),
        F::MaxRetriesDown => FieldUpdate::MaxRetriesDown(value),
        F::ExternalIp => {
            session.members.external_ip = value;
            return;
        }
        F::ExternalPort => {
            session.members.external_port = value;
            return;
        }
        F::ExternalWeight => {
            session.members.external_weight = value;
            return;
        }
        _ => return,
    };
    session.controller.update(patch);
}

/// 下拉字段换选项 / 列表光标移动
fn cycle(session: &mut WizardSession, forward: bool) {
    use WizardField as F;

    let Some(field) = session.focused() else {
        return;
    };
    let data = &session.controller.data;

    match field {
        F::VipSubnet => {
            let Some(options) = session.options.as_ref() else {
                return;
            };
            if options.subnets.is_empty() {
                return;
            }
            let current = options
                .subnets
                .iter()
                .position(|s| s.value == data.vip_subnet_id);
            let next = cycle_index(options.subnets.len(), current, forward);
            let value = options.subnets[next].value.clone();
            session.controller.update(FieldUpdate::VipSubnetId(value));
        }

        F::ListenerProtocol => {
            let all = ListenerProtocol::ALL;
            let current = data
                .listener
                .protocol
                .and_then(|p| all.iter().position(|x| *x == p));
            let next = all[cycle_index(all.len(), current, forward)];
            session
                .controller
                .update(FieldUpdate::ListenerProtocol(Some(next)));
        }

        F::PoolAlgorithm => {
            let all = PoolAlgorithm::ALL;
            let current = all.iter().position(|x| *x == data.pool.algorithm);
            let next = all[cycle_index(all.len(), current, forward)];
            session.controller.update(FieldUpdate::PoolAlgorithm(next));
        }

        F::PoolProtocol => {
            let all = ListenerProtocol::ALL;
            let current = all.iter().position(|x| *x == data.pool.protocol);
            let next = all[cycle_index(all.len(), current, forward)];
            session.controller.update(FieldUpdate::PoolProtocol(next));
        }

        F::SessionPersistence => {
            // None 也是一档
            let all: [Option<SessionPersistenceKind>; 4] = [
                None,
                Some(SessionPersistenceKind::SourceIp),
                Some(SessionPersistenceKind::HttpCookie),
                Some(SessionPersistenceKind::AppCookie),
            ];
            let current = all.iter().position(|x| *x == data.pool.persistence);
            let next = all[cycle_index(all.len(), current, forward)];
            session
                .controller
                .update(FieldUpdate::SessionPersistence(next));
        }

        F::MonitorType => {
            let all = MonitorType::ALL;
            let current = data
                .monitor
                .monitor_type
                .and_then(|t| all.iter().position(|x| *x == t));
            let next = all[cycle_index(all.len(), current, forward)];
            session
                .controller
                .update(FieldUpdate::MonitorType(Some(next)));
        }

        F::MemberInstance => {
            let Some(options) = session.options.as_ref() else {
                return;
            };
            let candidates = session.controller.available_instances(&options.instances);
            if candidates.is_empty() {
                return;
            }
            session.members.instance_cursor = cycle_index(
                candidates.len(),
                Some(session.members.instance_cursor.min(candidates.len() - 1)),
                forward,
            );
        }

        F::MemberList => {
            let count = data.members.len();
            if count == 0 {
                return;
            }
            session.members.list_cursor = cycle_index(
                count,
                Some(session.members.list_cursor.min(count - 1)),
                forward,
            );
        }

        _ => {}
    }
}

/// 激活焦点控件：开关翻转、成员添加
fn activate(session: &mut WizardSession) {
    use WizardField as F;

    let Some(field) = session.focused() else {
        return;
    };
    let data = &session.controller.data;

    match field {
        F::CreateListener => {
            let flipped = !data.create_listener;
            session.controller.update(FieldUpdate::CreateListener(flipped));
        }
        F::CreatePool => {
            let flipped = !data.create_pool;
            session.controller.update(FieldUpdate::CreatePool(flipped));
        }
        F::CreateMonitor => {
            let flipped = !data.create_monitor;
            session.controller.update(FieldUpdate::CreateMonitor(flipped));
        }
        F::InsertXForwardedFor => {
            let flipped = !data.listener.insert_x_forwarded_for;
            session
                .controller
                .update(FieldUpdate::InsertXForwardedFor(flipped));
        }
        F::InsertXForwardedPort => {
            let flipped = !data.listener.insert_x_forwarded_port;
            session
                .controller
                .update(FieldUpdate::InsertXForwardedPort(flipped));
        }
        F::InsertXForwardedProto => {
            let flipped = !data.listener.insert_x_forwarded_proto;
            session
                .controller
                .update(FieldUpdate::InsertXForwardedProto(flipped));
        }
        F::PoolTlsEnabled => {
            let flipped = !data.pool.tls_enabled;
            session.controller.update(FieldUpdate::PoolTlsEnabled(flipped));
        }

        F::MemberInstance => {
            let Some(options) = session.options.as_ref() else {
                return;
            };
            let instances = options.instances.clone();
            let candidates = session.controller.available_instances(&instances);
            let Some(choice) = candidates.get(session.members.instance_cursor) else {
                return;
            };
            let instance_id = choice.value.clone();
            if session.controller.add_internal_member(&instance_id, &instances) {
                session.members.reset_inputs();
            }
        }

        F::ExternalIp | F::ExternalPort | F::ExternalWeight => {
            let ip = session.members.external_ip.clone();
            let port = session.members.external_port.clone();
            let weight = session.members.external_weight.clone();
            if session.controller.add_external_member(&ip, &port, &weight) {
                session.members.reset_inputs();
            }
        }

        _ => {}
    }
}

/// 移除成员列表光标处的成员
fn remove_selected_member(session: &mut WizardSession) {
    let cursor = session.members.list_cursor;
    let Some(id) = session
        .controller
        .data
        .members
        .get(cursor)
        .map(|m| m.id.clone())
    else {
        return;
    };
    session.controller.remove_member(&id);

    let count = session.controller.data.members.len();
    if session.members.list_cursor >= count {
        session.members.list_cursor = count.saturating_sub(1);
    }
}

/// 环形移动索引
fn cycle_index(len: usize, current: Option<usize>, forward: bool) -> usize {
    match current {
        None => 0,
        Some(i) if forward => (i + 1) % len,
        Some(0) => len - 1,
        Some(i) => i - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_index_wraps_both_directions() {
        assert_eq!(cycle_index(3, Some(2), true), 0);
        assert_eq!(cycle_index(3, Some(0), false), 2);
        assert_eq!(cycle_index(3, Some(1), true), 2);
        assert_eq!(cycle_index(3, None, true), 0);
        assert_eq!(cycle_index(3, None, false), 0);
    }
}
