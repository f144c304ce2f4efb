//! 向导弹窗视图
//!
//! 五步页签 + 当前步骤的字段行 + 校验消息行。
//! 字段可见性与输入路由共用 [`WizardSession::fields`]，
//! 渲染出来的就是能编辑的。

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use lb_console_core::{WizardMode, WizardStep};

use crate::model::{App, WizardField, WizardSession};
use crate::view::components::modal::centered_rect;
use crate::view::theme::{colors, ThemeColors};

/// 弹窗宽度
const WIZARD_WIDTH: u16 = 66;

/// 渲染向导弹窗（如果有活动会话）
pub fn render(app: &App, frame: &mut Frame) {
    let Some(ref session) = app.wizard else {
        return;
    };
    let c = colors();

    let lines = body_lines(session, &c);
    let height = (lines.len() as u16 + 2).clamp(12, frame.area().height.saturating_sub(2));
    let area = centered_rect(WIZARD_WIDTH, height, frame.area());

    frame.render_widget(Clear, area);

    let title = match session.controller.mode() {
        WizardMode::Create => " Create Load Balancer ",
        WizardMode::Edit { .. } => " Edit Load Balancer ",
    };
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.accent));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// 弹窗内容行
fn body_lines(session: &WizardSession, c: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![tabs_line(session, c), Line::from("")];

    if session.controller.is_loading() {
        lines.push(Line::styled(
            "  Loading configuration...",
            Style::default().fg(c.muted),
        ));
        return lines;
    }

    let fields = session.fields();
    if fields.is_empty() {
        // 成员步骤在资源池关闭时没有可编辑内容
        lines.push(Line::styled(
            "  Enable the pool to manage members.",
            Style::default().fg(c.muted),
        ));
    }

    let focus = if fields.is_empty() {
        0
    } else {
        session.focus.min(fields.len() - 1)
    };

    for (i, field) in fields.iter().enumerate() {
        let focused = i == focus;
        if *field == WizardField::MemberList {
            lines.extend(member_list_lines(session, focused, c));
        } else {
            lines.push(field_line(session, *field, focused, c));
        }
    }

    lines.push(Line::from(""));
    if session.controller.is_saving() {
        lines.push(Line::styled(
            "  Saving...",
            Style::default().fg(c.accent).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(message) = session.controller.validation_message() {
        lines.push(Line::styled(
            format!("  {message}"),
            Style::default().fg(c.error),
        ));
    }

    lines
}

/// 步骤页签行
fn tabs_line(session: &WizardSession, c: &ThemeColors) -> Line<'static> {
    let current = session.controller.step();
    let mut spans = vec![Span::raw(" ")];
    for step in WizardStep::ALL {
        let label = format!(" {} {} ", step.index(), step.title());
        let style = if step == current {
            Style::default()
                .fg(c.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(c.muted)
        };
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}

/// 单个字段行
fn field_line(
    session: &WizardSession,
    field: WizardField,
    focused: bool,
    c: &ThemeColors,
) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default().fg(c.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(c.muted)
    };
    let value_style = Style::default().fg(c.fg);

    let value = field_value(session, field, focused);
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(c.accent)),
        Span::styled(format!("{:<24}", field.label()), label_style),
        Span::styled(value, value_style),
    ])
}

/// 字段值的展示文本
fn field_value(session: &WizardSession, field: WizardField, focused: bool) -> String {
    use WizardField as F;

    let data = &session.controller.data;
    let cursor = if focused { "_" } else { "" };
    let text = |value: &str| format!("{value}{cursor}");
    let select = |value: &str| format!("‹ {value} ›");
    let checkbox = |on: bool| if on { "[x]" } else { "[ ]" }.to_string();

    match field {
        F::Name => text(&data.name),
        F::Description => text(&data.description),
        F::VipAddress => text(&data.vip_address),
        F::VipSubnet => {
            let Some(options) = session.options.as_ref() else {
                return select("loading...");
            };
            match options
                .subnets
                .iter()
                .find(|s| s.value == data.vip_subnet_id)
            {
                Some(subnet) => match subnet.cidr {
                    Some(ref cidr) => select(&format!("{} ({cidr})", subnet.name)),
                    None => select(&subnet.name),
                },
                None if options.subnets.is_empty() => select("no subnets available"),
                None => select("select a subnet"),
            }
        }

        F::CreateListener => checkbox(data.create_listener),
        F::ListenerName => text(&data.listener.name),
        F::ListenerProtocol => match data.listener.protocol {
            Some(protocol) => select(protocol.name()),
            None => select("select"),
        },
        F::ListenerPort => text(&data.listener.port),
        F::ConnectionLimit => text(&data.listener.connection_limit),
        F::AllowedCidrs => text(&data.listener.allowed_cidrs),
        F::ClientDataTimeout => text(&data.listener.client_data_timeout),
        F::TcpInspectTimeout => text(&data.listener.tcp_inspect_timeout),
        F::MemberConnectTimeout => text(&data.listener.member_connect_timeout),
        F::MemberDataTimeout => text(&data.listener.member_data_timeout),
        F::InsertXForwardedFor => checkbox(data.listener.insert_x_forwarded_for),
        F::InsertXForwardedPort => checkbox(data.listener.insert_x_forwarded_port),
        F::InsertXForwardedProto => checkbox(data.listener.insert_x_forwarded_proto),
        F::TlsCipherString => text(&data.listener.tls_cipher_string),

        F::CreatePool => checkbox(data.create_pool),
        F::PoolName => text(&data.pool.name),
        F::PoolAlgorithm => select(data.pool.algorithm.name()),
        F::PoolProtocol => select(data.pool.protocol.name()),
        F::PoolDesc => text(&data.pool.description),
        F::SessionPersistence => match data.pool.persistence {
            Some(kind) => select(kind.name()),
            None => select("None"),
        },
        F::CookieName => text(&data.pool.cookie_name),
        F::PoolTlsEnabled => checkbox(data.pool.tls_enabled),
        F::PoolTlsCipher => text(&data.pool.tls_cipher),

        F::MemberInstance => {
            let Some(options) = session.options.as_ref() else {
                return select("loading...");
            };
            let candidates = session.controller.available_instances(&options.instances);
            if candidates.is_empty() {
                return select("no instances available");
            }
            let cursor = session.members.instance_cursor.min(candidates.len() - 1);
            let choice = candidates[cursor];
            select(&format!("{} (Enter to add)", choice.name))
        }
        F::ExternalIp => text(&session.members.external_ip),
        F::ExternalPort => text(&session.members.external_port),
        F::ExternalWeight => text(&session.members.external_weight),
        F::MemberList => String::new(),

        F::CreateMonitor => checkbox(data.create_monitor),
        F::MonitorName => text(&data.monitor.name),
        F::MonitorType => match data.monitor.monitor_type {
            Some(kind) => select(kind.name()),
            None => select("select"),
        },
        F::HttpMethod => text(&data.monitor.http_method),
        F::ExpectedCodes => text(&data.monitor.expected_codes),
        F::UrlPath => text(&data.monitor.url_path),
        F::Delay => text(&data.monitor.delay),
        F::Timeout => text(&data.monitor.timeout),
        F::MaxRetries => text(&data.monitor.max_retries),
        F::MaxRetriesDown => text(&data.monitor.max_retries_down),
    }
}

/// 成员列表渲染：标题行 + 每个成员一行
fn member_list_lines(
    session: &WizardSession,
    focused: bool,
    c: &ThemeColors,
) -> Vec<Line<'static>> {
    let members = &session.controller.data.members;
    let header_style = if focused {
        Style::default().fg(c.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(c.muted)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(if focused { "▸ " } else { "  " }.to_string(), Style::default().fg(c.accent)),
        Span::styled(
            format!("Members ({})", members.len()),
            header_style,
        ),
    ])];

    if members.is_empty() {
        lines.push(Line::styled(
            "      (empty; a pool without members is allowed)",
            Style::default().fg(c.muted),
        ));
        return lines;
    }

    let cursor = session.members.list_cursor.min(members.len() - 1);
    for (i, member) in members.iter().enumerate() {
        let marker = if focused && i == cursor { "› " } else { "  " };
        let kind = match member.kind {
            lb_console_api::MemberKind::Internal => "internal",
            lb_console_api::MemberKind::External => "external",
        };
        let address = if member.address.is_empty() {
            member.id.clone()
        } else {
            member.address.clone()
        };
        let style = if focused && i == cursor {
            Style::default().fg(c.fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(c.fg)
        };
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(marker.to_string(), Style::default().fg(c.accent)),
            Span::styled(
                format!(
                    "{:<18} {kind:<8} :{:<5} w{}",
                    member.name, member.port, member.weight
                ),
                style,
            ),
        ]));
    }

    if focused {
        lines.push(Line::styled(
            "      ←→ move · Del remove",
            Style::default().fg(c.muted),
        ));
    }
    lines
}
