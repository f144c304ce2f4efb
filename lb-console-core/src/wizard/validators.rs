//! 每步校验器
//!
//! 纯函数：输入完整字段模型，返回 None（通过）或一条给用户看的原因。
//! 组开关关闭时对应步骤直接放行。校验失败永远不是 Err —— 它是
//! 正常的交互状态，不抛异常也不写日志。

use crate::fields::FieldModel;

use super::WizardStep;

/// 运行指定步骤的校验器
pub fn validate_step(step: WizardStep, data: &FieldModel) -> Option<String> {
    match step {
        WizardStep::Details => validate_details(data),
        WizardStep::Listener => validate_listener(data),
        WizardStep::Pool => validate_pool(data),
        // 成员列表允许为空，数量不阻塞前进
        WizardStep::Members => None,
        WizardStep::Monitor => validate_monitor(data),
    }
}

fn validate_details(data: &FieldModel) -> Option<String> {
    if data.name.trim().is_empty() {
        return Some("Name is required.".to_string());
    }
    if data.vip_subnet_id.trim().is_empty() {
        return Some("VIP subnet is required.".to_string());
    }
    None
}

fn validate_listener(data: &FieldModel) -> Option<String> {
    if !data.create_listener {
        return None;
    }
    if data.listener.name.trim().is_empty() {
        return Some("Listener name is required.".to_string());
    }
    if data.listener.protocol.is_none() {
        return Some("Listener protocol is required.".to_string());
    }
    validate_port(&data.listener.port)
}

fn validate_pool(data: &FieldModel) -> Option<String> {
    if !data.create_pool {
        return None;
    }
    if data.pool.name.trim().is_empty() {
        return Some("Pool name is required.".to_string());
    }
    let needs_cookie = data
        .pool
        .persistence
        .is_some_and(|p| p.needs_cookie_name());
    if needs_cookie && data.pool.cookie_name.trim().is_empty() {
        return Some("Cookie name is required for APP_COOKIE persistence.".to_string());
    }
    None
}

fn validate_monitor(data: &FieldModel) -> Option<String> {
    if !data.create_monitor {
        return None;
    }
    if data.monitor.name.trim().is_empty() {
        return Some("Monitor name is required.".to_string());
    }
    if data.monitor.monitor_type.is_none() {
        return Some("Monitor type is required.".to_string());
    }
    required_number("Delay", &data.monitor.delay)
        .or_else(|| required_number("Timeout", &data.monitor.timeout))
        .or_else(|| required_number("Max retries", &data.monitor.max_retries))
}

/// 监听端口：必填且在 1–65535 内
fn validate_port(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Listener port is required.".to_string());
    }
    match trimmed.parse::<u32>() {
        Ok(port) if (1..=65535).contains(&port) => None,
        Ok(_) => Some("Listener port must be between 1 and 65535.".to_string()),
        Err(_) => Some("Listener port must be a number.".to_string()),
    }
}

/// 数字必填检查。存在性 = 非空且可解析；"0" 是合法值，
/// 绝不用真值性判断把零当成缺失。
fn required_number(label: &str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{label} is required."));
    }
    if trimmed.parse::<u32>().is_err() {
        return Some(format!("{label} must be a number."));
    }
    None
}
