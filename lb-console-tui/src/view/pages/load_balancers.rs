//! 负载均衡器列表页视图

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::model::App;
use crate::view::theme::{colors, Styles};

/// 名称列宽
const NAME_WIDTH: usize = 24;

/// 渲染列表页
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.load_balancers.items.is_empty() {
        render_empty(app, frame, area);
    } else {
        render_list(app, frame, area);
    }
}

/// 渲染空状态
fn render_empty(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let hint = if app.load_balancers.loading {
        "  Loading load balancers..."
    } else {
        "  No load balancers in this context"
    };

    let content = vec![
        Line::from(""),
        Line::styled(hint, Style::default().fg(Color::Gray)),
        Line::from(""),
        Line::styled(
            "  Press n to create one",
            Style::default().fg(c.muted),
        ),
    ];

    frame.render_widget(Paragraph::new(content), area);
}

/// 渲染列表
fn render_list(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let lines: Vec<Line> = app
        .load_balancers
        .items
        .iter()
        .enumerate()
        .map(|(i, lb)| {
            let is_selected = i == app.load_balancers.selected;

            let (status_icon, status_color) = match lb.provisioning_status.as_deref() {
                Some("ACTIVE") => ("●", c.success),
                Some("ERROR") => ("●", c.error),
                Some("PENDING_CREATE" | "PENDING_UPDATE" | "PENDING_DELETE") => ("◐", c.warning),
                _ => ("○", c.muted),
            };

            let row_style = if is_selected {
                Styles::selected()
            } else {
                Style::default().fg(c.fg)
            };
            let dim_style = if is_selected {
                Styles::selected()
            } else {
                Style::default().fg(c.muted)
            };

            let vip = lb.vip_address.as_deref().unwrap_or("-");
            Line::from(vec![
                Span::raw("  "),
                Span::styled(status_icon, Style::default().fg(status_color)),
                Span::raw(" "),
                Span::styled(pad_name(&lb.name), row_style),
                Span::styled(format!("  {vip:<16}"), row_style),
                Span::styled(
                    format!(
                        "  {}",
                        lb.provisioning_status.as_deref().unwrap_or("UNKNOWN")
                    ),
                    dim_style,
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// 名称裁剪 / 补齐到固定列宽（按显示宽度计）
fn pad_name(name: &str) -> String {
    let mut out = String::new();
    let mut width = 0;
    for ch in name.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > NAME_WIDTH.saturating_sub(1) {
            out.push('…');
            width += 1;
            break;
        }
        out.push(ch);
        width += w;
    }
    while width < NAME_WIDTH {
        out.push(' ');
        width += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_name_pads_short_names() {
        let padded = pad_name("edge");
        assert_eq!(padded.chars().count(), NAME_WIDTH);
        assert!(padded.starts_with("edge"));
    }

    #[test]
    fn pad_name_truncates_long_names() {
        let long = "a-very-long-load-balancer-name-that-overflows";
        let padded = pad_name(long);
        assert!(padded.contains('…'));
    }
}
