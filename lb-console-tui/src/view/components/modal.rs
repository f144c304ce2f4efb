//! 弹窗组件

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{App, Modal};
use crate::view::theme::colors;

/// 渲染弹窗（如果有活动弹窗）
pub fn render(app: &App, frame: &mut Frame) {
    let Some(ref modal) = app.modal.active else {
        return;
    };

    match modal {
        Modal::ConfirmDelete { lb, focus } => render_confirm_delete(frame, &lb.name, *focus),
        Modal::Error { title, message } => render_error(frame, title, message),
        Modal::Help => render_help(frame),
    }
}

/// 计算居中弹窗区域
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 渲染确认删除弹窗
fn render_confirm_delete(frame: &mut Frame, name: &str, focus: usize) {
    let c = colors();
    let area = centered_rect(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Delete Load Balancer ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.error));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let button = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!("[ {label} ]"),
                Style::default()
                    .fg(c.selected_fg)
                    .bg(c.selected_bg)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!("[ {label} ]"), Style::default().fg(c.muted))
        }
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(format!("Delete \"{name}\"? This cannot be undone."))),
        Line::from(""),
        Line::from(vec![
            Span::raw("   "),
            button("Cancel", focus == 0),
            Span::raw("   "),
            button("Delete", focus == 1),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

/// 渲染错误弹窗
fn render_error(frame: &mut Frame, title: &str, message: &str) {
    let c = colors();
    let area = centered_rect(56, 8, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.error));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(c.fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to close",
            Style::default().fg(c.muted),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

/// 渲染帮助弹窗
fn render_help(frame: &mut Frame) {
    let c = colors();
    let area = centered_rect(52, 16, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.border_focused));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entry = |key: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {key:<12}"), Style::default().fg(c.accent)),
            Span::styled(desc.to_string(), Style::default().fg(c.fg)),
        ])
    };

    let lines = vec![
        Line::from(""),
        entry("↑↓ / jk", "Select load balancer"),
        entry("n", "Create load balancer"),
        entry("e / Enter", "Edit selected"),
        entry("d", "Delete selected"),
        entry("r", "Refresh list"),
        Line::from(""),
        entry("Tab", "Next wizard field"),
        entry("←→", "Change option / subnet"),
        entry("Ctrl+N/P", "Next / previous step"),
        entry("Alt+1..5", "Jump to step"),
        entry("Ctrl+S", "Finish wizard"),
        entry("Esc", "Cancel / close"),
        entry("q", "Quit"),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
