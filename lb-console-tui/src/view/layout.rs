//! 主布局渲染

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::App;

use super::components;
use super::pages;
use super::theme::colors;

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 三层布局：标题栏 + 主内容区 + 状态栏
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Min(1),    // 主内容区
            Constraint::Length(1), // 状态栏
        ])
        .split(size);

    render_title_bar(app, frame, main_layout[0]);
    render_content(app, frame, main_layout[1]);
    components::statusbar::render(app, frame, main_layout[2]);

    // 弹层：向导在内容之上，弹窗在最上层
    pages::wizard::render(app, frame);
    components::modal::render(app, frame);
}

/// 渲染标题栏
fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let context = match (&app.context.network_id, &app.context.instance_id) {
        (Some(network), _) => format!("network {network}"),
        (None, Some(instance)) => format!("instance {instance}"),
        (None, None) => "no context".to_string(),
    };
    let title = Paragraph::new(format!(" lb-console v0.1.0 · {context}"))
        .style(Style::default().bg(c.highlight).fg(Color::White));
    frame.render_widget(title, area);
}

/// 渲染主内容区
fn render_content(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();

    let block = Block::default()
        .title(" Load Balancers ")
        .title_style(Style::default().fg(c.fg).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    pages::load_balancers::render(app, frame, inner_area);
}
