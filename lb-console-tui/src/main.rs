//! lb-console TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 业务服务与后台任务 (`backend/`)
//!
//! 绘制循环是同步的；网络调用由 tokio 任务承担，结果作为
//! [`message::AppMessage::Backend`] 回流进主循环。

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use lb_console_api::RestLoadBalancerApi;
use lb_console_core::LoadBalancerService;

use backend::{Backend, Config};
use util::{init_terminal, restore_terminal};

fn main() -> Result<()> {
    // 1. tokio 运行时托管后台任务；绘制循环保持同步
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    // 2. 配置与协作者
    let config = Config::load();
    view::theme::set_theme_index(config.theme_index());

    let api = RestLoadBalancerApi::new(&config.api_base_url)?;
    let service = Arc::new(LoadBalancerService::new(Arc::new(api)));

    // 3. 后台完成消息的通道
    let (tx, mut rx) = mpsc::unbounded_channel();
    let backend = Backend::new(service, tx);

    // 4. 创建应用实例并发起首次刷新
    let mut app = model::App::new(&config, backend);
    app.load_balancers.loading = true;
    app.backend.refresh(app.context.clone());

    // 5. 运行主循环
    let mut terminal = init_terminal()?;
    let result = app::run(&mut terminal, &mut app, &mut rx);

    // 6. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    result
}
