//! 应用主循环
//!
//! 每轮循环：渲染 → 吸收后台完成消息 → 轮询输入（100ms 超时）→ 更新。
//! 后台任务通过 tokio 在别处跑，结果只经由通道回到这里，
//! 所以状态修改永远发生在同一个循环里，不存在并发写。

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

/// 运行应用主循环
pub fn run(
    terminal: &mut Term,
    app: &mut App,
    rx: &mut UnboundedReceiver<AppMessage>,
) -> Result<()> {
    loop {
        // 1. 渲染 UI
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 2. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 3. 先吸收积压的后台完成消息
        while let Ok(msg) = rx.try_recv() {
            update::update(app, msg);
        }

        // 4. 轮询输入事件（100ms 超时）
        if let Some(event) = event::poll_event(Duration::from_millis(100))? {
            let msg = event::handle_event(event, app);
            update::update(app, msg);
        }
    }

    Ok(())
}
