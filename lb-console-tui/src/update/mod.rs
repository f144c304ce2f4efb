//! Update 层：状态更新逻辑
//!
//! Update 层消费 Message、修改 Model，是唯一可以修改状态的地方。
//! 复杂的子消息委托给子模块处理（table、wizard、modal、backend）。
//! Update 完成后控制权回到主循环，下一轮由 View 层读取新状态重绘。

mod backend;
mod modal;
mod table;
mod wizard;

use crate::message::AppMessage;
use crate::model::App;

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::Refresh => {
            app.load_balancers.loading = true;
            app.set_status("Refreshing...");
            app.backend.refresh(app.context.clone());
        }

        AppMessage::ShowHelp => {
            app.modal.show_help();
        }

        AppMessage::GoBack => {
            // 弹窗优先于向导关闭
            if app.modal.is_open() {
                app.modal.close();
                app.clear_status();
            } else if app.wizard.is_some() {
                app.wizard = None;
                app.clear_status();
            }
        }

        AppMessage::ClearStatus => {
            app.clear_status();
        }

        AppMessage::Table(table_msg) => {
            table::update(app, table_msg);
        }

        AppMessage::Wizard(wizard_msg) => {
            wizard::update(app, wizard_msg);
        }

        AppMessage::Modal(modal_msg) => {
            modal::update(app, modal_msg);
        }

        AppMessage::Backend(backend_msg) => {
            backend::update(app, backend_msg);
        }

        AppMessage::Noop => {}
    }
}
