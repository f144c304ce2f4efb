//! 后台完成消息的应用
//!
//! 与向导相关的结果先对会话 ID：向导已关闭（或换了一个会话）时
//! 迟到的结果直接丢弃，绝不更新已被拆掉的视图。

use uuid::Uuid;

use crate::message::BackendMessage;
use crate::model::{App, WizardSession};

/// 应用后台完成消息
pub fn update(app: &mut App, msg: BackendMessage) {
    match msg {
        BackendMessage::LoadBalancersLoaded(result) => {
            app.load_balancers.loading = false;
            match result {
                Ok(items) => {
                    app.load_balancers.set_items(items);
                    app.clear_status();
                }
                Err(message) => {
                    app.modal.show_error("Refresh failed", &message);
                }
            }
        }

        BackendMessage::OptionsLoaded { session, result } => {
            let Some(wizard) = wizard_for(app, session) else {
                log::debug!("dropping stale options result");
                return;
            };
            match result {
                Ok(options) => {
                    // 子网选项首次到达时的自动默认值
                    wizard.controller.apply_subnet_default(&options.subnets);
                    wizard.options = Some(options);
                }
                Err(message) => {
                    app.modal.show_error("Options unavailable", &message);
                }
            }
        }

        BackendMessage::HydrationLoaded { session, result } => {
            let Some(wizard) = wizard_for(app, session) else {
                log::debug!("dropping stale hydration result");
                return;
            };
            match result {
                Ok(data) => {
                    wizard.controller.apply_hydration(&data);
                }
                Err(message) => {
                    // 部分数据绝不入场：水合失败直接放弃编辑视图
                    app.wizard = None;
                    app.modal.show_error("Edit unavailable", &message);
                }
            }
        }

        BackendMessage::SubmitFinished { session, result } => {
            let Some(wizard) = wizard_for(app, session) else {
                log::debug!("dropping stale submit result");
                return;
            };
            let completed = wizard.controller.finish_submit(result);
            if completed {
                app.wizard = None;
                app.set_status("Load balancer saved");
                app.load_balancers.loading = true;
                app.backend.refresh(app.context.clone());
            }
        }

        BackendMessage::DeleteFinished(result) => match result {
            Ok(()) => {
                app.set_status("Load balancer deleted");
                app.load_balancers.loading = true;
                app.backend.refresh(app.context.clone());
            }
            Err(message) => {
                app.modal.show_error("Delete failed", &message);
            }
        },
    }
}

/// 会话守卫：只把结果交给仍然活着的同一会话
fn wizard_for(app: &mut App, session: Uuid) -> Option<&mut WizardSession> {
    app.wizard
        .as_mut()
        .filter(|w| w.session_id() == session)
}
