//! 列表页更新逻辑

use crate::message::TableMessage;
use crate::model::{App, WizardSession};

/// 处理列表页消息
pub fn update(app: &mut App, msg: TableMessage) {
    match msg {
        TableMessage::SelectPrevious => {
            app.load_balancers.select_previous();
        }

        TableMessage::SelectNext => {
            app.load_balancers.select_next();
        }

        TableMessage::OpenCreate => {
            let network_id = app.context.network_id.clone().unwrap_or_default();
            let session = WizardSession::create(network_id);
            app.backend
                .load_options(session.session_id(), app.context.clone());
            app.wizard = Some(session);
            app.clear_status();
        }

        TableMessage::OpenEdit => {
            let Some(lb) = app.load_balancers.selected_item().cloned() else {
                return;
            };
            let session = WizardSession::edit(&lb);
            let session_id = session.session_id();
            app.backend.load_options(session_id, app.context.clone());
            app.backend
                .hydrate(session_id, lb.id.clone(), app.context.clone());
            app.wizard = Some(session);
            app.clear_status();
        }

        TableMessage::AskDelete => {
            if let Some(lb) = app.load_balancers.selected_item().cloned() {
                app.modal.show_confirm_delete(lb);
            }
        }
    }
}
