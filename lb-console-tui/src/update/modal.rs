//! 弹窗更新逻辑

use crate::message::ModalMessage;
use crate::model::{App, Modal};

/// 处理弹窗消息
pub fn update(app: &mut App, msg: ModalMessage) {
    let Some(ref modal) = app.modal.active else {
        return;
    };

    match modal {
        Modal::ConfirmDelete { .. } => handle_confirm_delete(app, msg),
        Modal::Error { .. } | Modal::Help => handle_simple_modal(app, msg),
    }
}

/// 处理确认删除弹窗
fn handle_confirm_delete(app: &mut App, msg: ModalMessage) {
    let Some(Modal::ConfirmDelete {
        ref lb,
        ref mut focus,
    }) = app.modal.active
    else {
        return;
    };

    match msg {
        ModalMessage::Close => {
            app.modal.close();
            app.clear_status();
        }

        ModalMessage::ToggleFocus => {
            *focus = usize::from(*focus == 0);
        }

        ModalMessage::Confirm => {
            if *focus == 1 {
                let lb = lb.clone();
                app.modal.close();
                app.set_status(format!("Deleting \"{}\"...", lb.name));
                app.backend.delete(lb, app.context.clone());
            } else {
                app.modal.close();
                app.clear_status();
            }
        }
    }
}

/// 处理简单弹窗（帮助、错误）
fn handle_simple_modal(app: &mut App, msg: ModalMessage) {
    match msg {
        ModalMessage::Close | ModalMessage::Confirm => {
            app.modal.close();
        }
        ModalMessage::ToggleFocus => {}
    }
}
