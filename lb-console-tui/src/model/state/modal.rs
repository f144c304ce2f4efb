//! 弹窗状态

use lb_console_api::LoadBalancer;

/// 弹窗类型
#[derive(Debug, Clone)]
pub enum Modal {
    /// 确认删除
    ConfirmDelete {
        /// 待删除的负载均衡器（删除时还要用到它的网络 ID）
        lb: LoadBalancer,
        /// 焦点：0=取消, 1=确认
        focus: usize,
    },
    /// 错误提示
    Error { title: String, message: String },
    /// 帮助信息
    Help,
}

/// 弹窗状态
#[derive(Debug, Default)]
pub struct ModalState {
    /// 当前活动的弹窗
    pub active: Option<Modal>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 关闭弹窗
    pub fn close(&mut self) {
        self.active = None;
    }

    /// 是否有活动弹窗
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// 显示确认删除弹窗
    pub fn show_confirm_delete(&mut self, lb: LoadBalancer) {
        self.active = Some(Modal::ConfirmDelete { lb, focus: 0 });
    }

    /// 显示错误弹窗
    pub fn show_error(&mut self, title: &str, message: &str) {
        self.active = Some(Modal::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    /// 显示帮助弹窗
    pub fn show_help(&mut self) {
        self.active = Some(Modal::Help);
    }
}
