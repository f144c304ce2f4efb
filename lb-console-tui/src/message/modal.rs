//! 弹窗子消息

/// 弹窗消息
#[derive(Debug, Clone)]
pub enum ModalMessage {
    /// 关闭弹窗
    Close,
    /// 切换焦点（取消 / 确认）
    ToggleFocus,
    /// 确认
    Confirm,
}
