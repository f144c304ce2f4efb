//! 主消息枚举

use super::{BackendMessage, ModalMessage, TableMessage, WizardMessage};

/// 应用级消息
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// 退出应用
    Quit,
    /// 刷新负载均衡器列表
    Refresh,
    /// 显示帮助
    ShowHelp,
    /// 返回（关弹窗 / 关向导）
    GoBack,
    /// 清除状态栏消息
    ClearStatus,
    /// 列表页子消息
    Table(TableMessage),
    /// 向导子消息
    Wizard(WizardMessage),
    /// 弹窗子消息
    Modal(ModalMessage),
    /// 后台任务完成通知
    Backend(BackendMessage),
    /// 无操作
    Noop,
}
