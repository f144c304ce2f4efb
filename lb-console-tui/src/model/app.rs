//! 应用主状态结构

use lb_console_api::ApiContext;

use crate::backend::{Backend, Config};

use super::state::{LoadBalancersState, ModalState, WizardSession};

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 面板挂载的上下文（网络页签或实例页签）
    pub context: ApiContext,

    /// 状态栏消息
    pub status_message: Option<String>,

    /// 列表页状态
    pub load_balancers: LoadBalancersState,

    /// 活动中的向导会话（None = 未打开）
    pub wizard: Option<WizardSession>,

    /// 弹窗状态
    pub modal: ModalState,

    /// 后台任务入口
    pub backend: Backend,
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: &Config, backend: Backend) -> Self {
        Self {
            should_quit: false,
            context: config.context(),
            status_message: None,
            load_balancers: LoadBalancersState::new(),
            wizard: None,
            modal: ModalState::new(),
            backend,
        }
    }

    /// 设置状态消息
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// 清除状态消息
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
