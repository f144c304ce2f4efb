//! 列表页子消息

/// 负载均衡器列表页消息
#[derive(Debug, Clone)]
pub enum TableMessage {
    /// 选中上一行
    SelectPrevious,
    /// 选中下一行
    SelectNext,
    /// 打开创建向导
    OpenCreate,
    /// 打开编辑向导（当前选中项）
    OpenEdit,
    /// 弹出删除确认
    AskDelete,
}
