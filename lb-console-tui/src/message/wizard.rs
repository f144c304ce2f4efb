//! 向导子消息

/// 向导消息
#[derive(Debug, Clone)]
pub enum WizardMessage {
    /// 关闭向导（丢弃全部输入）
    Close,
    /// 下一步
    NextStep,
    /// 上一步
    PrevStep,
    /// 页签跳转（1 起始的步骤序号）
    JumpTo(u8),
    /// 焦点移到下一个字段
    FocusNext,
    /// 焦点移到上一个字段
    FocusPrevious,
    /// 向焦点字段输入字符
    Input(char),
    /// 焦点字段退格
    Backspace,
    /// 下拉字段取上一个选项 / 列表光标左移
    CyclePrev,
    /// 下拉字段取下一个选项 / 列表光标右移
    CycleNext,
    /// 激活焦点控件（翻转开关 / 添加成员）
    Activate,
    /// 移除成员列表光标处的成员
    RemoveSelectedMember,
    /// 完成向导，提交
    Submit,
}
