//! 后台任务完成通知
//!
//! 错误以字符串传递（跨任务边界，且 UI 只展示消息文本）。
//! 与向导相关的通知携带会话 ID：向导一旦关闭，迟到的结果
//! 会因会话不匹配被 Update 层丢弃，绝不更新已经不存在的视图。

use uuid::Uuid;

use lb_console_api::{LoadBalancer, OptionSets};
use lb_console_core::HydrationData;

/// 后台完成消息
#[derive(Debug, Clone)]
pub enum BackendMessage {
    /// 列表刷新完成
    LoadBalancersLoaded(Result<Vec<LoadBalancer>, String>),
    /// 选项集合拉取完成
    OptionsLoaded {
        session: Uuid,
        result: Result<OptionSets, String>,
    },
    /// 编辑水合完成（三个子资源请求合流后的整体结果）
    HydrationLoaded {
        session: Uuid,
        result: Result<HydrationData, String>,
    },
    /// 提交完成
    SubmitFinished {
        session: Uuid,
        result: Result<(), String>,
    },
    /// 删除完成
    DeleteFinished(Result<(), String>),
}
