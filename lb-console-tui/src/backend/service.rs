//! 后台任务入口
//!
//! 每个方法 spawn 一个 tokio 任务，完成后把结果发回主循环。
//! 通道另一端随应用退出关闭时，send 失败直接忽略。

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use lb_console_api::{ApiContext, LoadBalancer, LoadBalancerPayload};
use lb_console_core::{LoadBalancerService, WizardMode};

use crate::message::{AppMessage, BackendMessage};

/// 后台任务入口
pub struct Backend {
    service: Arc<LoadBalancerService>,
    tx: UnboundedSender<AppMessage>,
}

impl Backend {
    pub fn new(service: Arc<LoadBalancerService>, tx: UnboundedSender<AppMessage>) -> Self {
        Self { service, tx }
    }

    /// 刷新负载均衡器列表
    pub fn refresh(&self, ctx: ApiContext) {
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.list(&ctx).await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Backend(BackendMessage::LoadBalancersLoaded(
                result,
            )));
        });
    }

    /// 拉取向导选项集合
    pub fn load_options(&self, session: Uuid, ctx: ApiContext) {
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.load_options(&ctx).await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Backend(BackendMessage::OptionsLoaded {
                session,
                result,
            }));
        });
    }

    /// 编辑水合：三个子资源请求在服务层合流
    pub fn hydrate(&self, session: Uuid, lb_id: String, ctx: ApiContext) {
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service
                .hydrate(&lb_id, &ctx)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Backend(BackendMessage::HydrationLoaded {
                session,
                result,
            }));
        });
    }

    /// 提交向导载荷
    pub fn submit(&self, session: Uuid, mode: WizardMode, payload: LoadBalancerPayload) {
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service
                .submit(&mode, &payload)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Backend(BackendMessage::SubmitFinished {
                session,
                result,
            }));
        });
    }

    /// 删除负载均衡器
    pub fn delete(&self, lb: LoadBalancer, ctx: ApiContext) {
        let service = self.service.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.delete(&lb, &ctx).await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Backend(BackendMessage::DeleteFinished(result)));
        });
    }
}
