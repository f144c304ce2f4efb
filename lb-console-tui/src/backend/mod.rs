//! Backend 层：业务服务与后台任务
//!
//! Update 层从这里发起异步调用；每个任务完成时把结果包成
//! [`BackendMessage`](crate::message::BackendMessage) 送回主循环的通道。

mod config;
mod service;

pub use config::Config;
pub use service::Backend;
