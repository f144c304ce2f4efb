//! 字段模型与更新补丁

mod model;
mod update;

pub use model::{FieldModel, ListenerFields, MemberEntry, MonitorFields, PoolFields};
pub use update::FieldUpdate;
