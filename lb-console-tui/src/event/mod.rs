//! Event 层：输入处理
//!
//! 把原始终端事件翻译成 Message，自身不改任何状态。

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
pub use keymap::DefaultKeymap;
