//! Model 层：应用状态
//!
//! Update 层是唯一修改这里状态的地方，View 层只读取。

mod app;
pub mod state;

pub use app::App;
pub use state::{LoadBalancersState, MemberControls, Modal, ModalState, WizardField, WizardSession};
