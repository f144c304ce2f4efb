//! 各页面 / 弹窗状态

mod load_balancers;
mod modal;
mod wizard;

pub use load_balancers::LoadBalancersState;
pub use modal::{Modal, ModalState};
pub use wizard::{step_fields, MemberControls, WizardField, WizardSession};
