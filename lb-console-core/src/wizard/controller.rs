//! 向导控制器
//!
//! 持有步骤、校验消息、保存/加载标志，驱动前进/后退/页签跳转，
//! 并在完成时产出提交载荷。异步协作者调用由外层发起，结果通过
//! [`WizardController::finish_submit`] / [`WizardController::apply_hydration`]
//! 回流。

use uuid::Uuid;

use lb_console_api::{LoadBalancer, LoadBalancerPayload, SubnetOption};

use crate::fields::{FieldModel, FieldUpdate};
use crate::payload::build_payload;
use crate::services::HydrationData;

use super::validators::validate_step;
use super::WizardStep;

/// 创建新资源，还是编辑已有资源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { load_balancer_id: String },
}

/// 向导状态机
#[derive(Debug)]
pub struct WizardController {
    mode: WizardMode,
    /// 会话标识。异步完成消息携带它回来，外层据此丢弃
    /// 属于已关闭会话的迟到结果。
    session: Uuid,
    step: WizardStep,
    pub data: FieldModel,
    validation_message: Option<String>,
    saving: bool,
    loading: bool,
    /// 外部成员 ID 单调计数
    pub(crate) external_seq: u64,
}

impl WizardController {
    /// 创建模式：固定默认值，立即可交互
    pub fn new_create(network_id: impl Into<String>) -> Self {
        Self {
            mode: WizardMode::Create,
            session: Uuid::new_v4(),
            step: WizardStep::Details,
            data: FieldModel::new_create(network_id),
            validation_message: None,
            saving: false,
            loading: false,
            external_seq: 0,
        }
    }

    /// 编辑模式：基础字段即刻播种，子资源等水合；
    /// 水合完成前 `is_loading` 为真
    pub fn new_edit(lb: &LoadBalancer) -> Self {
        Self {
            mode: WizardMode::Edit {
                load_balancer_id: lb.id.clone(),
            },
            session: Uuid::new_v4(),
            step: WizardStep::Details,
            data: FieldModel::seeded_from(lb),
            validation_message: None,
            saving: false,
            loading: true,
            external_seq: 0,
        }
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 唯一的字段修改入口。任何编辑都清掉当前校验消息。
    pub fn update(&mut self, update: FieldUpdate) {
        self.data.apply(update);
        self.validation_message = None;
    }

    /// 前进一步。当前步骤校验失败则停在原地并留下消息。
    pub fn go_next(&mut self) -> bool {
        if let Some(message) = validate_step(self.step, &self.data) {
            self.validation_message = Some(message);
            return false;
        }
        self.validation_message = None;
        self.step = self.step.next();
        true
    }

    /// 后退一步。永不校验，总是清消息。
    pub fn go_previous(&mut self) {
        self.validation_message = None;
        self.step = self.step.previous();
    }

    /// 页签跳转。向前跳先过当前步骤的校验；
    /// 向后跳或原地跳无条件放行。
    pub fn jump_to(&mut self, target: WizardStep) -> bool {
        if target.index() > self.step.index() {
            if let Some(message) = validate_step(self.step, &self.data) {
                self.validation_message = Some(message);
                return false;
            }
        }
        self.validation_message = None;
        self.step = target;
        true
    }

    /// 完成向导。跑末步校验，通过则置 `saving` 并产出载荷，
    /// 由外层交给协作者；失败返回 None 并留下消息。
    pub fn submit(&mut self) -> Option<LoadBalancerPayload> {
        if self.saving {
            return None;
        }
        if let Some(message) = validate_step(WizardStep::Monitor, &self.data) {
            self.validation_message = Some(message);
            return None;
        }
        self.validation_message = None;
        self.saving = true;
        Some(build_payload(&self.data))
    }

    /// 协作者调用落定。成功返回 true（外层关闭向导）；
    /// 失败把协作者的消息放回校验消息通道，加前缀区分本地校验。
    pub fn finish_submit(&mut self, result: Result<(), String>) -> bool {
        self.saving = false;
        match result {
            Ok(()) => true,
            Err(message) => {
                self.validation_message = Some(format!("Error: {message}"));
                false
            }
        }
    }

    /// 水合结果到达：一次性合并进字段模型，结束加载态
    pub fn apply_hydration(&mut self, data: &HydrationData) {
        self.data.apply_hydration(data);
        self.loading = false;
    }

    /// 子网默认值：选项列表到达且尚未选择时取第一项。
    /// 已有值（用户选的或编辑播种的）永不覆盖。
    pub fn apply_subnet_default(&mut self, subnets: &[SubnetOption]) {
        if self.data.vip_subnet_id.is_empty() {
            if let Some(first) = subnets.first() {
                self.data.vip_subnet_id = first.value.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_load_balancer, subnet_option};
    use lb_console_api::MemberKind;

    fn ready_controller() -> WizardController {
        let mut wizard = WizardController::new_create("net-1");
        wizard.update(FieldUpdate::Name("lb1".to_string()));
        wizard.update(FieldUpdate::VipSubnetId("subnet-a".to_string()));
        wizard.update(FieldUpdate::ListenerName("front".to_string()));
        wizard.update(FieldUpdate::PoolName("backend".to_string()));
        wizard.update(FieldUpdate::MonitorName("probe".to_string()));
        wizard
    }

    #[test]
    fn empty_name_blocks_first_step() {
        let mut wizard = WizardController::new_create("net-1");
        assert!(!wizard.go_next());
        assert_eq!(wizard.step(), WizardStep::Details);
        assert_eq!(wizard.validation_message(), Some("Name is required."));
    }

    #[test]
    fn valid_first_step_advances_and_clears_message() {
        let mut wizard = WizardController::new_create("net-1");
        assert!(!wizard.go_next());

        wizard.update(FieldUpdate::Name("lb1".to_string()));
        wizard.update(FieldUpdate::VipSubnetId("subnet-a".to_string()));
        assert!(wizard.go_next());
        assert_eq!(wizard.step(), WizardStep::Listener);
        assert_eq!(wizard.validation_message(), None);
    }

    #[test]
    fn update_clears_validation_message() {
        let mut wizard = WizardController::new_create("net-1");
        assert!(!wizard.go_next());
        assert!(wizard.validation_message().is_some());

        wizard.update(FieldUpdate::Name("l".to_string()));
        assert_eq!(wizard.validation_message(), None);
    }

    #[test]
    fn go_previous_never_validates_and_clears() {
        let mut wizard = ready_controller();
        assert!(wizard.go_next());

        // 弄脏第二步后仍可随意后退
        wizard.update(FieldUpdate::ListenerName(String::new()));
        assert!(!wizard.go_next());
        assert!(wizard.validation_message().is_some());

        wizard.go_previous();
        assert_eq!(wizard.step(), WizardStep::Details);
        assert_eq!(wizard.validation_message(), None);
    }

    #[test]
    fn go_previous_floors_at_first_step() {
        let mut wizard = ready_controller();
        wizard.go_previous();
        assert_eq!(wizard.step(), WizardStep::Details);
    }

    #[test]
    fn go_next_caps_at_last_step() {
        let mut wizard = ready_controller();
        for _ in 0..10 {
            wizard.go_next();
        }
        assert_eq!(wizard.step(), WizardStep::Monitor);
    }

    #[test]
    fn jump_forward_validates_current_step_only() {
        let mut wizard = ready_controller();
        // 第三步数据不合法也不挡从第一步跳到第五步
        wizard.update(FieldUpdate::PoolName(String::new()));
        assert!(wizard.jump_to(WizardStep::Monitor));
        assert_eq!(wizard.step(), WizardStep::Monitor);
    }

    #[test]
    fn jump_forward_blocked_by_current_step() {
        let mut wizard = WizardController::new_create("net-1");
        assert!(!wizard.jump_to(WizardStep::Pool));
        assert_eq!(wizard.step(), WizardStep::Details);
        assert!(wizard.validation_message().is_some());
    }

    #[test]
    fn jump_backward_never_validates() {
        let mut wizard = ready_controller();
        assert!(wizard.jump_to(WizardStep::Monitor));

        // 当前（末）步弄脏后向后跳依然放行
        wizard.update(FieldUpdate::MonitorName(String::new()));
        assert!(wizard.jump_to(WizardStep::Listener));
        assert_eq!(wizard.step(), WizardStep::Listener);
        assert_eq!(wizard.validation_message(), None);
    }

    #[test]
    fn jump_to_same_step_is_allowed() {
        let mut wizard = WizardController::new_create("net-1");
        assert!(wizard.jump_to(WizardStep::Details));
        assert_eq!(wizard.step(), WizardStep::Details);
    }

    #[test]
    fn submit_with_disabled_monitor_ignores_monitor_fields() {
        let mut wizard = ready_controller();
        wizard.update(FieldUpdate::CreateMonitor(false));
        wizard.update(FieldUpdate::Delay(String::new()));
        wizard.update(FieldUpdate::MonitorName(String::new()));

        let payload = wizard.submit().unwrap();
        assert!(wizard.is_saving());
        assert!(payload.healthmonitor.is_none());
    }

    #[test]
    fn submit_blocked_by_monitor_validator() {
        let mut wizard = ready_controller();
        wizard.update(FieldUpdate::Delay(String::new()));

        assert!(wizard.submit().is_none());
        assert!(!wizard.is_saving());
        assert_eq!(wizard.validation_message(), Some("Delay is required."));
    }

    #[test]
    fn second_submit_while_saving_is_ignored() {
        let mut wizard = ready_controller();
        assert!(wizard.submit().is_some());
        assert!(wizard.submit().is_none());
        assert!(wizard.is_saving());
    }

    #[test]
    fn failed_submit_surfaces_prefixed_message_and_allows_retry() {
        let mut wizard = ready_controller();
        assert!(wizard.submit().is_some());

        let completed = wizard.finish_submit(Err("quota exceeded".to_string()));
        assert!(!completed);
        assert!(!wizard.is_saving());
        assert_eq!(
            wizard.validation_message(),
            Some("Error: quota exceeded")
        );

        // 可直接重试
        assert!(wizard.submit().is_some());
    }

    #[test]
    fn successful_submit_signals_completion() {
        let mut wizard = ready_controller();
        assert!(wizard.submit().is_some());
        assert!(wizard.finish_submit(Ok(())));
        assert!(!wizard.is_saving());
    }

    #[test]
    fn subnet_default_fills_empty_selection_once() {
        let mut wizard = WizardController::new_create("net-1");
        let subnets = vec![
            subnet_option("private", "subnet-a"),
            subnet_option("public", "subnet-b"),
        ];

        wizard.apply_subnet_default(&subnets);
        assert_eq!(wizard.data.vip_subnet_id, "subnet-a");

        // 用户改选后，选项列表再次到达也不覆盖
        wizard.update(FieldUpdate::VipSubnetId("subnet-b".to_string()));
        wizard.apply_subnet_default(&subnets);
        assert_eq!(wizard.data.vip_subnet_id, "subnet-b");
    }

    #[test]
    fn subnet_default_ignores_empty_option_list() {
        let mut wizard = WizardController::new_create("net-1");
        wizard.apply_subnet_default(&[]);
        assert!(wizard.data.vip_subnet_id.is_empty());
    }

    #[test]
    fn edit_mode_starts_loading_with_seeded_base_fields() {
        let lb = sample_load_balancer("lb-1", "edge");
        let wizard = WizardController::new_edit(&lb);

        assert!(wizard.is_loading());
        assert_eq!(
            wizard.mode(),
            &WizardMode::Edit {
                load_balancer_id: "lb-1".to_string()
            }
        );
        assert_eq!(wizard.data.name, "edge");
        // 播种的子网值不被后续选项默认覆盖
        let mut wizard = wizard;
        wizard.apply_subnet_default(&[subnet_option("other", "subnet-z")]);
        assert_eq!(wizard.data.vip_subnet_id, "subnet-a");
    }

    #[test]
    fn full_walkthrough_produces_composite_payload() {
        let mut wizard = ready_controller();
        wizard.update(FieldUpdate::ListenerPort("443".to_string()));

        for expected in [
            WizardStep::Listener,
            WizardStep::Pool,
            WizardStep::Members,
            WizardStep::Monitor,
        ] {
            assert!(wizard.go_next());
            assert_eq!(wizard.step(), expected);
        }

        assert!(wizard.add_external_member("192.0.2.7", "8080", "2"));
        let payload = wizard.submit().unwrap();

        let listener = payload.listener.unwrap();
        assert_eq!(listener.protocol_port, 443);
        let pool = payload.pool.unwrap();
        assert_eq!(pool.members.len(), 1);
        assert_eq!(pool.members[0].kind, MemberKind::External);
        assert!(payload.healthmonitor.is_some());
    }
}
