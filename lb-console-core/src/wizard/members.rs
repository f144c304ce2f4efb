//! 后端成员子列表
//!
//! 两类成员：内部成员引用平台云主机（ID 即云主机 ID），
//! 外部成员是自由填写的 IP。列表只在启用资源池时可编辑。

use lb_console_api::{InstanceOption, MemberKind, MemberRole};

use crate::fields::MemberEntry;

use super::WizardController;

/// 内部成员的默认端口
const DEFAULT_MEMBER_PORT: u16 = 80;

/// 默认权重
const DEFAULT_MEMBER_WEIGHT: u32 = 1;

impl WizardController {
    /// 可供添加的云主机候选：全量选项减去已在列表中的
    pub fn available_instances<'a>(
        &self,
        instances: &'a [InstanceOption],
    ) -> Vec<&'a InstanceOption> {
        instances
            .iter()
            .filter(|option| !self.data.members.iter().any(|m| m.id == option.value))
            .collect()
    }

    /// 添加内部成员。空 ID、未知 ID 或重复 ID 都是 no-op。
    /// 成员 ID 取云主机 ID，端口 80、权重 1。
    pub fn add_internal_member(
        &mut self,
        instance_id: &str,
        instances: &[InstanceOption],
    ) -> bool {
        if !self.data.create_pool || instance_id.is_empty() {
            return false;
        }
        if self.data.members.iter().any(|m| m.id == instance_id) {
            return false;
        }
        let Some(option) = instances.iter().find(|o| o.value == instance_id) else {
            return false;
        };

        self.data.members.push(MemberEntry {
            id: option.value.clone(),
            name: option.name.clone(),
            kind: MemberKind::Internal,
            address: String::new(),
            port: DEFAULT_MEMBER_PORT,
            weight: DEFAULT_MEMBER_WEIGHT,
            role: MemberRole::Member,
        });
        true
    }

    /// 添加外部成员。IP 为空是 no-op；端口/权重解析失败取默认值。
    pub fn add_external_member(&mut self, ip: &str, port: &str, weight: &str) -> bool {
        if !self.data.create_pool {
            return false;
        }
        let ip = ip.trim();
        if ip.is_empty() {
            return false;
        }

        let id = self.next_external_id();
        self.data.members.push(MemberEntry {
            id,
            name: ip.to_string(),
            kind: MemberKind::External,
            address: ip.to_string(),
            port: port.trim().parse().unwrap_or(DEFAULT_MEMBER_PORT),
            weight: weight.trim().parse().unwrap_or(DEFAULT_MEMBER_WEIGHT),
            role: MemberRole::Member,
        });
        true
    }

    /// 按 ID 移除成员。ID 不存在时列表原样不动。
    pub fn remove_member(&mut self, id: &str) {
        self.data.members.retain(|m| m.id != id);
    }

    /// 外部成员 ID：单调计数，撞上已有 ID 就继续递增
    fn next_external_id(&mut self) -> String {
        loop {
            self.external_seq += 1;
            let candidate = format!("external-{}", self.external_seq);
            if !self.data.members.iter().any(|m| m.id == candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::fields::FieldUpdate;
    use crate::test_utils::instance_option;
    use crate::wizard::WizardController;
    use lb_console_api::MemberKind;

    fn wizard_with_instances() -> (WizardController, Vec<lb_console_api::InstanceOption>) {
        let wizard = WizardController::new_create("net-1");
        let instances = vec![
            instance_option("web-1", "inst-1"),
            instance_option("web-2", "inst-2"),
        ];
        (wizard, instances)
    }

    #[test]
    fn internal_member_uses_instance_id_and_defaults() {
        let (mut wizard, instances) = wizard_with_instances();

        assert!(wizard.add_internal_member("inst-1", &instances));
        let member = &wizard.data.members[0];
        assert_eq!(member.id, "inst-1");
        assert_eq!(member.name, "web-1");
        assert_eq!(member.kind, MemberKind::Internal);
        assert_eq!(member.port, 80);
        assert_eq!(member.weight, 1);
        assert!(member.address.is_empty());
    }

    #[test]
    fn added_instance_leaves_candidate_list() {
        let (mut wizard, instances) = wizard_with_instances();
        assert_eq!(wizard.available_instances(&instances).len(), 2);

        wizard.add_internal_member("inst-1", &instances);
        let candidates = wizard.available_instances(&instances);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].value, "inst-2");

        // 再次添加同一云主机必然失败
        assert!(!wizard.add_internal_member("inst-1", &instances));
        assert_eq!(wizard.data.members.len(), 1);
    }

    #[test]
    fn unknown_instance_is_noop() {
        let (mut wizard, instances) = wizard_with_instances();
        assert!(!wizard.add_internal_member("inst-9", &instances));
        assert!(wizard.data.members.is_empty());
    }

    #[test]
    fn empty_instance_id_is_noop() {
        let (mut wizard, instances) = wizard_with_instances();
        assert!(!wizard.add_internal_member("", &instances));
        assert!(wizard.data.members.is_empty());
    }

    #[test]
    fn external_member_parses_port_and_weight() {
        let (mut wizard, _) = wizard_with_instances();

        assert!(wizard.add_external_member("192.0.2.7", "8080", "3"));
        let member = &wizard.data.members[0];
        assert_eq!(member.address, "192.0.2.7");
        assert_eq!(member.port, 8080);
        assert_eq!(member.weight, 3);
        assert_eq!(member.kind, MemberKind::External);
    }

    #[test]
    fn external_member_falls_back_to_defaults() {
        let (mut wizard, _) = wizard_with_instances();
        wizard.add_external_member("192.0.2.8", "", "not-a-number");
        let member = &wizard.data.members[0];
        assert_eq!(member.port, 80);
        assert_eq!(member.weight, 1);
    }

    #[test]
    fn empty_ip_is_noop() {
        let (mut wizard, _) = wizard_with_instances();
        assert!(!wizard.add_external_member("   ", "80", "1"));
        assert!(wizard.data.members.is_empty());
    }

    #[test]
    fn external_ids_are_unique_and_monotonic() {
        let (mut wizard, _) = wizard_with_instances();
        wizard.add_external_member("192.0.2.7", "80", "1");
        wizard.add_external_member("192.0.2.8", "80", "1");

        assert_eq!(wizard.data.members[0].id, "external-1");
        assert_eq!(wizard.data.members[1].id, "external-2");
    }

    #[test]
    fn external_id_skips_collisions() {
        let (mut wizard, instances) = wizard_with_instances();
        wizard.add_external_member("192.0.2.7", "80", "1");
        // 人为制造一个撞号的后继 ID
        wizard.data.members[0].id = "external-2".to_string();

        wizard.add_external_member("192.0.2.8", "80", "1");
        assert_eq!(wizard.data.members[1].id, "external-3");
        assert_eq!(wizard.available_instances(&instances).len(), 2);
    }

    #[test]
    fn remove_missing_id_keeps_list_unchanged() {
        let (mut wizard, instances) = wizard_with_instances();
        wizard.add_internal_member("inst-1", &instances);

        wizard.remove_member("inst-9");
        assert_eq!(wizard.data.members.len(), 1);

        wizard.remove_member("inst-1");
        assert!(wizard.data.members.is_empty());

        // 幂等：再删一次不出错
        wizard.remove_member("inst-1");
        assert!(wizard.data.members.is_empty());
    }

    #[test]
    fn members_are_locked_while_pool_disabled() {
        let (mut wizard, instances) = wizard_with_instances();
        wizard.update(FieldUpdate::CreatePool(false));

        assert!(!wizard.add_internal_member("inst-1", &instances));
        assert!(!wizard.add_external_member("192.0.2.7", "80", "1"));
        assert!(wizard.data.members.is_empty());
    }
}
