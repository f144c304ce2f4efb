//! 负载均衡器列表页状态

use lb_console_api::LoadBalancer;

/// 列表页状态
#[derive(Debug, Default)]
pub struct LoadBalancersState {
    /// 当前上下文下的负载均衡器
    pub items: Vec<LoadBalancer>,
    /// 选中行
    pub selected: usize,
    /// 刷新进行中
    pub loading: bool,
}

impl LoadBalancersState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换列表内容，选中行随之收敛
    pub fn set_items(&mut self, items: Vec<LoadBalancer>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// 当前选中项
    pub fn selected_item(&self) -> Option<&LoadBalancer> {
        self.items.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lb(id: &str) -> LoadBalancer {
        LoadBalancer {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            vip_subnet_id: None,
            vip_address: None,
            network_id: None,
            provisioning_status: None,
            operating_status: None,
            created_at: None,
            updated_at: None,
            listeners: Vec::new(),
            pools: Vec::new(),
        }
    }

    #[test]
    fn selection_clamps_to_shrunken_list() {
        let mut state = LoadBalancersState::new();
        state.set_items(vec![lb("a"), lb("b"), lb("c")]);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);

        state.set_items(vec![lb("a")]);
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_item().map(|l| l.id.as_str()), Some("a"));
    }

    #[test]
    fn selection_stops_at_bounds() {
        let mut state = LoadBalancersState::new();
        state.set_items(vec![lb("a"), lb("b")]);

        state.select_previous();
        assert_eq!(state.selected, 0);
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 1);
    }
}
