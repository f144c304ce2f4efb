//! 向导步骤

/// 五个步骤，顺序固定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// 基础信息与 VIP
    Details,
    /// 监听器
    Listener,
    /// 资源池
    Pool,
    /// 后端成员
    Members,
    /// 健康检查
    Monitor,
}

impl WizardStep {
    /// 全部步骤（按顺序）
    pub const ALL: [Self; 5] = [
        Self::Details,
        Self::Listener,
        Self::Pool,
        Self::Members,
        Self::Monitor,
    ];

    /// 1 起始的步骤序号
    pub fn index(self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Listener => 2,
            Self::Pool => 3,
            Self::Members => 4,
            Self::Monitor => 5,
        }
    }

    /// 按序号取步骤
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Details),
            2 => Some(Self::Listener),
            3 => Some(Self::Pool),
            4 => Some(Self::Members),
            5 => Some(Self::Monitor),
            _ => None,
        }
    }

    /// 步骤标题
    pub fn title(self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Listener => "Listener",
            Self::Pool => "Pool",
            Self::Members => "Members",
            Self::Monitor => "Monitor",
        }
    }

    /// 下一步（末步封顶）
    pub fn next(self) -> Self {
        match self {
            Self::Details => Self::Listener,
            Self::Listener => Self::Pool,
            Self::Pool => Self::Members,
            Self::Members | Self::Monitor => Self::Monitor,
        }
    }

    /// 上一步（首步保底）
    pub fn previous(self) -> Self {
        match self {
            Self::Details | Self::Listener => Self::Details,
            Self::Pool => Self::Listener,
            Self::Members => Self::Pool,
            Self::Monitor => Self::Members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_caps_at_last_step() {
        assert_eq!(WizardStep::Monitor.next(), WizardStep::Monitor);
    }

    #[test]
    fn previous_floors_at_first_step() {
        assert_eq!(WizardStep::Details.previous(), WizardStep::Details);
    }

    #[test]
    fn index_round_trips() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
        assert_eq!(WizardStep::from_index(0), None);
        assert_eq!(WizardStep::from_index(6), None);
    }
}
