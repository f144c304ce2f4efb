//! 快捷键配置

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 快捷键绑定
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// 检查按键事件是否匹配此快捷键绑定
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }
}

/// 默认快捷键配置
pub struct DefaultKeymap;

impl DefaultKeymap {
    // 全局
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('r'));

    // 列表页
    pub const CREATE: KeyBinding = KeyBinding::key(KeyCode::Char('n'));
    pub const EDIT: KeyBinding = KeyBinding::key(KeyCode::Char('e'));
    pub const DELETE: KeyBinding = KeyBinding::key(KeyCode::Char('d'));

    // 向导
    pub const NEXT_STEP: KeyBinding = KeyBinding::ctrl(KeyCode::Char('n'));
    pub const PREV_STEP: KeyBinding = KeyBinding::ctrl(KeyCode::Char('p'));
    pub const SUBMIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('s'));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn ctrl_binding_requires_exact_modifiers() {
        let plain_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);

        assert!(DefaultKeymap::CREATE.matches(&plain_n));
        assert!(!DefaultKeymap::CREATE.matches(&ctrl_n));
        assert!(DefaultKeymap::NEXT_STEP.matches(&ctrl_n));
        assert!(!DefaultKeymap::NEXT_STEP.matches(&plain_n));
    }
}
