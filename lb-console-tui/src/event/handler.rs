//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ModalMessage, TableMessage, WizardMessage};
use crate::model::App;

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // 终端窗口大小改变，下一轮自动重绘
        Event::Resize(_, _) => AppMessage::Noop,
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press，忽略 Release / Repeat（Windows 终端按键重复）
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    // 无论焦点在哪里都能强退
    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }

    // 弹窗 > 向导 > 列表页
    if app.modal.is_open() {
        return handle_modal_keys(&key);
    }
    if app.wizard.is_some() {
        return handle_wizard_keys(&key);
    }
    handle_table_keys(&key)
}

/// 弹窗按键
fn handle_modal_keys(key: &KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Esc => AppMessage::Modal(ModalMessage::Close),
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
            AppMessage::Modal(ModalMessage::ToggleFocus)
        }
        _ => AppMessage::Noop,
    }
}

/// 向导按键
fn handle_wizard_keys(key: &KeyEvent) -> AppMessage {
    if DefaultKeymap::NEXT_STEP.matches(key) {
        return AppMessage::Wizard(WizardMessage::NextStep);
    }
    if DefaultKeymap::PREV_STEP.matches(key) {
        return AppMessage::Wizard(WizardMessage::PrevStep);
    }
    if DefaultKeymap::SUBMIT.matches(key) {
        return AppMessage::Wizard(WizardMessage::Submit);
    }

    // Alt+1..5 页签跳转
    if key.modifiers == KeyModifiers::ALT {
        if let KeyCode::Char(c @ '1'..='5') = key.code {
            let index = c as u8 - b'0';
            return AppMessage::Wizard(WizardMessage::JumpTo(index));
        }
    }

    match key.code {
        KeyCode::Esc => AppMessage::Wizard(WizardMessage::Close),
        KeyCode::Tab | KeyCode::Down => AppMessage::Wizard(WizardMessage::FocusNext),
        KeyCode::BackTab | KeyCode::Up => AppMessage::Wizard(WizardMessage::FocusPrevious),
        KeyCode::Left => AppMessage::Wizard(WizardMessage::CyclePrev),
        KeyCode::Right => AppMessage::Wizard(WizardMessage::CycleNext),
        KeyCode::Enter => AppMessage::Wizard(WizardMessage::Activate),
        KeyCode::Delete => AppMessage::Wizard(WizardMessage::RemoveSelectedMember),
        KeyCode::Backspace => AppMessage::Wizard(WizardMessage::Backspace),
        KeyCode::Char(c)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            AppMessage::Wizard(WizardMessage::Input(c))
        }
        _ => AppMessage::Noop,
    }
}

/// 列表页按键
fn handle_table_keys(key: &KeyEvent) -> AppMessage {
    if DefaultKeymap::QUIT.matches(key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::REFRESH.matches(key) {
        return AppMessage::Refresh;
    }
    if DefaultKeymap::CREATE.matches(key) {
        return AppMessage::Table(TableMessage::OpenCreate);
    }
    if DefaultKeymap::EDIT.matches(key) {
        return AppMessage::Table(TableMessage::OpenEdit);
    }
    if DefaultKeymap::DELETE.matches(key) {
        return AppMessage::Table(TableMessage::AskDelete);
    }

    match key.code {
        // Shift+/ 在部分终端会带 SHIFT 修饰，按键码判断
        KeyCode::Char('?') => AppMessage::ShowHelp,
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Table(TableMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Table(TableMessage::SelectNext),
        KeyCode::Enter => AppMessage::Table(TableMessage::OpenEdit),
        KeyCode::Esc => AppMessage::GoBack,
        _ => AppMessage::Noop,
    }
}
