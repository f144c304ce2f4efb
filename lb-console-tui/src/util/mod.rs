//! Util 层：终端基础设施

mod terminal;

pub use terminal::{init_terminal, restore_terminal, Term};
