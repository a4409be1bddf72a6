//! Prompt port - ユーザーへの確認と通知
//!
//! 画面側（ダイアログ、トースト、端末など）が実装します。

use std::fmt;

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        })
    }
}

/// Prompt は確認ダイアログと通知を提供
///
/// - `confirm` はブロッキング（yes/no が決まるまで戻らない）
/// - `notify` はノンブロッキング
pub trait Prompt {
    fn confirm(&mut self, prompt: &str) -> bool;

    fn notify(&mut self, message: &str, kind: NoticeKind);
}
