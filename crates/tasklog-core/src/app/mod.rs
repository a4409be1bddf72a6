//! App - アプリケーション層
//!
//! ports を組み合わせて、一覧の管理とフォーム操作を実装します。
//!
//! # 主要コンポーネント
//! - **TaskStore**: 一覧の正本（検証・保存・選択）
//! - **TaskManager**: 画面が触る窓口（フォーム、削除確認、通知、エクスポート）
//! - **persistence**: スロットに書く JSON の形

pub mod manager;
pub mod persistence;
pub mod store;

pub use self::manager::{Form, Saved, TaskManager};
pub use self::store::{StoredTask, TaskStore};
