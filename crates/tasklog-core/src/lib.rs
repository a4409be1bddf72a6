//! tasklog-core
//!
//! IT サポートのチケット記録（作業日、端末、内容、対応時間など）を管理するコア。
//!
//! # モジュール構成
//! - **domain**: レコード、ID、Validator、Duration Calculator、エクスポート用シート（純粋）
//! - **ports**: 抽象化レイヤー（StorageSlot, Prompt, Exporter, Clock, IdGenerator）
//! - **impls**: ports の実装（JsonFileSlot, MemorySlot, XlsxExporter）
//! - **app**: TaskStore（一覧の正本）と TaskManager（フォーム操作の窓口）
//! - **config**: 環境変数からの設定
//! - **error**: Store / フォームのエラー型

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;

pub use app::{TaskManager, TaskStore};
pub use config::Config;
pub use error::{FormError, StoreError};
