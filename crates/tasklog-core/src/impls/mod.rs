//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **JsonFileSlot**: ファイル 1 つに一覧を保存
//! - **MemorySlot**: テスト・組み込み用のスロット
//! - **XlsxExporter**: tasks.xlsx の書き出し

pub mod file_slot;
pub mod memory_slot;
pub mod xlsx;

pub use self::file_slot::JsonFileSlot;
pub use self::memory_slot::MemorySlot;
pub use self::xlsx::XlsxExporter;
