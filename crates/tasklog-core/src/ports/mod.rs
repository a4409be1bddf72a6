//! Ports - 抽象化レイヤー
//!
//! 外部（保存先、画面、ファイル出力、時刻、ID）とのインターフェースです。
//! Store / Manager はこれらの trait にだけ依存します。

pub mod clock;
pub mod exporter;
pub mod id_generator;
pub mod prompt;
pub mod storage;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::exporter::{ExportError, Exporter};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::prompt::{NoticeKind, Prompt};
pub use self::storage::{StorageError, StorageSlot};
