//! IdGenerator port - ID 生成の抽象化
//!
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::RecordId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator はレコード ID を生成
pub trait IdGenerator {
    fn generate_record_id(&self) -> RecordId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// FixedClock を渡せば timestamp 部分が決定的になります（ランダム部分は毎回異なる）。
#[derive(Debug, Clone, Default)]
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_record_id(&self) -> RecordId {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        RecordId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}
