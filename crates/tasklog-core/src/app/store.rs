//! Task Store - レコード一覧の正本
//!
//! # 責務
//! - 順序付きの一覧（位置 = 表示順・エクスポート順）
//! - 選択状態（エクスポート範囲の指定用、保存しない）
//! - すべての変更は Validator を通す
//! - 変更が成功するたびに一覧全体を StorageSlot に書く
//!
//! # 設計原則
//! - レコードの識別は生成 ID（RecordId）。index は「今の並び」での位置にすぎない
//! - 選択も ID で持つので、削除しても他の選択はずれない
//! - 起動時の読み込みは失敗しない（壊れていれば空から始める）

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::{ExportSheet, RecordId, TaskRecord, validate};
use crate::error::StoreError;
use crate::ports::{ExportError, IdGenerator, StorageSlot};

use super::persistence;

/// 一覧の 1 行: ID + レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTask {
    id: RecordId,
    record: TaskRecord,
}

impl StoredTask {
    pub fn new(id: RecordId, record: TaskRecord) -> Self {
        Self { id, record }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn record(&self) -> &TaskRecord {
        &self.record
    }
}

pub struct TaskStore<S, G> {
    slot: S,
    ids: G,
    tasks: Vec<StoredTask>,
    selected: HashSet<RecordId>,
}

impl<S: StorageSlot, G: IdGenerator> TaskStore<S, G> {
    /// スロットから一覧を復元する
    ///
    /// スロットが空 / 読めない / JSON として壊れている場合は空の一覧で始める。
    /// ID を持たない古いレコードには新しい ID を振る（次の保存で書き込まれる）。
    pub fn load(slot: S, ids: G) -> Self {
        let decoded = match slot.read() {
            Ok(Some(json)) => persistence::decode(&json).unwrap_or_else(|err| {
                warn!(error = %err, "stored task list is unreadable, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "task storage could not be read, starting empty");
                Vec::new()
            }
        };

        let mut seen = HashSet::new();
        let tasks: Vec<StoredTask> = decoded
            .into_iter()
            .map(|(id, record)| {
                // 重複 ID は後の方を振り直す
                let id = id
                    .filter(|id| seen.insert(*id))
                    .unwrap_or_else(|| ids.generate_record_id());
                StoredTask::new(id, record)
            })
            .collect();

        info!(count = tasks.len(), "task list loaded");
        Self {
            slot,
            ids,
            tasks,
            selected: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 一覧を表示順に返す
    pub fn tasks(&self) -> &[StoredTask] {
        &self.tasks
    }

    pub fn records(&self) -> impl Iterator<Item = (RecordId, &TaskRecord)> {
        self.tasks.iter().map(|task| (task.id, &task.record))
    }

    pub fn get(&self, id: RecordId) -> Option<&TaskRecord> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| &task.record)
    }

    pub fn id_at(&self, index: usize) -> Result<RecordId, StoreError> {
        self.tasks
            .get(index)
            .map(|task| task.id)
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// 検証して末尾に追加
    ///
    /// # 戻り値
    /// - 成功: 新しい RecordId
    /// - 検証エラー: `StoreError::Invalid`（一覧は変わらない）
    /// - 保存エラー: `StoreError::Storage`（一覧には追加済み）
    pub fn create(&mut self, candidate: TaskRecord) -> Result<RecordId, StoreError> {
        let record = Self::admit(candidate)?;
        let id = self.ids.generate_record_id();
        self.tasks.push(StoredTask::new(id, record));
        debug!(%id, len = self.tasks.len(), "task created");

        self.persist()?;
        Ok(id)
    }

    /// 検証して同じ位置で置き換える（ID は変わらない）
    pub fn update(&mut self, id: RecordId, candidate: TaskRecord) -> Result<(), StoreError> {
        let index = self.position(id).ok_or(StoreError::UnknownRecord(id))?;
        self.replace(index, candidate)
    }

    pub fn update_at(&mut self, index: usize, candidate: TaskRecord) -> Result<(), StoreError> {
        self.id_at(index)?;
        self.replace(index, candidate)
    }

    /// 削除して後ろを詰める。選択からも外す。
    ///
    /// 確認ダイアログは呼び出し側（TaskManager）の責務。
    pub fn delete(&mut self, id: RecordId) -> Result<TaskRecord, StoreError> {
        let index = self.position(id).ok_or(StoreError::UnknownRecord(id))?;
        self.remove(index)
    }

    pub fn delete_at(&mut self, index: usize) -> Result<TaskRecord, StoreError> {
        self.id_at(index)?;
        self.remove(index)
    }

    /// 1 行の選択を切り替える（保存はしない）
    pub fn toggle_select(&mut self, id: RecordId, selected: bool) -> Result<(), StoreError> {
        if self.position(id).is_none() {
            return Err(StoreError::UnknownRecord(id));
        }
        if selected {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
        Ok(())
    }

    /// 全行を選択 / 全解除
    pub fn select_all(&mut self, selected: bool) {
        if selected {
            self.selected = self.tasks.iter().map(|task| task.id).collect();
        } else {
            self.selected.clear();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    /// 選択中の ID（一覧の並び順）
    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.tasks
            .iter()
            .filter(|task| self.selected.contains(&task.id))
            .map(|task| task.id)
            .collect()
    }

    /// エクスポート対象をシートにする
    ///
    /// - 選択があれば選択分だけ（一覧の並び順）
    /// - なければ全件
    /// - 対象が 0 件なら `ExportError::NothingToExport`
    pub fn export_selection(&self) -> Result<ExportSheet, ExportError> {
        let use_selection = !self.selected.is_empty();
        let sheet = ExportSheet::from_records(
            self.tasks
                .iter()
                .filter(|task| !use_selection || self.selected.contains(&task.id))
                .map(|task| &task.record),
        );

        if sheet.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        Ok(sheet)
    }

    fn admit(mut candidate: TaskRecord) -> Result<TaskRecord, StoreError> {
        let errors = validate(&candidate);
        if !errors.is_empty() {
            debug!(%errors, "candidate rejected");
            return Err(StoreError::Invalid(errors));
        }
        candidate.refresh_total_hours();
        Ok(candidate)
    }

    fn replace(&mut self, index: usize, candidate: TaskRecord) -> Result<(), StoreError> {
        let record = Self::admit(candidate)?;
        let task = &mut self.tasks[index];
        task.record = record;
        debug!(id = %task.id, index, "task updated");

        self.persist()
    }

    fn remove(&mut self, index: usize) -> Result<TaskRecord, StoreError> {
        let task = self.tasks.remove(index);
        self.selected.remove(&task.id);
        debug!(id = %task.id, index, len = self.tasks.len(), "task deleted");

        self.persist()?;
        Ok(task.record)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = persistence::encode(&self.tasks)
            .map_err(|err| StoreError::Storage(err.into()))?;
        self.slot.write(&json).map_err(|err| {
            warn!(error = %err, "task list could not be saved");
            StoreError::Storage(err)
        })
    }
}
