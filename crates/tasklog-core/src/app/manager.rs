//! TaskManager - フォーム操作の窓口
//!
//! 画面（またはCLI）はこの型だけを触ります。
//!
//! # 主な流れ
//! 1. `open_create()` / `open_edit(id)` でフォームを開く
//! 2. `set_field(field, value)` を入力ごとに呼ぶ（そのフィールドのエラーは消える）
//! 3. `save()` で Store に渡す。失敗したらエラーはフォームに残る
//!
//! # 削除の確認
//! `delete()` は `Prompt::confirm` が戻るまでブロックします。
//! `&mut self` を握ったままなので、確認中に他の変更が割り込むことはありません。

use std::path::PathBuf;

use tracing::{info, warn};

use crate::domain::{Field, FieldErrors, RecordId, TaskRecord};
use crate::error::{FormError, StoreError};
use crate::ports::{ExportError, Exporter, IdGenerator, NoticeKind, Prompt, StorageSlot};

use super::store::TaskStore;

pub const MSG_ADDED: &str = "Task added successfully";
pub const MSG_UPDATED: &str = "Task updated successfully";
pub const MSG_CONFIRM_DELETE: &str = "Are you sure? This action cannot be undone";
pub const MSG_DELETED: &str = "Your task has been deleted.";
pub const MSG_NOTHING_TO_EXPORT: &str = "There are no tasks to download.";

/// 開いているフォームの状態
#[derive(Debug, Clone)]
pub struct Form {
    draft: TaskRecord,
    editing: Option<RecordId>,
    errors: FieldErrors,
}

impl Form {
    pub fn draft(&self) -> &TaskRecord {
        &self.draft
    }

    /// 編集中なら対象の ID、新規作成なら None
    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

/// save() の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created(RecordId),
    Updated(RecordId),
}

pub struct TaskManager<S, G, P, E> {
    store: TaskStore<S, G>,
    prompt: P,
    exporter: E,
    form: Option<Form>,
}

impl<S, G, P, E> TaskManager<S, G, P, E>
where
    S: StorageSlot,
    G: IdGenerator,
    P: Prompt,
    E: Exporter,
{
    pub fn new(store: TaskStore<S, G>, prompt: P, exporter: E) -> Self {
        Self {
            store,
            prompt,
            exporter,
            form: None,
        }
    }

    pub fn store(&self) -> &TaskStore<S, G> {
        &self.store
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    /// 新規作成フォームを初期値で開く
    pub fn open_create(&mut self) {
        self.form = Some(Form {
            draft: TaskRecord::form_defaults(),
            editing: None,
            errors: FieldErrors::new(),
        });
    }

    /// 既存レコードのコピーで編集フォームを開く
    pub fn open_edit(&mut self, id: RecordId) -> Result<(), StoreError> {
        let draft = self
            .store
            .get(id)
            .cloned()
            .ok_or(StoreError::UnknownRecord(id))?;
        self.form = Some(Form {
            draft,
            editing: Some(id),
            errors: FieldErrors::new(),
        });
        Ok(())
    }

    pub fn open_edit_at(&mut self, index: usize) -> Result<(), StoreError> {
        let id = self.store.id_at(index)?;
        self.open_edit(id)
    }

    /// 入力 1 件分の変更イベント
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        let form = self.form.as_mut().ok_or(FormError::NotOpen)?;
        form.draft.set(field, value)?;
        form.errors.remove(field);
        Ok(())
    }

    /// フォームの内容を保存する
    ///
    /// 検証エラーはフォームに保持したまま `FormError::Invalid` を返す。
    pub fn save(&mut self) -> Result<Saved, FormError> {
        let form = self.form.as_mut().ok_or(FormError::NotOpen)?;
        let candidate = form.draft.clone();

        let result = match form.editing {
            Some(id) => self.store.update(id, candidate).map(|()| Saved::Updated(id)),
            None => self.store.create(candidate).map(Saved::Created),
        };

        match result {
            Ok(saved) => {
                self.form = None;
                let message = match saved {
                    Saved::Created(_) => MSG_ADDED,
                    Saved::Updated(_) => MSG_UPDATED,
                };
                self.prompt.notify(message, NoticeKind::Success);
                Ok(saved)
            }
            Err(StoreError::Invalid(errors)) => {
                form.errors = errors.clone();
                Err(FormError::Invalid(errors))
            }
            Err(err) => {
                // 保存失敗。メモリ上の一覧は更新済みなのでフォームは閉じる
                self.form = None;
                self.prompt.notify(&err.to_string(), NoticeKind::Error);
                Err(err.into())
            }
        }
    }

    /// 入力内容とエラーを捨てて閉じる
    pub fn close(&mut self) {
        self.form = None;
    }

    /// 確認してから削除する
    ///
    /// # 戻り値
    /// - `Ok(true)`: 削除した
    /// - `Ok(false)`: 確認でキャンセルされた（何も変わらない）
    pub fn delete(&mut self, id: RecordId) -> Result<bool, StoreError> {
        if self.store.position(id).is_none() {
            return Err(StoreError::UnknownRecord(id));
        }
        if !self.prompt.confirm(MSG_CONFIRM_DELETE) {
            info!(%id, "delete cancelled");
            return Ok(false);
        }

        if let Err(err) = self.store.delete(id) {
            if matches!(err, StoreError::Storage(_)) {
                self.prompt.notify(&err.to_string(), NoticeKind::Error);
            }
            return Err(err);
        }
        if self.form.as_ref().is_some_and(|form| form.editing == Some(id)) {
            self.form = None;
        }
        self.prompt.notify(MSG_DELETED, NoticeKind::Success);
        Ok(true)
    }

    pub fn delete_at(&mut self, index: usize) -> Result<bool, StoreError> {
        let id = self.store.id_at(index)?;
        self.delete(id)
    }

    pub fn toggle_select(&mut self, id: RecordId, selected: bool) -> Result<(), StoreError> {
        self.store.toggle_select(id, selected)
    }

    pub fn select_all(&mut self, selected: bool) {
        self.store.select_all(selected);
    }

    /// 選択分（なければ全件）を書き出す
    ///
    /// # 戻り値
    /// - `Ok(Some(path))`: 書き出したファイル
    /// - `Ok(None)`: 対象 0 件（警告を通知、ファイルは作らない）
    pub fn export(&mut self) -> Result<Option<PathBuf>, ExportError> {
        let sheet = match self.store.export_selection() {
            Ok(sheet) => sheet,
            Err(ExportError::NothingToExport) => {
                self.prompt.notify(MSG_NOTHING_TO_EXPORT, NoticeKind::Warning);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        match self.exporter.export(&sheet) {
            Ok(path) => {
                self.store.clear_selection();
                Ok(Some(path))
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                self.prompt.notify(&err.to_string(), NoticeKind::Error);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExportSheet, IssueStatus};
    use crate::impls::MemorySlot;
    use crate::ports::{FixedClock, UlidGenerator};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    /// 返答を決め打ちし、通知を記録する Prompt
    #[derive(Default)]
    struct ScriptedPrompt {
        answer: bool,
        asked: Vec<String>,
        notices: Vec<(String, NoticeKind)>,
    }

    impl Prompt for ScriptedPrompt {
        fn confirm(&mut self, prompt: &str) -> bool {
            self.asked.push(prompt.to_string());
            self.answer
        }

        fn notify(&mut self, message: &str, kind: NoticeKind) {
            self.notices.push((message.to_string(), kind));
        }
    }

    /// 受け取ったシートを記録する Exporter
    #[derive(Default)]
    struct CapturingExporter {
        sheets: Vec<ExportSheet>,
    }

    impl Exporter for CapturingExporter {
        fn export(&mut self, sheet: &ExportSheet) -> Result<PathBuf, ExportError> {
            self.sheets.push(sheet.clone());
            Ok(PathBuf::from("tasks.xlsx"))
        }
    }

    type Manager =
        TaskManager<MemorySlot, UlidGenerator<FixedClock>, ScriptedPrompt, CapturingExporter>;

    #[fixture]
    fn manager() -> Manager {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
        let store = TaskStore::load(MemorySlot::new(), UlidGenerator::new(clock));
        TaskManager::new(store, ScriptedPrompt::default(), CapturingExporter::default())
    }

    fn fill(manager: &mut Manager, workstation: &str) {
        let fields = [
            (Field::Date, "2024-06-01"),
            (Field::Workstation, workstation),
            (Field::IssueType, "network"),
            (Field::IssueDescription, "No link light"),
            (Field::ResolutionRemark, "Reseated cable"),
            (Field::TaskCompletedDate, "2024-06-01"),
            (Field::TaskDuration, "0:20"),
            (Field::ReceivedFrom, "Ops"),
            (Field::ConfirmedTo, "Ops lead"),
            (Field::InTime, "10:00"),
            (Field::OutTime, "10:20"),
        ];
        for (field, value) in fields {
            manager.set_field(field, value).unwrap();
        }
    }

    fn add(manager: &mut Manager, workstation: &str) -> RecordId {
        manager.open_create();
        fill(manager, workstation);
        match manager.save().unwrap() {
            Saved::Created(id) => id,
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[rstest]
    fn set_field_requires_an_open_form(mut manager: Manager) {
        assert!(matches!(
            manager.set_field(Field::Date, "2024-01-01"),
            Err(FormError::NotOpen)
        ));
    }

    #[rstest]
    fn save_creates_and_notifies(mut manager: Manager) {
        let id = add(&mut manager, "WS 9");

        assert!(manager.form().is_none());
        assert_eq!(manager.store().len(), 1);
        assert_eq!(manager.store().get(id).unwrap().total_hours, "00:20");
        assert_eq!(
            manager.prompt().notices,
            vec![(MSG_ADDED.to_string(), NoticeKind::Success)]
        );
    }

    #[rstest]
    fn failed_save_keeps_errors_on_the_form(mut manager: Manager) {
        manager.open_create();
        fill(&mut manager, "WS 9");
        manager.set_field(Field::ResolutionRemark, "").unwrap();

        let err = manager.save().unwrap_err();

        assert!(matches!(err, FormError::Invalid(ref errors) if errors.contains(Field::ResolutionRemark)));
        let form = manager.form().unwrap();
        assert!(form.errors().contains(Field::ResolutionRemark));
        assert_eq!(manager.store().len(), 0);
        assert!(manager.prompt().notices.is_empty());
    }

    #[rstest]
    fn editing_a_field_clears_its_error_only(mut manager: Manager) {
        manager.open_create();
        manager.save().unwrap_err();
        assert!(manager.form().unwrap().errors().contains(Field::Date));

        manager.set_field(Field::Date, "2024-06-01").unwrap();

        let errors = manager.form().unwrap().errors();
        assert!(!errors.contains(Field::Date));
        assert!(errors.contains(Field::Workstation));
    }

    #[rstest]
    fn total_hours_cannot_be_typed_in(mut manager: Manager) {
        manager.open_create();
        assert!(matches!(
            manager.set_field(Field::TotalHours, "03:00"),
            Err(FormError::Field(_))
        ));
    }

    #[rstest]
    fn edit_updates_in_place(mut manager: Manager) {
        let first = add(&mut manager, "A");
        add(&mut manager, "B");

        manager.open_edit_at(0).unwrap();
        assert_eq!(manager.form().unwrap().editing(), Some(first));
        assert_eq!(manager.form().unwrap().draft().workstation, "A");
        manager.set_field(Field::IssueStatus, "Resolve").unwrap();

        assert_eq!(manager.save().unwrap(), Saved::Updated(first));
        assert_eq!(manager.store().id_at(0).unwrap(), first);
        assert_eq!(
            manager.store().get(first).unwrap().issue_status,
            Some(IssueStatus::Resolve)
        );
        assert_eq!(
            manager.prompt().notices.last().unwrap(),
            &(MSG_UPDATED.to_string(), NoticeKind::Success)
        );
    }

    #[rstest]
    fn close_discards_the_draft(mut manager: Manager) {
        manager.open_create();
        manager.set_field(Field::Workstation, "WS").unwrap();
        manager.close();

        assert!(manager.form().is_none());
        assert!(manager.store().is_empty());
    }

    #[rstest]
    fn declined_delete_changes_nothing(mut manager: Manager) {
        let id = add(&mut manager, "A");
        manager.prompt.answer = false;

        assert!(!manager.delete(id).unwrap());

        assert_eq!(manager.store().len(), 1);
        assert_eq!(manager.prompt().asked, vec![MSG_CONFIRM_DELETE.to_string()]);
    }

    #[rstest]
    fn confirmed_delete_removes_and_notifies(mut manager: Manager) {
        add(&mut manager, "A");
        add(&mut manager, "B");
        manager.prompt.answer = true;

        assert!(manager.delete_at(0).unwrap());

        assert_eq!(manager.store().len(), 1);
        assert_eq!(manager.store().records().next().unwrap().1.workstation, "B");
        assert_eq!(
            manager.prompt().notices.last().unwrap(),
            &(MSG_DELETED.to_string(), NoticeKind::Success)
        );
    }

    #[rstest]
    fn delete_out_of_range_does_not_ask(mut manager: Manager) {
        assert!(matches!(
            manager.delete_at(0),
            Err(StoreError::IndexOutOfRange { .. })
        ));
        assert!(manager.prompt().asked.is_empty());
    }

    #[rstest]
    fn export_with_nothing_warns_and_writes_nothing(mut manager: Manager) {
        assert_eq!(manager.export().unwrap(), None);

        assert!(manager.exporter().sheets.is_empty());
        assert_eq!(
            manager.prompt().notices,
            vec![(MSG_NOTHING_TO_EXPORT.to_string(), NoticeKind::Warning)]
        );
    }

    #[rstest]
    fn export_selected_then_clears_selection(mut manager: Manager) {
        add(&mut manager, "A");
        let b = add(&mut manager, "B");
        manager.toggle_select(b, true).unwrap();

        let path = manager.export().unwrap();

        assert_eq!(path, Some(PathBuf::from("tasks.xlsx")));
        assert_eq!(manager.exporter().sheets[0].row_count(), 1);
        assert!(manager.store().selected_ids().is_empty());

        // 選択が消えたので次は全件
        manager.export().unwrap();
        assert_eq!(manager.exporter().sheets[1].row_count(), 2);
    }
}
