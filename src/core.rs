use std::sync::Arc;

use crate::{
    Result,
    ops::{EntryOps, QuestionOps, SurveyOps},
    store::{DocBackend, Store},
    stores::{EntryStore, HierarchyAssembler, QuestionStore, SurveyStore},
};

/// The assembled core: one shared store handle, the three entity stores,
/// the hierarchy assembler, and the use-case orchestrators, all wired by
/// explicit construction in [`crate::CoreBuilder`].
pub struct SurveyCore {
    store: Arc<Store>,
    surveys: Arc<SurveyStore>,
    questions: Arc<QuestionStore>,
    entries: Arc<EntryStore>,
    assembler: Arc<HierarchyAssembler>,
    survey_ops: Arc<SurveyOps>,
    question_ops: Arc<QuestionOps>,
    entry_ops: Arc<EntryOps>,
}

impl SurveyCore {
    pub(crate) fn new(backend: Arc<dyn DocBackend>) -> Self {
        let store = Arc::new(Store::new(backend));
        let surveys = Arc::new(SurveyStore::new(store.clone()));
        let questions = Arc::new(QuestionStore::new(store.clone()));
        let entries = Arc::new(EntryStore::new(store.clone()));
        let assembler = Arc::new(HierarchyAssembler::new(surveys.clone(), questions.clone()));
        let survey_ops = Arc::new(SurveyOps::new(surveys.clone(), assembler.clone()));
        let question_ops = Arc::new(QuestionOps::new(questions.clone()));
        let entry_ops = Arc::new(EntryOps::new(entries.clone()));

        Self {
            store,
            surveys,
            questions,
            entries,
            assembler,
            survey_ops,
            question_ops,
            entry_ops,
        }
    }

    pub fn surveys(&self) -> &SurveyStore {
        &self.surveys
    }

    pub fn questions(&self) -> &QuestionStore {
        &self.questions
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    pub fn hierarchy(&self) -> &HierarchyAssembler {
        &self.assembler
    }

    pub fn survey_ops(&self) -> &SurveyOps {
        &self.survey_ops
    }

    pub fn question_ops(&self) -> &QuestionOps {
        &self.question_ops
    }

    pub fn entry_ops(&self) -> &EntryOps {
        &self.entry_ops
    }

    /// Connects the shared store. Idempotent; operations issued without an
    /// explicit connect establish the connection lazily on first use.
    pub async fn connect(&self) -> Result<()> {
        self.store.connect().await
    }

    /// Tears the store connection down. Idempotent.
    pub async fn shutdown(&self) -> Result<()> {
        self.store.shutdown().await
    }
}
