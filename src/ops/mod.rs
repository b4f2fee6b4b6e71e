//! Use-case orchestrators.
//!
//! Each orchestrator delegates one request to the relevant store (or the
//! assembler) and invokes exactly one listener callback with the result.
//! No storage logic lives here.

mod entry;
mod question;
mod survey;

pub use entry::{EntryOps, EntryOpsListener};
pub use question::{QuestionOps, QuestionOpsListener};
pub use survey::{SurveyOps, SurveyOpsListener};
