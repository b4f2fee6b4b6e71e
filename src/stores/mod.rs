//! Entity stores and the hierarchy assembler.
//!
//! Every public operation catches its own failures at this boundary and
//! converts them into the uniform response envelope; nothing propagates
//! to the orchestration layer as a raw error.

mod entry;
mod hierarchy;
mod question;
mod survey;

use tracing::debug;

use crate::{Envelope, Result, StatusResponse};

pub use entry::EntryStore;
pub use hierarchy::HierarchyAssembler;
pub use question::QuestionStore;
pub use survey::SurveyStore;

pub(crate) fn settle<T>(
    op: &str,
    result: Result<T>,
) -> Envelope<T> {
    match result {
        Ok(data) => Envelope::success(data),
        Err(err) => {
            debug!("{} failed: {}", op, err);
            Envelope::failure(&err)
        }
    }
}

pub(crate) fn settle_status(
    op: &str,
    result: Result<()>,
) -> StatusResponse {
    match result {
        Ok(()) => Envelope::status(),
        Err(err) => {
            debug!("{} failed: {}", op, err);
            Envelope::failure(&err)
        }
    }
}
