//! Inbox data models.
//!
//! An [`EmailRecord`] is one message in the inbox. Once the classifier has
//! looked at it, it carries an [`AnalysisResult`]. A [`Snapshot`] is an
//! immutable, ordered view of the whole inbox at one point in time.

mod analysis;
mod email;
mod snapshot;

pub use analysis::{AnalysisResult, Category};
pub use email::{EmailId, EmailRecord, Sender};
pub use snapshot::Snapshot;
