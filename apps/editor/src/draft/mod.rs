// Draft synchronization: a local edit buffer for single-document sections
// (profile), flushed into the session's shared document after a quiet period.

pub mod debounce;
pub mod pipeline;
pub mod store;

pub use debounce::{Debouncer, ScheduledCallback};
pub use pipeline::DraftPipeline;
pub use store::{DocumentStore, Subscription};
