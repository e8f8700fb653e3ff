//! Classify-and-act traversal over a paginated resource.
//!
//! Nothing in here knows about Discord. The serenity side lives in
//! [`crate::discord::sweep`].

pub mod engine;
pub mod error;
pub mod guard;
pub mod summary;

pub use engine::{
    Action, ActionTarget, Fetched, ItemSource, Predicate, SecondaryAction, run_traversal,
};
pub use error::{ActionError, ErrorCode, ErrorPolicy};
pub use guard::{ConcurrencyGuard, Lease};
pub use summary::{Status, Summary};
