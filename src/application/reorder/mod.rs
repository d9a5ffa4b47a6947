//! Client-side half of list ordering: turning the visual order of a list into
//! a [`ReorderPayload`](crate::domain::ordering::ReorderPayload) and shipping
//! it to the endpoint that persists it.
//!
//! One [`ReorderSynchronizer`] is bound per list through
//! [`configure_reorder`]; lists differ only in their endpoint and in whether
//! they show ordinal labels.

mod list;
mod submit;
mod synchronizer;

pub use list::{ListEntry, OrderedList};
pub use submit::{HttpSubmitter, PayloadSubmitter, SubmitError};
pub use synchronizer::{
    Dispatched, FailureHook, ReorderBinding, ReorderError, ReorderSynchronizer, SyncState,
    configure_reorder,
};
