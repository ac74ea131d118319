//! Post module
//!
//! Post models, the status state machine, listing queries and calendar
//! bucketing.

pub mod calendar;
pub mod model;
pub mod query;
pub mod status;

pub use calendar::{CalendarDay, CalendarMonth};
pub use model::{NewPost, Post, PostEdit, PostPatch};
pub use query::{PostQuery, PostSort, StatusCounts};
pub use status::{PostStatus, StatusChange, StatusMachine, Trigger};
