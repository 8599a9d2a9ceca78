//! Use-case handlers for the forum context.

mod create_thread;
mod list_posts;
mod list_threads;
mod reply_to_thread;

pub use create_thread::{CreateThreadCommand, CreateThreadHandler};
pub use list_posts::{ListPostsHandler, ListPostsQuery};
pub use list_threads::{ListThreadsHandler, ListThreadsQuery};
pub use reply_to_thread::{ReplyToThreadCommand, ReplyToThreadHandler};
