//! Forum context - discussion threads and posts.

mod errors;
mod post;
mod thread;

pub use errors::ForumError;
pub use post::ForumPost;
pub use thread::ForumThread;
