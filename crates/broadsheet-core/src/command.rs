//! Write requests against articles and author profiles.

use uuid::Uuid;

/// A write to an article or an author profile.
///
/// Handlers log every command they run under its name and correlation id.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Short name of the write, such as `articles.publish_article`.
    fn command_type(&self) -> &'static str;

    /// Id tying the handler's log lines to the HTTP request that issued it.
    fn correlation_id(&self) -> Uuid;
}
