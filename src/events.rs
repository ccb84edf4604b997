//! Well-known event and action names
//!
//! Handlers may bind to a bare event name (firing for every action of that
//! event) or to an `event.action` key (firing for one specific action, ahead
//! of any bare-name handlers). These constants cover the editorial
//! operations the snapshot system observes; callers are free to dispatch
//! under their own names as well.

/// Content object lifecycle events (pages, blocks, assets)
pub const CONTENT: &str = "content";

/// Form submission events
pub const FORM: &str = "form";

/// Site-tree page management events
pub const PAGE: &str = "page";

/// Actions qualifying an event
pub mod actions {
    /// Draft content pushed live
    pub const PUBLISH: &str = "publish";

    /// Live content withdrawn
    pub const UNPUBLISH: &str = "unpublish";

    /// Draft saved without publication
    pub const SAVE: &str = "save";

    /// Content archived
    pub const ARCHIVE: &str = "archive";

    /// Archived content restored
    pub const RESTORE: &str = "restore";

    /// Form submitted
    pub const SUBMIT: &str = "submit";
}

/// Compose the specific handler-table key for an event/action pair.
///
/// This is exactly the key `trigger` checks first, before falling back to
/// the bare event name.
///
/// # Examples
///
/// ```
/// use snapshot_dispatch::events;
///
/// assert_eq!(events::event_key(events::CONTENT, events::actions::PUBLISH), "content.publish");
/// ```
pub fn event_key(event: &str, action: &str) -> String {
    format!("{event}.{action}")
}
