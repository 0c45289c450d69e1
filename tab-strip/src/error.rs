//! Errors reported by [`TabStripController`](crate::TabStripController).
//!
//! Only caller misuse is an error. Unsupported mode/gravity combinations are
//! substituted with the nearest supported one and logged, and operations
//! that arrive before the strip has been measured are deferred.

use thiserror::Error;

use crate::tab::StripId;

/// Misuse of the tab strip API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabStripError {
    /// The tab was created by another controller's [`new_tab`](crate::TabStripController::new_tab).
    #[error("tab belongs to {tab_owner}, it cannot be attached to {strip}")]
    ForeignTab {
        /// Controller that created the tab.
        tab_owner: StripId,
        /// Controller the tab was offered to.
        strip: StripId,
    },
    /// The key no longer refers to an attached tab.
    #[error("tab is not attached to this strip")]
    DetachedTab,
    /// An insertion or removal index outside the tab list.
    #[error("tab position {position} is out of range for {len} tabs")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Current number of tabs.
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = TabStripError> = std::result::Result<T, E>;
