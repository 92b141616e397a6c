//! State of the major selection page.
//!
//! The flow owns everything the page needs apart from rendering: the loaded
//! user and majors, the pending and initial selection, the loading flag, the
//! message shown to the user and where the session goes next.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{MajorCatalog, MajorCatalogError, UserCacheSlot, UserDirectory};
use crate::domain::{
    CacheReconciliation, Error, Identifier, Major, MajorCatalogue, UserCacheSync, UserRecord,
};

const MAJORS_FETCH_FAILED: &str = "Failed to load the major list.";
const MAJORS_PAYLOAD_INVALID: &str = "Major data has an unexpected format.";

/// Page the session moves to once the flow finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Unauthenticated landing page.
    Landing,
    /// The user's profile page, after a confirmed selection.
    MyPage,
    /// Home page, when the user skips the selection.
    Home,
}

impl Navigation {
    /// Route of the destination page.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::MyPage => "/mypage",
            Self::Home => "/home",
        }
    }
}

/// One row of the selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorOption<'a> {
    /// The listed major.
    pub major: &'a Major,
    /// Whether this major is the pending selection.
    pub selected: bool,
    /// Whether this major was the user's major when the page loaded.
    pub current: bool,
}

/// Non-presentational state of the major selection page.
pub struct MajorSelectionFlow<D, M, C> {
    sync: UserCacheSync<D, C>,
    catalog: Arc<M>,
    user: Option<UserRecord>,
    majors: MajorCatalogue,
    selected: Option<Identifier>,
    initial: Option<Identifier>,
    loading: bool,
    message: Option<String>,
    navigation: Option<Navigation>,
}

impl<D, M, C> MajorSelectionFlow<D, M, C> {
    /// Create a flow in its loading state.
    pub fn new(sync: UserCacheSync<D, C>, catalog: Arc<M>) -> Self {
        Self {
            sync,
            catalog,
            user: None,
            majors: MajorCatalogue::default(),
            selected: None,
            initial: None,
            loading: true,
            message: None,
            navigation: None,
        }
    }

    /// Session user, once resolved.
    pub const fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    /// Majors offered on the page, in server order.
    pub const fn majors(&self) -> &MajorCatalogue {
        &self.majors
    }

    /// Pending selection.
    pub const fn selected(&self) -> Option<&Identifier> {
        self.selected.as_ref()
    }

    /// The user's major when the page loaded.
    pub const fn initial(&self) -> Option<&Identifier> {
        self.initial.as_ref()
    }

    /// Whether the page is still loading its data.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message to show the user, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Where the session goes next, once decided.
    pub const fn navigation(&self) -> Option<Navigation> {
        self.navigation
    }

    /// Set the pending selection.
    pub fn select(&mut self, major_id: Identifier) {
        debug!(%major_id, "major selected");
        self.selected = Some(major_id);
    }

    /// Leave the page without selecting.
    pub fn skip(&mut self) -> Navigation {
        self.navigation = Some(Navigation::Home);
        Navigation::Home
    }

    /// Whether a submission would be attempted.
    pub const fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.loading
    }

    /// The majors in server order with their selection flags.
    pub fn options(&self) -> Vec<MajorOption<'_>> {
        self.majors
            .iter()
            .map(|major| MajorOption {
                major,
                selected: self.selected.as_ref() == Some(major.id()),
                current: self.initial.as_ref() == Some(major.id()),
            })
            .collect()
    }

    fn sync_initial_selection(&mut self) {
        if self.majors.is_empty() {
            return;
        }
        let Some(current) = self.user.as_ref().and_then(UserRecord::current_major_id) else {
            return;
        };
        debug!(%current, "user has an existing major");
        self.selected = Some(current.clone());
        self.initial = Some(current);
    }
}

impl<D, M, C> MajorSelectionFlow<D, M, C>
where
    D: UserDirectory,
    M: MajorCatalog,
    C: UserCacheSlot,
{
    /// Load the user, then the majors.
    ///
    /// A failed user lookup sets the message and, when flagged, the landing
    /// navigation; the majors are still requested. Loading ends once the
    /// majors step finishes, whatever its outcome.
    pub async fn initialize(&mut self) {
        match self.sync.resolve_current_user().await {
            Ok(resolved) => {
                debug!(source = ?resolved.source, "user loaded");
                self.user = Some(resolved.record);
            }
            Err(error) => self.record_failure(&error),
        }

        match self.catalog.list_majors().await {
            Ok(majors) => {
                debug!(count = majors.len(), "majors loaded");
                self.majors = majors;
            }
            Err(error) => {
                warn!(%error, "major list unavailable");
                self.message = Some(Self::majors_message(&error).to_owned());
            }
        }
        self.loading = false;

        self.sync_initial_selection();
    }

    /// Submit the pending selection.
    ///
    /// On success the navigation moves to [`Navigation::MyPage`]. On failure
    /// the message is set and the flow stays on the page.
    pub async fn submit(&mut self) -> Result<CacheReconciliation, Error> {
        self.loading = true;
        let outcome = self
            .sync
            .apply_major_selection(self.user.as_ref(), self.selected.as_ref(), &self.majors)
            .await;
        self.loading = false;

        match &outcome {
            Ok(reconciliation) => {
                info!(?reconciliation, "major selection saved");
                self.navigation = Some(Navigation::MyPage);
            }
            Err(error) => self.record_failure(error),
        }
        outcome
    }

    fn record_failure(&mut self, error: &Error) {
        if error.redirects_to_landing() {
            self.navigation = Some(Navigation::Landing);
        }
        self.message = Some(error.message().to_owned());
    }

    fn majors_message(error: &MajorCatalogError) -> &'static str {
        match error {
            MajorCatalogError::Decode { .. } => MAJORS_PAYLOAD_INVALID,
            MajorCatalogError::Transport { .. }
            | MajorCatalogError::Timeout { .. }
            | MajorCatalogError::Unsuccessful { .. } => MAJORS_FETCH_FAILED,
        }
    }
}

#[cfg(test)]
#[path = "major_selection_flow_tests.rs"]
mod tests;
