//! Subject resolution: is the affected party the viewer, or someone else?
//!
//! Every removal updater needs the same comparison, and the cache surgery it
//! picks differs sharply between the two answers (losing one's own org
//! membership cascades; losing someone else's detaches one edge). Resolving
//! the subject in one place keeps the branch from drifting between updaters.

use huddle_core::UserId;

/// Who a mutation payload is about, relative to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// True when the affected user is the locally authenticated viewer.
    pub is_viewer: bool,
    /// The affected user, when the payload named one.
    pub subject_id: Option<UserId>,
}

impl Subject {
    /// True when the payload named an affected user who is not the viewer.
    pub fn is_other(&self) -> bool {
        self.subject_id.is_some() && !self.is_viewer
    }
}

/// Resolve the affected subject of a payload against the viewer id.
///
/// A payload with no user field resolves to a non-viewer subject with no
/// id: updaters treat that as "someone else" and do the narrow thing.
pub fn resolve_subject(subject_id: Option<&UserId>, viewer_id: &UserId) -> Subject {
    Subject {
        is_viewer: subject_id == Some(viewer_id),
        subject_id: subject_id.cloned(),
    }
}
