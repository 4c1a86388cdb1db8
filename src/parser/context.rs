//! Hierarchical context tracking.
//!
//! Two rank-ordered frames, coarsest first. Setting the top frame clears
//! the sub frame; setting the sub frame leaves the top frame untouched. A
//! frame stays in effect for every line strictly between its own header
//! and the next header of equal-or-higher rank.
//!
//! The tracker is a plain value threaded through the scan, so a scan can
//! be restarted from any checkpoint with a reconstructed tracker.

/// Two-level context tracker with a top frame `T` and a sub frame `S`.
#[derive(Debug, Clone, Default)]
pub struct ContextTracker<T, S> {
    top: Option<T>,
    sub: Option<S>,
}

impl<T, S> ContextTracker<T, S> {
    pub fn new() -> Self {
        Self {
            top: None,
            sub: None,
        }
    }

    /// Replace the top frame. Lower-rank frames reset.
    pub fn set_top(&mut self, frame: T) {
        self.top = Some(frame);
        self.sub = None;
    }

    /// Replace the sub frame. The top frame is untouched.
    pub fn set_sub(&mut self, frame: S) {
        self.sub = Some(frame);
    }

    pub fn top(&self) -> Option<&T> {
        self.top.as_ref()
    }

    pub fn sub(&self) -> Option<&S> {
        self.sub.as_ref()
    }
}

impl<T: Clone, S: Clone> ContextTracker<T, S> {
    /// Snapshot of all active frames, attached to each record candidate
    /// created while the snapshot is current.
    pub fn snapshot(&self) -> (Option<T>, Option<S>) {
        (self.top.clone(), self.sub.clone())
    }
}

/// Second-level frame of the directory variant: a city-county header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locality {
    pub city: String,
    pub county: String,
}
