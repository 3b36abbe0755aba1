//! Coordinate space state and the external conversion hook.

use super::entity::{Segment, VectorSequence};
use crate::core::Result;

/// Current coordinate space of a signal, with an optional pending target.
///
/// A pending target is consumed exactly once by [`SpaceState::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceState {
    /// Values are expressed in `space`.
    Applied { space: Option<String> },
    /// Values are in `space` and should be converted to `target`.
    Pending {
        space: Option<String>,
        target: String,
    },
}

impl Default for SpaceState {
    fn default() -> Self {
        SpaceState::Applied { space: None }
    }
}

impl SpaceState {
    /// Current space.
    pub fn space(&self) -> Option<&str> {
        match self {
            SpaceState::Applied { space } | SpaceState::Pending { space, .. } => space.as_deref(),
        }
    }

    /// Pending target space.
    pub fn target_space(&self) -> Option<&str> {
        match self {
            SpaceState::Applied { .. } => None,
            SpaceState::Pending { target, .. } => Some(target),
        }
    }

    /// Check whether a conversion is pending.
    pub fn is_pending(&self) -> bool {
        matches!(self, SpaceState::Pending { .. })
    }

    /// Set the current space directly, dropping any pending target.
    pub fn set_space(&mut self, space: Option<String>) {
        *self = SpaceState::Applied { space };
    }

    /// Request a conversion to `target`, replacing any earlier request.
    pub fn request(&mut self, target: impl Into<String>) {
        let space = self.space().map(str::to_owned);
        *self = SpaceState::Pending {
            space,
            target: target.into(),
        };
    }

    /// Move the pending target into the current space.
    /// Returns `false` if nothing was pending.
    pub fn commit(&mut self) -> bool {
        match std::mem::take(self) {
            SpaceState::Pending { target, .. } => {
                *self = SpaceState::Applied {
                    space: Some(target),
                };
                true
            }
            applied => {
                *self = applied;
                false
            }
        }
    }
}

/// Converts entity values between coordinate spaces.
///
/// Implemented by the application that knows the segment hierarchy; the
/// signal model only decides when and on what the conversion runs.
pub trait SpaceConverter {
    /// Express a vector sequence in `to`.
    fn convert_vectors(
        &self,
        value: &VectorSequence,
        from: Option<&str>,
        to: &str,
    ) -> Result<VectorSequence>;

    /// Express a segment in `to`.
    fn convert_segment(&self, value: &Segment, from: Option<&str>, to: &str) -> Result<Segment>;
}
