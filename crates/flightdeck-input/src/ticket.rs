//! Temporary exclusive focus for one frame.

use std::rc::{Rc, Weak};

use tracing::debug;

use crate::frame::FrameState;

/// Restores every frame's activation flag when dropped.
///
/// Returned by [`crate::Input::disable_all_input_frame_except`]. Frames that
/// were not alive when the ticket was taken are never touched, and frames
/// dropped in the meantime are skipped.
#[must_use = "dropping the ticket restores the previous frame states immediately"]
pub struct InputFrameStatusTicket {
    saved: Vec<(Weak<FrameState>, bool)>,
}

impl InputFrameStatusTicket {
    pub(crate) fn new(frames: &[Rc<FrameState>]) -> Self {
        Self {
            saved: frames
                .iter()
                .map(|frame| (Rc::downgrade(frame), frame.active.get()))
                .collect(),
        }
    }

    /// Number of frames whose state will be restored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

impl Drop for InputFrameStatusTicket {
    fn drop(&mut self) {
        let mut restored = 0;
        for (frame, active) in &self.saved {
            if let Some(frame) = frame.upgrade() {
                frame.active.set(*active);
                restored += 1;
            }
        }
        debug!("Restored {} of {} frame states", restored, self.saved.len());
    }
}

impl std::fmt::Debug for InputFrameStatusTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputFrameStatusTicket")
            .field("frames", &self.saved.len())
            .finish()
    }
}
