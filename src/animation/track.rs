//! Keyframe list with an editing cursor.

use crate::animation::frame::Frame;
use crate::errors::{PoseError, Result};

/// Ordered keyframes and a cursor.
///
/// The cursor is either on a frame (`Some(index)`) or at the end sentinel
/// (`None`), the position one past the last frame. An empty animation only
/// has the end sentinel.
///
/// All frames have the same length; inserting or replacing with a frame of
/// another length is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    frames: Vec<Frame>,
    cursor: Option<usize>,
}

impl Animation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an animation with the cursor on the first frame, if any.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self> {
        if let Some(first) = frames.first()
            && let Some(bad) = frames.iter().find(|f| f.len() != first.len())
        {
            return Err(PoseError::FrameLengthMismatch {
                expected: first.len(),
                actual: bad.len(),
            });
        }
        let cursor = if frames.is_empty() { None } else { Some(0) };
        Ok(Self { frames, cursor })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Cursor position; `None` is the end sentinel.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Frame under the cursor, `None` at the end sentinel.
    #[must_use]
    pub fn current(&self) -> Option<&Frame> {
        self.cursor.and_then(|i| self.frames.get(i))
    }

    /// Transform-node count shared by every frame.
    #[must_use]
    pub fn frame_len(&self) -> Option<usize> {
        self.frames.first().map(Frame::len)
    }

    fn check_len(&self, frame: &Frame) -> Result<()> {
        match self.frame_len() {
            Some(expected) if expected != frame.len() => Err(PoseError::FrameLengthMismatch {
                expected,
                actual: frame.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Inserts `frame` right after the cursor, or at the end when the cursor
    /// is at the end sentinel. The cursor moves onto the new frame.
    pub fn insert_after_cursor(&mut self, frame: Frame) -> Result<usize> {
        self.check_len(&frame)?;
        let index = self.cursor.map_or(self.frames.len(), |i| i + 1);
        self.frames.insert(index, frame);
        self.cursor = Some(index);
        Ok(index)
    }

    /// Overwrites the frame under the cursor; at the end sentinel this
    /// inserts instead.
    pub fn replace_at_cursor(&mut self, frame: Frame) -> Result<usize> {
        match self.cursor {
            Some(index) => {
                self.check_len(&frame)?;
                self.frames[index] = frame;
                Ok(index)
            }
            None => self.insert_after_cursor(frame),
        }
    }

    /// Removes the frame under the cursor.
    ///
    /// The cursor moves to the predecessor, or to the end sentinel when the
    /// first frame was removed. Returns `None` (and does nothing) at the end
    /// sentinel.
    pub fn delete_at_cursor(&mut self) -> Option<Frame> {
        let index = self.cursor?;
        let removed = self.frames.remove(index);
        self.cursor = index.checked_sub(1);
        Some(removed)
    }

    /// Moves to the next frame. No-op on the last frame and at the end
    /// sentinel. Returns whether the cursor moved.
    pub fn step_forward(&mut self) -> bool {
        match self.cursor {
            Some(i) if i + 1 < self.frames.len() => {
                self.cursor = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Moves to the previous frame. From the end sentinel this is the last
    /// frame. No-op on the first frame. Returns whether the cursor moved.
    pub fn step_backward(&mut self) -> bool {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                true
            }
            None if !self.frames.is_empty() => {
                self.cursor = Some(self.frames.len() - 1);
                true
            }
            _ => false,
        }
    }

    /// Parks the cursor after playback: on the second to last frame, on the
    /// first one if there are fewer than two, at the end sentinel if empty.
    pub fn rest_cursor(&mut self) {
        self.cursor = match self.frames.len() {
            0 => None,
            1 => Some(0),
            n => Some(n - 2),
        };
    }

    /// Moves the cursor onto `index`, or the end sentinel when out of range.
    pub fn set_cursor(&mut self, index: Option<usize>) {
        self.cursor = index.filter(|&i| i < self.frames.len());
    }

    /// The four frames `F[i-1], F[i], F[i+1], F[i+2]` around segment `i`.
    #[must_use]
    pub fn window(&self, i: usize) -> Option<[&Frame; 4]> {
        let start = i.checked_sub(1)?;
        match self.frames.get(start..start + 4)? {
            [a, b, c, d] => Some([a, b, c, d]),
            _ => None,
        }
    }
}
