//! Plain-text animation files.
//!
//! ```text
//! <frame count> <transform node count>
//! tx ty tz          \  repeated per node,
//! qw qx qy qz       /  then per frame
//! ```
//!
//! Values are written with Rust's shortest round-tripping float format, so a
//! save followed by a load reproduces every component exactly.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use glam::{Quat, Vec3};

use crate::animation::frame::Frame;
use crate::animation::track::Animation;
use crate::errors::{PoseError, Result};
use crate::math::RigidTransform;

/// Squared quaternion norms below this cannot be normalized.
const MIN_QUAT_NORM_SQ: f32 = 1e-12;

pub fn save_animation<W: Write>(animation: &Animation, node_count: usize, writer: W) -> Result<()> {
    let mut out = BufWriter::new(writer);
    writeln!(out, "{} {}", animation.len(), node_count)?;
    for (index, frame) in animation.frames().iter().enumerate() {
        if frame.len() != node_count {
            return Err(PoseError::FrameLengthMismatch {
                expected: node_count,
                actual: frame.len(),
            });
        }
        log::trace!("Writing frame {index}");
        for pose in frame.poses() {
            let t = pose.translation;
            let q = pose.rotation;
            writeln!(out, "{} {} {}", t.x, t.y, t.z)?;
            writeln!(out, "{} {} {} {}", q.w, q.x, q.y, q.z)?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn save_animation_to_file(
    animation: &Animation,
    node_count: usize,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    save_animation(animation, node_count, File::create(path)?)?;
    log::info!(
        "Saved {} frames of {} nodes to {}",
        animation.len(),
        node_count,
        path.display()
    );
    Ok(())
}

/// Line-numbered reader over the non-empty lines of the input.
struct Lines<R> {
    inner: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            line: 0,
        }
    }

    fn format_error(&self, reason: impl Into<String>) -> PoseError {
        PoseError::AnimationFormat {
            line: self.line,
            reason: reason.into(),
        }
    }

    /// Next non-empty line split into exactly `N` values.
    fn values<T: FromStr, const N: usize>(&mut self, what: &str) -> Result<[T; N]> {
        let text = loop {
            match self.inner.next() {
                Some(line) => {
                    self.line += 1;
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err(self.format_error(format!("unexpected end of file, expected {what}"))),
            }
        };

        let parsed = text
            .split_whitespace()
            .map(str::parse::<T>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| self.format_error(format!("malformed {what}: '{}'", text.trim())))?;
        let count = parsed.len();
        parsed
            .try_into()
            .map_err(|_| self.format_error(format!("expected {N} values for {what}, found {count}")))
    }
}

/// Parses an animation whose frames must hold `expected_nodes` poses.
///
/// A file written for a scene with a different transform-node count is
/// rejected with [`PoseError::FrameLengthMismatch`]. An empty animation may
/// carry any node count, including the `0 0` header.
pub fn load_animation<R: BufRead>(reader: R, expected_nodes: usize) -> Result<Animation> {
    let mut lines = Lines::new(reader);
    let [frame_count, node_count] = lines.values::<usize, 2>("header")?;
    if frame_count == 0 {
        return Ok(Animation::new());
    }
    if node_count != expected_nodes {
        return Err(PoseError::FrameLengthMismatch {
            expected: expected_nodes,
            actual: node_count,
        });
    }

    // The header count is untrusted; frames grow as they are read.
    let mut frames = Vec::new();
    for _ in 0..frame_count {
        let mut poses = Vec::with_capacity(expected_nodes);
        for _ in 0..expected_nodes {
            let [tx, ty, tz] = lines.values::<f32, 3>("translation")?;
            let [qw, qx, qy, qz] = lines.values::<f32, 4>("rotation")?;
            let rotation = Quat::from_xyzw(qx, qy, qz, qw);
            if !rotation.is_finite() || rotation.length_squared() < MIN_QUAT_NORM_SQ {
                return Err(lines.format_error("rotation is not a valid quaternion"));
            }
            poses.push(RigidTransform::new(Vec3::new(tx, ty, tz), rotation));
        }
        frames.push(Frame::new(poses));
    }

    Animation::from_frames(frames)
}

pub fn load_animation_from_file(path: impl AsRef<Path>, expected_nodes: usize) -> Result<Animation> {
    let path = path.as_ref();
    let animation = load_animation(BufReader::new(File::open(path)?), expected_nodes)?;
    log::info!("Loaded {} frames from {}", animation.len(), path.display());
    Ok(animation)
}
