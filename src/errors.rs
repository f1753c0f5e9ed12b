//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`PoseError`] covers three failure classes:
//! - Structural errors: a node that cannot be reached, a frame whose length does
//!   not match the scene, a pick ID that was never allocated
//! - I/O errors: a missing or malformed animation file
//! - User-input errors: editing commands issued while an animation is playing
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, PoseError>`.
//!
//! ```rust,ignore
//! use posekit::errors::{PoseError, Result};
//!
//! fn load() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::scene::NodeKey;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum PoseError {
    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// The node is not present in the scene, or not reachable from the
    /// traversal root.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeKey),

    /// A transform node was required but the key refers to a shape node.
    #[error("Node {0:?} is not a transform node")]
    NotATransformNode(NodeKey),

    /// An accumulated-transform query asked to drop more levels than the
    /// path to the target contains.
    #[error("Offset {offset} exceeds path depth {depth}")]
    OffsetOutOfRange {
        /// Requested number of trailing levels to drop
        offset: usize,
        /// Number of levels on the path (including the implicit identity)
        depth: usize,
    },

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A frame does not hold exactly one pose per transform node.
    #[error("Frame length mismatch: expected {expected} poses, got {actual}")]
    FrameLengthMismatch {
        /// Transform-node count of the live scene
        expected: usize,
        /// Pose count carried by the frame
        actual: usize,
    },

    /// The animation file could not be parsed.
    #[error("Animation format error at line {line}: {reason}")]
    AnimationFormat {
        /// 1-based line number in the file
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// An editing command arrived while playback owns the scene poses.
    #[error("Cannot operate while an animation is playing")]
    PlaybackActive,

    // ========================================================================
    // Picking Errors
    // ========================================================================
    /// A decoded pick ID was never handed out during the pick pass.
    #[error("Pick ID {id} out of range (allocated: {allocated})")]
    PickIdOutOfRange {
        /// The decoded ID
        id: u32,
        /// Number of IDs recorded, including the background slot
        allocated: usize,
    },

    /// More shapes were rendered than the color encoding can represent.
    #[error("Too many pickable shapes: {0}")]
    PickCapacityExceeded(u32),

    // ========================================================================
    // I/O & Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Settings file could not be parsed.
    #[error("Settings parse error: {0}")]
    SettingsError(#[from] serde_json::Error),
}

/// Alias for `Result<T, PoseError>`.
pub type Result<T> = std::result::Result<T, PoseError>;
