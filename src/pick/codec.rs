//! ID <-> color encoding for the pick pass.
//!
//! Each channel carries [`BITS_PER_CHANNEL`] bits of the ID: red the lowest
//! nibble, green the middle one, blue the highest. Colors are emitted at the
//! center of their 8-bit bin so that quantization cannot push them into a
//! neighbouring bin, and decoding only looks at the top bits of each byte.

use glam::Vec3;

use crate::errors::{PoseError, Result};

pub const BITS_PER_CHANNEL: u32 = 4;
/// Distinct levels per channel.
pub const LEVELS: u32 = 1 << BITS_PER_CHANNEL;
const MASK: u32 = LEVELS - 1;
/// Largest encodable ID. ID 0 is the background.
pub const MAX_ID: u32 = LEVELS * LEVELS * LEVELS - 1;

/// sRGB transfer function, encoded value to linear.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse of [`srgb_to_linear`].
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Flat color to render shape `id` with.
///
/// With an sRGB framebuffer the GPU encodes on write, so the bin-centered
/// value is converted to linear first; the byte that lands in the
/// framebuffer is then the bin center again.
pub fn id_to_color(id: u32, srgb: bool) -> Result<Vec3> {
    if id > MAX_ID {
        return Err(PoseError::PickCapacityExceeded(id));
    }
    let bins = Vec3::new(
        (id & MASK) as f32,
        ((id >> BITS_PER_CHANNEL) & MASK) as f32,
        ((id >> (2 * BITS_PER_CHANNEL)) & MASK) as f32,
    );
    let levels = LEVELS as f32;
    let color = bins / levels + Vec3::splat(0.5 / levels);
    if srgb {
        Ok(Vec3::new(
            srgb_to_linear(color.x),
            srgb_to_linear(color.y),
            srgb_to_linear(color.z),
        ))
    } else {
        Ok(color)
    }
}

/// Decodes a read-back 8-bit pixel.
#[must_use]
pub fn color_to_id(pixel: [u8; 3]) -> u32 {
    let unused = 8 - BITS_PER_CHANNEL;
    let [r, g, b] = pixel.map(|c| u32::from(c) >> unused);
    r | (g << BITS_PER_CHANNEL) | (b << (2 * BITS_PER_CHANNEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_transfer_is_invertible() {
        for i in 0..=20 {
            let c = i as f32 / 20.0;
            assert!((linear_to_srgb(srgb_to_linear(c)) - c).abs() < 1e-5);
        }
    }

    #[test]
    fn background_decodes_to_zero() {
        assert_eq!(color_to_id([0, 0, 0]), 0);
        assert_eq!(color_to_id([15, 15, 15]), 0);
    }

    #[test]
    fn overflowing_id_is_rejected() {
        assert!(matches!(
            id_to_color(MAX_ID + 1, false),
            Err(PoseError::PickCapacityExceeded(4096))
        ));
    }
}
