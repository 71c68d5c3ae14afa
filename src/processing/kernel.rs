//! Parallax shading kernel.
//!
//! Pure per-pixel function: depth-scaled offset, optional roll rotation about
//! the image center, edge-clamped color sampling, then the linear-to-sRGB
//! transfer. The kernel reads only the fixed scene pair and the per-frame
//! fused signal; it performs no I/O and cannot fail at runtime.
//!
//! Coordinates are normalized (u, v) with v = 0 at the top row, matching the
//! `image` crate's row order. Out-of-range sample coordinates are
//! edge-clamped rather than wrapped, so a large offset smears the border
//! instead of pulling in content from the opposite edge.

use image::{Rgba, RgbaImage};

use crate::assets::{DepthPlane, ScenePair, texel};
use crate::processing::color::linear_to_srgb_rgba;
use crate::signal::{FrameSignal, OffsetVector, RotationVector};

/// Nearest-texel sample of `img` at normalized (u, v), edge-clamped, with
/// channels mapped to [0, 1].
#[must_use]
pub fn sample_clamped(img: &RgbaImage, u: f32, v: f32) -> [f32; 4] {
    let (w, h) = img.dimensions();
    let p = img.get_pixel(texel(w, u), texel(h, v));
    [
        f32::from(p[0]) / 255.0,
        f32::from(p[1]) / 255.0,
        f32::from(p[2]) / 255.0,
        f32::from(p[3]) / 255.0,
    ]
}

/// Rotate a normalized coordinate about the image center (0.5, 0.5).
#[must_use]
pub fn rotate_about_center(uv: [f32; 2], angle: f32) -> [f32; 2] {
    let (s, c) = angle.sin_cos();
    let x = uv[0] - 0.5;
    let y = uv[1] - 0.5;
    [x * c - y * s + 0.5, x * s + y * c + 0.5]
}

/// Shade one pixel.
///
/// The depth map is sampled at the unrotated coordinate; only the color
/// sampling coordinate is rotated. Of the rotation vector only the
/// roll-equivalent `gamma` component affects this 2D kernel; alpha and beta
/// are accepted as extra signal bandwidth and intentionally unused.
#[must_use]
pub fn shade_pixel(
    color: &RgbaImage,
    depth: &DepthPlane,
    uv: [f32; 2],
    offset: OffsetVector,
    rotation: RotationVector,
) -> [f32; 4] {
    let multiplier = depth.sample(uv[0], uv[1]);
    let parallax = [offset.x * multiplier, offset.y * multiplier];
    let base = if rotation.gamma == 0.0 {
        uv
    } else {
        rotate_about_center(uv, rotation.gamma)
    };
    let sampled = sample_clamped(color, base[0] + parallax[0], base[1] + parallax[1]);
    linear_to_srgb_rgba(sampled)
}

/// Run the kernel across every pixel of an output frame sized like the color
/// image.
#[must_use]
pub fn render_frame(scene: &ScenePair, signal: &FrameSignal) -> RgbaImage {
    let (w, h) = scene.color.dimensions();
    let mut out = RgbaImage::new(w, h);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let uv = [
            (x as f32 + 0.5) / w as f32,
            (y as f32 + 0.5) / h as f32,
        ];
        let shaded = shade_pixel(&scene.color, &scene.depth, uv, signal.offset, signal.rotation);
        *px = Rgba([
            channel_to_u8(shaded[0]),
            channel_to_u8(shaded[1]),
            channel_to_u8(shaded[2]),
            channel_to_u8(shaded[3]),
        ]);
    }
    out
}

fn channel_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
