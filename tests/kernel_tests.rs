use image::{Rgba, RgbaImage};

use parallaxframe::assets::ScenePair;
use parallaxframe::processing::color::linear_to_srgb;
use parallaxframe::processing::kernel::render_frame;
use parallaxframe::signal::{FrameSignal, OffsetVector, RotationVector, SourceKind};

fn signal(offset: OffsetVector, rotation: RotationVector) -> FrameSignal {
    FrameSignal {
        offset,
        rotation,
        source: SourceKind::Pointer,
    }
}

fn srgb_u8(byte: u8) -> u8 {
    (linear_to_srgb(f32::from(byte) / 255.0) * 255.0)
        .round()
        .clamp(0.0, 255.0) as u8
}

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 37 % 256) as u8, (y * 53 % 256) as u8, 99, 255])
    })
}

#[test]
fn zero_offset_round_trips_through_the_transfer_curve() {
    let color = gradient(8, 6);
    let depth = RgbaImage::from_pixel(8, 6, Rgba([200, 0, 0, 255]));
    let scene = ScenePair::new(color.clone(), &depth).unwrap();

    let out = render_frame(&scene, &signal(OffsetVector::ZERO, RotationVector::ZERO));

    // Depth has no effect when the offset is zero: every output pixel is the
    // transfer curve applied to the unmodified color sample.
    for (x, y, px) in out.enumerate_pixels() {
        let src = color.get_pixel(x, y);
        assert_eq!(px[0], srgb_u8(src[0]), "red at ({x},{y})");
        assert_eq!(px[1], srgb_u8(src[1]), "green at ({x},{y})");
        assert_eq!(px[2], srgb_u8(src[2]), "blue at ({x},{y})");
        assert_eq!(px[3], src[3], "alpha at ({x},{y})");
    }
}

#[test]
fn zero_depth_never_shifts() {
    let color = gradient(4, 1);
    let depth = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 255]));
    let scene = ScenePair::new(color.clone(), &depth).unwrap();

    let out = render_frame(&scene, &signal(OffsetVector::new(0.25, 0.0), RotationVector::ZERO));

    for (x, y, px) in out.enumerate_pixels() {
        assert_eq!(px[0], srgb_u8(color.get_pixel(x, y)[0]));
    }
}

#[test]
fn full_depth_shifts_by_exactly_the_offset() {
    let color = gradient(4, 1);
    let depth = RgbaImage::from_pixel(4, 1, Rgba([255, 0, 0, 255]));
    let scene = ScenePair::new(color.clone(), &depth).unwrap();

    // 0.25 in normalized units is exactly one texel of a 4-wide image.
    let out = render_frame(&scene, &signal(OffsetVector::new(0.25, 0.0), RotationVector::ZERO));

    for (x, _, px) in out.enumerate_pixels() {
        let shifted = (x + 1).min(3); // edge-clamped at the right border
        assert_eq!(px[0], srgb_u8(color.get_pixel(shifted, 0)[0]));
    }
}

#[test]
fn solid_red_scene_stays_red_under_offset() {
    // Solid red color, mid-gray depth, offset (0.02, 0): every pixel samples
    // red somewhere, and the transfer curve maps full intensity back to 1.0.
    let color = RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]));
    let depth = RgbaImage::from_pixel(16, 16, Rgba([128, 128, 128, 255]));
    let scene = ScenePair::new(color, &depth).unwrap();

    let out = render_frame(&scene, &signal(OffsetVector::new(0.02, 0.0), RotationVector::ZERO));

    for px in out.pixels() {
        assert_eq!(*px, Rgba([255, 0, 0, 255]));
    }
}

#[test]
fn out_of_range_sampling_clamps_to_the_edge() {
    let mut color = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 255]));
    color.put_pixel(3, 0, Rgba([255, 255, 255, 255]));
    let depth = RgbaImage::from_pixel(4, 1, Rgba([255, 0, 0, 255]));
    let scene = ScenePair::new(color, &depth).unwrap();

    // Offset far beyond the image: everything clamps to the rightmost texel
    // instead of wrapping back to the left edge.
    let out = render_frame(&scene, &signal(OffsetVector::new(5.0, 0.0), RotationVector::ZERO));

    for px in out.pixels() {
        assert_eq!(px[0], 255);
    }
}

#[test]
fn roll_rotation_mirrors_the_frame_at_half_turn() {
    let color = gradient(6, 1);
    let depth = RgbaImage::from_pixel(6, 1, Rgba([0, 0, 0, 255]));
    let scene = ScenePair::new(color.clone(), &depth).unwrap();

    let out = render_frame(
        &scene,
        &signal(
            OffsetVector::ZERO,
            RotationVector::new(0.7, -0.3, std::f32::consts::PI),
        ),
    );

    // alpha/beta components are ignored; gamma of pi flips about the center.
    for (x, _, px) in out.enumerate_pixels() {
        let mirrored = 5 - x;
        assert_eq!(px[0], srgb_u8(color.get_pixel(mirrored, 0)[0]));
    }
}

#[test]
fn lower_resolution_depth_scales_with_the_same_ratio() {
    let color = gradient(8, 4);
    let depth = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
    let scene = ScenePair::new(color.clone(), &depth).unwrap();

    let out = render_frame(&scene, &signal(OffsetVector::new(0.25, 0.0), RotationVector::ZERO));

    // Depth of 1.0 everywhere regardless of resolution: exact offset shift.
    for (x, y, px) in out.enumerate_pixels() {
        let shifted = (x + 2).min(7);
        assert_eq!(px[0], srgb_u8(color.get_pixel(shifted, y)[0]));
    }
}
