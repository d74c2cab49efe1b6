//! Integration tests for the hq2x library
//!
//! These exercise the public API end to end: build or load a sprite, magnify
//! it, and check the result the way a caller would see it.

use sprite_hq2x::color::{Pixel, PixelMode};
use sprite_hq2x::hqx::{Hq2x, UpscaleOptions};
use sprite_hq2x::io::{load_image, save_image};
use sprite_hq2x::surface::{Bitmap, Surface};
use sprite_hq2x::{upscale, Error, InvalidImage};
use tempfile::TempDir;

/// A 4x4 black frame around a white 2x2 center.
fn framed_sprite() -> Bitmap {
    Bitmap::from_fn(4, 4, PixelMode::Rgb, |x, y| {
        if (1..3).contains(&x) && (1..3).contains(&y) {
            Pixel::WHITE
        } else {
            Pixel::BLACK
        }
    })
}

/// Something with gradients, hard edges and translucency.
fn busy_sprite(width: u32, height: u32) -> Bitmap {
    Bitmap::from_fn(width, height, PixelMode::Rgba, |x, y| {
        if (x * 7 + y * 3) % 5 == 0 {
            Pixel::rgba(255, 0, 77, 200)
        } else {
            Pixel::rgba((x * 20) as u8, (y * 30) as u8, 90, 255)
        }
    })
}

#[test]
fn test_uniform_red_3x3_becomes_uniform_6x6() {
    let red = Pixel::rgb(255, 0, 0);
    let scaled = upscale(&Bitmap::new(3, 3, PixelMode::Rgb, red)).unwrap();

    assert_eq!(scaled.dimensions(), (6, 6));
    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(scaled.get(x, y), red, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_edge_pixels_clamp_to_border() {
    let scaled = upscale(&framed_sprite()).unwrap();
    assert_eq!(scaled.dimensions(), (8, 8));

    // Outer corners only ever see the black frame
    for (x, y) in [(0, 0), (7, 0), (0, 7), (7, 7)] {
        assert_eq!(scaled.get(x, y), Pixel::BLACK, "corner ({}, {})", x, y);
    }
    // The middle of the white block is untouched
    for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
        assert_eq!(scaled.get(x, y), Pixel::WHITE, "center ({}, {})", x, y);
    }
}

#[test]
fn test_output_is_symmetric_for_symmetric_input() {
    let scaled = upscale(&framed_sprite()).unwrap();
    for y in 0..8 {
        for x in 0..8 {
            let p = scaled.get(x, y);
            assert_eq!(p, scaled.get(7 - x, y), "horizontal mirror at ({}, {})", x, y);
            assert_eq!(p, scaled.get(x, 7 - y), "vertical mirror at ({}, {})", x, y);
        }
    }
}

#[test]
fn test_checkerboard_diagonals_stay_distinct() {
    let board = Bitmap::from_fn(2, 2, PixelMode::Rgb, |x, y| {
        if (x + y) % 2 == 0 {
            Pixel::WHITE
        } else {
            Pixel::BLACK
        }
    });
    let scaled = upscale(&board).unwrap();

    assert_eq!(scaled.get(0, 0), Pixel::WHITE);
    assert_eq!(scaled.get(3, 0), Pixel::BLACK);
    assert_eq!(scaled.get(0, 3), Pixel::BLACK);
    assert_eq!(scaled.get(3, 3), Pixel::WHITE);
    assert_eq!(scaled.get(1, 1), Pixel::rgb(191, 191, 191));
    assert_eq!(scaled.get(2, 1), Pixel::rgb(63, 63, 63));
}

#[test]
fn test_blends_stay_within_source_range() {
    let source = busy_sprite(9, 7);
    let scaled = upscale(&source).unwrap();

    let mut low = [u8::MAX; 4];
    let mut high = [u8::MIN; 4];
    for p in source.pixels() {
        for (i, c) in p.channels().into_iter().enumerate() {
            low[i] = low[i].min(c);
            high[i] = high[i].max(c);
        }
    }

    for p in scaled.pixels() {
        for (i, c) in p.channels().into_iter().enumerate() {
            assert!(low[i] <= c && c <= high[i], "channel {} of {} out of range", i, p);
        }
    }
}

#[test]
fn test_option_combinations_agree() {
    let source = busy_sprite(13, 11);
    let reference = Hq2x::with_options(UpscaleOptions { parallel: false, yuv_table: false })
        .upscale(&source)
        .unwrap();

    for (parallel, yuv_table) in [(true, false), (false, true), (true, true)] {
        let scaled =
            Hq2x::with_options(UpscaleOptions { parallel, yuv_table }).upscale(&source).unwrap();
        assert_eq!(scaled, reference, "parallel={} yuv_table={}", parallel, yuv_table);
    }
}

#[test]
fn test_scaler_is_reusable() {
    let scaler = Hq2x::new();
    let first = scaler.upscale(&busy_sprite(5, 5)).unwrap();
    let _ = scaler.upscale(&framed_sprite()).unwrap();
    let again = scaler.upscale(&busy_sprite(5, 5)).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_png_pipeline_preserves_mode() {
    let temp = TempDir::new().unwrap();

    let rgba_in = temp.path().join("busy.png");
    save_image(&busy_sprite(6, 4), &rgba_in).unwrap();
    let loaded = load_image(&rgba_in).unwrap();
    assert_eq!(loaded.mode(), PixelMode::Rgba);

    let rgba_out = temp.path().join("out").join("busy_2x.png");
    save_image(&upscale(&loaded).unwrap(), &rgba_out).unwrap();
    let reloaded = load_image(&rgba_out).unwrap();
    assert_eq!(reloaded.dimensions(), (12, 8));
    assert_eq!(reloaded.mode(), PixelMode::Rgba);

    let rgb_in = temp.path().join("frame.png");
    save_image(&framed_sprite(), &rgb_in).unwrap();
    let scaled = upscale(&load_image(&rgb_in).unwrap()).unwrap();
    assert_eq!(scaled.mode(), PixelMode::Rgb);
    assert!(scaled.pixels().iter().all(|p| p.a == 255));
}

#[test]
fn test_translucent_sprite_keeps_alpha() {
    let ghost = Pixel::rgba(200, 200, 255, 96);
    let scaled = upscale(&Bitmap::new(3, 2, PixelMode::Rgba, ghost)).unwrap();
    assert!(scaled.pixels().iter().all(|&p| p == ghost));
}

#[test]
fn test_empty_image_is_rejected() {
    let empty = Bitmap::new(3, 0, PixelMode::Rgb, Pixel::BLACK);
    let err: Error = upscale(&empty).unwrap_err().into();
    assert!(matches!(err, Error::InvalidImage(InvalidImage::Empty { width: 3, height: 0 })));
}
