use super::*;
use crate::target::{format::RtFormat, view::MipViewMut};

fn float_level(width: u16, height: u16, f: impl Fn(u16, u16) -> Pixel) -> Vec<u8> {
    let mut bytes = vec![0u8; usize::from(width) * usize::from(height) * 12];
    let mut view = MipViewMut::new(&mut bytes, width, height, RtFormat::RGBFFF);
    for y in 0..height {
        for x in 0..width {
            view.set_pixel(x, y, f(x, y));
        }
    }
    bytes
}

fn ramp(x: u16, y: u16) -> Pixel {
    Pixel::rgb(f32::from(x), f32::from(y), f32::from(x * 10 + y))
}

fn close(a: Pixel, b: Pixel) -> bool {
    (a.r - b.r).abs() < 1e-5
        && (a.g - b.g).abs() < 1e-5
        && (a.b - b.b).abs() < 1e-5
        && (a.a - b.a).abs() < 1e-5
}

#[test]
fn pixel_centers_sample_exactly() {
    let bytes = float_level(4, 8, ramp);
    let view = MipView::new(&bytes, 4, 8, RtFormat::RGBFFF);
    for y in 0..8u16 {
        for x in 0..4u16 {
            let u = (f32::from(x) + 0.5) / 4.0;
            let v = (f32::from(y) + 0.5) / 8.0;
            assert_eq!(view.sample_bilinear(u, v), view.get_pixel(x, y), "({x},{y})");
        }
    }
}

#[test]
fn pixel_centers_sample_exactly_on_odd_sizes() {
    for (width, height) in [(3, 5), (7, 9), (13, 11), (100, 37), (255, 3)] {
        let bytes = float_level(width, height, ramp);
        let view = MipView::new(&bytes, width, height, RtFormat::RGBFFF);
        for y in 0..height {
            for x in 0..width {
                let u = (f32::from(x) + 0.5) / f32::from(width);
                let v = (f32::from(y) + 0.5) / f32::from(height);
                assert_eq!(
                    view.sample_bilinear(u, v),
                    view.get_pixel(x, y),
                    "{width}x{height} ({x},{y})"
                );
            }
        }
    }
}

#[test]
fn midpoint_between_two_centers_is_the_average() {
    let bytes = float_level(4, 4, ramp);
    let view = MipView::new(&bytes, 4, 4, RtFormat::RGBFFF);
    // Halfway between texel (1, 2) and (2, 2).
    let s = view.sample_bilinear(2.0 / 4.0, 2.5 / 4.0);
    assert!(close(s, Pixel::rgb(1.5, 2.0, 17.0)), "{s:?}");
}

#[test]
fn corner_blends_across_the_wrap_seam() {
    let bytes = float_level(2, 2, |x, y| Pixel::rgb(f32::from(x + 2 * y), 0.0, 0.0));
    let view = MipView::new(&bytes, 2, 2, RtFormat::RGBFFF);
    // u = v = 0 sits between the last and first texel on both axes.
    let s = view.sample_bilinear(0.0, 0.0);
    assert!(close(s, Pixel::rgb(1.5, 0.0, 0.0)), "{s:?}");
}

#[test]
fn coordinates_tile_in_both_directions() {
    let bytes = float_level(4, 4, ramp);
    let view = MipView::new(&bytes, 4, 4, RtFormat::RGBFFF);
    let e = 0.0625f32;
    for v in [0.1f32, 0.4, 0.8] {
        assert!(close(view.sample_bilinear(1.0 + e, v), view.sample_bilinear(e, v)));
        assert!(close(view.sample_bilinear(-e, v), view.sample_bilinear(1.0 - e, v)));
        assert!(close(view.sample_bilinear(v, -3.0 + e), view.sample_bilinear(v, e)));
    }
}

#[test]
fn negative_coordinates_wrap_rather_than_clamp() {
    let bytes = float_level(4, 1, |x, _| Pixel::rgb(f32::from(x), 0.0, 0.0));
    let view = MipView::new(&bytes, 4, 1, RtFormat::RGBFFF);
    // Center of the last texel, reached from the negative side.
    let s = view.sample_bilinear(-0.125, 0.5);
    assert!(close(s, Pixel::rgb(3.0, 0.0, 0.0)), "{s:?}");
}

#[test]
fn eight_bit_levels_sample_normalized_values() {
    let bytes = vec![0u8, 255u8];
    let view = MipView::new(&bytes, 2, 1, RtFormat::R8);
    let s = view.sample_bilinear(0.5, 0.5);
    assert!(close(s, Pixel::rgb(0.5, 0.0, 0.0)), "{s:?}");
}
