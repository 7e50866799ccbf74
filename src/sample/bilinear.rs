//! Wrap-addressed bilinear sampling.
//!
//! Coordinates are normalized (`u` across, `v` down) and tile: anything outside `[0, 1)` is
//! folded back in, and the four taps around the sample point wrap independently at the edges.
//! Integer texel coordinates land on pixel centers, so sampling `((x + 0.5) / w, (y + 0.5) / h)`
//! returns texel `(x, y)` unfiltered. There is no clamp-to-edge mode.

use crate::{
    foundation::{
        core::Pixel,
        math::{floor_mod, wrap_unit},
    },
    target::view::MipView,
};

#[inline]
pub(crate) fn sample(view: &MipView<'_>, u: f32, v: f32) -> Pixel {
    let width = i32::from(view.width());
    let height = i32::from(view.height());
    if width == 0 || height == 0 {
        return Pixel::default();
    }

    // Texel space, shifted so integers are pixel centers.
    let (x0, frac_u) = texel_coord(wrap_unit(u), width as f32);
    let (y0, frac_v) = texel_coord(wrap_unit(v), height as f32);

    let tap = |dx: i32, dy: i32| {
        let x = floor_mod(x0 + dx, width) as u16;
        let y = floor_mod(y0 + dy, height) as u16;
        view.get_pixel(x, y)
    };

    let top = tap(0, 0).lerp(tap(1, 0), frac_u);
    let bottom = tap(0, 1).lerp(tap(1, 1), frac_u);
    top.lerp(bottom, frac_v)
}

/// Split a wrapped coordinate into the left texel and the blend fraction.
///
/// `t * dim - 0.5` carries a few ulps of rounding error, so a center sample on a
/// non-power-of-two axis would otherwise blend in a sliver of its neighbour. Fractions within
/// `2 * dim * EPSILON` of a texel center snap onto it.
#[inline]
fn texel_coord(t: f32, dim: f32) -> (i32, f32) {
    let texel = t * dim - 0.5;
    let base = texel.floor();
    let frac = texel - base;
    let tolerance = 2.0 * dim * f32::EPSILON;
    if frac < tolerance {
        (base as i32, 0.0)
    } else if 1.0 - frac < tolerance {
        (base as i32 + 1, 0.0)
    } else {
        (base as i32, frac)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/bilinear.rs"]
mod tests;
