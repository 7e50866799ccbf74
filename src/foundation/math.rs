/// Remainder with the sign of the divisor, so negative coordinates wrap instead of mirror.
///
/// `b` must be positive.
#[inline]
pub(crate) fn floor_mod(a: i32, b: i32) -> i32 {
    a.rem_euclid(b)
}

/// Map `t` into `[0, 1)` by dropping its integer part.
#[inline]
pub(crate) fn wrap_unit(t: f32) -> f32 {
    t - t.floor()
}

/// Dimension of mip level `mip` for a base dimension `base`, never below 1.
#[inline]
pub(crate) fn mip_extent(base: u16, mip: u8) -> u16 {
    let shifted = if mip >= 16 { 0 } else { base >> mip };
    shifted.max(1)
}
