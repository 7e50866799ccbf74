use std::sync::atomic::{AtomicU64, Ordering};

/// A transient four-channel pixel value.
///
/// Channels are in `[0, 1]` when read from an 8-bit target and unconstrained for float targets.
/// None of the render-target formats persist `a`; it reads back as `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pixel {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Pixel {
    /// Build a pixel from all four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque-less pixel (`a = 0`) from the three color channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 0.0 }
    }

    /// Channel `i` in `r, g, b, a` order. Indices past 3 read as `0.0`.
    pub fn channel(&self, i: usize) -> f32 {
        match i {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            3 => self.a,
            _ => 0.0,
        }
    }

    /// Set channel `i` in `r, g, b, a` order. Indices past 3 are ignored.
    pub fn set_channel(&mut self, i: usize, v: f32) {
        match i {
            0 => self.r = v,
            1 => self.g = v,
            2 => self.b = v,
            3 => self.a = v,
            _ => {}
        }
    }

    /// Per-channel linear interpolation `self * (1 - t) + other * t`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let inv = 1.0 - t;
        Self {
            r: self.r * inv + other.r * t,
            g: self.g * inv + other.g * t,
            b: self.b * inv + other.b * t,
            a: self.a * inv + other.a * t,
        }
    }
}

/// Caller-visible identity of a render target, used for debug naming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u64);

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rt#{}", self.0)
    }
}

/// Issues monotonically increasing [`TargetId`] values.
///
/// Owned by whoever creates targets; there is no process-wide counter. Safe to share by reference
/// across threads.
#[derive(Debug, Default)]
pub struct TargetIdAllocator {
    next: AtomicU64,
}

impl TargetIdAllocator {
    /// Start issuing ids from zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start issuing ids from `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Take the next id.
    pub fn issue(&self) -> TargetId {
        TargetId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
