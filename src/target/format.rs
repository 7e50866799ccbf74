use crate::foundation::error::{MipbufError, MipbufResult};

/// Pixel storage format of a render target.
///
/// The first three store one unsigned byte per channel, the last three one native-endian `f32`
/// per channel. Channels are laid out `r`, `g`, `b` consecutively; alpha is never stored.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[allow(clippy::upper_case_acronyms)]
pub enum RtFormat {
    /// One 8-bit channel.
    R8,
    /// Two 8-bit channels.
    RG88,
    /// Three 8-bit channels.
    RGB888,
    /// One `f32` channel.
    RF,
    /// Two `f32` channels.
    RGFF,
    /// Three `f32` channels.
    RGBFFF,
}

impl RtFormat {
    /// Every supported format, 8-bit first.
    pub const ALL: [RtFormat; 6] = [
        RtFormat::R8,
        RtFormat::RG88,
        RtFormat::RGB888,
        RtFormat::RF,
        RtFormat::RGFF,
        RtFormat::RGBFFF,
    ];

    /// Number of stored channels (1..=3).
    pub const fn channel_count(self) -> usize {
        match self {
            RtFormat::R8 | RtFormat::RF => 1,
            RtFormat::RG88 | RtFormat::RGFF => 2,
            RtFormat::RGB888 | RtFormat::RGBFFF => 3,
        }
    }

    /// Bytes per stored channel.
    pub const fn channel_stride(self) -> usize {
        if self.is_float() { 4 } else { 1 }
    }

    /// Bytes per pixel.
    pub const fn pixel_size(self) -> usize {
        self.channel_stride() * self.channel_count()
    }

    /// Whether channels are stored as `f32`.
    pub const fn is_float(self) -> bool {
        matches!(self, RtFormat::RF | RtFormat::RGFF | RtFormat::RGBFFF)
    }

    /// Lowercase name used by the CLI and config files.
    pub const fn name(self) -> &'static str {
        match self {
            RtFormat::R8 => "r8",
            RtFormat::RG88 => "rg88",
            RtFormat::RGB888 => "rgb888",
            RtFormat::RF => "rf",
            RtFormat::RGFF => "rgff",
            RtFormat::RGBFFF => "rgbfff",
        }
    }
}

impl std::fmt::Display for RtFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RtFormat {
    type Err = MipbufError;

    fn from_str(s: &str) -> MipbufResult<Self> {
        RtFormat::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MipbufError::validation(format!("unknown render target format '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/target/format.rs"]
mod tests;
