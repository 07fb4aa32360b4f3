use crate::foundation::error::{NglError, NglResult};
use std::fmt;
use std::str::FromStr;

/// Nanoseconds per second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Exact rational `num/den` used for frame rates, time bases and aspect ratios.
///
/// Frame-index arithmetic never goes through floating point: see
/// [`Rational::frames_to_nanos`] and [`Rational::nanos_to_frames`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rational {
    /// Numerator.
    pub num: i32,
    /// Denominator.
    pub den: i32,
}

impl Rational {
    /// Build a rational without validation (aspect ratios may legitimately carry `den == 0`).
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Build a validated frame rate: both terms must be strictly positive.
    pub fn frame_rate(num: i32, den: i32) -> NglResult<Self> {
        if den <= 0 {
            return Err(NglError::spec_format("frame rate den must be > 0"));
        }
        if num <= 0 {
            return Err(NglError::spec_format("frame rate num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Return `true` when this value can drive frame arithmetic.
    pub fn is_valid_frame_rate(self) -> bool {
        self.num > 0 && self.den > 0
    }

    /// Convert to floating point.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Timestamp of frame `frame` in nanoseconds: `ceil(frame * 1e9 * den / num)`.
    ///
    /// Rounding up keeps `nanos_to_frames(frames_to_nanos(f)) == f`.
    pub fn frames_to_nanos(self, frame: i64) -> i64 {
        let wide = i128::from(frame) * i128::from(NANOS_PER_SEC) * i128::from(self.den);
        saturate_i64(-(-wide).div_euclid(i128::from(self.num)))
    }

    /// Frame index reached after `nanos` nanoseconds: `floor(nanos * num / (den * 1e9))`.
    pub fn nanos_to_frames(self, nanos: i64) -> i64 {
        let wide = i128::from(nanos) * i128::from(self.num);
        let div = i128::from(self.den) * i128::from(NANOS_PER_SEC);
        saturate_i64(wide.div_euclid(div))
    }

    /// Presentation time of frame `frame` in seconds: `frame * den / num`.
    ///
    /// This is the only place where frame math crosses into floating point.
    pub fn frame_to_secs(self, frame: i64) -> f64 {
        (frame as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Nearest frame index for a time in seconds: `round(secs * num / den)`.
    pub fn secs_to_frame_round(self, secs: f64) -> i64 {
        let v = (secs * f64::from(self.num) / f64::from(self.den)).round();
        if v.is_nan() { 0 } else { v as i64 }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Rational {
    type Err = NglError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = s
            .split_once('/')
            .ok_or_else(|| NglError::serde(format!("rational '{s}' must be 'num/den'")))?;
        let num = num
            .trim()
            .parse::<i32>()
            .map_err(|e| NglError::serde(format!("rational numerator '{num}': {e}")))?;
        let den = den
            .trim()
            .parse::<i32>()
            .map_err(|e| NglError::serde(format!("rational denominator '{den}': {e}")))?;
        Ok(Self { num, den })
    }
}

/// Convert a duration in seconds into whole nanoseconds (rounded, clamped at 0).
pub fn secs_to_nanos(secs: f64) -> i64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    let nanos = (secs * NANOS_PER_SEC as f64).round();
    if nanos >= i64::MAX as f64 {
        i64::MAX
    } else {
        nanos as i64
    }
}

fn saturate_i64(v: i128) -> i64 {
    v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Four-character node type tag, packed big-endian into a `u32` the way the engine expects.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeType(pub u32);

impl NodeType {
    /// Pack a four byte tag.
    pub const fn from_tag(tag: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(tag))
    }

    /// Unpack into the four tag bytes.
    pub const fn tag(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse a tag from exactly four ASCII characters.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes: [u8; 4] = s.as_bytes().try_into().ok()?;
        if !bytes.iter().all(|b| b.is_ascii() && !b.is_ascii_control()) {
            return None;
        }
        Some(Self::from_tag(bytes))
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.tag() {
            write!(f, "{}", char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeType({self})")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
