use std::fmt;
use std::str::FromStr;

/// Coefficients for one second-order section
///
/// Transfer function `H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)`,
/// with `a0` normalised to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    pub const fn new(b0: f32, b1: f32, b2: f32, a1: f32, a2: f32) -> Self {
        Self { b0, b1, b2, a1, a2 }
    }

    /// Section that passes its input through unchanged
    pub const fn passthrough() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Steady-state gain for a constant input, `(b0 + b1 + b2) / (1 + a1 + a2)`
    ///
    /// Infinite (or NaN) when the section has a pole at z = 1.
    pub fn dc_gain(&self) -> f32 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }

    /// Coefficients in `[b0, b1, b2, a1, a2]` order
    pub const fn to_array(self) -> [f32; 5] {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
    }
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::passthrough()
    }
}

impl From<[f32; 5]> for BiquadCoeffs {
    fn from([b0, b1, b2, a1, a2]: [f32; 5]) -> Self {
        Self::new(b0, b1, b2, a1, a2)
    }
}

impl fmt::Display for BiquadCoeffs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.b0, self.b1, self.b2, self.a1, self.a2
        )
    }
}

/// Parses `"b0,b1,b2,a1,a2"`.
impl FromStr for BiquadCoeffs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [0.0f32; 5];
        let mut count = 0;

        for part in s.split(',') {
            let part = part.trim();
            if count == values.len() {
                return Err(format!("too many coefficients in section: {}", s));
            }
            values[count] = part
                .parse()
                .map_err(|_| format!("invalid coefficient '{}' in section: {}", part, s))?;
            count += 1;
        }

        if count != values.len() {
            return Err(format!(
                "section needs 5 coefficients (b0,b1,b2,a1,a2), got {}: {}",
                count, s
            ));
        }
        Ok(values.into())
    }
}

/// Delay elements of one Direct Form II Transposed section
///
/// Fields are private so that only the filter recurrence can change them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadState {
    z1: f32,
    z2: f32,
}

impl BiquadState {
    pub const ZERO: Self = Self { z1: 0.0, z2: 0.0 };

    pub fn z1(&self) -> f32 {
        self.z1
    }

    pub fn z2(&self) -> f32 {
        self.z2
    }

    pub fn is_zero(&self) -> bool {
        self.z1 == 0.0 && self.z2 == 0.0
    }

    /// Run one sample through a section and update the delay elements
    ///
    /// `y` is computed first and then feeds both state updates.
    #[inline]
    pub fn step(&mut self, c: &BiquadCoeffs, x: f32) -> f32 {
        let y = c.b0 * x + self.z1;
        self.z1 = c.b1 * x - c.a1 * y + self.z2;
        self.z2 = c.b2 * x - c.a2 * y;
        y
    }

    pub fn reset(&mut self) {
        *self = Self::ZERO;
    }
}
