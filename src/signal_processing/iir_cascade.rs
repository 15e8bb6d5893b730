use crate::error::{DspError, Result};
use crate::signal_processing::{BiquadCoeffs, BiquadState, Filter};

/// Cascade of Direct Form II Transposed biquad sections
///
/// Each sample runs through the sections in order, the output of section
/// `i` feeding section `i + 1`. Sections share nothing but that scalar.
/// Coefficients and state live in caller-owned slices of equal length.
///
/// # Example
/// ```
/// use embeddsp::{BiquadCoeffs, BiquadState, IirCascade};
///
/// // One-pole smoother y[n] = 0.5*x[n] + 0.5*y[n-1], twice
/// let sections = [BiquadCoeffs::new(0.5, 0.0, 0.0, -0.5, 0.0); 2];
/// let mut state = [BiquadState::ZERO; 2];
/// let mut iir = IirCascade::new(&sections, &mut state).unwrap();
///
/// assert_eq!(iir.process(1.0), 0.25);
/// assert_eq!(iir.dc_gain(), 1.0);
/// ```
pub struct IirCascade<'a> {
    sections: &'a [BiquadCoeffs],
    state: &'a mut [BiquadState],
}

impl<'a> IirCascade<'a> {
    /// Bind a cascade to `sections` and `state`, using `sections.len()` as the section count
    ///
    /// # Errors
    /// Returns `DspError::InvalidArgument` if `sections` is empty or the two
    /// buffers differ in length
    pub fn new(sections: &'a [BiquadCoeffs], state: &'a mut [BiquadState]) -> Result<Self> {
        Self::init(sections.len(), sections, state)
    }

    /// Bind a cascade with an explicit section count
    ///
    /// # Arguments
    /// * `num_sections` - Number of biquad sections, must be > 0
    /// * `sections` - Per-section coefficients, applied in index order
    /// * `state` - Per-section delay elements, zeroed here
    ///
    /// # Errors
    /// Returns `DspError::InvalidArgument` if `num_sections` is zero or either
    /// buffer length differs from `num_sections`
    pub fn init(
        num_sections: usize,
        sections: &'a [BiquadCoeffs],
        state: &'a mut [BiquadState],
    ) -> Result<Self> {
        if num_sections == 0 {
            return Err(DspError::InvalidArgument(
                "IIR cascade needs at least one section",
            ));
        }
        if sections.len() != num_sections {
            return Err(DspError::InvalidArgument(
                "IIR coefficient buffer length differs from section count",
            ));
        }
        if state.len() != num_sections {
            return Err(DspError::InvalidArgument(
                "IIR state buffer length differs from section count",
            ));
        }

        log::debug!("IIR cascade bound: {} sections", num_sections);

        let mut cascade = Self { sections, state };
        cascade.flush();
        Ok(cascade)
    }

    /// Process a single sample through every section in turn
    pub fn process(&mut self, sample: f32) -> f32 {
        debug_assert_eq!(self.sections.len(), self.state.len());

        self.sections
            .iter()
            .zip(self.state.iter_mut())
            .fold(sample, |x, (coeffs, state)| state.step(coeffs, x))
    }

    /// Zero every section's delay elements
    pub fn flush(&mut self) {
        self.state.fill(BiquadState::ZERO);
    }

    /// Swap in new section coefficients of the same count
    ///
    /// State is kept, so the response changes without clearing history.
    ///
    /// # Errors
    /// Returns `DspError::InvalidArgument` if `sections.len()` differs from
    /// the current section count; the cascade is unchanged in that case
    pub fn set_sections(&mut self, sections: &'a [BiquadCoeffs]) -> Result<()> {
        if sections.len() != self.sections.len() {
            return Err(DspError::InvalidArgument(
                "IIR retune must keep the section count",
            ));
        }
        self.sections = sections;
        log::debug!("IIR cascade retuned: {} sections", sections.len());
        Ok(())
    }

    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> &[BiquadCoeffs] {
        self.sections
    }

    pub fn state(&self) -> &[BiquadState] {
        self.state
    }

    /// Overall DC gain, the product of the per-section gains
    pub fn dc_gain(&self) -> f32 {
        self.sections.iter().map(BiquadCoeffs::dc_gain).product()
    }
}

impl Filter for IirCascade<'_> {
    fn process(&mut self, sample: f32) -> f32 {
        IirCascade::process(self, sample)
    }

    fn flush(&mut self) {
        IirCascade::flush(self)
    }
}
