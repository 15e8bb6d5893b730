use crate::error::{DspError, Result};
use crate::signal_processing::{DelayLine, Filter};

/// FIR filter over caller-owned coefficient and delay-line buffers
///
/// Computes `y[n] = h[0]*x[n] + h[1]*x[n-1] + ... + h[N-1]*x[n-N+1]` one
/// sample at a time. The filter borrows both buffers for its whole lifetime
/// and never allocates; the delay line is cleared when the filter is bound.
///
/// # Example
/// ```
/// use embeddsp::FirFilter;
///
/// let taps = [0.25, 0.5, 0.25];
/// let mut delay = [0.0; 3];
/// let mut fir = FirFilter::new(&taps, &mut delay).unwrap();
///
/// assert_eq!(fir.process(1.0), 0.25);
/// assert_eq!(fir.process(0.0), 0.5);
/// ```
pub struct FirFilter<'a> {
    taps: &'a [f32],
    delay_line: DelayLine<'a>,
}

impl<'a> FirFilter<'a> {
    /// Bind a filter to `taps` and `delay_line`, using `taps.len()` as the tap count
    ///
    /// # Errors
    /// Returns `DspError::InvalidArgument` if `taps` is empty or the two
    /// buffers differ in length
    pub fn new(taps: &'a [f32], delay_line: &'a mut [f32]) -> Result<Self> {
        Self::init(taps.len(), taps, delay_line)
    }

    /// Bind a filter with an explicit tap count
    ///
    /// # Arguments
    /// * `num_taps` - Number of coefficients (filter order + 1), must be > 0
    /// * `taps` - Coefficients, `taps[k]` weights the sample `k` steps old
    /// * `delay_line` - Scratch storage for past inputs, zeroed here
    ///
    /// # Errors
    /// Returns `DspError::InvalidArgument` if `num_taps` is zero or either
    /// buffer length differs from `num_taps`
    pub fn init(num_taps: usize, taps: &'a [f32], delay_line: &'a mut [f32]) -> Result<Self> {
        if num_taps == 0 {
            return Err(DspError::InvalidArgument("FIR filter needs at least one tap"));
        }
        if taps.len() != num_taps {
            return Err(DspError::InvalidArgument(
                "FIR coefficient buffer length differs from tap count",
            ));
        }
        if delay_line.len() != num_taps {
            return Err(DspError::InvalidArgument(
                "FIR delay line length differs from tap count",
            ));
        }

        log::debug!("FIR filter bound: {} taps", num_taps);

        Ok(Self {
            taps,
            delay_line: DelayLine::new(delay_line),
        })
    }

    /// Process a single sample through the filter
    ///
    /// Products are accumulated from the newest sample to the oldest, in
    /// single precision, so results are bit-reproducible across runs.
    pub fn process(&mut self, sample: f32) -> f32 {
        debug_assert_eq!(self.taps.len(), self.delay_line.len());

        self.delay_line.push(sample);
        self.taps
            .iter()
            .zip(self.delay_line.newest_first())
            .fold(0.0f32, |acc, (&tap, x)| acc + tap * x)
    }

    /// Zero the delay line and rewind the write cursor
    pub fn flush(&mut self) {
        self.delay_line.clear();
    }

    /// Swap in a new coefficient buffer of the same length
    ///
    /// The delay line is left untouched so the filter can be retuned between
    /// samples without a discontinuity in its history.
    ///
    /// # Errors
    /// Returns `DspError::InvalidArgument` if `taps.len()` differs from the
    /// current tap count; the filter is unchanged in that case
    pub fn set_coefficients(&mut self, taps: &'a [f32]) -> Result<()> {
        if taps.len() != self.taps.len() {
            return Err(DspError::InvalidArgument(
                "FIR retune must keep the tap count",
            ));
        }
        self.taps = taps;
        log::debug!("FIR filter retuned: {} taps", taps.len());
        Ok(())
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Get access to the tap coefficients
    pub fn coefficients(&self) -> &[f32] {
        self.taps
    }

    /// Delay-line contents in storage order
    pub fn delay_line(&self) -> &[f32] {
        self.delay_line.as_slice()
    }

    /// Slot that will receive the next input sample
    pub fn write_cursor(&self) -> usize {
        self.delay_line.cursor()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        (self.taps.len() - 1) / 2
    }
}

impl Filter for FirFilter<'_> {
    fn process(&mut self, sample: f32) -> f32 {
        FirFilter::process(self, sample)
    }

    fn flush(&mut self) {
        FirFilter::flush(self)
    }
}
