/// Circular delay line over a caller-owned sample buffer
///
/// The write cursor always points at the slot that receives the next
/// sample, which is also the oldest sample once the line has wrapped.
/// Reading walks from the newest sample back to the oldest as two
/// contiguous reverse ranges, so the inner loop needs no modulo.
pub(crate) struct DelayLine<'a> {
    buffer: &'a mut [f32],
    cursor: usize,
}

impl<'a> DelayLine<'a> {
    /// Bind to `buffer` and clear it. `buffer` must not be empty.
    pub fn new(buffer: &'a mut [f32]) -> Self {
        debug_assert!(!buffer.is_empty());
        let mut line = Self { buffer, cursor: 0 };
        line.clear();
        line
    }

    /// Store `sample` as the newest entry, overwriting the oldest.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.buffer[self.cursor] = sample;
        self.cursor += 1;
        if self.cursor == self.buffer.len() {
            self.cursor = 0;
        }
    }

    /// Iterate stored samples from newest to oldest.
    #[inline]
    pub fn newest_first(&self) -> impl Iterator<Item = f32> {
        let newest = match self.cursor {
            0 => self.buffer.len() - 1,
            c => c - 1,
        };
        let (head, tail) = self.buffer.split_at(newest + 1);
        head.iter().rev().chain(tail.iter().rev()).copied()
    }

    /// Zero every slot and rewind the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Index of the next write.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw storage, in buffer order rather than time order.
    pub fn as_slice(&self) -> &[f32] {
        self.buffer
    }
}
