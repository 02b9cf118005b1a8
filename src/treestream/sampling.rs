use std::iter::{Skip, StepBy};
use std::num::NonZeroUsize;
use std::slice;

/// Number of leading items dropped as burn-in.
///
/// `round(burnin_percent / 100 × len)`, rounding halves up, computed in
/// integers so `len = 7, burnin = 50` gives 4. Never exceeds `len`.
pub fn burnin_offset(len: usize, burnin_percent: u8) -> usize {
    let scaled = len.saturating_mul(usize::from(burnin_percent));
    (scaled.saturating_add(50) / 100).min(len)
}

/// Burn-in offset and subsample stride over a sequence of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    offset: usize,
    stride: NonZeroUsize,
}

impl SampleWindow {
    pub fn new(len: usize, burnin_percent: u8, stride: NonZeroUsize) -> Self {
        Self { offset: burnin_offset(len, burnin_percent), stride }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn stride(&self) -> NonZeroUsize {
        self.stride
    }

    /// Items at `offset, offset + stride, ...`.
    pub fn select<'a, T>(&self, items: &'a [T]) -> StepBy<Skip<slice::Iter<'a, T>>> {
        items.iter().skip(self.offset).step_by(self.stride.get())
    }
}
