use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

use crate::filter::Filter;

/// One analog input channel with 8-bit resolution.
pub trait Sampler {
    type Error: Debug;
    fn read_sample(&mut self) -> Result<u8, Self::Error>;
}

impl<T: Sampler + ?Sized> Sampler for &mut T {
    type Error = T::Error;
    fn read_sample(&mut self) -> Result<u8, Self::Error> {
        T::read_sample(self)
    }
}

/// Fills the filter's window, waiting `pacing_ms` before every read.
///
/// Returns the number of samples fed. On error the filter keeps the samples
/// read so far; the caller decides whether to reset it.
pub fn acquire<S, D, F>(sampler: &mut S, delay: &mut D, pacing_ms: u32, filter: &mut F) -> Result<usize, S::Error>
where
    S: Sampler,
    D: DelayNs,
    F: Filter + ?Sized,
{
    let n = filter.window_len();
    for _ in 0..n {
        delay.delay_ms(pacing_ms);
        filter.feed(sampler.read_sample()?);
    }
    Ok(n)
}
