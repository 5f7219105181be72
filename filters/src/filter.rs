use heapless::Vec;

use crate::config::FilterMode;

pub const AVERAGE_SAMPLES: usize = 5;
pub const MEDIAN_SAMPLES: usize = 10;
// one duplicated sample on each edge
pub const PADDED_LEN: usize = MEDIAN_SAMPLES + 2;
pub const MAX_OUTPUTS: usize = MEDIAN_SAMPLES;

/// Reduced values produced by one iteration.
pub type Outputs = Vec<u8, MAX_OUTPUTS>;

/// A reducer over one window of samples.
///
/// The driver feeds `window_len()` samples, then calls `reduce()`, which
/// returns the values to emit and clears the window for the next iteration.
pub trait Filter {
    fn window_len(&self) -> usize;
    fn feed(&mut self, value: u8);
    fn reduce(&mut self) -> Outputs;
    fn reset(&mut self);
}

/// Truncated integer mean, summed in a widened accumulator.
pub fn mean(samples: &[u8]) -> u8 {
    if samples.is_empty() {
        return 0;
    }
    let sum: u32 = samples.iter().map(|&s| s as u32).sum();
    (sum / samples.len() as u32) as u8
}

/// Middle value of three, by a fixed three step compare-and-swap sort.
pub fn median3(mut a: u8, mut b: u8, mut c: u8) -> u8 {
    if a > b { core::mem::swap(&mut a, &mut b); }
    if a > c { core::mem::swap(&mut a, &mut c); }
    if b > c { core::mem::swap(&mut b, &mut c); }
    b
}

/// Places the samples at indices 1..=N and mirrors the edges into 0 and N+1.
pub fn pad_edges(samples: &[u8; MEDIAN_SAMPLES]) -> [u8; PADDED_LEN] {
    let mut window = [0u8; PADDED_LEN];
    window[1..=MEDIAN_SAMPLES].copy_from_slice(samples);
    window[0] = window[1];
    window[PADDED_LEN - 1] = window[PADDED_LEN - 2];
    window
}

/// One median per overlapping triplet of the padded window.
pub fn median_filter(window: &[u8; PADDED_LEN]) -> [u8; MEDIAN_SAMPLES] {
    let mut out = [0u8; MEDIAN_SAMPLES];
    for (i, t) in window.windows(3).enumerate() {
        out[i] = median3(t[0], t[1], t[2]);
    }
    out
}

pub struct MovingAverage {
    values: [u8; AVERAGE_SAMPLES],
    count: usize,
}

impl MovingAverage {
    pub fn new() -> Self {
        Self{values: [0; AVERAGE_SAMPLES], count: 0}
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for MovingAverage {
    fn window_len(&self) -> usize {
        AVERAGE_SAMPLES
    }

    // samples past the window are dropped
    fn feed(&mut self, value: u8) {
        if self.count < AVERAGE_SAMPLES {
            self.values[self.count] = value;
            self.count += 1;
        }
    }

    fn reduce(&mut self) -> Outputs {
        let mut out = Outputs::new();
        if self.count > 0 {
            out.push(mean(&self.values[..self.count])).ok();
        }
        self.reset();
        out
    }

    fn reset(&mut self) {
        self.values = [0; AVERAGE_SAMPLES];
        self.count = 0;
    }
}

pub struct MedianOfThree {
    samples: [u8; MEDIAN_SAMPLES],
    count: usize,
}

impl MedianOfThree {
    pub fn new() -> Self {
        Self{samples: [0; MEDIAN_SAMPLES], count: 0}
    }
}

impl Default for MedianOfThree {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for MedianOfThree {
    fn window_len(&self) -> usize {
        MEDIAN_SAMPLES
    }

    fn feed(&mut self, value: u8) {
        if self.count < MEDIAN_SAMPLES {
            self.samples[self.count] = value;
            self.count += 1;
        }
    }

    fn reduce(&mut self) -> Outputs {
        let mut out = Outputs::new();
        let n = self.count;
        if n > 0 {
            // a short window repeats its last sample up to the full length,
            // which leaves its first n medians as if padded at that sample
            let last = self.samples[n - 1];
            self.samples[n..].fill(last);
            let medians = median_filter(&pad_edges(&self.samples));
            out.extend_from_slice(&medians[..n]).ok();
        }
        self.reset();
        out
    }

    fn reset(&mut self) {
        self.samples = [0; MEDIAN_SAMPLES];
        self.count = 0;
    }
}

/// Reducer picked at runtime from a [`FilterMode`].
pub enum AnyFilter {
    MovingAverage(MovingAverage),
    Median(MedianOfThree),
}

impl AnyFilter {
    pub fn mode(&self) -> FilterMode {
        match self {
            AnyFilter::MovingAverage(_) => FilterMode::MovingAverage,
            AnyFilter::Median(_) => FilterMode::Median,
        }
    }
}

impl From<FilterMode> for AnyFilter {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::MovingAverage => AnyFilter::MovingAverage(MovingAverage::new()),
            FilterMode::Median => AnyFilter::Median(MedianOfThree::new()),
        }
    }
}

impl Filter for AnyFilter {
    fn window_len(&self) -> usize {
        match self {
            AnyFilter::MovingAverage(f) => f.window_len(),
            AnyFilter::Median(f) => f.window_len(),
        }
    }
    fn feed(&mut self, value: u8) {
        match self {
            AnyFilter::MovingAverage(f) => f.feed(value),
            AnyFilter::Median(f) => f.feed(value),
        }
    }
    fn reduce(&mut self) -> Outputs {
        match self {
            AnyFilter::MovingAverage(f) => f.reduce(),
            AnyFilter::Median(f) => f.reduce(),
        }
    }
    fn reset(&mut self) {
        match self {
            AnyFilter::MovingAverage(f) => f.reset(),
            AnyFilter::Median(f) => f.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run<F: Filter>(filter: &mut F, samples: &[u8]) -> Outputs {
        for &s in samples {
            filter.feed(s);
        }
        filter.reduce()
    }

    #[test]
    fn average_truncates() {
        assert_eq!(mean(&[10, 20, 30, 40, 50]), 30);
        assert_eq!(mean(&[1, 1, 1, 1, 2]), 1);
        assert_eq!(mean(&[255u8; 5]), 255);
        assert_eq!(mean(&[] as &[u8]), 0);
        assert_eq!(mean(&[7, 8]), 7);
    }

    #[test]
    fn moving_average_emits_one_value_per_window() {
        let mut f = MovingAverage::new();
        assert_eq!(f.window_len(), 5);
        assert_eq!(run(&mut f, &[2, 4, 6, 8, 10]).as_slice(), &[6]);
        // reduce cleared the window
        assert_eq!(run(&mut f, &[255, 255, 255, 255, 255]).as_slice(), &[255]);
        assert!(f.reduce().is_empty());
    }

    #[test]
    fn moving_average_ignores_extra_samples() {
        let mut f = MovingAverage::new();
        assert_eq!(run(&mut f, &[5, 5, 5, 5, 5, 200, 200]).as_slice(), &[5]);
    }

    #[test]
    fn median_of_three_cases() {
        assert_eq!(median3(5, 5, 9), 5);
        assert_eq!(median3(3, 7, 5), 5);
        assert_eq!(median3(9, 1, 4), 4);
        assert_eq!(median3(0, 0, 0), 0);
        assert_eq!(median3(255, 0, 255), 255);
    }

    #[test]
    fn padding_mirrors_edges() {
        let w = pad_edges(&[1, 9, 2, 8, 3, 7, 4, 6, 5, 4]);
        assert_eq!(w.len(), 12);
        assert_eq!(w[0], w[1]);
        assert_eq!(w[11], w[10]);
        assert_eq!(&w[1..11], &[1, 9, 2, 8, 3, 7, 4, 6, 5, 4]);
    }

    #[test]
    fn median_filter_by_hand() {
        let samples = [1, 9, 2, 8, 3, 7, 4, 6, 5, 5];
        let expected = [1, 2, 8, 3, 7, 4, 6, 5, 5, 5];
        assert_eq!(median_filter(&pad_edges(&samples)), expected);

        let mut f = MedianOfThree::new();
        assert_eq!(f.window_len(), 10);
        assert_eq!(run(&mut f, &samples).as_slice(), &expected);
    }

    #[test]
    fn median_filter_removes_single_spike() {
        let out = median_filter(&pad_edges(&[10, 10, 10, 250, 10, 10, 10, 10, 10, 10]));
        assert!(out.iter().all(|&v| v == 10));
    }

    #[test]
    fn short_median_window_is_padded_at_its_end() {
        let mut f = MedianOfThree::new();
        assert_eq!(run(&mut f, &[4, 1, 7]).as_slice(), &[4, 4, 7]);
        assert!(f.reduce().is_empty());
    }

    #[test]
    fn any_filter_follows_mode() {
        let mut f = AnyFilter::from(FilterMode::Median);
        assert_eq!(f.mode(), FilterMode::Median);
        assert_eq!(f.window_len(), MEDIAN_SAMPLES);

        let mut f2 = AnyFilter::from(FilterMode::MovingAverage);
        assert_eq!(f2.mode(), FilterMode::MovingAverage);
        assert_eq!(run(&mut f2, &[10, 20, 30, 40, 50]).as_slice(), &[30]);

        f.feed(3);
        f.reset();
        assert!(f.reduce().is_empty());
    }

    proptest! {
        #[test]
        fn average_is_truncated_mean(samples in proptest::array::uniform5(any::<u8>())) {
            let expected = samples.iter().map(|&s| s as u32).sum::<u32>() / 5;
            let mut f = MovingAverage::new();
            let out = run(&mut f, &samples);
            prop_assert_eq!(out.as_slice(), &[expected as u8]);
            prop_assert_eq!(mean(&samples) as u32, expected);
        }

        #[test]
        fn median_is_the_middle(a in any::<u8>(), b in any::<u8>(), c in any::<u8>()) {
            let m = median3(a, b, c);
            let mut sorted = [a, b, c];
            sorted.sort_unstable();
            prop_assert_eq!(m, sorted[1]);
            if a == b || a == c {
                prop_assert_eq!(m, a);
            } else if b == c {
                prop_assert_eq!(m, b);
            }
        }

        #[test]
        fn median_keeps_order_of_rising_input(mut samples in proptest::array::uniform10(any::<u8>())) {
            samples.sort_unstable();
            let mut f = MedianOfThree::new();
            let out = run(&mut f, &samples);
            prop_assert_eq!(out.len(), MEDIAN_SAMPLES);
            prop_assert!(out.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn median_filter_reduces_through_the_padded_window(samples in proptest::array::uniform10(any::<u8>())) {
            let padded = pad_edges(&samples);
            prop_assert_eq!(padded.len(), PADDED_LEN);
            prop_assert_eq!(padded[0], padded[1]);
            prop_assert_eq!(padded[PADDED_LEN - 1], padded[PADDED_LEN - 2]);

            let mut f = MedianOfThree::new();
            let out = run(&mut f, &samples);
            let expected = median_filter(&padded);
            prop_assert_eq!(out.as_slice(), &expected[..]);
        }

        #[test]
        fn short_median_window_matches_padding_at_its_last_sample(samples in proptest::collection::vec(any::<u8>(), 1..MEDIAN_SAMPLES)) {
            let n = samples.len();
            let mut f = MedianOfThree::new();
            let out = run(&mut f, &samples);
            prop_assert_eq!(out.len(), n);
            prop_assert_eq!(out[n - 1], samples[n - 1]);
            prop_assert_eq!(out[0], median3(samples[0], samples[0], *samples.get(1).unwrap_or(&samples[0])));
        }

        #[test]
        fn short_average_window_uses_samples_fed(samples in proptest::collection::vec(any::<u8>(), 1..AVERAGE_SAMPLES)) {
            let mut f = MovingAverage::new();
            let out = run(&mut f, &samples);
            let expected = samples.iter().map(|&s| s as u32).sum::<u32>() / samples.len() as u32;
            prop_assert_eq!(out.as_slice(), &[expected as u8]);
        }
    }
}
