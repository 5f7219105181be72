use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::config::{PipelineConfig, Timing};
use crate::error::Error;
use crate::filter::{AnyFilter, Filter, Outputs};
use crate::output::{Actuator, Emitter};
use crate::sampler::{self, Sampler};

pub type PipelineError<S, A> = Error<<S as Sampler>::Error, <A as Actuator>::Error>;

/// Sample, reduce and emit, one window per [`step`](Pipeline::step).
///
/// Nothing survives from one step to the next: the filter window is cleared
/// by every reduction, and on a failed read.
pub struct Pipeline<S, A, D, F>
where
    S: Sampler,
    A: Actuator,
    D: DelayNs,
    F: Filter,
{
    sampler: S,
    emitter: Emitter<A>,
    delay: D,
    filter: F,
    timing: Timing,
}

impl<S, A, D> Pipeline<S, A, D, AnyFilter>
where
    S: Sampler,
    A: Actuator,
    D: DelayNs,
{
    pub fn from_config(sampler: S, actuator: A, delay: D, config: &PipelineConfig) -> Self {
        Self::new(sampler, actuator, delay, AnyFilter::from(config.mode), config.timing)
    }
}

impl<S, A, D, F> Pipeline<S, A, D, F>
where
    S: Sampler,
    A: Actuator,
    D: DelayNs,
    F: Filter,
{
    pub fn new(sampler: S, actuator: A, delay: D, filter: F, timing: Timing) -> Self {
        Self {
            sampler,
            emitter: Emitter::new(actuator, timing.strobe_hold_ms),
            delay,
            filter,
            timing,
        }
    }

    /// Raises the strobe and waits for the ADC to settle.
    pub fn start(&mut self) -> Result<(), PipelineError<S, A>> {
        debug!("pipeline start, window of {} samples", self.filter.window_len());
        self.emitter.idle().map_err(Error::Output)?;
        self.delay.delay_us(self.timing.settle_us);
        Ok(())
    }

    /// Runs one iteration and returns the values written to the port.
    pub fn step(&mut self) -> Result<Outputs, PipelineError<S, A>> {
        if let Err(e) = sampler::acquire(&mut self.sampler, &mut self.delay, self.timing.pacing_ms, &mut self.filter) {
            self.filter.reset();
            return Err(Error::Acquisition(e));
        }

        let outputs = self.filter.reduce();
        debug!("window reduced to {} values", outputs.len());
        for &value in outputs.iter() {
            trace!("emit {}", value);
            self.emitter.emit(value, &mut self.delay).map_err(Error::Output)?;
        }
        Ok(outputs)
    }

    /// Starts the pipeline and steps it forever. Only returns on a capability error.
    pub fn run(&mut self) -> Result<Infallible, PipelineError<S, A>> {
        self.start()?;
        loop {
            if let Err(e) = self.step() {
                warn!("pipeline stopped: {}", e);
                return Err(e);
            }
        }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn release(self) -> (S, A, D, F) {
        (self.sampler, self.emitter.release(), self.delay, self.filter)
    }
}
