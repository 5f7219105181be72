#![cfg_attr(not(test), no_std)]

//! Filtering pipeline for an 8-bit ADC feeding a strobed parallel port.
//!
//! Every iteration reads a fixed window of samples, reduces it with either a
//! moving average or a median-of-three, and writes each reduced byte to the
//! port, pulsing the strobe pin around the write. Hardware is reached only
//! through the [`Sampler`] and [`Actuator`] capabilities plus an
//! [`embedded_hal::delay::DelayNs`] clock, so the whole pipeline runs on a
//! host against test doubles.
//!
//! ```
//! use adcfilt::{MovingAverage, Pipeline, Sampler, Timing};
//! # use adcfilt::Actuator;
//! # use core::convert::Infallible;
//! # use embedded_hal::{delay::DelayNs, digital::PinState};
//! # struct Ramp(u8);
//! # impl Sampler for Ramp {
//! #     type Error = Infallible;
//! #     fn read_sample(&mut self) -> Result<u8, Infallible> { self.0 += 2; Ok(self.0) }
//! # }
//! # struct Port(Vec<u8>);
//! # impl Actuator for Port {
//! #     type Error = Infallible;
//! #     fn write_byte(&mut self, value: u8) -> Result<(), Infallible> { self.0.push(value); Ok(()) }
//! #     fn set_strobe(&mut self, _: PinState) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct NoDelay;
//! # impl DelayNs for NoDelay { fn delay_ns(&mut self, _: u32) {} }
//!
//! // samples 2, 4, 6, 8, 10
//! let mut pipeline = Pipeline::new(Ramp(0), Port(Vec::new()), NoDelay,
//!                                  MovingAverage::new(), Timing::default());
//! pipeline.start().unwrap();
//! assert_eq!(pipeline.step().unwrap().as_slice(), &[6]);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod sampler;

pub use config::{FilterMode, PipelineConfig, Timing};
pub use error::Error;
pub use filter::{AnyFilter, Filter, MedianOfThree, MovingAverage, Outputs};
pub use output::{Actuator, Emitter, PinActuator};
pub use pipeline::Pipeline;
pub use sampler::Sampler;
