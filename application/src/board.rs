use core::convert::Infallible;

use stm32f4xx_hal::{
    adc::{config::SampleTime, Adc},
    gpio::{self, Analog, Output, PushPull},
    pac::{ADC1, TIM5},
    timer,
};

use adcfilt::{PinActuator, Pipeline, AnyFilter, Sampler};

pub type PortPin = gpio::ErasedPin<Output<PushPull>>;
pub type Port = PinActuator<PortPin, PortPin>;
pub type Delay = timer::DelayUs<TIM5>;
pub type BoardPipeline = Pipeline<AdcSampler, Port, Delay, AnyFilter>;

// longest sample time, the sensor output is unbuffered
const SAMPLE_TIME: SampleTime = SampleTime::Cycles_480;

/// ADC1 configured for 8-bit conversions on a single channel.
pub struct AdcSampler {
    adc: Adc<ADC1>,
    channel: gpio::PA0<Analog>,
}

impl AdcSampler {
    pub fn new(adc: Adc<ADC1>, channel: gpio::PA0<Analog>) -> Self {
        Self{adc, channel}
    }
}

impl Sampler for AdcSampler {
    type Error = Infallible;

    fn read_sample(&mut self) -> Result<u8, Infallible> {
        // with Resolution::Eight the conversion never exceeds 0xff
        let raw = self.adc.convert(&self.channel, SAMPLE_TIME);
        Ok(raw as u8)
    }
}
