use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

pub const PORT_WIDTH: usize = 8;

// Output side: an 8-bit parallel port plus the strobe pin that tells the
// reader a new value is on the port.
pub trait Actuator {
    type Error: Debug;
    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error>;
    fn set_strobe(&mut self, state: PinState) -> Result<(), Self::Error>;
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    type Error = T::Error;
    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        T::write_byte(self, value)
    }
    fn set_strobe(&mut self, state: PinState) -> Result<(), Self::Error> {
        T::set_strobe(self, state)
    }
}

/// Parallel port built from eight GPIO outputs, `data[0]` carrying bit 0.
pub struct PinActuator<DataPin, StrobePin>
where
    DataPin: OutputPin,
    StrobePin: OutputPin<Error = DataPin::Error>,
{
    data: [DataPin; PORT_WIDTH],
    strobe: StrobePin,
}

impl<DataPin, StrobePin> PinActuator<DataPin, StrobePin>
where
    DataPin: OutputPin,
    StrobePin: OutputPin<Error = DataPin::Error>,
{
    pub fn new(data: [DataPin; PORT_WIDTH], strobe: StrobePin) -> Self {
        Self {
            data,
            strobe,
        }
    }

    pub fn release(self) -> ([DataPin; PORT_WIDTH], StrobePin) {
        (self.data, self.strobe)
    }
}

impl<DataPin, StrobePin> Actuator for PinActuator<DataPin, StrobePin>
where
    DataPin: OutputPin,
    StrobePin: OutputPin<Error = DataPin::Error>,
    DataPin::Error: Debug,
{
    type Error = DataPin::Error;

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from(value & (1 << bit) != 0))?;
        }
        Ok(())
    }

    fn set_strobe(&mut self, state: PinState) -> Result<(), Self::Error> {
        self.strobe.set_state(state)
    }
}

/// Writes reduced values out and pulses the strobe around each one.
pub struct Emitter<A: Actuator> {
    actuator: A,
    hold_ms: u32,
}

impl<A: Actuator> Emitter<A> {
    pub fn new(actuator: A, hold_ms: u32) -> Self {
        Self{actuator, hold_ms}
    }

    /// Drives the strobe to its resting high level.
    pub fn idle(&mut self) -> Result<(), A::Error> {
        self.actuator.set_strobe(PinState::High)
    }

    pub fn emit<D: DelayNs>(&mut self, value: u8, delay: &mut D) -> Result<(), A::Error> {
        self.actuator.write_byte(value)?;
        self.actuator.set_strobe(PinState::Low)?;
        delay.delay_ms(self.hold_ms);
        self.actuator.set_strobe(PinState::High)
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn release(self) -> A {
        self.actuator
    }
}
