#![no_std]
#![no_main]

use panic_semihosting as _;

mod board;
#[cfg(feature = "semihosting-log")]
mod logger;
mod version;

// Nothing but the idle task runs: no software tasks, so no dispatchers.
#[rtic::app(device = stm32f4xx_hal::pac, peripherals = true)]
mod app {

    use stm32f4xx_hal::{
        adc::{config::{AdcConfig, Resolution}, Adc},
        gpio::PinState,
        prelude::*,
    };
    use log::{error, info};

    use adcfilt::{FilterMode, PinActuator, Pipeline, PipelineConfig};

    use crate::board::{AdcSampler, BoardPipeline};
    use crate::version;

    #[cfg(feature = "median")]
    const FILTER_MODE: FilterMode = FilterMode::Median;
    #[cfg(not(feature = "median"))]
    const FILTER_MODE: FilterMode = FilterMode::MovingAverage;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        pipeline: BoardPipeline,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        #[cfg(feature = "semihosting-log")]
        crate::logger::init(log::LevelFilter::Debug);

        let dp = ctx.device;
        let rcc = dp.RCC.constrain();
        let clocks = rcc
            .cfgr
            .use_hse(25.MHz())
            .sysclk(48.MHz())
            .freeze();

        let gpioa = dp.GPIOA.split();
        let gpiob = dp.GPIOB.split();

        let adc_config = AdcConfig::default()
                        .resolution(Resolution::Eight);
        let adc = Adc::adc1(dp.ADC1, true, adc_config);
        let sampler = AdcSampler::new(adc, gpioa.pa0.into_analog());

        // D0..D7, bit 0 first
        let data = [
            gpiob.pb12.into_push_pull_output().erase(),
            gpiob.pb13.into_push_pull_output().erase(),
            gpiob.pb14.into_push_pull_output().erase(),
            gpiob.pb15.into_push_pull_output().erase(),
            gpiob.pb5.into_push_pull_output().erase(),
            gpiob.pb6.into_push_pull_output().erase(),
            gpiob.pb7.into_push_pull_output().erase(),
            gpiob.pb8.into_push_pull_output().erase(),
        ];
        let strobe = gpiob.pb9.into_push_pull_output_in_state(PinState::High).erase();
        let port = PinActuator::new(data, strobe);

        let delay = dp.TIM5.delay_us(&clocks);

        let config = PipelineConfig::new(FILTER_MODE);
        let pipeline = Pipeline::from_config(sampler, port, delay, &config);

        info!("{} filter={:?}", version::BUILD, FILTER_MODE);

        (
            Shared {},
            Local {
                pipeline,
            },
            init::Monotonics(),
        )
    }

    #[idle(local=[pipeline])]
    fn idle(ctx: idle::Context) -> ! {
        let pipeline = ctx.local.pipeline;

        loop {
            // run() only comes back on a capability error, start over with
            // a fresh settle delay
            match pipeline.run() {
                Ok(never) => match never {},
                Err(e) => error!("{}", e),
            }
        }
    }
}
