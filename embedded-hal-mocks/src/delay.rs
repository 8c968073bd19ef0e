use embedded_hal::delay;
use mockall::mock;

mock! {
    pub Delay {}

    impl delay::DelayNs for Delay {
        fn delay_ns(&mut self, ns: u32);
        fn delay_us(&mut self, us: u32);
        fn delay_ms(&mut self, ms: u32);
    }
}
