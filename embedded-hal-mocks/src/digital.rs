use embedded_hal::digital;
use mockall::mock;

#[derive(Debug, Clone, Copy)]
pub struct PinError;

impl digital::Error for PinError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

mock! {
    pub OutputPin {}

    impl digital::ErrorType for OutputPin {
        type Error = PinError;
    }

    impl digital::OutputPin for OutputPin {
        fn set_low(&mut self) -> Result<(), PinError>;
        fn set_high(&mut self) -> Result<(), PinError>;
    }
}

mock! {
    pub InputPin {}

    impl digital::ErrorType for InputPin {
        type Error = PinError;
    }

    impl digital::InputPin for InputPin {
        fn is_high(&mut self) -> Result<bool, PinError>;
        fn is_low(&mut self) -> Result<bool, PinError>;
    }
}
