/// Failure reported by one of the pipeline capabilities.
///
/// `SE` is the sampler error, `PE` the error of the output port and strobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error<SE, PE> {
    #[error("sample acquisition failed: {0:?}")]
    Acquisition(SE),
    #[error("output write failed: {0:?}")]
    Output(PE),
}

impl<SE, PE> Error<SE, PE> {
    pub fn is_acquisition(&self) -> bool {
        matches!(self, Error::Acquisition(_))
    }

    pub fn is_output(&self) -> bool {
        matches!(self, Error::Output(_))
    }
}
