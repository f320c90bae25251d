pub mod recognize;

#[cfg(test)]
pub(crate) mod test_support;

pub use recognize::{RecognizeCommand, RecognizeUseCase, Recognition};
