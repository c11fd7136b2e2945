pub mod error;
pub mod viacep;

pub use error::{LookupError, Result};
pub use viacep::{ViaCepClient, ViaCepResponse};
