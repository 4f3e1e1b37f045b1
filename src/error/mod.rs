mod types;

pub use types::{AlertError, Result};
