//! Conditional logging macros.
//!
//! With the `tracing` feature enabled these are the `tracing` macros;
//! without it they expand to nothing, so the interpreter's data-quality
//! warnings cost nothing in release builds that do not opt in.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};

#[cfg(test)]
mod tests {
    use super::{debug, warn};

    #[test]
    fn macros_are_valid_in_expression_position() {
        // Match arms use these directly, so the expansion must be an
        // expression in both feature configurations.
        let value: Option<u32> = None;
        match value {
            Some(_) => {}
            None => warn!("no value"),
        }
        if value.is_none() {
            debug!("still none")
        }
    }
}
