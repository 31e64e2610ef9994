//!
//! Shared plumbing for Snowgrant
//!
//! Logging, configuration files, and project paths used by the
//! warehouse connectors.
#![deny(missing_docs)]

pub use config::fetch_credentials;

pub mod config;
pub mod logging;
pub mod project;

#[macro_export]
/// Time the code inside the macro. Write the elapsed time to debug logs.
/// Derived from https://notes.iveselov.info/programming/time_it-a-case-study-in-rust-macros
macro_rules! log_runtime {
    ($context:expr, $($tt:tt)+) => {
        {
            $crate::logging::debug!("{}: starting", $context);
            let timer = std::time::Instant::now();
            let x =
            $(
                $tt
            )+;
            $crate::logging::debug!("{}: {:?}", $context, timer.elapsed());
            x
        }
    }
}
