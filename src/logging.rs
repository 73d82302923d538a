//! Logger setup for the browser and for native hosts.

use crate::config::LogLevel;

/// Install the logger backend for the current target.
///
/// Safe to call more than once; later calls only log a debug line.
pub fn init(level: LogLevel) {
    let filter = level.to_level_filter();

    #[cfg(target_arch = "wasm32")]
    let result = filter
        .to_level()
        .map_or(Ok(()), console_log::init_with_level);

    #[cfg(not(target_arch = "wasm32"))]
    let result = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init();

    match result {
        Ok(()) => log::set_max_level(filter),
        Err(e) => log::debug!("Logger already initialized: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(LogLevel::Debug);
        init(LogLevel::Trace);
    }
}
