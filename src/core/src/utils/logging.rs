use log::debug;
use std::time::Instant;

pub struct TimeEstimation;

impl TimeEstimation {
    /// Runs `action` and returns its value with the elapsed milliseconds.
    pub fn estimate<T, F: FnOnce() -> T>(action: F) -> (T, u32) {
        let now = Instant::now();

        let result = action();

        let elapsed = now.elapsed().as_millis().min(u32::MAX as u128) as u32;

        (result, elapsed)
    }
}

pub struct Logging;

impl Logging {
    pub fn estimate_result<T, F: FnOnce() -> T>(action: F, message: &str) -> T {
        let (result, elapsed) = TimeEstimation::estimate(action);

        debug!("{}, {} ms", message, elapsed);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_returns_action_value() {
        let (value, _) = TimeEstimation::estimate(|| 2 + 2);

        assert_eq!(value, 4);
    }

    #[test]
    fn test_estimate_result_passes_value_through() {
        let value = Logging::estimate_result(|| "done", "work");

        assert_eq!(value, "done");
    }
}
