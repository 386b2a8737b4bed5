use serde_json::Value;

/// Write-only sink for user-facing output.
pub trait Reporter {
    fn log(&self, message: &str);
    fn error(&self, message: &str);
    fn dir(&self, value: &Value);
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn log(&self, message: &str) {
        log::info!("{}", message);
    }

    fn error(&self, message: &str) {
        log::error!("{}", message);
    }

    fn dir(&self, value: &Value) {
        match serde_json::to_string_pretty(value) {
            Ok(pretty) => log::info!("{}", pretty),
            Err(e) => log::error!("Failed to render value: {}", e),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::Reporter;
    use serde_json::Value;
    use std::cell::RefCell;

    /// Keeps every message so tests can assert on reported output.
    #[derive(Debug, Default)]
    pub struct RecordingReporter {
        pub logs: RefCell<Vec<String>>,
        pub errors: RefCell<Vec<String>>,
        pub dirs: RefCell<Vec<Value>>,
    }

    impl RecordingReporter {
        pub fn logged(&self, needle: &str) -> bool {
            self.logs.borrow().iter().any(|m| m.contains(needle))
        }

        pub fn errored(&self, needle: &str) -> bool {
            self.errors.borrow().iter().any(|m| m.contains(needle))
        }
    }

    impl Reporter for RecordingReporter {
        fn log(&self, message: &str) {
            self.logs.borrow_mut().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }

        fn dir(&self, value: &Value) {
            self.dirs.borrow_mut().push(value.clone());
        }
    }
}
