use std::io::Write;

use parking_lot::Mutex;
use tracing::error;

use crate::auth::ports::Notifier;

/// Prints each notification as its own line on stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", message) {
            error!("Failed to write notification: {}", e);
        }
    }
}

/// Keeps notifications in memory, in the order they were delivered.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify("first");
        notifier.notify("second");

        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }
}
