use log::info;
use pixstash_core::ProgressObserver;

const BAR_LENGTH: usize = 50;

/// Renders codec progress as a log line with a bar.
pub struct LogProgress {
    task: &'static str,
}

impl LogProgress {
    pub fn new(task: &'static str) -> Self {
        LogProgress { task }
    }
}

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, percent: u8) {
        info!("{}: {} {}%", self.task, bar(percent), percent);
    }
}

fn bar(percent: u8) -> String {
    let filled = BAR_LENGTH * usize::from(percent.min(100)) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_LENGTH - filled))
}
