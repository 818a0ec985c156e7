// Progress bar over parsed tables, using indicatif.
// Disabled under --debug/--quiet so log lines are not interleaved with the bar.

use indicatif::{ProgressBar, ProgressStyle};

#[derive(Clone, Copy)]
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    // Bar counting tables; the length is set once the headers are known.
    pub fn new_table_bar(&self) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }
        let bar = ProgressBar::new(0);
        bar.set_style(table_style());
        bar.set_prefix("Parsing tables".to_string());
        Some(bar)
    }
}

fn table_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:20} {pos:>5}/{len:<5} [{bar:67}] {percent:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█ ")
}
