use crate::ui::progress_message::ProgressMessage;
use crate::ui::{theme, Icons};
use crossbeam::channel::Sender;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::thread;
use std::time::Duration;

/// Progress bar fed by analysis workers over a channel
pub struct ProgressManager {
    bar: ProgressBar,
    handle: thread::JoinHandle<()>,
}

impl ProgressManager {
    /// Start the display thread. `hidden` suppresses drawing (quiet or JSON mode).
    pub fn new(hidden: bool) -> (Self, Sender<ProgressMessage>) {
        let (tx, rx) = crossbeam::channel::unbounded::<ProgressMessage>();

        let bar = if hidden || !console::Term::stderr().is_term() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }

        let bar_clone = bar.clone();
        let handle = thread::spawn(move || {
            for msg in rx {
                match msg {
                    ProgressMessage::Started { total } => {
                        bar_clone.set_length(total as u64);
                        bar_clone.enable_steady_tick(Duration::from_millis(100));
                    }
                    ProgressMessage::Progress { file } => {
                        bar_clone.inc(1);
                        if let Some(f) = file {
                            bar_clone.set_message(format!("Parsed: {}", f));
                        }
                    }
                    ProgressMessage::Failed { file, error } => {
                        bar_clone.inc(1);
                        bar_clone.println(format!("{} {}: {}", Icons::CROSS, file, error.style(theme().failure)));
                    }
                    ProgressMessage::Finished => {
                        bar_clone.finish_and_clear();
                    }
                    ProgressMessage::Exit => break,
                }
            }
        });

        (Self { bar, handle }, tx)
    }

    /// Wait for the display thread, then clear the bar.
    ///
    /// The caller must send [`ProgressMessage::Exit`] or drop every sender first.
    pub fn finish(self) {
        if self.handle.join().is_err() {
            tracing::warn!("Progress display thread panicked");
        }
        self.bar.finish_and_clear();
    }

    pub fn print_summary(duration: Duration, files: usize, functions: usize, failed: usize) {
        println!();
        let done = format!("Complete in {}", HumanDuration(duration));
        if failed == 0 {
            println!("{} {}", Icons::CHECK, done.style(theme().ok));
        } else {
            println!("{} {}", Icons::WARN, done.style(theme().caution));
        }
        println!(
            "  {} {}  {} {}  {} {}",
            Icons::FILE.style(theme().icon),
            files,
            Icons::FUNCTION.style(theme().icon),
            functions,
            Icons::CROSS.style(theme().icon),
            failed
        );
    }
}
