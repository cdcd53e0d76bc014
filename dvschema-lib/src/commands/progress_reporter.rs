use crate::extraction::Progress;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::task::JoinHandle;

/// Refresh rate for progress updates (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const DETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {msg}";
const DETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {msg}";
const INDETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{spinner}] {msg}";
const INDETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{spinner}] {msg}";

const SPINNER_FRAMES: &[&str] = &[
    "=>                       ",
    " =>                      ",
    "  =>                     ",
    "   =>                    ",
    "    =>                   ",
    "     =>                  ",
    "      =>                 ",
    "       =>                ",
    "        =>               ",
    "         =>              ",
    "          =>             ",
    "           =>            ",
    "            =>           ",
    "             =>          ",
    "              =>         ",
    "               =>        ",
    "                =>       ",
    "                 =>      ",
    "                  =>     ",
    "                   =>    ",
    "                    =>   ",
    "                     =>  ",
    "                      => ",
    "                       =>",
    "                       <=",
    "                      <= ",
    "                     <=  ",
    "                    <=   ",
    "                   <=    ",
    "                  <=     ",
    "                 <=      ",
    "                <=       ",
    "               <=        ",
    "              <=         ",
    "             <=          ",
    "            <=           ",
    "           <=            ",
    "          <=             ",
    "         <=              ",
    "        <=               ",
    "       <=                ",
    "      <=                 ",
    "     <=                  ",
    "    <=                   ",
    "   <=                    ",
    "  <=                     ",
    " <=                      ",
    "<=                       ",
];

struct DelayedProgressState {
    visible_after: Instant,
    visible: AtomicBool,
    is_indeterminate: AtomicBool,
    length: AtomicU64,
    position: AtomicU64,
    message: Mutex<String>,
    phase_start_time: Mutex<Instant>,
}

impl Debug for DelayedProgressState {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DelayedProgressState")
            .field("visible_after", &self.visible_after)
            .field("visible", &self.visible)
            .field("is_indeterminate", &self.is_indeterminate)
            .field("length", &self.length)
            .field("position", &self.position)
            .field("phase_start_time", &"<Instant>")
            .finish_non_exhaustive()
    }
}

/// A progress bar that delays showing itself until a threshold is reached.
///
/// Phases are shown with a spinner; once entities start being processed the
/// bar switches to a determinate `processed/total` display.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Arc<DelayedProgressState>,
    refresh_task: Arc<JoinHandle<()>>,
    use_colors: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// The progress bar will only become visible if operations continue beyond the delay threshold.
    /// When `use_colors` is false, progress bar chrome is rendered without ANSI styling.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_draw_target(ProgressDrawTarget::hidden());

        let state = Arc::new(DelayedProgressState {
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
            is_indeterminate: AtomicBool::new(false),
            length: AtomicU64::new(0),
            position: AtomicU64::new(0),
            message: Mutex::new(String::new()),
            phase_start_time: Mutex::new(Instant::now()),
        });

        Self {
            refresh_task: Arc::new(tokio::spawn(refresh_task(bar.clone(), Arc::clone(&state)))),
            bar,
            state,
            use_colors,
        }
    }

    fn switch_to_spinner(&self) {
        self.state.is_indeterminate.store(true, Ordering::Relaxed);
        self.bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));

        let template = if self.use_colors { INDETERMINATE_TEMPLATE } else { INDETERMINATE_TEMPLATE_NO_COLOR };
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template(template)
                .expect("could not create progress bar style")
                .tick_strings(SPINNER_FRAMES),
        );
    }

    fn switch_to_bar(&self) {
        self.state.is_indeterminate.store(false, Ordering::Relaxed);
        self.bar.disable_steady_tick();
        self.bar.set_length(0);
        self.bar.set_position(0);

        let template = if self.use_colors { DETERMINATE_TEMPLATE } else { DETERMINATE_TEMPLATE_NO_COLOR };
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("could not create progress bar style")
                .progress_chars("=> "),
        );
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
        *self.state.phase_start_time.lock().expect("lock poisoned") = Instant::now();
        self.state.length.store(0, Ordering::Relaxed);
        self.state.position.store(0, Ordering::Relaxed);
        *self.state.message.lock().expect("lock poisoned") = match phase {
            "Retrieving" => "entity definitions".to_string(),
            "Resolving" => "solution components".to_string(),
            _ => String::new(),
        };
        self.switch_to_spinner();
    }

    fn entity_processed(&self, processed: usize, total: usize, logical_name: &str) {
        if self.state.is_indeterminate.load(Ordering::Relaxed) {
            self.switch_to_bar();
        }

        self.state.length.store(total as u64, Ordering::Relaxed);
        self.state.position.store(processed as u64, Ordering::Relaxed);
        *self.state.message.lock().expect("lock poisoned") = format!("{processed}/{total}: {logical_name}");
    }

    /// Finish and clear the progress indicator.
    fn done(&self) {
        self.refresh_task.abort();
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("state", &self.state)
            .field("refresh_task", &"<task>")
            .field("use_colors", &self.use_colors)
            .finish()
    }
}

/// Background refresh task that periodically updates the progress bar.
async fn refresh_task(bar: ProgressBar, state: Arc<DelayedProgressState>) {
    let mut interval = tokio::time::interval(Duration::from_millis(REFRESH_INTERVAL_MS));
    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = interval.tick().await;

        if !state.visible.load(Ordering::Relaxed) && Instant::now() >= state.visible_after {
            state.visible.store(true, Ordering::Relaxed);
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        if state.visible.load(Ordering::Relaxed) {
            let mut message = state.message.lock().expect("lock poisoned").clone();

            // In indeterminate mode, prepend elapsed seconds to the message
            if state.is_indeterminate.load(Ordering::Relaxed) {
                let elapsed_secs = state.phase_start_time.lock().expect("lock poisoned").elapsed().as_secs();
                message = format!("{elapsed_secs}s: {message}");
            }

            let length = state.length.load(Ordering::Relaxed);
            if length > 0 {
                bar.set_length(length);
                bar.set_position(state.position.load(Ordering::Relaxed));
            }
            bar.set_message(message);
        }
    }
}
