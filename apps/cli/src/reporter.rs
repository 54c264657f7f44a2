use std::{cell::RefCell, time::Duration};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tubegrab_core::{Event, Reporter};

/// Prints events to stdout and shows a progress bar while a file is saving.
#[derive(Default)]
pub struct ConsoleReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn finish_bar(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &Event<'_>) {
        if let Event::Progress { percent } = event {
            let mut bar = self.bar.borrow_mut();
            let bar = bar.get_or_insert_with(create_progress_bar);
            bar.set_position(percent.clamp(0.0, 100.0).round() as u64);
            return;
        }

        self.finish_bar();
        println!("{}", render(event));
    }
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos:>3}%")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn render(event: &Event<'_>) -> String {
    let text = event.to_string();
    match event {
        Event::Menu => format!("\n{}", style(text).cyan().bold()),
        Event::Interrupted => format!("\n{}", style(text).dim()),
        Event::Farewell | Event::ItemSaved { .. } => style(text).dim().to_string(),
        Event::VideoSaved { .. } => format!("{} {}", style("✓").green().bold(), text),
        Event::CollectionFinished { failed, total, .. } if *failed > 0 => format!(
            "{} {} {}",
            style("✓").yellow().bold(),
            text,
            style(format!("({} of {} failed)", failed, total)).dim()
        ),
        Event::CollectionFinished { .. } => format!("{} {}", style("✓").green().bold(), text),
        e if e.is_failure() => format!("{} {}", style("✗").red().bold(), style(text).red()),
        _ => text,
    }
}
