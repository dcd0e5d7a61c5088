use elisa_plate::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::plate_style())
            .with_message("Preparing plates...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    /// Creates a handler that never draws, for non-interactive use and tests.
    pub fn hidden() -> Self {
        let pb = ProgressBar::hidden();
        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PlateStart {
                    plate,
                    pending_groups,
                } => {
                    pb_guard.reset();
                    pb_guard.set_length(pending_groups as u64);
                    pb_guard.set_position(0);
                    pb_guard.set_message(format!("Plate {}", plate));
                }
                Progress::PlateFinish {
                    plate,
                    wells_filled,
                    leftover_groups,
                } => {
                    let placed = pb_guard.length().unwrap_or(0).saturating_sub(leftover_groups as u64);
                    pb_guard.set_position(placed);
                    // Keeps the position; carried-over groups stay unfilled.
                    pb_guard.abandon_with_message(format!(
                        "Plate {}: {} wells filled, {} group(s) carried over",
                        plate, wells_filled, leftover_groups
                    ));
                }
                Progress::Message(msg) => {
                    info!("{}", msg);
                    pb_guard.println(format!("  {}", msg));
                }
            }
        })
    }

    fn plate_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:30.cyan/blue}] {pos}/{len} groups")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
