//! Terminal rendering of pipeline progress events.

use std::sync::{Arc, Mutex};

use indicatif::ProgressBar;

use sprout_core::{
    application::{ProgressEvent, ProgressReporter, Stage},
    domain::FALLBACK_BRANCH,
};

use crate::output::OutputManager;

/// Renders [`ProgressEvent`]s through the [`OutputManager`].
///
/// The archive download is the only stage with a spinner; it is cleared on
/// the next event or when the reporter is dropped.
pub struct CliProgress {
    output: Arc<OutputManager>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    pub fn new(output: Arc<OutputManager>) -> Self {
        Self {
            output,
            spinner: Mutex::new(None),
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn stage_started(&self, stage: Stage) {
        let label = stage.to_string();
        if stage == Stage::FetchArchive {
            if let Some(pb) = self.output.spinner(&label) {
                if let Ok(mut guard) = self.spinner.lock() {
                    *guard = Some(pb);
                }
                return;
            }
        }
        let _ = self.output.step(&label);
    }
}

impl ProgressReporter for CliProgress {
    fn report(&self, event: ProgressEvent) {
        self.clear_spinner();

        let out = &self.output;
        let _ = match event {
            ProgressEvent::StageStarted(stage) => {
                self.stage_started(stage);
                Ok(())
            }
            ProgressEvent::StageSkipped(stage) => out.step(&format!("{stage} (skipped)")),
            ProgressEvent::VersionResolved { version } => {
                out.info(&format!("Latest version: {version}"))
            }
            ProgressEvent::VersionFallback { reason } => out.warning(&format!(
                "Could not resolve the latest tag ({reason}), using {FALLBACK_BRANCH}"
            )),
            ProgressEvent::ArchiveDownloaded { file } => out.success(&format!("Downloaded {file}")),
            ProgressEvent::ArchiveExtracted { file } => out.success(&format!("Extracted {file}")),
            ProgressEvent::DirectoryRenamed { from, to } => {
                out.success(&format!("Renamed {from} to {to}"))
            }
            ProgressEvent::ArchiveRemoved { file } => out.success(&format!("Removed {file}")),
            ProgressEvent::MetadataFetched { file } => {
                out.success(&format!("Fetched {}", file.file_name()))
            }
            ProgressEvent::MetadataSkipped { file, reason } => {
                out.warning(&format!("Skipped {}: {reason}", file.file_name()))
            }
            ProgressEvent::PackageManagerSelected(pm) => out.info(&format!("Using {pm}")),
            ProgressEvent::CommandStarted { command } => out.step(&format!("$ {command}")),
            ProgressEvent::DependenciesInstalled => out.success("Dependencies installed"),
        };
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}
