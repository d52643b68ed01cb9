//! Plugin service container.
//!
//! [`PluginServices`] is created once when the host loads the plugin.  It
//! owns the options store and the plugin logger, and is passed to whatever
//! needs either of them, so there is no process-wide singleton.
//!
//! The logger fans out to two sinks:
//!
//! - a [`TracingSink`] named `EmbyIcons`, which forwards everything to the
//!   host's `tracing` subscriber
//! - a transcript [`MemorySink`], which keeps only entries marked for the
//!   transcript so a job can show the user what it did

use std::path::PathBuf;
use std::sync::Arc;

use icons_store::{
    ConfigurationStore, ConfigurationStoreBuilder, FanOutSink, LogEntry, LogLevel, LogSink,
    MemorySink, PostSaveHook, PreSaveHook, SaveDecision, SaveOutcome, StoreError, StoreOptions,
    TracingSink,
};

use crate::options::PluginUiOptions;

/// Logical name of the plugin: logger name and options file stem.
pub const PLUGIN_NAME: &str = "EmbyIcons";

pub type PluginOptionsStore = ConfigurationStore<PluginUiOptions>;

/// Writes save activity to the plugin logger.
struct SaveTranscript {
    log: Arc<dyn LogSink>,
}

impl PreSaveHook<PluginUiOptions> for SaveTranscript {
    fn before_save(&self, candidate: &PluginUiOptions) -> SaveDecision {
        self.log.debug(&format!(
            "saving options (icon size {}%, audio [{}], subtitles [{}])",
            candidate.icon_size, candidate.audio_languages, candidate.subtitle_languages
        ));
        SaveDecision::Proceed
    }
}

impl PostSaveHook<PluginUiOptions> for SaveTranscript {
    fn after_save(&self, _saved: &PluginUiOptions) {
        self.log
            .record(&LogEntry::new(LogLevel::Info, "Options saved").for_transcript());
    }
}

pub struct PluginServices {
    log: Arc<FanOutSink>,
    transcript: Arc<MemorySink>,
    store: PluginOptionsStore,
}

impl PluginServices {
    /// Starts the plugin with its options document in `config_dir`.
    pub fn start(config_dir: impl Into<PathBuf>) -> Self {
        Self::start_with(config_dir, |builder| builder)
    }

    /// Like [`start`](Self::start), but lets the caller adjust the store
    /// builder (file system, serializer, extra hooks) before it is built.
    pub fn start_with<F>(config_dir: impl Into<PathBuf>, configure: F) -> Self
    where
        F: FnOnce(
            ConfigurationStoreBuilder<PluginUiOptions>,
        ) -> ConfigurationStoreBuilder<PluginUiOptions>,
    {
        let transcript = Arc::new(MemorySink::new());
        let log = Arc::new(
            FanOutSink::default()
                .with(Arc::new(TracingSink::new(PLUGIN_NAME)))
                .with(transcript.clone()),
        );
        let hook = Arc::new(SaveTranscript { log: log.clone() });

        let builder = ConfigurationStore::builder(StoreOptions::new(config_dir, PLUGIN_NAME))
            .log_sink(log.clone())
            .pre_save(hook.clone())
            .post_save(hook);
        let store = configure(builder).build();

        log.info(&format!("{} options at {}", store.name(), store.path().display()));
        Self {
            log,
            transcript,
            store,
        }
    }

    pub fn store(&self) -> &PluginOptionsStore {
        &self.store
    }

    /// Adds an info line to the job transcript.
    pub fn job_note(&self, message: impl Into<String>) {
        self.log
            .record(&LogEntry::new(LogLevel::Info, message).for_transcript());
    }

    /// Handles the settings page's "Save Config Options" button.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] from the store; it is also written to the
    /// transcript.
    pub fn save_config(&self, options: PluginUiOptions) -> Result<SaveOutcome, StoreError> {
        let result = self.store.set_options(options);
        match &result {
            Ok(SaveOutcome::Cancelled) => self.log.record(
                &LogEntry::new(LogLevel::Warn, "Save was cancelled").for_transcript(),
            ),
            Err(e) => self.log.record(
                &LogEntry::new(LogLevel::Error, "Saving options failed")
                    .with_cause(e)
                    .for_transcript(),
            ),
            Ok(SaveOutcome::Saved) => {}
        }
        result
    }

    /// Handles the "Make Overlays" button: clears the transcript and starts
    /// a new one for the job.
    pub fn begin_job(&self) -> PluginUiOptions {
        self.transcript.clear();
        self.log
            .record(&LogEntry::new(LogLevel::Info, "Starting job").for_transcript());
        self.store.get_options()
    }

    /// Transcript lines joined with `\n`.
    pub fn transcript_as_string(&self) -> String {
        self.transcript.as_string()
    }
}
