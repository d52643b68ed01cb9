//! ConfigurationStore: one settings record, its cache, and its backing file.
//!
//! # Operations
//!
//! - [`ConfigurationStore::get_options`] – cached value, loading it on the
//!   first call.
//! - [`ConfigurationStore::reload_options`] – discard the cache and re-read
//!   the backing file.
//! - [`ConfigurationStore::set_options`] – run the pre-save hooks, write the
//!   persisted projection, replace the cache, run the post-save hooks.
//!
//! # Failure policy
//!
//! Reads never fail.  A missing file yields the base value; an unreadable or
//! malformed file is logged through the [`LogSink`] and the previous cache
//! (or a default record) is used instead.  Writes report every failure to
//! the caller, and the cache only changes after the file has been written.
//!
//! # Locking
//!
//! A single `parking_lot::Mutex` guards the cache and, by convention, the
//! backing file.  `get_options`, `reload_options` and the write phase of
//! `set_options` hold it exclusively.  Hooks always run without it.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use super::hooks::{PostSaveHook, PreSaveHook};
use crate::domain::log::LogSink;
use crate::domain::projection::{self, StoredDocument};
use crate::domain::record::{SettingsRecord, ValidationError};
use crate::infrastructure::fs::{LocalFileSystem, OptionsFileSystem};
use crate::infrastructure::log::TracingSink;
use crate::infrastructure::serializer::{DocumentSerializer, JsonDocumentSerializer};

/// Error returned by [`ConfigurationStore::set_options`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The candidate value failed [`SettingsRecord::validate`].
    #[error("invalid options: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The configuration directory or backing file could not be accessed.
    #[error("options storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be parsed, rendered or mapped onto the record.
    #[error("malformed options document at {path}: {source}")]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    fn storage(path: &Path, source: io::Error) -> Self {
        StoreError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    fn malformed(path: &Path, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::MalformedDocument {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

/// Result of a [`ConfigurationStore::set_options`] call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The document was written and the cache replaced.
    Saved,
    /// A pre-save hook vetoed the save; nothing changed.
    Cancelled,
}

/// Which record a loaded document is overlaid onto.
///
/// Keys present in the document always win.  This only decides what a key
/// *missing* from the document falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadBase {
    /// Missing keys take the record type's default value.
    #[default]
    Defaults,
    /// Missing keys keep the value from the current cache, if there is one.
    Cached,
}

/// Static configuration of a store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Host-designated directory holding one document per logical name.
    pub config_dir: PathBuf,
    /// Logical settings name; also the document's file stem.
    pub logical_name: String,
    pub load_base: LoadBase,
}

impl StoreOptions {
    pub fn new(config_dir: impl Into<PathBuf>, logical_name: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            logical_name: logical_name.into(),
            load_base: LoadBase::default(),
        }
    }

    pub fn load_base(mut self, load_base: LoadBase) -> Self {
        self.load_base = load_base;
        self
    }
}

/// Builder for [`ConfigurationStore`].
///
/// Unset collaborators default to [`LocalFileSystem`],
/// [`JsonDocumentSerializer`] and a [`TracingSink`] named after the logical
/// settings name.
pub struct ConfigurationStoreBuilder<T: SettingsRecord> {
    options: StoreOptions,
    file_system: Option<Arc<dyn OptionsFileSystem>>,
    serializer: Option<Arc<dyn DocumentSerializer>>,
    log: Option<Arc<dyn LogSink>>,
    pre_save: Vec<Arc<dyn PreSaveHook<T>>>,
    post_save: Vec<Arc<dyn PostSaveHook<T>>>,
}

impl<T: SettingsRecord> ConfigurationStoreBuilder<T> {
    pub fn file_system(mut self, file_system: Arc<dyn OptionsFileSystem>) -> Self {
        self.file_system = Some(file_system);
        self
    }

    pub fn serializer(mut self, serializer: Arc<dyn DocumentSerializer>) -> Self {
        self.serializer = Some(serializer);
        self
    }

    pub fn log_sink(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = Some(log);
        self
    }

    /// Adds a pre-save hook.  Hooks run in the order they were added.
    pub fn pre_save(mut self, hook: Arc<dyn PreSaveHook<T>>) -> Self {
        self.pre_save.push(hook);
        self
    }

    /// Adds a post-save hook.  Hooks run in the order they were added.
    pub fn post_save(mut self, hook: Arc<dyn PostSaveHook<T>>) -> Self {
        self.post_save.push(hook);
        self
    }

    /// Builds the store and makes sure the configuration directory exists.
    ///
    /// Failing to create the directory is logged, not returned: the store
    /// still serves defaults, and the next save retries the creation and
    /// reports the error to its caller.
    pub fn build(self) -> ConfigurationStore<T> {
        let StoreOptions {
            config_dir,
            logical_name,
            load_base,
        } = self.options;

        let file_system = self
            .file_system
            .unwrap_or_else(|| Arc::new(LocalFileSystem::new()));
        let serializer = self
            .serializer
            .unwrap_or_else(|| Arc::new(JsonDocumentSerializer));
        let log = self
            .log
            .unwrap_or_else(|| Arc::new(TracingSink::new(logical_name.clone())));

        let path = config_dir.join(format!("{logical_name}.{}", serializer.file_extension()));

        let store = ConfigurationStore {
            name: logical_name,
            config_dir,
            path,
            load_base,
            file_system,
            serializer,
            log,
            pre_save: self.pre_save,
            post_save: self.post_save,
            cache: Mutex::new(None),
        };

        if let Err(err) = store.ensure_directory() {
            store.log.error(
                &format!(
                    "error creating configuration directory for {} at {}",
                    store.name,
                    store.config_dir.display()
                ),
                &err,
            );
        }

        store
    }
}

/// Thread-safe owner of one settings record and its backing document.
///
/// Construct one per logical settings name with
/// [`ConfigurationStore::builder`] and keep it for the life of the process.
pub struct ConfigurationStore<T: SettingsRecord> {
    name: String,
    config_dir: PathBuf,
    path: PathBuf,
    load_base: LoadBase,
    file_system: Arc<dyn OptionsFileSystem>,
    serializer: Arc<dyn DocumentSerializer>,
    log: Arc<dyn LogSink>,
    pre_save: Vec<Arc<dyn PreSaveHook<T>>>,
    post_save: Vec<Arc<dyn PostSaveHook<T>>>,
    cache: Mutex<Option<T>>,
}

impl<T: SettingsRecord> ConfigurationStore<T> {
    pub fn builder(options: StoreOptions) -> ConfigurationStoreBuilder<T> {
        ConfigurationStoreBuilder {
            options,
            file_system: None,
            serializer: None,
            log: None,
            pre_save: Vec::new(),
            post_save: Vec::new(),
        }
    }

    /// Logical settings name this store was built for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached options, loading them on the first call.
    ///
    /// Never fails: a missing, unreadable or malformed document yields a
    /// default record.  Reading never creates the backing file.
    pub fn get_options(&self) -> T {
        let mut cache = self.cache.lock();
        if let Some(options) = cache.as_ref() {
            return options.clone();
        }
        self.load_locked(&mut cache)
    }

    /// Re-reads the backing document, replacing the cached value.
    ///
    /// On failure the previous cached value (or a default record) is kept
    /// and the failure is logged once.
    pub fn reload_options(&self) -> T {
        let mut cache = self.cache.lock();
        self.load_locked(&mut cache)
    }

    /// Persists `options` and makes it the cached value.
    ///
    /// The order of effects is:
    ///
    /// 1. `options.validate()`; failure returns
    ///    [`StoreError::InvalidArgument`] before anything else happens.
    /// 2. Every pre-save hook, without the lock.  The first
    ///    [`SaveDecision::Cancel`](crate::SaveDecision::Cancel) returns [`SaveOutcome::Cancelled`].
    /// 3. Under the lock: project, render, write atomically, replace the
    ///    cache.  The in-memory value keeps its transient fields.
    /// 4. Every post-save hook, without the lock.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidArgument`] for a value that fails validation,
    /// [`StoreError::StorageUnavailable`] when the directory or file cannot
    /// be written, and [`StoreError::MalformedDocument`] when the record
    /// cannot be projected or rendered.  The cache is unchanged on error.
    pub fn set_options(&self, options: T) -> Result<SaveOutcome, StoreError> {
        options.validate()?;

        for hook in &self.pre_save {
            if hook.before_save(&options).is_cancel() {
                debug!(name = %self.name, "save cancelled by pre-save hook");
                return Ok(SaveOutcome::Cancelled);
            }
        }

        {
            let mut cache = self.cache.lock();
            let document = projection::project(&options)
                .map_err(|err| StoreError::malformed(&self.path, err))?;
            let bytes = self
                .serializer
                .render(&document)
                .map_err(|err| StoreError::malformed(&self.path, err))?;

            self.ensure_directory()?;
            self.file_system
                .write_atomic(&self.path, &bytes)
                .map_err(|err| StoreError::storage(&self.path, err))?;

            *cache = Some(options.clone());
        }
        debug!(name = %self.name, path = %self.path.display(), "options saved");

        for hook in &self.post_save {
            hook.after_save(&options);
        }

        Ok(SaveOutcome::Saved)
    }

    fn ensure_directory(&self) -> Result<(), StoreError> {
        if self.file_system.directory_exists(&self.config_dir) {
            return Ok(());
        }
        self.file_system
            .create_directory(&self.config_dir)
            .map_err(|err| StoreError::storage(&self.config_dir, err))
    }

    /// Load algorithm shared by `get_options` and `reload_options`.
    /// Caller must hold the cache lock.
    fn load_locked(&self, cache: &mut Option<T>) -> T {
        let base = match (self.load_base, cache.as_ref()) {
            (LoadBase::Cached, Some(current)) => current.clone(),
            _ => T::default(),
        };

        if !self.file_system.file_exists(&self.path) {
            debug!(name = %self.name, path = %self.path.display(), "no options file, using defaults");
            *cache = Some(base.clone());
            return base;
        }

        let loaded = self
            .read_document()
            .and_then(|document| {
                projection::restore(&base, document)
                    .map_err(|err| StoreError::malformed(&self.path, err))
            });

        match loaded {
            Ok(options) => {
                debug!(name = %self.name, path = %self.path.display(), "options loaded");
                *cache = Some(options.clone());
                options
            }
            Err(err) => {
                self.log.error(
                    &format!(
                        "error loading options for {} from {}",
                        self.name,
                        self.path.display()
                    ),
                    &err,
                );
                let fallback = cache.take().unwrap_or_default();
                *cache = Some(fallback.clone());
                fallback
            }
        }
    }

    fn read_document(&self) -> Result<StoredDocument, StoreError> {
        let bytes = self
            .file_system
            .read(&self.path)
            .map_err(|err| StoreError::storage(&self.path, err))?;
        self.serializer
            .parse(&bytes)
            .map_err(|err| StoreError::malformed(&self.path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::hooks::mock::RecordingHook;
    use crate::application::hooks::SaveDecision;
    use crate::infrastructure::fs::mock::MemoryFileSystem;
    use crate::infrastructure::log::MemorySink;
    use crate::infrastructure::serializer::TomlDocumentSerializer;
    use mockall::mock;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{OnceLock, Weak};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Overlay {
        icon_size: i32,
        languages: String,
        show_icons: bool,
        #[serde(skip)]
        language_options: Vec<String>,
    }

    impl Default for Overlay {
        fn default() -> Self {
            Self {
                icon_size: 10,
                languages: "eng,dan".to_string(),
                show_icons: true,
                language_options: Vec::new(),
            }
        }
    }

    impl SettingsRecord for Overlay {
        const PERSISTED_FIELDS: &'static [&'static str] = &["IconSize", "Languages", "ShowIcons"];

        fn validate(&self) -> Result<(), ValidationError> {
            if self.icon_size < 1 {
                return Err(ValidationError::new("IconSize", "must be positive"));
            }
            Ok(())
        }
    }

    mock! {
        Veto {}
        impl PreSaveHook<Overlay> for Veto {
            fn before_save(&self, candidate: &Overlay) -> SaveDecision;
        }
    }

    const DIR: &str = "/data/plugins/configurations";

    struct Fixture {
        fs: Arc<MemoryFileSystem>,
        log: Arc<MemorySink>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                fs: Arc::new(MemoryFileSystem::new()),
                log: Arc::new(MemorySink::capture_all()),
            }
        }

        fn builder(&self) -> ConfigurationStoreBuilder<Overlay> {
            self.builder_with(StoreOptions::new(DIR, "EmbyIcons"))
        }

        fn builder_with(&self, options: StoreOptions) -> ConfigurationStoreBuilder<Overlay> {
            ConfigurationStore::builder(options)
                .file_system(self.fs.clone())
                .log_sink(self.log.clone())
        }

        fn store(&self) -> ConfigurationStore<Overlay> {
            self.builder().build()
        }

        fn path(&self) -> PathBuf {
            PathBuf::from(DIR).join("EmbyIcons.json")
        }
    }

    fn custom() -> Overlay {
        Overlay {
            icon_size: 25,
            languages: "jpn".to_string(),
            show_icons: false,
            language_options: vec!["eng".to_string(), "jpn".to_string()],
        }
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_build_derives_path_from_logical_name_and_extension() {
        let fixture = Fixture::new();
        let store = fixture.store();

        assert_eq!(store.path(), fixture.path());
        assert_eq!(store.name(), "EmbyIcons");
    }

    #[test]
    fn test_build_with_toml_serializer_uses_toml_extension() {
        let fixture = Fixture::new();
        let store = fixture
            .builder()
            .serializer(Arc::new(TomlDocumentSerializer))
            .build();

        assert_eq!(store.path(), PathBuf::from(DIR).join("EmbyIcons.toml"));
    }

    #[test]
    fn test_build_creates_configuration_directory() {
        let fixture = Fixture::new();
        let _store = fixture.store();

        assert!(fixture.fs.directory_exists(Path::new(DIR)));
    }

    #[test]
    fn test_build_logs_directory_failure_and_still_serves_defaults() {
        // Arrange
        let fixture = Fixture::new();
        fixture.fs.fail_create_directory(true);

        // Act
        let store = fixture.store();

        // Assert
        assert_eq!(fixture.log.entries().len(), 1);
        assert_eq!(store.get_options(), Overlay::default());
    }

    // ── get_options / reload_options ─────────────────────────────────────────

    #[test]
    fn test_get_options_without_file_returns_default_and_creates_no_file() {
        // Arrange
        let fixture = Fixture::new();
        let store = fixture.store();

        // Act
        let options = store.get_options();

        // Assert
        assert_eq!(options, Overlay::default());
        assert!(!fixture.fs.file_exists(&fixture.path()));
        assert!(fixture.log.entries().is_empty());
    }

    #[test]
    fn test_get_options_caches_first_load() {
        // Arrange
        let fixture = Fixture::new();
        fixture
            .fs
            .seed(fixture.path(), r#"{"IconSize": 30, "Languages": "eng", "ShowIcons": true}"#);
        let store = fixture.store();
        assert_eq!(store.get_options().icon_size, 30);

        // Act: an external writer changes the file
        fixture.fs.seed(fixture.path(), r#"{"IconSize": 99}"#);

        // Assert: cached value until reload
        assert_eq!(store.get_options().icon_size, 30);
        assert_eq!(store.reload_options().icon_size, 99);
        assert_eq!(store.get_options().icon_size, 99);
    }

    #[test]
    fn test_reload_of_corrupt_document_returns_default_and_logs_one_error() {
        // Arrange
        let fixture = Fixture::new();
        fixture.fs.seed(fixture.path(), r#"{"IconSize": 3"#);
        let store = fixture.store();

        // Act
        let options = store.reload_options();

        // Assert
        assert_eq!(options, Overlay::default());
        let entries = fixture.log.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("[ERROR] error loading options for EmbyIcons from"));
        assert!(entries[0].contains("EmbyIcons.json"));
    }

    #[test]
    fn test_reload_failure_keeps_previous_cached_value() {
        // Arrange
        let fixture = Fixture::new();
        let store = fixture.store();
        store.set_options(custom()).expect("save");
        fixture.fs.seed(fixture.path(), "not json at all");

        // Act
        let options = store.reload_options();

        // Assert
        assert_eq!(options, custom());
        assert_eq!(fixture.log.entries().len(), 1);
    }

    #[test]
    fn test_reload_with_unreadable_file_degrades_to_default() {
        let fixture = Fixture::new();
        fixture.fs.seed(fixture.path(), "{}");
        fixture.fs.fail_reads(true);
        let store = fixture.store();

        assert_eq!(store.get_options(), Overlay::default());
        assert_eq!(fixture.log.entries().len(), 1);
    }

    #[test]
    fn test_reload_with_wrong_value_type_is_treated_as_malformed() {
        let fixture = Fixture::new();
        fixture.fs.seed(fixture.path(), r#"{"IconSize": "huge"}"#);
        let store = fixture.store();

        assert_eq!(store.reload_options(), Overlay::default());
        assert_eq!(fixture.log.entries().len(), 1);
    }

    #[test]
    fn test_partial_document_resets_missing_keys_to_defaults() {
        // Arrange
        let fixture = Fixture::new();
        let store = fixture.store();
        store.set_options(custom()).expect("save");
        fixture.fs.seed(fixture.path(), r#"{"IconSize": 50}"#);

        // Act
        let options = store.reload_options();

        // Assert
        assert_eq!(options.icon_size, 50);
        assert_eq!(options.languages, Overlay::default().languages);
        assert!(options.show_icons);
    }

    #[test]
    fn test_partial_document_inherits_missing_keys_with_cached_load_base() {
        // Arrange
        let fixture = Fixture::new();
        let store = fixture
            .builder_with(StoreOptions::new(DIR, "EmbyIcons").load_base(LoadBase::Cached))
            .build();
        store.set_options(custom()).expect("save");
        fixture.fs.seed(fixture.path(), r#"{"IconSize": 50}"#);

        // Act
        let options = store.reload_options();

        // Assert
        assert_eq!(options.icon_size, 50);
        assert_eq!(options.languages, "jpn");
        assert!(!options.show_icons);
        assert!(options.language_options.is_empty());
    }

    // ── set_options ──────────────────────────────────────────────────────────

    #[test]
    fn test_set_options_writes_only_persisted_fields() {
        // Arrange
        let fixture = Fixture::new();
        let store = fixture.store();

        // Act
        let outcome = store.set_options(custom()).expect("save");

        // Assert
        assert_eq!(outcome, SaveOutcome::Saved);
        let text = fixture.fs.text(&fixture.path()).expect("document written");
        assert!(text.contains("\"IconSize\": 25"));
        assert!(text.contains("\"Languages\": \"jpn\""));
        assert!(!text.contains("LanguageOptions"));
    }

    #[test]
    fn test_set_options_caches_value_verbatim_including_transient_fields() {
        let fixture = Fixture::new();
        let store = fixture.store();

        store.set_options(custom()).expect("save");

        assert_eq!(store.get_options().language_options, custom().language_options);
    }

    #[test]
    fn test_set_then_reload_round_trips_persisted_fields() {
        let fixture = Fixture::new();
        let store = fixture.store();

        store.set_options(custom()).expect("save");
        let reloaded = store.reload_options();

        assert_eq!(reloaded.icon_size, 25);
        assert_eq!(reloaded.languages, "jpn");
        assert!(!reloaded.show_icons);
    }

    #[test]
    fn test_set_options_rejects_invalid_value_without_io_or_hooks() {
        // Arrange
        let fixture = Fixture::new();
        let hook = Arc::new(RecordingHook::new());
        let store = fixture.builder().pre_save(hook.clone()).build();
        let invalid = Overlay {
            icon_size: 0,
            ..Overlay::default()
        };

        // Act
        let result = store.set_options(invalid);

        // Assert
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
        assert!(hook.candidates().is_empty());
        assert_eq!(fixture.fs.write_count(), 0);
    }

    #[test]
    fn test_cancelling_hook_leaves_file_and_cache_untouched() {
        // Arrange
        let fixture = Fixture::new();
        let veto = Arc::new(RecordingHook::new());
        let after = Arc::new(RecordingHook::new());
        let store = fixture
            .builder()
            .pre_save(veto.clone())
            .post_save(after.clone())
            .build();
        store.set_options(custom()).expect("first save");
        let before = fixture.fs.text(&fixture.path());
        veto.set_cancel(true);

        // Act
        let outcome = store
            .set_options(Overlay {
                icon_size: 77,
                ..custom()
            })
            .expect("cancel is not an error");

        // Assert
        assert_eq!(outcome, SaveOutcome::Cancelled);
        assert_eq!(fixture.fs.text(&fixture.path()), before);
        assert_eq!(fixture.fs.write_count(), 1);
        assert_eq!(store.get_options(), custom());
        assert_eq!(store.reload_options().icon_size, 25);
        assert_eq!(after.saved().len(), 1);
    }

    #[test]
    fn test_first_cancelling_hook_short_circuits_later_hooks() {
        let fixture = Fixture::new();
        let first = Arc::new(RecordingHook::cancelling());
        let second = Arc::new(RecordingHook::new());
        let store = fixture
            .builder()
            .pre_save(first.clone())
            .pre_save(second.clone())
            .build();

        let outcome = store.set_options(custom()).expect("cancel");

        assert_eq!(outcome, SaveOutcome::Cancelled);
        assert_eq!(first.candidates().len(), 1);
        assert!(second.candidates().is_empty());
    }

    #[test]
    fn test_mocked_pre_save_hook_sees_candidate_exactly_once() {
        // Arrange
        let fixture = Fixture::new();
        let mut veto = MockVeto::new();
        veto.expect_before_save()
            .withf(|candidate| candidate.icon_size == 25)
            .times(1)
            .return_const(SaveDecision::Cancel);
        let store = fixture.builder().pre_save(Arc::new(veto)).build();

        // Act
        let outcome = store.set_options(custom()).expect("cancel");

        // Assert
        assert_eq!(outcome, SaveOutcome::Cancelled);
        assert!(!fixture.fs.file_exists(&fixture.path()));
    }

    #[test]
    fn test_post_save_hook_receives_saved_value() {
        let fixture = Fixture::new();
        let after = Arc::new(RecordingHook::new());
        let store = fixture.builder().post_save(after.clone()).build();

        store.set_options(custom()).expect("save");

        assert_eq!(after.saved(), vec![custom()]);
    }

    #[test]
    fn test_write_failure_is_returned_and_cache_is_unchanged() {
        // Arrange
        let fixture = Fixture::new();
        let after = Arc::new(RecordingHook::new());
        let store = fixture.builder().post_save(after.clone()).build();
        fixture.fs.fail_writes(true);

        // Act
        let result = store.set_options(custom());

        // Assert
        assert!(matches!(result, Err(StoreError::StorageUnavailable { .. })));
        assert_eq!(store.get_options(), Overlay::default());
        assert!(after.saved().is_empty());
    }

    #[test]
    fn test_save_retries_directory_creation_and_reports_failure() {
        let fixture = Fixture::new();
        fixture.fs.fail_create_directory(true);
        let store = fixture.store();

        let result = store.set_options(custom());

        match result {
            Err(StoreError::StorageUnavailable { path, .. }) => assert_eq!(path, PathBuf::from(DIR)),
            other => panic!("expected StorageUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_is_dropped_on_next_save() {
        // Arrange
        let fixture = Fixture::new();
        fixture.fs.seed(
            fixture.path(),
            r#"{"IconSize": 12, "LegacyFolder": "C:\\icons"}"#,
        );
        let store = fixture.store();

        // Act
        let options = store.get_options();
        store.set_options(options).expect("save");

        // Assert
        let text = fixture.fs.text(&fixture.path()).unwrap();
        assert!(!text.contains("LegacyFolder"));
        assert!(text.contains("\"IconSize\": 12"));
    }

    // ── Hook re-entrancy ─────────────────────────────────────────────────────

    #[test]
    fn test_hooks_can_call_back_into_the_store() {
        // Arrange: hooks that read through the same store would deadlock if
        // the lock were held while they run.
        let fixture = Fixture::new();
        let slot: Arc<OnceLock<Weak<ConfigurationStore<Overlay>>>> = Arc::new(OnceLock::new());
        let seen_before = Arc::new(AtomicUsize::new(0));
        let seen_after = Arc::new(AtomicUsize::new(0));

        let pre_slot = slot.clone();
        let before = seen_before.clone();
        let pre = move |_: &Overlay| {
            if let Some(store) = pre_slot.get().and_then(Weak::upgrade) {
                before.store(store.get_options().icon_size as usize, Ordering::SeqCst);
            }
            SaveDecision::Proceed
        };

        let post_slot = slot.clone();
        let after = seen_after.clone();
        let post = move |_: &Overlay| {
            if let Some(store) = post_slot.get().and_then(Weak::upgrade) {
                after.store(store.reload_options().icon_size as usize, Ordering::SeqCst);
            }
        };

        let store = Arc::new(
            fixture
                .builder()
                .pre_save(Arc::new(pre))
                .post_save(Arc::new(post))
                .build(),
        );
        let _ = slot.set(Arc::downgrade(&store));

        // Act
        store.set_options(custom()).expect("save");

        // Assert
        assert_eq!(seen_before.load(Ordering::SeqCst), 10);
        assert_eq!(seen_after.load(Ordering::SeqCst), 25);
    }
}
