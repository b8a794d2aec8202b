//! Scaffold Service - main application orchestrator.
//!
//! This service runs the whole pipeline, strictly in order:
//! 1. Resolve the template version (falls back to the default branch)
//! 2. Download the archive (fatal on failure)
//! 3. Extract it into the working directory
//! 4. Rename the extracted directory to the project name
//! 5. Delete the archive
//! 6. Copy metadata dotfiles (best-effort)
//! 7. git init, install dependencies, initial commit
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        VersionLookupError,
        ports::{
            ArchiveExtractor, CommandRunner, ExtractedArchive, Filesystem, HttpClient,
            NoopProgress, ProgressReporter,
        },
        progress::{ProgressEvent, Stage},
        services::{
            ArchiveFetcher, DependencyInstaller, InstallReport, MetadataFetcher, MetadataReport,
            VersionResolver,
        },
    },
    domain::{Endpoints, ProjectName, TemplateRef, Version, archive_file_name},
    error::SproutResult,
};

/// Commit message used when none is configured.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit from sprout";

/// Which optional stages run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub fetch_metadata: bool,
    pub install_dependencies: bool,
    pub initial_commit: bool,
    pub commit_message: String,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            fetch_metadata: true,
            install_dependencies: true,
            initial_commit: true,
            commit_message: DEFAULT_COMMIT_MESSAGE.into(),
        }
    }
}

/// Everything a run needs. Nothing is read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub working_dir: PathBuf,
    pub application_name: ProjectName,
    pub template: TemplateRef,
    pub options: ScaffoldOptions,
}

/// Derived names and locations for a run, computed after version resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub template: TemplateRef,
    pub version: Version,
    pub fallback: Option<VersionLookupError>,
    pub archive_name: String,
    pub archive_url: String,
    pub archive_path: PathBuf,
    pub extracted_path: PathBuf,
    pub project_path: PathBuf,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub plan: ScaffoldPlan,
    pub archive_bytes: usize,
    pub metadata: Option<MetadataReport>,
    pub install: Option<InstallReport>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    http: Box<dyn HttpClient>,
    extractor: Box<dyn ArchiveExtractor>,
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    progress: Box<dyn ProgressReporter>,
    endpoints: Endpoints,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// Uses GitHub endpoints and reports no progress until configured
    /// otherwise.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use sprout_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     http,       // impl HttpClient
    ///     extractor,  // impl ArchiveExtractor
    ///     filesystem, // impl Filesystem
    ///     runner,     // impl CommandRunner
    /// );
    /// ```
    pub fn new(
        http: Box<dyn HttpClient>,
        extractor: Box<dyn ArchiveExtractor>,
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            http,
            extractor,
            filesystem,
            runner,
            progress: Box::new(NoopProgress),
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Resolve the version and derive every name the run will use.
    ///
    /// Performs the tag lookup and nothing else.
    #[instrument(
        skip_all,
        fields(template = %request.template, project = %request.application_name)
    )]
    pub fn plan(&self, request: &ScaffoldRequest) -> ScaffoldPlan {
        self.progress
            .report(ProgressEvent::StageStarted(Stage::ResolveVersion));

        let resolution =
            VersionResolver::new(self.http.as_ref(), &self.endpoints).resolve(&request.template);

        match &resolution.fallback {
            None => self.progress.report(ProgressEvent::VersionResolved {
                version: resolution.version.clone(),
            }),
            Some(reason) => self.progress.report(ProgressEvent::VersionFallback {
                reason: reason.to_string(),
            }),
        }

        let archive_name = archive_file_name(&request.template, &resolution.version);
        let working_dir = &request.working_dir;

        ScaffoldPlan {
            archive_url: self
                .endpoints
                .archive_url(&request.template, &resolution.version),
            archive_path: working_dir.join(format!("{archive_name}.zip")),
            extracted_path: working_dir.join(&archive_name),
            project_path: working_dir.join(&request.application_name),
            template: request.template.clone(),
            version: resolution.version,
            fallback: resolution.fallback,
            archive_name,
        }
    }

    /// Scaffold a new project.
    ///
    /// The first fatal error is returned as-is; no stage after it runs and
    /// nothing already on disk is rolled back.
    #[instrument(
        skip_all,
        fields(
            template = %request.template,
            project = %request.application_name,
            working_dir = %request.working_dir.display()
        )
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> SproutResult<ScaffoldReport> {
        info!("Scaffolding project from {}", request.template);

        // 1. Resolve version
        let plan = self.plan(request);

        // 2. Download archive
        self.progress
            .report(ProgressEvent::StageStarted(Stage::FetchArchive));
        let archive_bytes = ArchiveFetcher::new(self.http.as_ref(), self.filesystem.as_ref())
            .fetch(&plan.archive_url, &plan.archive_path)?;
        self.progress.report(ProgressEvent::ArchiveDownloaded {
            file: file_label(&plan.archive_path),
        });

        // 3. Extract
        self.progress
            .report(ProgressEvent::StageStarted(Stage::ExtractArchive));
        let extracted = self
            .extractor
            .extract(&plan.archive_path, &request.working_dir)?;
        self.progress.report(ProgressEvent::ArchiveExtracted {
            file: file_label(&plan.archive_path),
        });

        // 4. Rename, before the archive is deleted
        self.progress
            .report(ProgressEvent::StageStarted(Stage::RenameDirectory));
        let source = self.extracted_dir(&plan, &extracted, &request.working_dir);
        if source == plan.project_path {
            // No project name and no tag: both are the fallback marker.
            debug!(path = %source.display(), "Extracted directory already has the project name");
        } else {
            self.filesystem.rename(&source, &plan.project_path)?;
            self.progress.report(ProgressEvent::DirectoryRenamed {
                from: file_label(&source),
                to: request.application_name.to_string(),
            });
        }

        // 5. Delete archive
        self.progress
            .report(ProgressEvent::StageStarted(Stage::RemoveArchive));
        self.filesystem.remove_file(&plan.archive_path)?;
        self.progress.report(ProgressEvent::ArchiveRemoved {
            file: file_label(&plan.archive_path),
        });

        // 6. Metadata dotfiles
        let metadata = if request.options.fetch_metadata {
            self.progress
                .report(ProgressEvent::StageStarted(Stage::FetchMetadata));
            Some(
                MetadataFetcher::new(
                    self.http.as_ref(),
                    self.filesystem.as_ref(),
                    &self.endpoints,
                    self.progress.as_ref(),
                )
                .fetch_all(&plan.template, &plan.version, &plan.project_path),
            )
        } else {
            self.progress
                .report(ProgressEvent::StageSkipped(Stage::FetchMetadata));
            None
        };

        // 7. git + dependencies
        let install = if request.options.install_dependencies {
            self.progress
                .report(ProgressEvent::StageStarted(Stage::InstallDependencies));
            let message = request
                .options
                .initial_commit
                .then_some(request.options.commit_message.as_str());
            Some(
                DependencyInstaller::new(
                    self.filesystem.as_ref(),
                    self.runner.as_ref(),
                    self.progress.as_ref(),
                )
                .install(&plan.project_path, message)?,
            )
        } else {
            self.progress
                .report(ProgressEvent::StageSkipped(Stage::InstallDependencies));
            None
        };

        info!(project = %plan.project_path.display(), "Scaffold completed successfully");
        Ok(ScaffoldReport {
            plan,
            archive_bytes,
            metadata,
            install,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Directory produced by extraction.
    ///
    /// Expected to be named after the archive; when the archive reports a
    /// different single top-level directory, that one is used.
    fn extracted_dir(
        &self,
        plan: &ScaffoldPlan,
        extracted: &ExtractedArchive,
        working_dir: &Path,
    ) -> PathBuf {
        match &extracted.root {
            Some(root) if *root != plan.archive_name => {
                warn!(
                    expected = %plan.archive_name,
                    found = %root,
                    "Archive top-level directory differs from archive name"
                );
                working_dir.join(root)
            }
            _ => plan.extracted_path.clone(),
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{
            CommandOutcome, HttpResponse, MockArchiveExtractor, MockCommandRunner,
            MockFilesystem, MockHttpClient, MockProgressReporter, TransportError,
        },
    };
    use crate::domain::{FALLBACK_BRANCH, PackageManager};
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    fn request(name: &str) -> ScaffoldRequest {
        ScaffoldRequest {
            working_dir: PathBuf::from("/work"),
            application_name: ProjectName::new(name),
            template: TemplateRef::new("owner", "repo"),
            options: ScaffoldOptions::default(),
        }
    }

    /// HTTP client serving one tag, a fake archive, and both dotfiles.
    fn github(tags: Result<&'static str, ()>) -> MockHttpClient {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(move |url| {
            if url.ends_with("/tags") {
                tags.map(|body| HttpResponse::new(200, body))
                    .map_err(|()| TransportError("connection refused".into()))
            } else if url.ends_with(".zip") {
                Ok(HttpResponse::new(200, b"PK\x03\x04".to_vec()))
            } else {
                Ok(HttpResponse::new(200, "node_modules/\n"))
            }
        });
        http
    }

    /// Filesystem mock that logs every mutating call in order.
    fn logging_filesystem(log: &Log, rename_fails: bool) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        let l = Arc::clone(log);
        fs.expect_write_file().returning(move |path, _| {
            l.lock().unwrap().push(format!("write {}", path.display()));
            Ok(())
        });
        let l = Arc::clone(log);
        fs.expect_rename().returning(move |from, to| {
            l.lock()
                .unwrap()
                .push(format!("rename {} -> {}", from.display(), to.display()));
            if rename_fails {
                Err(ApplicationError::FilesystemError {
                    path: to.to_path_buf(),
                    reason: "Directory not empty".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        let l = Arc::clone(log);
        fs.expect_remove_file().returning(move |path| {
            l.lock().unwrap().push(format!("remove {}", path.display()));
            Ok(())
        });
        fs.expect_exists().returning(|_| false);
        fs
    }

    fn extractor_with_root(root: &'static str) -> MockArchiveExtractor {
        let mut extractor = MockArchiveExtractor::new();
        extractor.expect_extract().returning(move |_, _| {
            Ok(ExtractedArchive {
                root: Some(root.to_string()),
            })
        });
        extractor
    }

    fn runner(log: &Log, fail_on: Option<(&'static str, i32)>) -> MockCommandRunner {
        let l = Arc::clone(log);
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(move |spec| {
            let line = spec.to_string();
            l.lock().unwrap().push(format!("run {line}"));
            match fail_on {
                Some((cmd, code)) if cmd == line => Ok(CommandOutcome::exited(code)),
                _ => Ok(CommandOutcome::exited(0)),
            }
        });
        runner
    }

    #[test]
    fn tagged_release_scenario() {
        let log = Log::default();
        let service = ScaffoldService::new(
            Box::new(github(Ok(r#"[{"name":"v2.0.0"}]"#))),
            Box::new(extractor_with_root("repo-2.0.0")),
            Box::new(logging_filesystem(&log, false)),
            Box::new(runner(&log, None)),
        );

        let report = service.scaffold(&request("my-app")).unwrap();

        assert_eq!(report.plan.version, Version::Tag("v2.0.0".into()));
        assert_eq!(report.plan.archive_name, "repo-2.0.0");
        assert_eq!(
            report.plan.archive_url,
            "https://github.com/owner/repo/archive/v2.0.0.zip"
        );
        assert_eq!(report.archive_bytes, 4);
        assert_eq!(
            report.install.as_ref().map(|i| i.package_manager),
            Some(PackageManager::Npm)
        );
        assert_eq!(
            *log.lock().unwrap(),
            [
                "write /work/repo-2.0.0.zip",
                "rename /work/repo-2.0.0 -> /work/my-app",
                "remove /work/repo-2.0.0.zip",
                "write /work/my-app/.gitignore",
                "write /work/my-app/.gitattributes",
                "run git init",
                "run npm install",
                "run git add .",
                "run git commit -m Initial commit from sprout",
            ]
        );
    }

    #[test]
    fn tag_lookup_failure_uses_fallback_branch() {
        let service = ScaffoldService::new(
            Box::new(github(Err(()))),
            Box::new(MockArchiveExtractor::new()),
            Box::new(MockFilesystem::new()),
            Box::new(MockCommandRunner::new()),
        );

        let plan = service.plan(&request("my-app"));

        assert_eq!(plan.version, Version::FallbackBranch);
        assert_eq!(plan.archive_name, FALLBACK_BRANCH);
        assert_eq!(
            plan.archive_url,
            "https://github.com/owner/repo/archive/master.zip"
        );
        assert_eq!(plan.archive_path, PathBuf::from("/work/master.zip"));
        assert!(matches!(plan.fallback, Some(VersionLookupError::Transport(_))));
    }

    #[test]
    fn download_failure_stops_pipeline() {
        let mut http = MockHttpClient::new();
        http.expect_get().returning(|url| {
            if url.ends_with("/tags") {
                Ok(HttpResponse::new(200, r#"[{"name":"v1.0.0"}]"#))
            } else {
                Ok(HttpResponse::new(404, "Not Found"))
            }
        });
        let mut extractor = MockArchiveExtractor::new();
        extractor.expect_extract().never();
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();
        fs.expect_rename().never();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let service =
            ScaffoldService::new(Box::new(http), Box::new(extractor), Box::new(fs), Box::new(runner));
        let err = service.scaffold(&request("my-app")).unwrap_err();

        assert!(matches!(
            err,
            crate::error::SproutError::Application(ApplicationError::ArchiveDownload { .. })
        ));
    }

    #[test]
    fn failed_rename_keeps_archive() {
        let log = Log::default();
        let service = ScaffoldService::new(
            Box::new(github(Ok(r#"[{"name":"v2.0.0"}]"#))),
            Box::new(extractor_with_root("repo-2.0.0")),
            Box::new(logging_filesystem(&log, true)),
            Box::new(runner(&log, None)),
        );

        assert!(service.scaffold(&request("taken")).is_err());
        let log = log.lock().unwrap();
        assert_eq!(log.last().map(String::as_str), Some("rename /work/repo-2.0.0 -> /work/taken"));
        assert!(!log.iter().any(|l| l.starts_with("remove")));
    }

    #[test]
    fn failed_install_exits_with_its_code_and_never_commits() {
        let log = Log::default();
        let service = ScaffoldService::new(
            Box::new(github(Ok(r#"[{"name":"v2.0.0"}]"#))),
            Box::new(extractor_with_root("repo-2.0.0")),
            Box::new(logging_filesystem(&log, false)),
            Box::new(runner(&log, Some(("npm install", 3)))),
        );

        let err = service.scaffold(&request("my-app")).unwrap_err();

        assert_eq!(err.subprocess_code(), Some(3));
        assert!(!log.lock().unwrap().iter().any(|l| l.contains("git commit")));
    }

    #[test]
    fn unexpected_archive_root_is_renamed() {
        let log = Log::default();
        let service = ScaffoldService::new(
            Box::new(github(Err(()))),
            Box::new(extractor_with_root("repo-master")),
            Box::new(logging_filesystem(&log, false)),
            Box::new(runner(&log, None)),
        );

        service.scaffold(&request("my-app")).unwrap();
        assert!(
            log.lock()
                .unwrap()
                .contains(&"rename /work/repo-master -> /work/my-app".to_string())
        );
    }

    #[test]
    fn fallback_name_and_fallback_archive_skip_the_rename() {
        let log = Log::default();
        let mut progress = MockProgressReporter::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        progress
            .expect_report()
            .returning(move |event| sink.lock().unwrap().push(event));

        let service = ScaffoldService::new(
            Box::new(github(Err(()))),
            Box::new(extractor_with_root(FALLBACK_BRANCH)),
            Box::new(logging_filesystem(&log, false)),
            Box::new(runner(&log, None)),
        )
        .with_progress(Box::new(progress));

        let mut req = request(FALLBACK_BRANCH);
        req.application_name = ProjectName::from_arg(None);
        service.scaffold(&req).unwrap();

        let log = log.lock().unwrap();
        assert!(!log.iter().any(|l| l.starts_with("rename")));
        assert!(log.contains(&"remove /work/master.zip".to_string()));
        let events = events.lock().unwrap();
        assert!(events.contains(&ProgressEvent::StageStarted(Stage::RenameDirectory)));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, ProgressEvent::DirectoryRenamed { .. }))
        );
    }

    #[test]
    fn optional_stages_can_be_skipped() {
        let log = Log::default();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let mut progress = MockProgressReporter::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        progress
            .expect_report()
            .returning(move |event| sink.lock().unwrap().push(event));

        let service = ScaffoldService::new(
            Box::new(github(Ok(r#"[{"name":"v2.0.0"}]"#))),
            Box::new(extractor_with_root("repo-2.0.0")),
            Box::new(logging_filesystem(&log, false)),
            Box::new(runner),
        )
        .with_progress(Box::new(progress));

        let mut req = request("my-app");
        req.options.fetch_metadata = false;
        req.options.install_dependencies = false;
        let report = service.scaffold(&req).unwrap();

        assert!(report.metadata.is_none());
        assert!(report.install.is_none());
        let events = events.lock().unwrap();
        assert!(events.contains(&ProgressEvent::StageSkipped(Stage::FetchMetadata)));
        assert!(events.contains(&ProgressEvent::StageSkipped(Stage::InstallDependencies)));
        assert_eq!(events.first(), Some(&ProgressEvent::StageStarted(Stage::ResolveVersion)));
    }
}
