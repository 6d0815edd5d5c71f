//! The installation pipeline
//!
//! Validates the target, resolves the version, acquires the skeleton through the
//! selected strategy, runs the post-install commands and, on request, add-on tooling.
//! Every step runs strictly after the previous one.

use crate::archive::{extract, ArchiveFetcher};
use crate::error::{InstallError, Result};
use crate::product::ProductConfig;
use crate::report::Reporter;
use crate::request::InstallRequest;
use crate::runtime::{
    check_archive_support, CommandSequence, PackageManager, ProvisioningRunner, Terminal,
};
use crate::version::{self, AcquisitionStrategy, Version};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the optional add-on phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddonStatus {
    NotRequested,
    Installed,
    /// Installation failed; the run still counts as successful
    Failed(String),
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct Outcome {
    pub version: Version,
    pub strategy: AcquisitionStrategy,
    pub target_dir: PathBuf,
    pub addons: AddonStatus,
}

pub struct Installer<'a, C: ProductConfig, R: Reporter + ?Sized> {
    config: C,
    reporter: &'a R,
    working_dir: PathBuf,
    package_manager: Option<PackageManager>,
    attach_terminal: bool,
}

impl<'a, C: ProductConfig, R: Reporter + ?Sized> Installer<'a, C, R> {
    /// Create an installer operating relative to `working_dir`
    pub fn new(config: C, reporter: &'a R, working_dir: PathBuf) -> Self {
        Self {
            config,
            reporter,
            working_dir,
            package_manager: None,
            attach_terminal: true,
        }
    }

    /// Use a fixed package manager invocation instead of locating one
    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = Some(package_manager);
        self
    }

    /// Whether subprocesses may take over the controlling terminal
    pub fn with_terminal(mut self, attach: bool) -> Self {
        self.attach_terminal = attach;
        self
    }

    /// Run the whole pipeline for one request
    pub async fn run(&self, request: &InstallRequest) -> Result<Outcome> {
        check_archive_support()?;

        let target_dir = request.target_dir(&self.working_dir);
        self.verify_target_is_free(&target_dir)?;

        self.reporter.info("Crafting application...");

        let version = version::resolve(&request.version_flags);
        let strategy = version::select(version);

        let package_manager = self
            .package_manager
            .clone()
            .unwrap_or_else(|| PackageManager::locate(&self.config, &self.working_dir));
        let terminal = if self.attach_terminal {
            Terminal::detect()
        } else {
            Terminal::Piped
        };
        let runner = ProvisioningRunner::new(self.reporter);

        match strategy {
            AcquisitionStrategy::BundledArchive => {
                self.acquire_archive(version, &target_dir).await?;
                let commands = self.post_install_commands(&package_manager, request.no_ansi);
                runner
                    .run(&commands, Some(&target_dir), &terminal)
                    .await?;
            }
            AcquisitionStrategy::DelegatedPackageManager => {
                let commands =
                    self.create_project_commands(&package_manager, version, request.name());
                runner
                    .run(&commands, Some(&self.working_dir), &terminal)
                    .await?;
            }
        }

        let addons = if request.extra_tooling {
            self.install_addons(&runner, &package_manager, &target_dir, &terminal)
                .await
        } else {
            AddonStatus::NotRequested
        };

        self.reporter.outro(self.config.completion_message());

        Ok(Outcome {
            version,
            strategy,
            target_dir,
            addons,
        })
    }

    /// The target must be absent or an empty directory, unless it is the working directory
    fn verify_target_is_free(&self, target_dir: &Path) -> Result<()> {
        if self.is_working_dir(target_dir) {
            return Ok(());
        }

        let occupied = match fs::symlink_metadata(target_dir) {
            Err(_) => false,
            Ok(metadata) if metadata.is_dir() => fs::read_dir(target_dir)
                .map(|mut entries| entries.next().is_some())
                .unwrap_or(true),
            Ok(_) => true,
        };

        if occupied {
            return Err(InstallError::AlreadyExists(target_dir.to_path_buf()));
        }
        Ok(())
    }

    fn is_working_dir(&self, path: &Path) -> bool {
        if path == self.working_dir {
            return true;
        }
        match (path.canonicalize(), self.working_dir.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Download, extract and release the temporary archive
    async fn acquire_archive(&self, version: Version, target_dir: &Path) -> Result<()> {
        let fetcher = ArchiveFetcher::from_config(&self.config)?;
        let archive = fetcher.fetch(version, &self.working_dir).await?;

        let archive_path = archive.path().to_path_buf();
        let destination = target_dir.to_path_buf();
        let extracted = tokio::task::spawn_blocking(move || extract(&archive_path, &destination))
            .await
            .map_err(|e| InstallError::Acquisition(format!("Extraction task failed: {}", e)));
        archive.cleanup();

        let written = extracted??;
        self.reporter.success(&format!(
            "Extracted {} files into {}",
            written,
            target_dir.display()
        ));
        Ok(())
    }

    /// Dependency install followed by the lifecycle hooks, in order
    fn post_install_commands(&self, pm: &PackageManager, no_ansi: bool) -> CommandSequence {
        let mut commands = CommandSequence::new();
        commands.push(pm.command("install --no-scripts"));
        for script in self.config.lifecycle_scripts() {
            commands.push(pm.command(&format!("run-script {}", script)));
        }

        if no_ansi {
            commands.with_suffix("--no-ansi")
        } else {
            commands
        }
    }

    fn create_project_commands(
        &self,
        pm: &PackageManager,
        version: Version,
        name: Option<&str>,
    ) -> CommandSequence {
        let directory = shell_words::quote(name.unwrap_or("."));
        let mut commands = CommandSequence::new();
        commands.push(pm.command(&format!(
            "create-project {} {} \"{}.*\"",
            self.config.skeleton_package(),
            directory,
            version
        )));
        commands
    }

    async fn install_addons(
        &self,
        runner: &ProvisioningRunner<'_, R>,
        pm: &PackageManager,
        target_dir: &Path,
        terminal: &Terminal,
    ) -> AddonStatus {
        let commands: CommandSequence = self
            .config
            .addon_packages()
            .iter()
            .map(|package| pm.command(&format!("require --dev {}", package)))
            .collect();

        self.reporter.info(self.config.addon_header());

        let status = match runner.run(&commands, Some(target_dir), terminal).await {
            Ok(()) => AddonStatus::Installed,
            Err(e) => {
                self.reporter
                    .warning(&format!("Development tooling was not installed: {}", e));
                AddonStatus::Failed(e.to_string())
            }
        };

        self.reporter.remark(&self.config.addon_guidance());
        status
    }
}
