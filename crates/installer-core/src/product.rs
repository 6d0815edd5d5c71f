//! Product configuration trait for installer binaries
//!
//! This trait defines the interface that each product must implement
//! to configure where its skeleton comes from and how it is provisioned.

/// Configuration trait for different skeleton products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Archive source URLs
/// - Package manager invocation
/// - Post-install lifecycle hooks
/// - Optional add-on tooling and its guidance
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for temporary file names, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default base URL serving the bundled archives
    fn default_archive_url(&self) -> &'static str;

    /// Environment variable name for overriding the archive base URL
    fn archive_url_env(&self) -> &'static str;

    /// Archive file name of the latest development snapshot
    fn develop_archive(&self) -> &'static str;

    /// Archive file name of the latest stable snapshot
    fn stable_archive(&self) -> &'static str;

    /// Package handed to the package manager's `create-project`
    fn skeleton_package(&self) -> &'static str;

    /// Package manager command name resolved from PATH
    fn package_manager(&self) -> &'static str;

    /// File name of a vendored package manager in the working directory
    fn vendored_package_manager(&self) -> &'static str;

    /// Runtime binary used to execute the vendored package manager
    fn runtime_binary(&self) -> &'static str;

    /// Environment variable name for overriding the runtime binary
    fn runtime_binary_env(&self) -> &'static str;

    /// Lifecycle-hook scripts run after dependencies are installed, in order
    fn lifecycle_scripts(&self) -> &'static [&'static str];

    /// Developer tooling packages installed on request
    fn addon_packages(&self) -> &'static [&'static str];

    /// Header announcing the add-on tooling phase
    fn addon_header(&self) -> &'static str;

    /// Guidance printed after add-on tooling has been installed
    fn addon_guidance(&self) -> String;

    /// Final message once the application is ready
    fn completion_message(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ProductConfig;

    /// Product config pointing at local stand-ins, used across module tests
    #[derive(Clone)]
    pub struct TestConfig {
        pub package_manager: &'static str,
        pub archive_url_env: &'static str,
        pub runtime_binary_env: &'static str,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                package_manager: "echo",
                archive_url_env: "INSTALLER_CORE_TEST_ARCHIVE_URL",
                runtime_binary_env: "INSTALLER_CORE_TEST_RUNTIME",
            }
        }
    }

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "skeleton"
        }

        fn display_name(&self) -> &'static str {
            "Skeleton"
        }

        fn default_archive_url(&self) -> &'static str {
            "http://127.0.0.1:9/"
        }

        fn archive_url_env(&self) -> &'static str {
            self.archive_url_env
        }

        fn develop_archive(&self) -> &'static str {
            "latest-develop.zip"
        }

        fn stable_archive(&self) -> &'static str {
            "latest.zip"
        }

        fn skeleton_package(&self) -> &'static str {
            "acme/skeleton"
        }

        fn package_manager(&self) -> &'static str {
            self.package_manager
        }

        fn vendored_package_manager(&self) -> &'static str {
            "composer.phar"
        }

        fn runtime_binary(&self) -> &'static str {
            "php"
        }

        fn runtime_binary_env(&self) -> &'static str {
            self.runtime_binary_env
        }

        fn lifecycle_scripts(&self) -> &'static [&'static str] {
            &["post-root-package-install", "post-install-cmd", "post-create-project-cmd"]
        }

        fn addon_packages(&self) -> &'static [&'static str] {
            &["acme/ide-helper", "acme/debugbar"]
        }

        fn addon_header(&self) -> &'static str {
            "Installing helper packages..."
        }

        fn addon_guidance(&self) -> String {
            "Register the helper providers.".to_string()
        }

        fn completion_message(&self) -> &'static str {
            "Application ready!"
        }
    }
}
