//! Archive download from the product's archive host

use super::temp::TemporaryArchive;
use crate::error::{InstallError, Result};
use crate::product::ProductConfig;
use crate::version::Version;
use std::path::Path;
use url::Url;

/// Downloads channel archives to temporary files
pub struct ArchiveFetcher {
    base_url: Url,
    client: reqwest::Client,
    file_prefix: &'static str,
    develop_archive: &'static str,
    stable_archive: &'static str,
}

impl ArchiveFetcher {
    /// Create a fetcher from a product config, honouring the archive URL override
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.archive_url_env())
            .unwrap_or_else(|_| config.default_archive_url().to_string());
        let base_url = Url::parse(&url_str).map_err(|e| {
            InstallError::Acquisition(format!("Invalid archive URL {}: {}", url_str, e))
        })?;

        Ok(Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(config.user_agent())
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            file_prefix: config.name(),
            develop_archive: config.develop_archive(),
            stable_archive: config.stable_archive(),
        })
    }

    /// Remote archive name for a version: development snapshot or stable snapshot
    pub fn archive_name(&self, version: Version) -> &'static str {
        match version {
            Version::Develop => self.develop_archive,
            _ => self.stable_archive,
        }
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                InstallError::Acquisition(format!("URL cannot have path segments: {}", base))
            })?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    /// Download the archive for `version` into a fresh temporary file under `dir`
    ///
    /// On failure the returned error has already released the temporary file.
    pub async fn fetch(&self, version: Version, dir: &Path) -> Result<TemporaryArchive> {
        let url = Self::build_url(&self.base_url, self.archive_name(version))?;
        let archive = TemporaryArchive::new_in(dir, self.file_prefix);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            InstallError::Acquisition(format!("Failed to download {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(InstallError::Acquisition(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            InstallError::Acquisition(format!("Failed to read response from {}: {}", url, e))
        })?;

        tokio::fs::write(archive.path(), &body).await.map_err(|e| {
            InstallError::Acquisition(format!(
                "Failed to write {}: {}",
                archive.path().display(),
                e
            ))
        })?;

        Ok(archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::TestConfig;
    use tempfile::TempDir;

    fn fetcher(base: &str) -> ArchiveFetcher {
        ArchiveFetcher {
            base_url: Url::parse(base).unwrap(),
            client: reqwest::Client::new(),
            file_prefix: "skeleton",
            develop_archive: "latest-develop.zip",
            stable_archive: "latest.zip",
        }
    }

    #[test]
    fn test_archive_name_per_channel() {
        let f = fetcher("http://archives.test/");
        assert_eq!(f.archive_name(Version::Develop), "latest-develop.zip");
        assert_eq!(f.archive_name(Version::Master), "latest.zip");
    }

    #[test]
    fn test_build_url_with_trailing_slash() {
        let base = Url::parse("http://archives.test/").unwrap();
        let url = ArchiveFetcher::build_url(&base, "latest.zip").unwrap();
        assert_eq!(url.as_str(), "http://archives.test/latest.zip");
    }

    #[test]
    fn test_build_url_preserves_path_and_query() {
        let base = Url::parse("http://archives.test/mirror/?token=abc").unwrap();
        let url = ArchiveFetcher::build_url(&base, "latest-develop.zip").unwrap();
        assert_eq!(
            url.as_str(),
            "http://archives.test/mirror/latest-develop.zip?token=abc"
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_override() {
        let config = TestConfig {
            archive_url_env: "INSTALLER_CORE_TEST_BAD_ARCHIVE_URL",
            ..Default::default()
        };
        std::env::set_var(config.archive_url_env, "not a url");
        let result = ArchiveFetcher::from_config(&config);
        std::env::remove_var(config.archive_url_env);

        assert!(matches!(result, Err(InstallError::Acquisition(_))));
    }

    #[tokio::test]
    async fn test_network_failure_leaves_no_temporary_file() {
        let work = TempDir::new().unwrap();
        // Port 9 (discard) is not expected to accept HTTP connections
        let f = fetcher("http://127.0.0.1:9/");

        let result = f.fetch(Version::Master, work.path()).await;

        assert!(matches!(result, Err(InstallError::Acquisition(_))));
        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }
}
