//! Laravel installer - creates new Laravel applications

use anyhow::Result;
use clap::{Parser, Subcommand};
use installer_core::{
    CliclackReporter, ConsoleReporter, InstallRequest, Installer, ProductConfig, Reporter,
    VersionFlags,
};

/// Laravel product configuration
#[derive(Clone)]
pub struct LaravelConfig;

impl ProductConfig for LaravelConfig {
    fn name(&self) -> &'static str {
        "laravel"
    }

    fn display_name(&self) -> &'static str {
        "Laravel"
    }

    fn default_archive_url(&self) -> &'static str {
        "http://cabinet.laravel.com/"
    }

    fn archive_url_env(&self) -> &'static str {
        "LARAVEL_ARCHIVE_URL"
    }

    fn develop_archive(&self) -> &'static str {
        "latest-develop.zip"
    }

    fn stable_archive(&self) -> &'static str {
        "latest.zip"
    }

    fn skeleton_package(&self) -> &'static str {
        "laravel/laravel"
    }

    fn package_manager(&self) -> &'static str {
        "composer"
    }

    fn vendored_package_manager(&self) -> &'static str {
        "composer.phar"
    }

    fn runtime_binary(&self) -> &'static str {
        "php"
    }

    fn runtime_binary_env(&self) -> &'static str {
        "PHP_BINARY"
    }

    fn lifecycle_scripts(&self) -> &'static [&'static str] {
        &[
            "post-root-package-install",
            "post-install-cmd",
            "post-create-project-cmd",
        ]
    }

    fn addon_packages(&self) -> &'static [&'static str] {
        &["barryvdh/laravel-ide-helper", "barryvdh/laravel-debugbar"]
    }

    fn addon_header(&self) -> &'static str {
        "Installing phpstorm specific repositories..."
    }

    fn addon_guidance(&self) -> String {
        "For the IDE helper and debugbar, add the following to the register() method of \
         app/Providers/AppServiceProvider.php:\n\
         \n    if ($this->app->environment() !== 'production') {\n\
         \x20       $this->app->register(\\Barryvdh\\LaravelIdeHelper\\IdeHelperServiceProvider::class);\n\
         \x20       $this->app->register(\\Barryvdh\\Debugbar\\ServiceProvider::class);\n\
         \x20   }\n\
         \nthen run:\n\
         \n    php artisan clear-compiled && php artisan ide-helper:generate && php artisan optimize"
            .to_string()
    }

    fn completion_message(&self) -> &'static str {
        "Application ready! Build something amazing."
    }

    fn user_agent(&self) -> &'static str {
        concat!("laravel-installer/", env!("CARGO_PKG_VERSION"))
    }
}

#[derive(Parser, Debug)]
#[command(name = "laravel")]
#[command(about = "Laravel application installer")]
#[command(version)]
pub struct Args {
    /// Disable ANSI output
    #[arg(long = "no-ansi", global = true)]
    pub no_ansi: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Laravel application
    New(NewArgs),
}

#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Directory to create the application in (defaults to the current directory)
    pub name: Option<String>,

    /// Installs the latest "development" release
    #[arg(long)]
    pub dev: bool,

    /// Installs the "5.1" release
    #[arg(long = "5.1")]
    pub v5_1: bool,

    /// Installs the "5.2" release
    #[arg(long = "5.2")]
    pub v5_2: bool,

    /// Installs the "5.3" release
    #[arg(long = "5.3")]
    pub v5_3: bool,

    /// Includes barryvdh/laravel-ide-helper and barryvdh/laravel-debugbar
    #[arg(long)]
    pub phpstorm: bool,
}

impl NewArgs {
    fn into_request(self, no_ansi: bool) -> InstallRequest {
        let flags = VersionFlags {
            dev: self.dev,
            v5_1: self.v5_1,
            v5_2: self.v5_2,
            v5_3: self.v5_3,
        };
        InstallRequest::new(self.name, flags)
            .with_no_ansi(no_ansi)
            .with_extra_tooling(self.phpstorm)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = LaravelConfig;

    match args.command {
        Command::New(new_args) => {
            let request = new_args.into_request(args.no_ansi);
            let reporter: Box<dyn Reporter> = if args.no_ansi {
                Box::new(ConsoleReporter::new(false))
            } else {
                Box::new(CliclackReporter::new())
            };
            reporter.intro(&format!("{} Installer", config.display_name()));

            let working_dir = std::env::current_dir()?;
            let result = Installer::new(config, reporter.as_ref(), working_dir)
                .run(&request)
                .await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            if let Err(e) = result {
                reporter.error(&format!("Failed while {}: {}", e.phase(), e));
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use installer_core::{AcquisitionStrategy, Version};

    #[test]
    fn test_parses_version_flags() {
        let args = Args::try_parse_from(["laravel", "new", "blog", "--5.2"]).unwrap();
        let Command::New(new_args) = args.command;
        let request = new_args.into_request(args.no_ansi);

        assert_eq!(request.name(), Some("blog"));
        let version = installer_core::version::resolve(&request.version_flags);
        assert_eq!(version, Version::V5_2);
        assert_eq!(
            version.strategy(),
            AcquisitionStrategy::DelegatedPackageManager
        );
    }

    #[test]
    fn test_multiple_version_flags_are_accepted() {
        let args = Args::try_parse_from(["laravel", "new", "blog", "--5.3", "--dev"]).unwrap();
        let Command::New(new_args) = args.command;
        let request = new_args.into_request(false);

        assert_eq!(
            installer_core::version::resolve(&request.version_flags),
            Version::Develop
        );
    }

    #[test]
    fn test_name_is_optional_and_flags_propagate() {
        let args =
            Args::try_parse_from(["laravel", "new", "--phpstorm", "--no-ansi"]).unwrap();
        let no_ansi = args.no_ansi;
        let Command::New(new_args) = args.command;
        let request = new_args.into_request(no_ansi);

        assert_eq!(request.name(), None);
        assert!(request.no_ansi);
        assert!(request.extra_tooling);
    }

    #[test]
    fn test_laravel_archive_names() {
        let config = LaravelConfig;
        assert_eq!(config.develop_archive(), "latest-develop.zip");
        assert_eq!(config.stable_archive(), "latest.zip");
        assert_eq!(config.lifecycle_scripts().len(), 3);
        assert_eq!(
            config.addon_header(),
            "Installing phpstorm specific repositories..."
        );
    }
}
