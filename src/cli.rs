use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::SyncConfig;

#[derive(Parser, Debug)]
#[command(name = "mapsync")]
#[command(version)]
#[command(about = "Extract mapshots and mapinfo from Xonotic packages", long_about = None)]
#[command(after_help = "Examples:\n  \
  mapsync sync -o assets/images/mapshots -p packages     refresh mapshots from custom packages\n  \
  mapsync sync -o out -i /opt/xonotic                     include the installed map set\n  \
  mapsync mapinfo afterslime -d packages                  show metadata of one map")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Only report warnings and errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also report every skipped and written file
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Directory receiving the mapshots
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: PathBuf,

    /// Root of a Xonotic installation
    #[arg(short = 'i', long, value_name = "DIR")]
    pub install: Option<PathBuf>,

    /// Directory of custom .pk3 packages
    #[arg(short = 'p', long, value_name = "DIR")]
    pub packages: Option<PathBuf>,
}

impl From<&SyncArgs> for SyncConfig {
    fn from(args: &SyncArgs) -> Self {
        SyncConfig {
            output_dir: args.output.clone(),
            install_root: args.install.clone(),
            package_dir: args.packages.clone(),
            extract_mapshots: true,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synchronize the mapshot directory with installation and packages
    Sync(SyncArgs),

    /// List the packages in a directory
    Packages {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// List the entries of a package
    List {
        #[arg(value_name = "PK3")]
        package: PathBuf,
    },

    /// Show the metadata of a map
    Mapinfo {
        #[arg(value_name = "MAP")]
        map: String,

        /// Package holding the map (default: <MAP>.pk3)
        #[arg(long, value_name = "NAME")]
        pk3: Option<String>,

        /// Directory of custom .pk3 packages
        #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_flags_become_config() {
        let cli = Cli::parse_from(["mapsync", "sync", "-o", "out", "-p", "pk3s", "-v"]);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);

        let Command::Sync(args) = &cli.command else {
            panic!("expected sync, got {:?}", cli.command);
        };
        let config = SyncConfig::from(args);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.package_dir, Some(PathBuf::from("pk3s")));
        assert_eq!(config.install_root, None);
        assert!(config.extract_mapshots);
    }

    #[test]
    fn mapinfo_defaults_to_current_directory() {
        let cli = Cli::parse_from(["mapsync", "-q", "mapinfo", "dance"]);
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
        match cli.command {
            Command::Mapinfo { map, pk3, dir } => {
                assert_eq!(map, "dance");
                assert_eq!(pk3, None);
                assert_eq!(dir, PathBuf::from("."));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["mapsync", "-q", "-v", "packages", "."]).is_err());
    }
}
