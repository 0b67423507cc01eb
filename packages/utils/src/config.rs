use anyhow::{bail, Result};
use figment::{providers::Format, Figment};
use serde::{de::DeserializeOwned, Serialize};
use std::{marker::PhantomData, path::PathBuf};

/// The builder we use to build Config
#[derive(Debug)]
pub struct ConfigBuilder<CONFIG, ARG> {
    pub cli_env_args: ARG,
    _config: PhantomData<CONFIG>,
}

pub trait CliEnvExt: Serialize + DeserializeOwned + Default + std::fmt::Debug {
    // e.g. "FORECASTING_APP"
    const ENV_VAR_PREFIX: &'static str;

    // The section identifier in the TOML file, e.g. "forecasting-app"
    const TOML_IDENTIFIER: &'static str;

    // whether to print debug messages during config loading
    const PRINT_DEBUG_MSGS: bool = false;

    // an optional argument to specify the home directory
    // if not supplied, config will try a series of fallbacks
    fn home_dir(&self) -> Option<PathBuf>;

    // an optional argument to specify the dotenv file
    // if not supplied, the current working directory's .env is tried
    fn dotenv_path(&self) -> Option<PathBuf>;

    fn merge_cli_env_args(&self) -> Result<Self> {
        let env_prefix = format!("{}_", Self::ENV_VAR_PREFIX);

        let _self = Figment::new()
            .merge(figment::providers::Env::prefixed(&env_prefix))
            .merge(figment::providers::Serialized::defaults(self))
            .extract()?;

        Ok(_self)
    }

    fn env_var(name: &str) -> Option<String> {
        std::env::var(format!("{}_{name}", Self::ENV_VAR_PREFIX)).ok()
    }
}

pub trait ConfigExt: Serialize + DeserializeOwned + Default + std::fmt::Debug {
    // e.g. "forecasting-app.toml"
    const FILENAME: &'static str;

    // the directory name used in the fallback search, e.g. ~/.config/{DIRNAME}
    const DIRNAME: &'static str;

    fn log_levels(&self) -> impl Iterator<Item = &str>;

    fn tracing_env_filter(&self) -> Result<tracing_subscriber::EnvFilter> {
        let mut filter = tracing_subscriber::EnvFilter::from_default_env();
        for directive in self.log_levels() {
            match directive.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(err) => bail!("{}: {}", err, directive),
            }
        }

        Ok(filter)
    }
}

impl<CONFIG: ConfigExt, ARG: CliEnvExt> ConfigBuilder<CONFIG, ARG> {
    pub fn new(cli_env_args: ARG) -> Self {
        Self {
            cli_env_args,
            _config: PhantomData,
        }
    }

    pub fn build(self) -> Result<CONFIG> {
        // dotenv goes first, since it may affect env vars for filepaths
        self.load_dotenv()?;

        // first merge the cli and env vars
        let cli_env_args = self.cli_env_args.merge_cli_env_args()?;

        // the file-based config is optional, defaults + env + cli are enough to run
        let filepath =
            ConfigFilePath::new(CONFIG::FILENAME, CONFIG::DIRNAME, cli_env_args.home_dir())
                .into_path();

        let mut figment =
            Figment::new().merge(figment::providers::Serialized::defaults(CONFIG::default()));

        match &filepath {
            Some(filepath) => {
                if ARG::PRINT_DEBUG_MSGS {
                    eprintln!("Loading config from {}", filepath.display());
                }

                figment = figment
                    // the [default] section of the TOML file
                    .merge(Figment::from(
                        figment::providers::Toml::file(filepath).nested(),
                    ))
                    // then the app-specific section, overriding [default] where needed
                    .merge(
                        Figment::from(figment::providers::Toml::file(filepath).nested())
                            .select(ARG::TOML_IDENTIFIER),
                    );
            }
            None => {
                tracing::debug!(
                    "No {} found, using defaults, env and cli args only",
                    CONFIG::FILENAME
                );
            }
        }

        // cli/env args win over every profile
        let config: CONFIG = figment
            .merge(figment::providers::Serialized::globals(cli_env_args))
            .extract()?;

        Ok(config)
    }

    fn load_dotenv(&self) -> Result<()> {
        let mut dotenv_paths = Vec::new();

        if let Some(dotenv_path) = self.cli_env_args.dotenv_path() {
            dotenv_paths.push(dotenv_path);
        }

        if let Some(dotenv_path) = ARG::env_var("DOTENV") {
            dotenv_paths.push(PathBuf::from(dotenv_path));
        }

        dotenv_paths.push(std::env::current_dir()?.join(".env"));

        for dotenv_path in dotenv_paths {
            if ARG::PRINT_DEBUG_MSGS {
                eprintln!("Loading env vars from {}", dotenv_path.display());
            }
            if dotenv_path.exists() {
                if let Err(e) = dotenvy::from_path(dotenv_path) {
                    bail!("Error loading dotenv file: {}", e);
                }
            }
        }

        Ok(())
    }
}

// a helper to try a series of fallback paths, looking for a config file
#[derive(Clone, Debug)]
pub struct ConfigFilePath {
    // the filename to look for in each directory, e.g. "forecasting-app.toml"
    pub filename: String,
    // the directory name for the user/system fallbacks, e.g. "forecasting-app"
    pub dirname: String,
    // the optional directory set via direct args or env
    pub arg_env_dir: Option<PathBuf>,
}

impl ConfigFilePath {
    pub fn new(
        filename: impl ToString,
        dirname: impl ToString,
        arg_env_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            filename: filename.to_string(),
            dirname: dirname.to_string(),
            arg_env_dir,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        self.into_possible().into_iter().find(|path| path.exists())
    }

    // tries a series of fallbacks
    pub fn into_possible(self) -> Vec<PathBuf> {
        let Self {
            filename,
            dirname,
            arg_env_dir,
        } = self;

        // the paths returned will be tried in order of pushing
        let mut dirs = Vec::new();

        // explicit, e.g. passing --home ~/foo to a binary, or env var {ENV_PREFIX}_HOME="~/foo"
        // i.e. the path in this case will be ~/foo/{filename}
        if let Some(dir) = arg_env_dir {
            dirs.push(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).to_string(),
            ));
        }

        // next, check the current working directory, wherever the command is run from
        if let Ok(dir) = std::env::current_dir() {
            dirs.push(dir);
        }

        // the user's home directory directly, in a hidden directory
        // e.g. ~/.forecasting-app/forecasting-app.toml
        if let Some(dir) = dirs::home_dir().map(|dir| dir.join(format!(".{dirname}"))) {
            dirs.push(dir);
        }

        // the system config directory, which varies per platform:
        // Linux: ~/.config/{dirname}
        // macOS: ~/Library/Application Support/{dirname}
        // Windows: C:\Users\MyUserName\AppData\Roaming\{dirname}
        if let Some(dir) = dirs::config_dir().map(|dir| dir.join(&dirname)) {
            dirs.push(dir);
        }

        // may duplicate config_dir on linux, but not on macOS, windows or wsl
        if let Some(dir) = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .map(|dir| dir.join(&dirname))
        {
            dirs.push(dir);
        }

        if let Some(dir) = dirs::home_dir().map(|dir| dir.join(".config").join(&dirname)) {
            dirs.push(dir);
        }

        // Lastly, try /etc/{dirname}
        dirs.push(PathBuf::from("/etc").join(&dirname));

        let mut all_files: Vec<PathBuf> = dirs.into_iter().map(|dir| dir.join(&filename)).collect();

        all_files.dedup();

        all_files
    }
}
