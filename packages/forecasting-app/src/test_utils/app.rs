use std::{path::PathBuf, sync::Arc};

use utils::config::ConfigBuilder;

use crate::{args::CliArgs, config::Config};

#[derive(Clone)]
pub struct TestApp {
    pub config: Arc<Config>,
    // need to hold onto the tempdir handle so that it doesn't get dropped
    _temp_home_dir_handle: Arc<tempfile::TempDir>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let temp_home_dir_handle = Arc::new(tempfile::tempdir().unwrap());

        Self::new_with_args(
            Self::zeroed_cli_args(&temp_home_dir_handle),
            temp_home_dir_handle,
        )
    }

    pub fn new_with_args(cli_args: CliArgs, temp_home_dir_handle: Arc<tempfile::TempDir>) -> Self {
        let config: Config = ConfigBuilder::new(cli_args).build().unwrap();

        utils::init_tracing_tests();

        Self {
            config: Arc::new(config),
            _temp_home_dir_handle: temp_home_dir_handle,
        }
    }

    /// Points home at an empty directory, so no real config file is picked up
    pub fn zeroed_cli_args(temp_home_dir: &tempfile::TempDir) -> CliArgs {
        CliArgs {
            home: Some(temp_home_dir.path().to_path_buf()),
            // while this technically isn't "zeroed", this purposefully points at a non-existing file
            // so that we don't load a real .env in tests
            dotenv: Some(
                PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                    .join("tests")
                    .join("non-existant-file"),
            ),
            port: None,
            log_level: Vec::new(),
            host: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}
