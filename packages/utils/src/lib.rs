#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod context;
pub mod env;
pub mod serde;

// the test version of init_tracing does not take a config
// since config itself is tested and modified from different parallel tests
// therefore, this only uses the default tracing settings
pub fn init_tracing_tests() {
    use std::sync::LazyLock;

    // tests run in parallel threads, so guard the global subscriber with a Mutex
    static INIT: LazyLock<std::sync::Mutex<bool>> = LazyLock::new(|| std::sync::Mutex::new(false));

    let mut init = match INIT.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if !*init {
        *init = true;

        // another harness may have installed a subscriber already, that's fine
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        tracing::debug!("Tracing initialized for tests");
    }
}
