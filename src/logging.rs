//! Logger setup: browser console on wasm32, `env_logger` everywhere else

use log::LevelFilter;

/// Install the platform logger at `level`. Safe to call more than once;
/// later calls only adjust the level.
pub fn init(level: LevelFilter) {
    install(level);
    log::set_max_level(level);
}

#[cfg(target_arch = "wasm32")]
fn install(level: LevelFilter) {
    if let Some(level) = level.to_level() {
        // Already installed on a repeat init
        let _ = console_log::init_with_level(level);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: LevelFilter) {
    // Using try_init() so a host test harness or repeat init is not fatal
    let _ = env_logger::builder()
        .filter_level(level)
        .is_test(cfg!(test))
        .try_init();
}
