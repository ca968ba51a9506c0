//! Console logging for wasm hosts.
//!
//! Library code only emits `tracing` events; the embedding application
//! decides whether to call [`init_logging`].

use tracing::Level;

/// Level used by hosts that don't pick one: debug builds log everything
/// down to `DEBUG`.
pub fn default_level() -> Level {
    if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the console panic hook and a `tracing-wasm` subscriber.
///
/// Only the first call has any effect. A subscriber installed by the host
/// beforehand is left in place.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn init_logging(max_level: Level) {
    use std::sync::Once;

    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();

        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(max_level)
                .build(),
        );
        let reg = Registry::default().with(wasm_layer);
        let _ = set_global_default(reg);
    });
}

/// No console to log to outside the browser.
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn init_logging(_max_level: Level) {}
