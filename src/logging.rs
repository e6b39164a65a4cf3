//! Logging Setup
//!
//! `tracing` everywhere; in the browser events go to the devtools console
//! through tracing-wasm.

use crate::config::AppConfig;

pub fn init(config: &AppConfig) {
    console_error_panic_hook::set_once();
    let layer = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(config.max_level())
        .build();
    tracing_wasm::set_as_global_default_with_config(layer);
    tracing::info!(level = %config.max_level(), "logging ready");
}
