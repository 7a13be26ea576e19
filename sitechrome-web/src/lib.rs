#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod chrome;
pub mod dom;
pub mod drawer;
pub mod footer;
pub mod nav;
pub mod scroll;
pub mod storage;
pub mod theme;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    if let Err(e) = console_log::init_with_level(level) {
        dom::console_error(&format!("Failed to install logger: {e}"));
    }
    chrome::boot();
}
