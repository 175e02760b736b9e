pub mod app;
pub mod dataset;
pub mod game;
pub mod model;
pub mod selector;
pub mod shuffle;
pub mod toast;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
