// WASM entrypoint for Trunk.
//
// Native builds of this crate are no-ops; the real page is behind
// `--features web` and `wasm32`.

fn main() {
    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    anomaly_web::placeholder();
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    anomaly_web::start();
}
