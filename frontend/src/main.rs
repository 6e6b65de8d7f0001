use leptos::prelude::*;
use lomalinda_frontend::App;
use lomalinda_frontend::config::AppConfig;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!("ERP LomaLinda console, backend at {}", config.api_base_url);

    mount_to_body(App);
}
