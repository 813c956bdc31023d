mod commands;
mod components;
mod config;
mod error;
mod layout;
mod loader;
mod model;
mod palette;
mod scale;
mod state;
mod util;

use components::app::App;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
    yew::Renderer::<App>::new().render();
}
