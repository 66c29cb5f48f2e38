#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    // The renderer may install its own subscriber; keep whichever came first.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

fn main() {
    init_logging();
    dioxus::launch(roomcraft::ui::App);
}
