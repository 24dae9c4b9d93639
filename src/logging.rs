use tracing::Level;

/// Installs the global subscriber. Calling it twice is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: Level) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Routes tracing output to the browser console.
#[cfg(all(target_arch = "wasm32", feature = "dioxus"))]
pub fn init(level: Level) {
    if dioxus::logger::init(level).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(all(target_arch = "wasm32", not(feature = "dioxus")))]
pub fn init(_level: Level) {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init(Level::DEBUG);
        init(Level::INFO);
        tracing::info!("logging ready");
    }
}
