use tracing::info;

/// Defaults shipped with packaged builds; a local .env wins over these.
const BUNDLED_DEFAULTS: &str = include_str!("../assets/config.env");

fn load_config() {
    #[cfg(not(target_arch = "wasm32"))]
    if dotenvy::dotenv().is_ok() {
        return;
    }

    for line in BUNDLED_DEFAULTS.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        // A real environment variable always wins over a bundled default
        if std::env::var(key).is_err() {
            // SAFETY: set at startup, before any threads exist
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

fn main() {
    load_config();
    tracing_subscriber::fmt().init();
    info!("starting parakeet (profile: {})", parakeet::ui::profile_from_env());
    dioxus::launch(parakeet::ui::App);
}
