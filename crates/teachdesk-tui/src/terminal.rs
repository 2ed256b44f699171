//! Terminal setup and restoration

/// Install a panic hook that restores the terminal before the report prints
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        tracing::error!("TeachDesk panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
