/// Desktop entry point: three-pane window over cpal audio input and midir ports.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Ensure all panics are logged properly before crashing.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let (filename, line) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line()))
            .unwrap_or(("<unknown>", 0));
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("<no message>");
        log::error!("CRASH in {}:{}: {}", filename, line, message);
        default_hook(panic_info);
    }));

    if let Err(e) = panescope::app::run(panescope::config::AppConfig::default()) {
        log::error!("Window failed: {e}");
        std::process::exit(1);
    }
}
