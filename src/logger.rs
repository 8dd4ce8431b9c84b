/// Requires calling `Logger::init` (or `quickclip_logger_init`) before using it.
pub struct Logger;

impl Logger {
    /// Initializes the logger; `RUST_LOG` overrides the default `info` level.
    pub fn init() {
        let mut builder = pretty_env_logger::formatted_builder();
        builder.filter_level(log::LevelFilter::Info);
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        if let Err(err) = builder.try_init() {
            eprintln!("logger is already initialized: {err}");
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn quickclip_logger_init() {
    Logger::init();
}
