//! `fern`-backed logging setup (C11), configured once by the binary
//! entrypoint. Library code never touches this — it only emits
//! `log::{trace,debug,info,warn,error}!` calls, as C11 requires.

use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Initialises the global logger at a verbosity derived from a `-v` count
/// (0 = warn, 1 = info, 2 = debug, 3+ = trace).
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);
    let result = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();
    if let Err(e) = result {
        eprintln!("warning: logger already initialised: {e}");
    }
}
