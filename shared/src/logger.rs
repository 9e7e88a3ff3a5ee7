use std::io::Write;

use colored::Colorize;
use env_logger::{Builder, Env};
use log::Level;

/// Installs the global logger. `RUST_LOG` selects the filter, `info` by default.
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => "ERROR".red().bold(),
                Level::Warn => "WARN ".yellow().bold(),
                Level::Info => "INFO ".green(),
                Level::Debug => "DEBUG".blue(),
                Level::Trace => "TRACE".dimmed(),
            };
            writeln!(
                buf,
                "{} {} {} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
                level,
                record.target().cyan(),
                record.args()
            )
        })
        .try_init();
}
