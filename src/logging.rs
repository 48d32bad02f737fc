use chrono::Local;
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Level selected by the `-v`/`-q` flags; `RUST_LOG` takes precedence.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the stderr logger. Calling it again is a no-op.
pub fn init(verbose: u8, quiet: bool) {
    let default = level_for(verbose, quiet).to_string().to_lowercase();
    let _ = Builder::from_env(Env::default().default_filter_or(default))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init();
}
