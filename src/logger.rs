use std::io::Write;

use env_logger::{Builder, Env};

/// Install a timestamped stderr logger. `RUST_LOG` overrides `level`.
pub fn init_logger(level: &str) -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:<5}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod test_logger {
    use crate::logger::init_logger;

    #[test]
    fn test_second_init_fails() {
        // The global logger may already be set by another test.
        let _ = init_logger("debug");
        assert!(init_logger("info").is_err());
        log::info!("logger installed");
    }
}
