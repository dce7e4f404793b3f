use flexi_logger::Logger;

use crate::Error;

/// Logs go to stderr; stdout carries command output only.
pub fn init() -> Result<(), Error> {
    Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}
