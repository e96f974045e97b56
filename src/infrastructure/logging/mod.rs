mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
