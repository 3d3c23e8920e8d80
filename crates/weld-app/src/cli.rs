use std::path::PathBuf;

use clap::Parser;

/// Weld: a transparent desktop widget backed by a web page.
#[derive(Parser, Debug)]
#[command(name = "weld", version, about)]
pub struct Args {
    /// Widget config file (default: <config dir>/weld/config.toml).
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `weld=debug`.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_and_log_level() {
        let args =
            Args::try_parse_from(["weld", "--config", "/tmp/bar.toml", "--log-level", "debug"])
                .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/bar.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn everything_is_optional() {
        let args = Args::try_parse_from(["weld"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
    }
}
