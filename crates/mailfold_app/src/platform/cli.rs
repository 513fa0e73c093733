use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "mailfold",
    version,
    about = "Drop .eml files into the terminal to convert and store them under a project"
)]
pub struct Args {
    /// Server root URL. Overrides `server_url` from the config file.
    #[arg(long)]
    pub server: Option<String>,

    /// Project name to start with. Defaults to the last project used.
    #[arg(long)]
    pub project: Option<String>,

    /// Config file (RON). Created on the first successful upload.
    #[arg(long, default_value = "mailfold.ron")]
    pub config: PathBuf,

    /// Also list projects outside the default scope.
    #[arg(long, default_value_t = false)]
    pub include_others: bool,

    /// Where log output goes. Overrides `log_destination` from the config file.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Upload this file once and exit instead of starting the interactive client.
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_arguments_parse() {
        let args = Args::try_parse_from([
            "mailfold",
            "--project",
            "acme",
            "--log",
            "both",
            "mail.eml",
        ])
        .unwrap();
        assert_eq!(args.project.as_deref(), Some("acme"));
        assert_eq!(args.log, Some(LogDestination::Both));
        assert_eq!(args.file, Some(PathBuf::from("mail.eml")));
        assert_eq!(args.config, PathBuf::from("mailfold.ron"));
    }
}
