//! Command-line arguments.

use clap::Parser;
use indexmap::IndexMap;
use tomcat_manager_core::endpoint::{DEFAULT_HOST, DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_USER};
use tomcat_manager_core::Endpoint;

/// Run a Tomcat Manager text-API command through curl.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
pub struct Cli {
    /// Manager command, e.g. list, roles, resources, serverinfo, start, stop
    pub command: String,

    /// Query options as KEY=VALUE, sent in the given order
    #[arg(value_parser = parse_option)]
    pub options: Vec<(String, String)>,

    #[arg(long, env = "TOMCAT_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, env = "TOMCAT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "TOMCAT_USER", default_value = DEFAULT_USER)]
    pub user: String,

    #[arg(long, env = "TOMCAT_PASSWORD", default_value = DEFAULT_PASSWORD, hide_env_values = true)]
    pub password: String,

    /// HTTP client program used to execute the request
    #[arg(long, default_value = "curl")]
    pub curl: String,

    /// Print the parsed response as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(
            self.host.clone(),
            self.port,
            self.user.clone(),
            self.password.clone(),
        )
    }

    /// Options in command-line order. A repeated key keeps its first
    /// position and its last value.
    pub fn options(&self) -> IndexMap<String, String> {
        self.options.iter().cloned().collect()
    }
}

/// Split `KEY=VALUE` on the first `=`.
fn parse_option(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing key in `{s}`")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("tomcat-manager").chain(args.iter().copied()))
    }

    #[test]
    fn command_with_options() {
        let cli = parse(&["list", "path=/manager", "update=true"]).unwrap();
        assert_eq!(cli.command, "list");
        let options: Vec<_> = cli.options().into_iter().collect();
        assert_eq!(
            options,
            vec![
                ("path".to_string(), "/manager".to_string()),
                ("update".to_string(), "true".to_string())
            ]
        );
    }

    #[test]
    fn value_may_contain_equals() {
        let cli = parse(&["deploy", "war=file:/tmp/a.war?x=1"]).unwrap();
        assert_eq!(cli.options()["war"], "file:/tmp/a.war?x=1");
    }

    #[test]
    fn option_without_equals_is_rejected() {
        assert!(parse(&["list", "path"]).is_err());
        assert!(parse(&["list", "=value"]).is_err());
    }

    #[test]
    fn command_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn endpoint_flags_override_defaults() {
        let cli = parse(&[
            "--host", "tomcat.local", "--port", "9090", "--user", "ops", "--password", "pw", "roles",
        ])
        .unwrap();
        let endpoint = cli.endpoint();
        assert_eq!(endpoint.base_url(), "http://tomcat.local:9090");
        assert_eq!(endpoint.credentials().pair(), "ops:pw");
    }

    #[test]
    fn verbosity_counts() {
        let cli = parse(&["-vv", "serverinfo"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.json);
    }
}
