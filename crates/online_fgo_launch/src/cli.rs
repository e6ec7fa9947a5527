//! Command-line interface for online_fgo_launch

use crate::description::{LaunchDescription, LaunchError};
use argh::FromArgs;
use std::str::FromStr;

/// Compose the online_fgo launch description and print it
#[derive(FromArgs, Debug)]
pub struct LaunchArgs {
    /// composer settings file (YAML)
    #[argh(option, short = 'c')]
    pub config: Option<String>,

    /// package holding the profiles (default: online_fgo)
    #[argh(option)]
    pub package: Option<String>,

    /// profile directory under config/ (default: deutschland_lc)
    #[argh(option, short = 'p')]
    pub profile: Option<String>,

    /// share directory of the package, bypasses the ament index
    #[argh(option)]
    pub share_dir: Option<String>,

    /// declare every layer argument as config_common_path
    #[argh(switch)]
    pub legacy_names: bool,

    /// fail when a layer file is missing
    #[argh(switch)]
    pub require_files: bool,

    /// override launch arguments, shown in the plan (format: key:=value)
    #[argh(option, short = 'a', from_str_fn(parse_arg_override))]
    pub arg: Vec<(String, String)>,

    /// output format: plan, yaml or json (default: plan)
    #[argh(option, short = 'f', default = "OutputFormat::Plan")]
    pub format: OutputFormat,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    pub log_level: String,
}

/// How the composed description is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plan,
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plan" => Ok(OutputFormat::Plan),
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Invalid format '{}'. Expected 'plan', 'yaml' or 'json'",
                other
            )),
        }
    }
}

/// Parse argument override in format "key:=value"
fn parse_arg_override(s: &str) -> Result<(String, String), String> {
    match s.split_once(":=") {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!(
            "Invalid argument format '{}'. Expected 'key:=value'",
            s
        )),
    }
}

impl LaunchArgs {
    /// Argument overrides as borrowed pairs, in command-line order
    pub fn arg_overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.arg.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Filter string for env_logger, falling back to `info`
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.to_lowercase().as_str() {
            "error" => "error",
            "warn" => "warn",
            "debug" => "debug",
            "trace" => "trace",
            _ => "info",
        }
    }
}

/// Render the description in the requested format.
///
/// Argument overrides are checked for every format, so an unknown name
/// fails even when only the YAML or JSON document is printed.
pub fn render_description(
    description: &LaunchDescription,
    args: &LaunchArgs,
) -> Result<String, LaunchError> {
    let plan = description.plan(args.arg_overrides())?;
    match args.format {
        OutputFormat::Plan => Ok(plan.to_string()),
        OutputFormat::Yaml => description.to_yaml(),
        OutputFormat::Json => description.to_json(),
    }
}
