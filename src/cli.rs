//! Command-line interface definitions for toctoc.
//!
//! Uses `clap` derive macros. The flag set mirrors the classic getopt
//! interface: bundled short flags, last of `-4`/`-6` wins, and `-h`/`-?`
//! print the usage line without stopping the run. Unknown flags and flags
//! missing their value are filtered out before clap sees them, so they only
//! cost a usage line.

use crate::config::{AppSettings, KnockConfig};
use crate::error::{CliError, CliResult};
use crate::knocker::{self, KnockSummary, Transport};
use crate::output;
use crate::types::{atoi, resolve, AddressFamily, PortList};
use clap::{ArgAction, Parser};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Knock on a host's ports, one after another.
#[derive(Parser, Debug)]
#[command(name = "toctoc")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(about = "Port knocking over TCP or UDP", long_about = None)]
#[command(override_usage = "toctoc [-4] [-6] [-u] [-t timeout_ms] [-d delay_ms] hostname port1 [port2 ... portN]")]
#[command(disable_help_flag = true)]
pub struct Args {
    /// Resolve IPv4 addresses only
    #[arg(short = '4', overrides_with = "ipv6")]
    pub ipv4: bool,

    /// Resolve IPv6 addresses only
    #[arg(short = '6', overrides_with = "ipv4")]
    pub ipv6: bool,

    /// Knock with UDP datagrams instead of TCP connects
    #[arg(short = 'u')]
    pub udp: bool,

    /// Connection timeout in milliseconds (default 200)
    #[arg(short = 't', value_name = "timeout_ms", value_parser = parse_millis, allow_hyphen_values = true)]
    pub timeout: Option<u64>,

    /// Delay between ports in milliseconds (default 200)
    #[arg(short = 'd', value_name = "delay_ms", value_parser = parse_millis, allow_hyphen_values = true)]
    pub delay: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print usage
    #[arg(short = 'h', short_alias = '?')]
    pub help: bool,

    /// Host to knock on
    #[arg(value_name = "hostname")]
    pub hostname: Option<String>,

    /// Ports, knocked in the order given
    #[arg(value_name = "port")]
    pub ports: Vec<String>,
}

/// Short flags without a value.
const SHORT_FLAGS: &[char] = &['4', '6', 'u', 'h', '?', 'v'];

/// Short flags taking a value, attached (`-t50`) or separate (`-t 50`).
const SHORT_VALUE_FLAGS: &[char] = &['t', 'd'];

const LONG_FLAGS: &[&str] = &["verbose"];

const LONG_VALUE_FLAGS: &[&str] = &["config"];

/// A flag dropped from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectedFlag {
    /// Not a flag toctoc knows.
    Unknown(String),
    /// A known flag given without its value.
    MissingValue(String),
}

impl fmt::Display for RejectedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(flag) => write!(f, "invalid option '{}'", flag),
            Self::MissingValue(flag) => write!(f, "option requires an argument '{}'", flag),
        }
    }
}

/// Split `argv` into what clap should parse and the flags to drop.
///
/// Short clusters are taken apart so `-u4x` keeps `-u4` and drops `-x`.
/// Everything after `--` and a lone `-` are positionals.
pub fn filter_flags<I, S>(argv: I) -> (Vec<String>, Vec<RejectedFlag>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut iter = argv.into_iter().map(|arg| -> String { arg.into() });
    let mut kept: Vec<String> = iter.next().into_iter().collect();
    let mut rejected = Vec::new();
    let mut positionals_only = false;

    while let Some(arg) = iter.next() {
        if positionals_only || arg == "-" || !arg.starts_with('-') {
            kept.push(arg);
            continue;
        }
        if arg == "--" {
            positionals_only = true;
            kept.push(arg);
            continue;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let name = long.split('=').next().unwrap_or_default();
            if LONG_FLAGS.contains(&name) {
                kept.push(arg);
            } else if LONG_VALUE_FLAGS.contains(&name) {
                if long.contains('=') {
                    kept.push(arg);
                } else if let Some(value) = iter.next() {
                    kept.push(arg);
                    kept.push(value);
                } else {
                    rejected.push(RejectedFlag::MissingValue(arg));
                }
            } else {
                rejected.push(RejectedFlag::Unknown(arg));
            }
            continue;
        }

        let mut cluster = String::from("-");
        let mut chars = arg[1..].chars();
        while let Some(c) = chars.next() {
            if SHORT_FLAGS.contains(&c) {
                cluster.push(c);
            } else if SHORT_VALUE_FLAGS.contains(&c) {
                let attached = chars.as_str();
                let value = if attached.is_empty() {
                    iter.next()
                } else {
                    Some(attached.to_string())
                };
                match value {
                    Some(value) => {
                        if cluster.len() > 1 {
                            kept.push(std::mem::replace(&mut cluster, String::from("-")));
                        }
                        kept.push(format!("-{}", c));
                        kept.push(value);
                    }
                    None => rejected.push(RejectedFlag::MissingValue(format!("-{}", c))),
                }
                break;
            } else {
                rejected.push(RejectedFlag::Unknown(format!("-{}", c)));
            }
        }
        if cluster.len() > 1 {
            kept.push(cluster);
        }
    }

    (kept, rejected)
}

/// Millisecond values are read like C `atoi`; negatives clamp to zero.
fn parse_millis(s: &str) -> Result<u64, String> {
    Ok(atoi(s).max(0) as u64)
}

impl Args {
    /// Parse like getopt: bad flags are dropped and returned, not fatal.
    pub fn parse_lenient<I, S>(argv: I) -> Result<(Self, Vec<RejectedFlag>), clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (kept, rejected) = filter_flags(argv);
        let args = Self::try_parse_from(kept)?;
        Ok((args, rejected))
    }

    /// Address family chosen on the command line, if any.
    pub fn family(&self) -> Option<AddressFamily> {
        if self.ipv4 {
            Some(AddressFamily::Ipv4)
        } else if self.ipv6 {
            Some(AddressFamily::Ipv6)
        } else {
            None
        }
    }

    /// Merge flags over the settings file.
    pub fn knock_config(&self, settings: &AppSettings) -> KnockConfig {
        let mut config = settings.knock_config();

        if let Some(family) = self.family() {
            config = config.with_family(family);
        }
        if self.udp {
            config = config.with_transport(Transport::Udp);
        }
        if let Some(ms) = self.timeout {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = self.delay {
            config = config.with_delay(Duration::from_millis(ms));
        }

        config
    }

    /// Hostname and ports, or the missing-argument error.
    pub fn positionals(&self) -> CliResult<(&str, PortList)> {
        match self.hostname.as_deref() {
            Some(hostname) if !self.ports.is_empty() => {
                Ok((hostname, self.ports.iter().cloned().collect()))
            }
            _ => Err(CliError::MissingArguments),
        }
    }
}

/// Run toctoc with parsed arguments.
///
/// Nothing touches the network until hostname and ports are known to be
/// present. Resolution failure is fatal; per-knock failures are not.
pub async fn execute(args: &Args) -> CliResult<KnockSummary> {
    if args.help {
        output::print_usage();
    }

    let (hostname, ports) = args.positionals()?;
    let settings = AppSettings::resolve(args.config.as_deref())?;
    let config = args.knock_config(&settings);

    output::print_config(hostname, &config, &ports);
    tracing::debug!(hostname, %ports, ?config, "starting knock run");

    let targets = resolve(hostname, config.family).await?;
    Ok(knocker::run_knocks(&config, hostname, &ports, &targets).await)
}
