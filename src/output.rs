//! Console output.
//!
//! The knock transcript goes to stdout as plain `key=value` lines; errors
//! and warnings go to stderr with a styled prefix.

use crate::config::KnockConfig;
use crate::knocker::Transport;
use crate::types::{KnockPort, KnockTarget, PortList};
use console::style;

/// One-line usage summary.
pub const USAGE: &str =
    "Usage: toctoc [-u] [-4] [-6] [-t timeout_ms] [-d delay_ms] hostname port1 [port2] ... [portN]";

/// Print the usage line.
pub fn print_usage() {
    println!("{}", USAGE);
}

/// Lines echoing the configuration before resolution starts.
pub fn config_lines(hostname: &str, config: &KnockConfig, ports: &PortList) -> Vec<String> {
    let mut lines = Vec::with_capacity(ports.len() + 1);
    lines.push(format!(
        "hostname={} proto={} timeout={}ms delay={}ms",
        hostname,
        config.transport,
        config.timeout_ms(),
        config.delay_ms()
    ));
    lines.extend(ports.iter().map(|port| format!("port={}", port)));
    lines
}

/// Print the configuration echo.
pub fn print_config(hostname: &str, config: &KnockConfig, ports: &PortList) {
    for line in config_lines(hostname, config, ports) {
        println!("{}", line);
    }
}

pub fn target_line(hostname: &str, target: &KnockTarget) -> String {
    format!("knocking hostname={} address={}", hostname, target.numeric_host())
}

/// Print the header for one resolved address.
pub fn print_target(hostname: &str, target: &KnockTarget) {
    println!("{}", target_line(hostname, target));
}

pub fn knock_line(port: &KnockPort, transport: Transport) -> String {
    format!("\tport={}/{}", port, transport.suffix())
}

/// Print the notice for one knock.
pub fn print_knock(port: &KnockPort, transport: Transport) {
    println!("{}", knock_line(port, transport));
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
