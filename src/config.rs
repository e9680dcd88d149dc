//! Configuration and CLI argument handling

use clap::Parser;

use crate::timer::{interval::check_cycle, Durations};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "tomato-timer")]
#[command(about = "A Pomodoro interval timer with a terminal display and a local HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work interval length in minutes
    #[arg(short, long, default_value = "1")]
    pub work: u64,

    /// Short break length in minutes
    #[arg(short, long, default_value = "5")]
    pub short_break: u64,

    /// Long break length in minutes
    #[arg(short, long, default_value = "20")]
    pub long_break: u64,

    /// Intervals per cycle; the last one of each cycle is a long break
    #[arg(short, long, default_value = "8")]
    pub cycle: u64,

    /// Do not serve the HTTP control endpoints
    #[arg(long)]
    pub no_http: bool,

    /// Do not render the display or read triggers on the terminal
    #[arg(long)]
    pub no_console: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Validated interval lengths
    pub fn durations(&self) -> Result<Durations, String> {
        Durations::from_minutes(self.work, self.short_break, self.long_break)
    }

    /// Validated long-break cycle length
    pub fn cycle(&self) -> Result<u64, String> {
        check_cycle(self.cycle)
    }
}
