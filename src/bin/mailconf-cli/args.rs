use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use mailconf_lib::autodiscover::DEFAULT_MAX_REDIRECTS;
use mailconf_lib::{DiscoveryOptions, PUBLIC_SUFFIX_LIST_URL, Protocol, SrvTargets};

#[derive(Parser)]
#[command(
    name = "mailconf-cli",
    version,
    about = "Discover mail client settings via autoconfig and autodiscover"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// public suffix list (.dat, or .json snapshot) enabling MX-derived candidates
    #[arg(long, global = true)]
    pub suffix_list: Option<PathBuf>,

    /// provider database base URL
    #[arg(long, global = true)]
    pub ispdb: Option<String>,

    /// redirects followed per candidate
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// per-request timeout (ms), 0 disables it
    #[arg(long = "timeout-ms", global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// keep duplicate candidates
    #[arg(long, global = true)]
    pub no_dedupe: bool,

    /// only the preferred _autodiscover._tcp SRV target becomes a candidate
    #[arg(long, global = true)]
    pub srv_best_only: bool,

    /// format: human|json
    #[arg(long, global = true, default_value = "human")]
    pub format: String,

    /// save the discovered document as <out-dir>/<email>.xml
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the autoconfig candidates of an address
    Autoconfig { email: String },
    /// Probe the autodiscover candidates of an address
    Autodiscover { email: String },
    /// List the candidates that would be probed, without probing them
    Candidates {
        email: String,
        /// protocol: autoconfig|autodiscover
        #[arg(long, default_value = "autoconfig")]
        protocol: String,
    },
    /// Look up the RFC 6186 mail service records of the address's domain
    Srv { email: String },
    /// Download the public suffix list
    #[command(name = "fetch-suffix-list")]
    FetchSuffixList {
        /// destination (.dat, or .json snapshot with `with-serde`)
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = PUBLIC_SUFFIX_LIST_URL)]
        url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn parsed_format(&self) -> Result<Format> {
        format_from_str(&self.format)
    }

    pub fn options(&self) -> DiscoveryOptions {
        let defaults = DiscoveryOptions::default();
        DiscoveryOptions {
            ispdb_base: self.ispdb.clone().unwrap_or(defaults.ispdb_base),
            max_redirects: self.max_redirects,
            timeout: Duration::from_millis(self.timeout_ms),
            dedupe: !self.no_dedupe,
            srv_targets: if self.srv_best_only {
                SrvTargets::Best
            } else {
                SrvTargets::All
            },
            suffix_list: self.suffix_list.clone(),
            ..defaults
        }
    }
}

pub fn format_from_str(s: &str) -> Result<Format> {
    match s {
        "human" => Ok(Format::Human),
        "json" => Ok(Format::Json),
        other => bail!("unknown --format '{other}', use: human|json"),
    }
}

pub fn protocol_from_str(s: &str) -> Result<Protocol> {
    match s {
        "autoconfig" => Ok(Protocol::Autoconfig),
        "autodiscover" => Ok(Protocol::Autodiscover),
        other => bail!("unknown --protocol '{other}', use: autoconfig|autodiscover"),
    }
}
