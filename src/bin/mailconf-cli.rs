#[path = "mailconf-cli/args.rs"]
mod args;
#[path = "mailconf-cli/output.rs"]
mod output;

use std::path::Path;

use anyhow::{Context, Result};
use mailconf_lib::{
    DiscoveryOptions, EmailAddress, HttpClient, Protocol, SuffixTable, discover,
    discovery_candidates, load_suffixes, lookup_mail_services, system_resolver,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands, Format, protocol_from_str};
use crate::output::OutcomeReport;

fn init_tracing(verbose: bool) {
    let default = if verbose { "mailconf_lib=debug,info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.parsed_format()?;
    let options = cli.options();

    match &cli.cmd {
        Commands::Autoconfig { email } => {
            run_discovery(email, Protocol::Autoconfig, &options, format, &cli)
        }
        Commands::Autodiscover { email } => {
            run_discovery(email, Protocol::Autodiscover, &options, format, &cli)
        }
        Commands::Candidates { email, protocol } => {
            let protocol = protocol_from_str(protocol)?;
            let address = EmailAddress::parse(email)?;
            let resolver = system_resolver().context("initialize DNS resolver")?;
            let suffixes = load_suffixes(&options);
            let candidates =
                discovery_candidates(&address, protocol, &options, &resolver, suffixes.as_ref());
            output::print_candidates(&candidates, format)
        }
        Commands::Srv { email } => {
            let address = EmailAddress::parse(email)?;
            let resolver = system_resolver().context("initialize DNS resolver")?;
            let lookups = lookup_mail_services(&resolver, address.domain());
            output::print_services(&lookups, format)
        }
        Commands::FetchSuffixList { out, url } => fetch_suffix_list(url, out, &options),
    }
}

// exit codes: 0 document found, 2 every candidate failed, 1 fatal
fn run_discovery(
    email: &str,
    protocol: Protocol,
    options: &DiscoveryOptions,
    format: Format,
    cli: &Cli,
) -> Result<()> {
    let address = EmailAddress::parse(email)?;
    let outcome = discover(email, protocol, options)?;

    let report = OutcomeReport::new(&address, protocol, &outcome);
    output::print_outcome(&report, format)?;

    let Some(document) = outcome.document() else {
        std::process::exit(2);
    };
    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;
        let path = dir.join(document_file_name(&address));
        write_all_atomically(&path, &document.body)?;
        info!(path = %path.display(), "document saved");
    }
    Ok(())
}

/// `<address>.xml` as one path component: separators become `_`.
fn document_file_name(address: &EmailAddress) -> String {
    let stem: String = address
        .to_string()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    format!("{stem}.xml")
}

fn fetch_suffix_list(url: &str, out: &Path, options: &DiscoveryOptions) -> Result<()> {
    let http = HttpClient::from_options(options).context("initialize HTTP client")?;
    let table = SuffixTable::fetch(&http, url)?;

    let mut bytes = Vec::new();
    let as_json = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if as_json {
        #[cfg(feature = "with-serde")]
        table.write_json(&mut bytes)?;
        #[cfg(not(feature = "with-serde"))]
        anyhow::bail!("a .json snapshot requires the 'with-serde' feature");
    } else {
        table.write_list(&mut bytes)?;
    }
    write_all_atomically(out, &bytes)?;
    eprintln!("{} suffixes written to {}", table.len(), out.display());
    Ok(())
}

fn write_all_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    {
        let mut f = std::fs::File::create(&tmp)
            .with_context(|| format!("create {}", Path::new(&tmp).display()))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_file_name_is_a_single_component() {
        let address = EmailAddress::parse("../../etc/passwd@example.com").unwrap();
        let name = document_file_name(&address);
        assert_eq!(name, ".._.._etc_passwd@example.com.xml");

        let path = Path::new("out").join(&name);
        assert_eq!(path.parent(), Some(Path::new("out")));
        assert_eq!(path.components().count(), 2);
    }

    #[test]
    fn plain_address_keeps_its_name() {
        let address = EmailAddress::parse("user+tag@example.com").unwrap();
        assert_eq!(document_file_name(&address), "user+tag@example.com.xml");
    }

    #[test]
    fn backslash_is_replaced() {
        let address = EmailAddress::parse("a\\b@example.com").unwrap();
        assert_eq!(document_file_name(&address), "a_b@example.com.xml");
    }
}
