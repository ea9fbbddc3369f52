//! hostsmap — merge hosts files and domain lists into one table
//!
//! Usage:
//!   hostsmap                            # Parse /etc/hosts
//!   hostsmap a.hosts blocklist.txt      # Merge several files, in order
//!   cat list.txt | hostsmap -           # Read stdin
//!   hostsmap -4 /etc/hosts              # IPv4 bindings only
//!
//! Set `RUST_LOG=debug` for per-stream statistics.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use hostsmap::{AddressList, Family, HostsTable};
use log::info;

/// Default input when no file is given.
const DEFAULT_HOSTS: &str = "/etc/hosts";
/// Path meaning "read standard input".
const STDIN_PATH: &str = "-";
/// Default table capacity hint.
const DEFAULT_CAPACITY: usize = 1024;

struct Config {
    files: Vec<PathBuf>,
    capacity: usize,
    family: Option<Family>,
    count_only: bool,
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut config = Config {
        files: Vec::new(),
        capacity: DEFAULT_CAPACITY,
        family: None,
        count_only: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--capacity" | "-c" => {
                i += 1;
                if i < args.len() {
                    config.capacity = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid capacity: '{}'", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--ipv4" | "-4" => config.family = Some(Family::V4),
            "--ipv6" | "-6" => config.family = Some(Family::V6),
            "--count" => config.count_only = true,
            "--version" | "-V" => {
                println!("hostsmap {}", hostsmap::VERSION);
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            STDIN_PATH => config.files.push(PathBuf::from(STDIN_PATH)),
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    if config.files.is_empty() {
        config.files.push(PathBuf::from(DEFAULT_HOSTS));
    }
    config
}

fn print_help() {
    println!("hostsmap — hosts file & blocklist parser");
    println!();
    println!("Usage: hostsmap [OPTIONS] [FILE...]");
    println!();
    println!("Options:");
    println!("  -c, --capacity <N>   Table capacity hint (default: {})", DEFAULT_CAPACITY);
    println!("  -4, --ipv4           Print IPv4 bindings only");
    println!("  -6, --ipv6           Print IPv6 bindings only");
    println!("      --count          Print the number of domains only");
    println!("  -V, --version        Print version");
    println!("  -h, --help           Print help");
    println!();
    println!("Files are merged in order; '-' reads stdin (default: {}).", DEFAULT_HOSTS);
}

fn open(path: &Path) -> io::Result<Box<dyn Read>> {
    if path.as_os_str() == STDIN_PATH {
        // Unlocked handle: `-` may be given more than once.
        return Ok(Box::new(io::stdin()));
    }
    Ok(Box::new(File::open(path)?))
}

/// Addresses of `list` to print, or `None` to skip the domain.
fn selected(list: &AddressList, family: Option<Family>) -> Option<Vec<String>> {
    match family {
        None => Some(list.iter().map(|a| a.to_string()).collect()),
        Some(family) => {
            let mut out = Vec::new();
            list.filter_family(family, |addr| {
                out.push(addr.to_string());
                true
            });
            (!out.is_empty()).then_some(out)
        }
    }
}

fn print_table(table: &HostsTable, config: &Config) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if config.count_only {
        writeln!(out, "{}", table.len())?;
        return out.flush();
    }

    let mut domains: Vec<_> = table.iter().collect();
    domains.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (domain, list) in domains {
        if let Some(addrs) = selected(list, config.family) {
            if addrs.is_empty() {
                writeln!(out, "{}", domain)?;
            } else {
                writeln!(out, "{}\t{}", domain, addrs.join(" "))?;
            }
        }
    }
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = parse_args();

    let readers = config
        .files
        .iter()
        .map(|path| open(path).map_err(|e| format!("{}: {}", path.display(), e)))
        .collect::<Result<Vec<_>, _>>()?;

    match hostsmap::parse_with_capacity(config.capacity, readers) {
        Ok(table) => {
            info!("parsed {} domains from {} files", table.len(), config.files.len());
            print_table(&table, &config)?;
            Ok(())
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!("Printing {} domains read before the failure", err.partial().len());
            print_table(err.partial(), &config)?;
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_stdin_twice() {
        let stdin = Path::new(STDIN_PATH);
        let first = open(stdin);
        let second = open(stdin);
        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[test]
    fn test_selected_family() {
        let list: AddressList = ["127.0.0.1", "::1"]
            .iter()
            .map(|s| s.parse::<std::net::IpAddr>().unwrap())
            .collect();
        assert_eq!(selected(&list, None), Some(vec!["127.0.0.1".to_string(), "::1".to_string()]));
        assert_eq!(selected(&list, Some(Family::V6)), Some(vec!["::1".to_string()]));
        assert_eq!(selected(&AddressList::absent(), Some(Family::V4)), None);
        assert_eq!(selected(&AddressList::absent(), None), Some(Vec::<String>::new()));
    }
}
