//! unmask CLI
//!
//! Recovers phone numbers, emails and addresses from an obfuscated table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use unmask_cipher::{Cipher, DomainAllowList, PreimageSearch, ShiftCipherSolver};
use unmask_config::{Strategy, UnmaskConfig};
use unmask_core::{Alphabet, Digest, PhoneRange, ShiftKey, ENGLISH};
use unmask_decode::{BatchDecoder, BatchReport};
use unmask_table::{Table, TableReader, TableWriter};

#[derive(Parser)]
#[command(name = "unmask")]
#[command(about = "Decode hashed phones and shift-ciphered emails/addresses in a table")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/unmask/config.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode the whole table and write the enriched copy
    Decode {
        /// Input CSV
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scheduling: sequential, parallel, shared_scan
        #[arg(short, long)]
        strategy: Option<Strategy>,

        /// Worker threads for the parallel strategy
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Find the phone number behind a SHA-1 digest
    Phone {
        /// Hex digest (40 chars)
        digest: String,

        /// First candidate (default from config)
        #[arg(long)]
        start: Option<u64>,

        /// Exclusive last candidate (default from config)
        #[arg(long)]
        end: Option<u64>,
    },

    /// Recover an email and its shift
    Email {
        /// Shifted email
        ciphertext: String,
    },

    /// Apply the shift transform to text
    Shift {
        /// Text to transform
        text: String,

        /// Shift key
        #[arg(short, long)]
        key: u32,

        /// Alphabet: russian, english
        #[arg(short, long, default_value = "russian")]
        alphabet: String,

        /// Encode instead of decode
        #[arg(long)]
        encode: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let config = UnmaskConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Decode { input, output, strategy, threads } => {
            cmd_decode(config, input, output, strategy, threads)
        }
        Commands::Phone { digest, start, end } => cmd_phone(&config, &digest, start, end),
        Commands::Email { ciphertext } => cmd_email(&config, &ciphertext),
        Commands::Shift { text, key, alphabet, encode } => cmd_shift(&text, key, &alphabet, encode),
        Commands::Config => cmd_config(&config),
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let directives = ["unmask", "unmask_cipher", "unmask_decode", "unmask_table", "unmask_config"]
        .map(|target| format!("{target}={level}"))
        .join(",");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| directives.into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// DECODE
// ============================================================================

fn cmd_decode(
    mut config: UnmaskConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    strategy: Option<Strategy>,
    threads: Option<usize>,
) -> Result<()> {
    if let Some(input) = input {
        config.input = input;
    }
    if let Some(output) = output {
        config.output = output;
    }
    if let Some(strategy) = strategy {
        config.decode.strategy = strategy;
    }
    if threads.is_some() {
        config.decode.threads = threads;
    }
    config.validate()?;
    tracing::debug!(input = %config.input.display(), decode = ?config.decode, "effective settings");

    println!("\n  TABLE DECODE");
    println!("  ============\n");
    println!("  Input:    {}", config.input.display());
    println!("  Output:   {}", config.output.display());
    println!("  Strategy: {:?}", config.decode.strategy);
    println!(
        "  Phones:   [{}, {})",
        config.phone.start, config.phone.end
    );
    println!();

    let report = run_decode(&config)?;

    for line in report.render().lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}

/// Read, decode and write one table as described by `config`
fn run_decode(config: &UnmaskConfig) -> Result<BatchReport> {
    let mut table = TableReader::from_config(&config.table)?
        .read_path(&config.input)
        .with_context(|| format!("reading {}", config.input.display()))?;

    let records = table.records(&config.table.columns)?;
    let (decoded, report) = BatchDecoder::from_config(config)?.decode_all(&records)?;

    table.append_decoded(&config.table.output_columns, &decoded)?;
    write_table(config, &config.output, &table)?;
    Ok(report)
}

fn write_table(config: &UnmaskConfig, path: &Path, table: &Table) -> Result<()> {
    TableWriter::from_config(&config.table)?
        .write_path(path, table)
        .with_context(|| format!("writing {}", path.display()))
}

// ============================================================================
// SINGLE-FIELD TOOLS
// ============================================================================

fn cmd_phone(config: &UnmaskConfig, digest: &str, start: Option<u64>, end: Option<u64>) -> Result<()> {
    let digest = Digest::parse(digest)?;
    let range = PhoneRange::new(
        start.unwrap_or(config.phone.start),
        end.unwrap_or(config.phone.end),
    )?;

    println!("\n  PHONE PRE-IMAGE SEARCH");
    println!("  ======================\n");
    println!("  Digest: {}", digest);
    println!("  Range:  [{}, {}) - {} candidates", range.start(), range.end(), range.len());
    println!();

    let (found, stats) = PreimageSearch::new(range).search_with_stats(&digest);
    match found {
        Some(number) => println!("  [+] FOUND: {}", number),
        None => println!("  [-] Not found in range."),
    }
    println!("  [*] {} candidates, {:.0} H/s", stats.candidates_tried, stats.speed());
    println!();
    Ok(())
}

fn cmd_email(config: &UnmaskConfig, ciphertext: &str) -> Result<()> {
    let domains = DomainAllowList::new(config.email.allowed_tlds.iter().cloned());
    let solver = ShiftCipherSolver::new(&ENGLISH, domains);

    println!("\n  EMAIL SHIFT SEARCH");
    println!("  ==================\n");
    println!("  Ciphertext: {}\n", ciphertext);

    match solver.solve(ciphertext) {
        Some(solution) => {
            println!("  [+] Email: {}", solution.plaintext);
            println!("  [+] Shift: {}", solution.key);
        }
        None => println!("  [-] No shift yields an allowed domain."),
    }
    println!();
    Ok(())
}

fn cmd_shift(text: &str, key: u32, alphabet: &str, encode: bool) -> Result<()> {
    let alphabet = Alphabet::by_name(alphabet)?;
    let key = ShiftKey::new(key);

    let result = if encode {
        Cipher::shift_encode(text, alphabet, key)
    } else {
        Cipher::shift_decode(text, alphabet, key)
    };

    println!("\n  SHIFT {} ({}, key {})", if encode { "ENCODE" } else { "DECODE" }, alphabet.name(), key);
    println!("  Input:  {}", text);
    println!("  Output: {}", result);
    println!();
    Ok(())
}

fn cmd_config(config: &UnmaskConfig) -> Result<()> {
    if let Some(path) = UnmaskConfig::default_path() {
        println!("# default location: {}", path.display());
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use unmask_cipher::Hashes;
    use unmask_core::RUSSIAN;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::parse_from(["unmask", "decode", "--strategy", "shared-scan", "-t", "2"]);
        match cli.command {
            Commands::Decode { strategy, threads, .. } => {
                assert_eq!(strategy, Some(Strategy::SharedScan));
                assert_eq!(threads, Some(2));
            }
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_run_decode_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.csv");
        let output = dir.path().join("answer.csv");

        let key = ShiftKey::new(4);
        let email = Cipher::shift_encode("maria@example.com", &ENGLISH, key);
        let address = Cipher::shift_encode("Пермь, ул. Ленина, 10", &RUSSIAN, key);
        let phone = Hashes::phone_digest(89_000_000_007).to_hex();
        let csv = format!(
            "Данные,,,\n,Телефон,email,Адрес\n0,{phone},{email},\"{address}\"\n1,,garbage,Ъхйъ\n"
        );
        std::fs::write(&input, csv).unwrap();

        let mut config = UnmaskConfig::default();
        config.input = input;
        config.output = output.clone();
        config.phone.start = 89_000_000_000;
        config.phone.end = 89_000_000_010;
        config.decode.strategy = Strategy::Sequential;

        let report = run_decode(&config).unwrap();
        assert_eq!(report.records, 2);
        assert_eq!(report.phones_found, 1);

        let written = std::fs::read_to_string(&output).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("Телефон,email,Адрес,Расшифрованный телефон,Расшифрованный email,Расшифрованный адрес,Сдвиг")
        );
        assert_eq!(
            lines.next().map(|l| l.ends_with("89000000007,maria@example.com,\"Пермь, ул. Ленина, 10\",4")),
            Some(true)
        );
        assert_eq!(lines.next(), Some(",garbage,Ъхйъ,,,Ъхйъ,"));
    }
}
