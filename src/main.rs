use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use sfx::coding::fibonacci_encode;
use sfx::encode::{bwt_from_suffix_array, run_lengths, EncodingSummary};
use sfx::output::{print_status, print_table, ArtifactWriter};
use sfx::prime::{generate_d_digit_prime, DEFAULT_ROUNDS};
use sfx::utils::{spinner, spinner_for_len};
use sfx::{EncodeConfig, SuffixTree, Text, TreeStats};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sfx")]
#[command(about = "Suffix trees, suffix arrays and compact BWT/topology encodings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON encoding configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored status output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the suffix array of a text, one 1-based position per line
    Sa {
        /// Text file (line breaks are removed)
        input: PathBuf,

        #[arg(short, long, default_value = "output_sa.txt")]
        output: PathBuf,
    },
    /// Encode the BWT and the suffix-tree topology into a bit stream
    Encode {
        /// Text file (line breaks are removed)
        input: PathBuf,

        /// Packed binary artifact
        #[arg(short, long, default_value = "output_encode.bin")]
        output: PathBuf,

        /// Human-readable bit string artifact
        #[arg(long, default_value = "output_encode_bits.txt")]
        bits: PathBuf,
    },
    /// Decode a binary artifact and print the text
    Decode {
        input: PathBuf,
    },
    /// Fibonacci-code one positive integer per line
    Fib {
        input: PathBuf,

        #[arg(short, long, default_value = "output_fib.txt")]
        output: PathBuf,
    },
    /// Generate a probable prime with the given number of decimal digits
    Prime {
        /// Digit count (100 to 1000)
        digits: u32,

        #[arg(short, long, default_value = "output_prime.txt")]
        output: PathBuf,

        /// Miller-Rabin rounds
        #[arg(long, default_value_t = DEFAULT_ROUNDS)]
        rounds: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show tree and encoding statistics
    Stats {
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also check the structural invariants of the built tree
        #[arg(long)]
        verify: bool,
    },
}

#[derive(Serialize)]
struct StatsReport {
    tree: TreeStats,
    bwt_runs: usize,
    /// Absent when the text cannot be encoded with the configured width
    encoding: Option<EncodingSummary>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            // 2 for rejected input, 1 for I/O failures and defects
            let input_error = err
                .chain()
                .filter_map(|cause| cause.downcast_ref::<sfx::Error>())
                .any(sfx::Error::is_input_error);
            if input_error {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EncodeConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EncodeConfig::default(),
    };
    let color = !cli.no_color;

    match cli.command {
        Commands::Sa { input, output } => {
            let tree = build_tree(&input, &config)?;
            let sa = tree.suffix_array();
            ArtifactWriter::write_suffix_array(&output, &sa)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            print_status("Wrote", &format!("{} ({} suffixes)", output.display(), sa.len()), color)?;
        }
        Commands::Encode { input, output, bits } => {
            let tree = build_tree(&input, &config)?;
            let encoding = sfx::encode(&tree, &config)?;
            let stream = encoding.bits();
            ArtifactWriter::write_bit_report(&bits, &stream)
                .with_context(|| format!("Failed to write {}", bits.display()))?;
            ArtifactWriter::write_packed(&output, stream.as_bytes())
                .with_context(|| format!("Failed to write {}", output.display()))?;
            print_status("Wrote", &bits.display().to_string(), color)?;
            print_status(
                "Wrote",
                &format!(
                    "{} ({} bits, {} padding)",
                    output.display(),
                    stream.len(),
                    stream.padding()
                ),
                color,
            )?;
        }
        Commands::Decode { input } => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let decoded = sfx::decode_bytes(&bytes, &config)
                .with_context(|| format!("Failed to decode {}", input.display()))?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&decoded.text)?;
            stdout.write_all(b"\n")?;
        }
        Commands::Fib { input, output } => {
            let content = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let codes = fibonacci_lines(&content)?;
            ArtifactWriter::write_lines(&output, &codes)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            print_status("Wrote", &format!("{} ({} codes)", output.display(), codes.len()), color)?;
        }
        Commands::Prime {
            digits,
            output,
            rounds,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let progress = spinner("Searching for a probable prime...");
            let prime = generate_d_digit_prime(digits, rounds, &mut rng);
            progress.finish_and_clear();
            let prime = prime?;
            ArtifactWriter::write_lines(&output, [prime.to_string()])
                .with_context(|| format!("Failed to write {}", output.display()))?;
            print_status("Wrote", &format!("{} ({digits} digits)", output.display()), color)?;
        }
        Commands::Stats {
            input,
            json,
            verify,
        } => {
            let tree = build_tree(&input, &config)?;
            if verify {
                tree.check_invariants()?;
                info!("invariants hold");
            }
            let sa = tree.suffix_array();
            let bwt = bwt_from_suffix_array(tree.text(), &sa);
            let report = StatsReport {
                tree: tree.stats(),
                bwt_runs: run_lengths(&bwt).len(),
                encoding: match sfx::encode(&tree, &config) {
                    Ok(encoding) => Some(encoding.summary()),
                    Err(err) => {
                        warn!(%err, "encoding summary skipped");
                        None
                    }
                },
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, verify, color)?;
            }
        }
    }

    Ok(())
}

/// Default `sfx=warn`; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("sfx={level}").into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_tree(input: &Path, config: &EncodeConfig) -> Result<SuffixTree> {
    let raw = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let text = Text::from_input(&raw, config)
        .with_context(|| format!("Invalid input in {}", input.display()))?;

    let progress = spinner_for_len("Building suffix tree...", text.len());
    let tree = SuffixTree::build(text.as_bytes());
    progress.finish_and_clear();
    let tree = tree?;

    info!(
        input = %input.display(),
        len = tree.len(),
        body_len = text.body().len(),
        sentinel = %(text.sentinel() as char),
        nodes = tree.node_count(),
        "suffix tree built"
    );
    Ok(tree)
}

/// Codewords for one integer per line; blank lines are skipped
fn fibonacci_lines(content: &str) -> Result<Vec<String>> {
    let mut codes = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let not_positive = || {
            sfx::Error::invalid_input(format!(
                "line {}: {line:?} is not a positive integer",
                line_no + 1
            ))
        };
        if line.starts_with('-') {
            return Err(not_positive().into());
        }
        let n: u64 = line.parse().map_err(|_| not_positive())?;
        if n == 0 {
            return Err(not_positive().into());
        }
        codes.push(fibonacci_encode(n)?.to_string());
    }
    Ok(codes)
}

fn print_report(report: &StatsReport, verified: bool, color: bool) -> Result<()> {
    let tree = &report.tree;
    let mut rows = vec![
        ("Text length", tree.text_len.to_string()),
        ("Nodes", tree.node_count.to_string()),
        ("Internal nodes", tree.internal_count.to_string()),
        ("Leaves", tree.leaf_count.to_string()),
        ("Max internal depth", tree.max_internal_depth.to_string()),
        ("Max fanout", tree.max_fanout.to_string()),
        ("BWT runs", report.bwt_runs.to_string()),
    ];
    match &report.encoding {
        Some(enc) => rows.extend([
            ("BWT section bits", enc.bwt_bits.to_string()),
            ("Tree section bits", enc.tree_bits.to_string()),
            ("Total bits", enc.total_bits.to_string()),
            ("Packed bytes", enc.packed_bytes.to_string()),
        ]),
        None => rows.push(("Encoding", "unavailable".to_string())),
    }
    if verified {
        rows.push(("Invariants", "ok".to_string()));
    }
    print_table(&rows, color)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_lines() {
        let codes = fibonacci_lines("1\n2\n\n 4 \n65\n").unwrap();
        assert_eq!(codes, vec!["11", "011", "1011", "0100100011"]);
    }

    #[test]
    fn test_fibonacci_lines_accepts_full_u64_range() {
        let codes = fibonacci_lines("9223372036854775808\n18446744073709551615\n").unwrap();
        assert_eq!(codes.len(), 2);
        assert!(codes.iter().all(|c| c.ends_with("11")));
        assert!(fibonacci_lines("18446744073709551616\n").is_err());
    }

    #[test]
    fn test_fibonacci_lines_rejects_non_positive() {
        assert!(fibonacci_lines("3\n0\n").is_err());
        assert!(fibonacci_lines("-5\n").is_err());
        assert!(fibonacci_lines("abc\n").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["sfx", "-vv", "prime", "100", "--seed", "7"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Prime {
                digits: 100,
                seed: Some(7),
                rounds: DEFAULT_ROUNDS,
                ..
            }
        ));
    }
}
