//! Recomputes the commitment of an espresso block header. You can run this
//! tool using the following command:
//! ```shell
//! RUST_LOG=info cargo run -p espresso-header-tool --bin header-commit -- --input header.json
//! ```
//!
//! Reads the header from stdin when `--input` is omitted. With `--expect`,
//! the recomputed commitment is compared against the hex digest obtained
//! from the sequencer and the tool exits nonzero on mismatch.

use std::{fs, io::Read as _, path::PathBuf, process};

use clap::Parser;
use committable::Committable;
use espresso_header_utils::BatchDerivationProof;
use tracing::info;

/// The arguments for the command.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON-encoded header; stdin when omitted.
    #[clap(long)]
    input: Option<PathBuf>,

    /// Treat the input as a whole batch derivation proof rather than a bare
    /// header.
    #[clap(long)]
    proof: bool,

    /// Hex digest to compare the recomputed commitment against.
    #[clap(long, env = "ESPRESSO_EXPECTED_COMMITMENT")]
    expect: Option<String>,
}

fn main() {
    // Setup the logger.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse the command line arguments.
    let args = Args::parse();

    let json = match &args.input {
        Some(path) => fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("Error: cannot read {}: {err}", path.display());
            process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|err| {
                eprintln!("Error: cannot read stdin: {err}");
                process::exit(1);
            });
            buf
        }
    };

    let header = if args.proof {
        let proof: BatchDerivationProof = parse(&json);
        info!(
            batch_proof_bytes = proof.batch_proof.as_ref().len(),
            ns_proof_bytes = proof.ns_proof.as_ref().len(),
            "decoded batch derivation proof"
        );
        proof.header
    } else {
        parse(&json)
    };

    let commitment = header.commit();
    println!("{}", hex::encode(AsRef::<[u8]>::as_ref(&commitment)));

    if let Some(expect) = &args.expect {
        let expect = hex::decode(expect.trim_start_matches("0x")).unwrap_or_else(|err| {
            eprintln!("Error: malformed --expect digest: {err}");
            process::exit(1);
        });
        if expect != AsRef::<[u8]>::as_ref(&commitment) {
            eprintln!(
                "Error: commitment mismatch: sequencer has {}",
                hex::encode(&expect)
            );
            process::exit(1);
        }
        println!("Commitment matches!");
    }
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> T {
    serde_json::from_str(json).unwrap_or_else(|err| {
        eprintln!("Error: malformed input: {err}");
        process::exit(1);
    })
}
