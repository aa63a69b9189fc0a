use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use dnkit_cli::{commands, FlagArgs};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "dnkit")]
#[command(about = "dnkit - Parse, build and compare LDAP distinguished names", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    flags: FlagArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a DN into JSON triples
    Parse {
        /// DN text
        dn: String,

        /// Output JSON file
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Build DN text from JSON triples
    Build {
        /// Input JSON file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output file for the DN
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Split a DN into its RDNs
    Explode {
        /// DN text
        dn: String,

        /// Only keep the values
        #[arg(long)]
        notypes: bool,

        /// Split the first RDN into AVAs instead
        #[arg(long)]
        rdn: bool,

        /// Output file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate DNs, one per line
    Check {
        /// Input file (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Exit with an error if any DN is invalid
        #[arg(long)]
        fail_on_invalid: bool,

        /// Write a JSON report to this file
        #[arg(long)]
        report: Option<String>,
    },

    /// Compare two DNs
    Compare {
        /// First DN
        a: String,

        /// Second DN
        b: String,

        /// Attribute types whose values compare case-insensitively
        #[arg(long, value_delimiter = ',')]
        ignore_case: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let flags = cli.flags.to_flags();

    // Execute command
    match cli.command {
        Commands::Parse { dn, output, pretty } => {
            commands::parse::execute(&dn, flags, output.as_deref(), pretty)
        }

        Commands::Build { input, output } => {
            commands::build::execute(&input, flags, output.as_deref())
        }

        Commands::Explode {
            dn,
            notypes,
            rdn,
            output,
        } => commands::explode::execute(&dn, flags, notypes, rdn, output.as_deref()),

        Commands::Check {
            input,
            fail_on_invalid,
            report,
        } => commands::check::execute(&input, flags, fail_on_invalid, report.as_deref()),

        Commands::Compare { a, b, ignore_case } => {
            if !commands::compare::execute(&a, &b, flags, &ignore_case)? {
                bail!("DNs differ");
            }
            Ok(())
        }
    }
}
