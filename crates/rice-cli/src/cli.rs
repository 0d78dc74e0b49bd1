use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "RICE++ CLI - Design protein recombination libraries with SCHEMA contact energies and RASPP crossover optimization.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the structural contact map of the reference parent in alignment columns.
    Contacts(ContactsArgs),
    /// Score contacts and enumerate crossover placements to produce the RASPP curve.
    Design(DesignArgs),
}

/// Inputs that locate the reference structure within the parent alignment.
#[derive(Args, Debug, Clone)]
pub struct StructureArgs {
    /// Structure/parent pairwise alignment (ClustalW format) linking the PDB sequence to a parent.
    /// Without it, the PDB HEADER id code must name a parent in the alignment.
    #[arg(long, value_name = "PATH")]
    pub pdbal: Option<PathBuf>,

    /// Chains of the structure to read (the blank chain is always included).
    #[arg(long, value_name = "ID", num_args = 1.., value_delimiter = ',')]
    pub chains: Vec<char>,

    /// Heavy-atom distance cutoff in Angstroms for two residues to be in contact.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,
}

/// Arguments for the `contacts` subcommand.
#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Reference structure in PDB format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub pdb: PathBuf,

    /// Multiple sequence alignment of the parents (ClustalW format).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub msa: PathBuf,

    #[command(flatten)]
    pub structure: StructureArgs,

    /// Path for the contact file. Written to standard output when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Contact scoring strategies selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerChoice {
    /// Broken-contact count (1 per contact whose residue pair is native to neither parent).
    Schema,
    /// Flat penalty whenever the parents disagree on the contacting residue pair.
    Mismatch,
}

/// Arguments for the `design` subcommand.
#[derive(Args, Debug)]
pub struct DesignArgs {
    /// Multiple sequence alignment of the parents (ClustalW format).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub msa: PathBuf,

    /// Reference structure in PDB format, used to compute contacts.
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present = "contacts",
        conflicts_with = "contacts"
    )]
    pub pdb: Option<PathBuf>,

    /// Precomputed contact file, used instead of a structure.
    #[arg(long, value_name = "PATH")]
    pub contacts: Option<PathBuf>,

    #[command(flatten)]
    pub structure: StructureArgs,

    /// Also write the computed contacts to this file.
    #[arg(long, value_name = "PATH", requires = "pdb")]
    pub contacts_out: Option<PathBuf>,

    /// Number of crossovers (fragments minus one).
    #[arg(short = 'x', long, value_name = "INT")]
    pub crossovers: Option<usize>,

    /// Minimum number of variable positions in every fragment.
    #[arg(long, value_name = "INT")]
    pub min_fragment: Option<usize>,

    /// Width of the diversity bins used to build the curve.
    #[arg(long, value_name = "FLOAT")]
    pub bin_width: Option<f64>,

    /// Contact scoring strategy [default: mismatch].
    #[arg(long, value_enum, value_name = "NAME")]
    pub scorer: Option<ScorerChoice>,

    /// Report only the Pareto frontier of the curve.
    #[arg(long)]
    pub frontier: bool,

    /// Path for the curve report. Written to standard output when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn design_requires_a_contact_source() {
        let result = Cli::try_parse_from(["rice", "design", "-m", "parents.aln", "-x", "3"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "rice",
            "design",
            "-m",
            "parents.aln",
            "--contacts",
            "contacts.txt",
            "-x",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Design(args) => {
                assert_eq!(args.crossovers, Some(3));
                assert_eq!(args.contacts, Some(PathBuf::from("contacts.txt")));
                assert!(args.pdb.is_none());
            }
            _ => panic!("Expected 'design' subcommand"),
        }
    }

    #[test]
    fn chains_accept_lists() {
        let cli = Cli::try_parse_from([
            "rice", "contacts", "-p", "x.pdb", "-m", "x.aln", "--chains", "A,B", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Contacts(args) => assert_eq!(args.structure.chains, vec!['A', 'B']),
            _ => panic!("Expected 'contacts' subcommand"),
        }
    }

    #[test]
    fn pdb_and_contacts_conflict() {
        let result = Cli::try_parse_from([
            "rice",
            "design",
            "-m",
            "parents.aln",
            "-p",
            "x.pdb",
            "--contacts",
            "contacts.txt",
        ]);
        assert!(result.is_err());
    }
}
