//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use docscan_core::{
    ConsumptionPolicy, DecimalRepresentation, InputFormat, LargeObjectStrategy, ReadMode,
    ReaderKind, SourceKind, SymbolRepresentation, TaskKind,
};

/// docscan - Walk structured documents with a forward-only cursor
#[derive(Parser)]
#[command(name = "docscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Policy file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a document and report every value it delivers
    Scan(ScanArgs),

    /// Materialize a document and print it as JSON
    Dump {
        /// Document to read
        file: PathBuf,
    },

    /// Initialize a policy file
    Init {
        /// Force overwrite existing policy
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// Document to read
    pub file: PathBuf,

    /// Search path; repeat to match several
    #[arg(short, long = "path", value_name = "PATH")]
    pub paths: Vec<String>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    pub source: Option<SourceArg>,

    /// Deliver symbols as tokens or as text
    #[arg(long, value_enum)]
    pub symbols: Option<SymbolsArg>,

    /// Decimal representation (JSON input never contains decimals)
    #[arg(long, value_enum)]
    pub decimals: Option<DecimalsArg>,

    /// Read large objects in fixed-size chunks (JSON input never contains them)
    #[arg(long)]
    pub lob_chunks: bool,

    /// Initial window size for incremental readers
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u64).range(1..))]
    pub initial_window_size: Option<u64>,

    #[arg(long, value_enum)]
    pub reader: Option<ReaderArg>,

    /// Re-encode the input before reading it
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormatArg>,

    #[arg(long, value_enum)]
    pub task: Option<TaskArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ScanArgs {
    /// Overrides the policy with every option given on the command line.
    pub fn apply(&self, policy: &mut ConsumptionPolicy) {
        if !self.paths.is_empty() {
            policy.paths = Some(self.paths.clone());
        }
        if let Some(mode) = self.mode {
            policy.mode = mode.into();
        }
        if let Some(source) = self.source {
            policy.source = source.into();
        }
        if let Some(symbols) = self.symbols {
            policy.symbols = symbols.into();
        }
        if let Some(decimals) = self.decimals {
            policy.decimals = decimals.into();
        }
        if self.lob_chunks {
            policy.large_objects = LargeObjectStrategy::Chunked;
        }
        if let Some(size) = self.initial_window_size {
            policy.initial_window_size = Some(usize::try_from(size).unwrap_or(usize::MAX));
        }
        if let Some(reader) = self.reader {
            policy.reader = reader.into();
        }
        if let Some(format) = self.input_format {
            policy.format = format.into();
        }
        if let Some(task) = self.task {
            policy.task = task.into();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Maps a command line enum onto its policy counterpart.
macro_rules! policy_arg {
    ($arg:ident => $target:ty { $($variant:ident => $mapped:ident),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
        pub enum $arg {
            $($variant),+
        }

        impl From<$arg> for $target {
            fn from(arg: $arg) -> Self {
                match arg {
                    $($arg::$variant => <$target>::$mapped),+
                }
            }
        }
    };
}

policy_arg!(ModeArg => ReadMode { Traverse => Traverse, Dom => Dom });
policy_arg!(SourceArg => SourceKind { Buffer => Buffer, Stream => Stream });
policy_arg!(SymbolsArg => SymbolRepresentation { Token => Token, String => String });
policy_arg!(DecimalsArg => DecimalRepresentation { Exact => Exact, Native => Native });
policy_arg!(ReaderArg => ReaderKind {
    Incremental => Incremental,
    NonIncremental => NonIncremental,
});
policy_arg!(InputFormatArg => InputFormat {
    Json => Json,
    CompactJson => CompactJson,
    PrettyJson => PrettyJson,
});
policy_arg!(TaskArg => TaskKind { Cursor => Cursor, Element => Element });

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ScanArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Scan(args) => args,
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_policy() {
        let args = parse(&[
            "docscan",
            "scan",
            "doc.json",
            "-p",
            "items.v",
            "--path",
            "name",
            "--source",
            "stream",
            "--symbols",
            "token",
            "--lob-chunks",
            "--initial-window-size",
            "500",
            "--reader",
            "non-incremental",
            "--input-format",
            "compact-json",
            "--task",
            "element",
        ]);
        let mut policy = ConsumptionPolicy::default();
        args.apply(&mut policy);

        assert_eq!(
            policy.paths,
            Some(vec!["items.v".to_string(), "name".to_string()])
        );
        assert_eq!(policy.source, SourceKind::Stream);
        assert_eq!(policy.symbols, SymbolRepresentation::Token);
        assert_eq!(policy.large_objects, LargeObjectStrategy::Chunked);
        assert_eq!(policy.initial_window_size, Some(500));
        assert_eq!(policy.reader, ReaderKind::NonIncremental);
        assert_eq!(policy.format, InputFormat::CompactJson);
        assert_eq!(policy.task, TaskKind::Element);
        assert_eq!(policy.mode, ReadMode::Traverse);
    }

    #[test]
    fn test_missing_flags_keep_policy() {
        let args = parse(&["docscan", "scan", "doc.json"]);
        let mut policy = ConsumptionPolicy {
            mode: ReadMode::Dom,
            decimals: DecimalRepresentation::Native,
            paths: Some(vec!["a".to_string()]),
            ..ConsumptionPolicy::default()
        };
        let expected = policy.clone();
        args.apply(&mut policy);

        assert_eq!(policy, expected);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let result =
            Cli::try_parse_from(["docscan", "scan", "doc.json", "--initial-window-size", "0"]);
        assert!(result.is_err());
    }
}
