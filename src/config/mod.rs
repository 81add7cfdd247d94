pub mod cli;
pub mod scoring;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::*;

#[cfg(feature = "cli")]
mod args {
    use crate::config::scoring::ScoringConfig;
    use crate::core::ConfigProvider;
    use crate::core::lexicon::{DEFAULT_MAX_TEXT_LEN, DEFAULT_NEGATION_WINDOW};
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extension, validate_non_empty_string, validate_output_formats,
        validate_path, validate_positive_number, Validate,
    };
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "sentiment-etl")]
    #[command(about = "Score the sentiment of free text or a CSV column")]
    pub struct CliConfig {
        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Write logs as JSON lines")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Classify a single piece of text
        Analyze(AnalyzeArgs),
        /// List the columns of a CSV file
        Columns(ColumnsArgs),
        /// Classify one column of a CSV file
        Batch(BatchArgs),
        /// Run a batch analysis described by a TOML file
        Run(RunArgs),
        /// Classify stdin line by line and alert on negative sentiment
        Monitor(MonitorArgs),
    }

    #[derive(Debug, Clone, Args)]
    pub struct AnalyzeArgs {
        /// Text to analyze; multiple words are joined with spaces
        #[arg(required = true)]
        pub text: Vec<String>,

        #[arg(long, help = "Print the result as JSON")]
        pub json: bool,

        #[command(flatten)]
        pub scoring: ScoringArgs,
    }

    impl AnalyzeArgs {
        pub fn joined_text(&self) -> String {
            self.text.join(" ")
        }
    }

    #[derive(Debug, Clone, Args)]
    pub struct ColumnsArgs {
        #[arg(short, long)]
        pub input: String,
    }

    #[derive(Debug, Clone, Args)]
    pub struct BatchArgs {
        #[arg(short, long)]
        pub input: String,

        #[arg(short, long, help = "Column containing the text to analyze")]
        pub column: String,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "csv,json")]
        pub formats: Vec<String>,

        #[arg(long, help = "Bundle all outputs into a single ZIP archive")]
        pub zip: bool,

        #[arg(long, default_value = "sentiment_output.zip")]
        pub archive_name: String,

        #[arg(long, help = "Enable resource monitoring")]
        pub monitor: bool,

        #[command(flatten)]
        pub scoring: ScoringArgs,
    }

    #[derive(Debug, Clone, Args)]
    pub struct RunArgs {
        #[arg(short, long, default_value = "sentiment.toml")]
        pub config: String,

        /// Override monitoring setting from config
        #[arg(long)]
        pub monitor: Option<bool>,

        /// Show what would be processed without executing
        #[arg(long)]
        pub dry_run: bool,
    }

    #[derive(Debug, Clone, Args)]
    pub struct MonitorArgs {
        #[arg(long, help = "Emit one JSON object per line instead of text")]
        pub json: bool,

        #[command(flatten)]
        pub scoring: ScoringArgs,
    }

    #[derive(Debug, Clone, Args)]
    pub struct ScoringArgs {
        #[arg(long, default_value_t = DEFAULT_NEGATION_WINDOW)]
        pub negation_window: usize,

        #[arg(long, default_value_t = DEFAULT_MAX_TEXT_LEN)]
        pub max_text_len: usize,

        #[arg(long, default_value_t = 1, help = "Worker threads for batch classification")]
        pub parallel: usize,
    }

    impl ScoringArgs {
        pub fn to_config(&self) -> ScoringConfig {
            ScoringConfig {
                negation_window: self.negation_window,
                max_text_len: self.max_text_len,
                parallelism: self.parallel,
                ..ScoringConfig::default()
            }
        }
    }

    impl ConfigProvider for BatchArgs {
        fn input_path(&self) -> &str {
            &self.input
        }

        fn text_column(&self) -> &str {
            &self.column
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn archive_name(&self) -> Option<&str> {
            self.zip.then_some(self.archive_name.as_str())
        }

        fn parallelism(&self) -> usize {
            self.scoring.parallel
        }
    }

    impl Validate for BatchArgs {
        fn validate(&self) -> Result<()> {
            validate_path("input", &self.input)?;
            validate_file_extension("input", &self.input, &["csv"])?;
            validate_non_empty_string("column", &self.column)?;
            validate_path("output_path", &self.output_path)?;
            validate_output_formats("formats", &self.formats)?;
            if self.zip {
                validate_file_extension("archive_name", &self.archive_name, &["zip"])?;
            }
            validate_positive_number("parallel", self.scoring.parallel, 1)?;
            self.scoring.to_config().validate()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_batch_command() {
            let config = CliConfig::try_parse_from([
                "sentiment-etl",
                "batch",
                "--input",
                "reviews.csv",
                "--column",
                "text",
                "--formats",
                "csv,tsv",
                "--zip",
                "--parallel",
                "4",
            ])
            .unwrap();

            match config.command {
                Command::Batch(args) => {
                    assert_eq!(args.formats, vec!["csv", "tsv"]);
                    assert_eq!(args.archive_name(), Some("sentiment_output.zip"));
                    assert_eq!(args.parallelism(), 4);
                    assert!(args.validate().is_ok());
                }
                other => panic!("unexpected command: {:?}", other),
            }
        }

        #[test]
        fn test_batch_defaults() {
            let config = CliConfig::try_parse_from([
                "sentiment-etl",
                "batch",
                "-i",
                "reviews.csv",
                "-c",
                "text",
            ])
            .unwrap();

            let Command::Batch(args) = config.command else {
                panic!("expected batch command");
            };
            assert_eq!(args.output_formats(), &["csv".to_string(), "json".to_string()]);
            assert_eq!(args.archive_name(), None);
            assert_eq!(args.scoring.negation_window, DEFAULT_NEGATION_WINDOW);
        }

        #[test]
        fn test_zero_workers_fail_validation() {
            let config = CliConfig::try_parse_from([
                "sentiment-etl",
                "batch",
                "-i",
                "reviews.csv",
                "-c",
                "text",
                "--parallel",
                "0",
            ])
            .unwrap();

            let Command::Batch(args) = config.command else {
                panic!("expected batch command");
            };
            assert!(args.validate().is_err());
        }

        #[test]
        fn test_analyze_joins_words_and_global_verbose() {
            let config =
                CliConfig::try_parse_from(["sentiment-etl", "analyze", "I", "love", "this!", "-v"])
                    .unwrap();
            assert!(config.verbose);

            let Command::Analyze(args) = config.command else {
                panic!("expected analyze command");
            };
            assert_eq!(args.joined_text(), "I love this!");
        }
    }
}
