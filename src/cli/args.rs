// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use crate::inference::{DEFAULT_DETECTION_CONFIDENCE, DEFAULT_TRACKING_CONFIDENCE};
use crate::model::DEFAULT_MODEL;
use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Examples:
    sign-inference detect --model hand_landmark.onnx --source frame.jpg
    sign-inference detect -m hand_landmark.onnx -s f1.png f2.png f3.png
    sign-inference detect --source payload.txt --detection-conf 0.7
    sign-inference voice --text "hello thankyou bye""#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a sequence of frames as one session
    Detect(DetectArgs),
    /// Translate text into a sequence of signs
    Voice(VoiceArgs),
}

/// Arguments for the detect command.
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Path to ONNX hand-landmark model file
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Frames in order: image files, or text files holding a data-URL payload
    #[arg(short, long, num_args = 1.., required = true)]
    pub source: Vec<String>,

    /// Minimum hand-presence score when no hand was seen on the previous frame
    #[arg(long, default_value_t = DEFAULT_DETECTION_CONFIDENCE)]
    pub detection_conf: f32,

    /// Minimum hand-presence score while a hand is being tracked
    #[arg(long, default_value_t = DEFAULT_TRACKING_CONFIDENCE)]
    pub tracking_conf: f32,

    /// Intra-op threads for the model (0 = runtime default)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Arguments for the voice command.
#[derive(Args, Debug)]
pub struct VoiceArgs {
    /// Transcribed text
    #[arg(short, long)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_detect_args_defaults() {
        let args = Cli::parse_from(["app", "detect", "--source", "frame.jpg"]);
        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.model, DEFAULT_MODEL);
                assert_eq!(detect_args.source, vec!["frame.jpg".to_string()]);
                assert!((detect_args.detection_conf - 0.6).abs() < f32::EPSILON);
                assert!((detect_args.tracking_conf - 0.6).abs() < f32::EPSILON);
                assert_eq!(detect_args.threads, 0);
                assert!(detect_args.verbose);
            }
            Commands::Voice(_) => panic!("expected detect"),
        }
    }

    #[test]
    fn test_detect_args_custom() {
        let args = Cli::parse_from([
            "app",
            "detect",
            "--model",
            "custom.onnx",
            "--source",
            "a.png",
            "b.png",
            "--detection-conf",
            "0.8",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Detect(detect_args) => {
                assert_eq!(detect_args.model, "custom.onnx");
                assert_eq!(detect_args.source, vec!["a.png".to_string(), "b.png".to_string()]);
                assert!((detect_args.detection_conf - 0.8).abs() < f32::EPSILON);
                assert!(!detect_args.verbose);
            }
            Commands::Voice(_) => panic!("expected detect"),
        }
    }

    #[test]
    fn test_detect_requires_source() {
        assert!(Cli::try_parse_from(["app", "detect"]).is_err());
    }

    #[test]
    fn test_voice_args() {
        let args = Cli::parse_from(["app", "voice", "--text", "hello bye"]);
        match args.command {
            Commands::Voice(voice_args) => assert_eq!(voice_args.text, "hello bye"),
            Commands::Detect(_) => panic!("expected voice"),
        }
    }
}
