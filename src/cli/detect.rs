// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fs;
use std::path::Path;
use std::process;

use crate::cli::args::{DetectArgs, VoiceArgs};
use crate::frame::{PAYLOAD_SEPARATOR, encode_payload};
use crate::model::OnnxDetectorFactory;
use crate::results::Classification;
use crate::{InferenceConfig, Session, VERSION, vocabulary};
use crate::{error, info, section, success, verbose, warn};

/// Run the detect command: classify every source as consecutive frames of one session.
pub fn run_detection(args: &DetectArgs) {
    let config = InferenceConfig::new()
        .with_detection_confidence(args.detection_conf)
        .with_tracking_confidence(args.tracking_conf)
        .with_threads(args.threads);

    if let Err(e) = config.validate() {
        error!("{e}");
        process::exit(1);
    }

    println!("Ultralytics {VERSION} 🚀 sign-inference");
    verbose!("Model: {}", args.model);

    let mut session = Session::with_factory(OnnxDetectorFactory::with_config(&args.model, config));

    section!("Frames");
    let total = args.source.len();
    let mut recognized = 0usize;
    for (i, source) in args.source.iter().enumerate() {
        let payload = match read_payload(Path::new(source)) {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping {source}: {e}");
                continue;
            }
        };

        let result = session.classify_frame(&payload);
        if !result.label.is_sentinel() {
            recognized += 1;
        }
        report(i + 1, total, source, &result);
    }

    if recognized > 0 {
        success!("{recognized}/{total} frames recognized");
    } else {
        warn!("No gesture recognized in {total} frames");
    }
}

/// Run the voice command: print the sign sequence for the text.
pub fn run_voice(args: &VoiceArgs) {
    let signs = vocabulary::lookup(&args.text);
    if signs.is_empty() {
        warn!("No known sign words in '{}'", args.text);
        return;
    }
    for sign in signs {
        info!("{:<12} {}", sign.label, sign.image);
    }
}

/// Load a frame payload from disk.
///
/// Text files that already hold a `marker,data` payload are used as-is;
/// anything else is treated as an encoded image and wrapped in a data URL.
fn read_payload(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    if let Ok(text) = std::str::from_utf8(&bytes) {
        let text = text.trim();
        if text.starts_with("data:") || text.contains(PAYLOAD_SEPARATOR) {
            return Ok(text.to_string());
        }
    }
    Ok(encode_payload(&bytes))
}

fn report(index: usize, total: usize, source: &str, result: &Classification) {
    println!("frame {index}/{total} {source}: {result}");
}
