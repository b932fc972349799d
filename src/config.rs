use std::path::PathBuf;

use crate::error::OcrError;
use crate::output::OutputFormat;
use crate::Args;

/// The single image source for this invocation
#[derive(Debug, Clone)]
pub enum Source {
    Path(PathBuf),
    Base64(String),
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub preprocess: bool,
    pub output_format: OutputFormat,
}

impl TryFrom<Args> for Config {
    type Error = OcrError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let source = match (args.image, args.base64) {
            (Some(path), None) => Source::Path(path),
            (None, Some(data)) => Source::Base64(data),
            (None, None) => {
                return Err(OcrError::InvalidArguments(
                    "must provide either --image or --base64".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(OcrError::InvalidArguments(
                    "--image and --base64 cannot be combined".to_string(),
                ))
            }
        };

        Ok(Self {
            source,
            preprocess: !args.no_preprocess,
            output_format: args.output_format,
        })
    }
}
