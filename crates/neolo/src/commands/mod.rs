//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use camino::Utf8Path;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use neolo_core::config::Config;
use neolo_core::tokenize::PunctuationConfig;
use tracing::warn;

pub mod analyze;
pub mod info;
pub mod neologisms;
pub mod schema;
pub mod sentences;

/// Tokenizer flags shared by the commands that tokenize.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct PunctuationArgs {
    /// Keep hyphenated words whole
    #[arg(short = 'y', long)]
    pub no_hyphen: bool,

    /// Keep contractions whole
    #[arg(short = 'a', long)]
    pub no_apostrophe: bool,
}

impl PunctuationArgs {
    /// Flags override the config; a flag can only turn a mark off.
    pub const fn resolve(self, config: &Config) -> PunctuationConfig {
        PunctuationConfig {
            hyphen: !(self.no_hyphen || config.no_hyphen),
            apostrophe: !(self.no_apostrophe || config.no_apostrophe),
        }
    }
}

/// Read a file and validate its size against the configured limit.
///
/// Bytes that are not valid UTF-8 are decoded as Latin-1, which accepts
/// any byte sequence.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let bytes = std::fs::read(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    Ok(decode(path, bytes))
}

fn decode(path: &Utf8Path, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(%path, valid_up_to = err.utf8_error().valid_up_to(), "not UTF-8, decoding as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Read a file as lines.
pub fn read_lines(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<Vec<String>> {
    Ok(read_input_file(path, max_bytes)?
        .lines()
        .map(str::to_string)
        .collect())
}

/// Read a list file: one entry per line, blank lines skipped.
pub fn read_list(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<Vec<String>> {
    Ok(read_input_file(path, max_bytes)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// A steady spinner on stderr; hidden when `quiet` or stderr is not a terminal.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> Utf8PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    #[test]
    fn latin1_fallback() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "latin1.txt", b"caf\xe9 na\xefve");
        assert_eq!(read_input_file(&path, None).unwrap(), "café naïve");
    }

    #[test]
    fn size_limit_enforced() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "big.txt", &[b'a'; 64]);
        let err = read_input_file(&path, Some(10)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
        assert!(read_input_file(&path, None).is_ok());
    }

    #[test]
    fn list_skips_blank_lines() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "abbrevs.txt", b"Mr.\n\n  e.g.  \n");
        assert_eq!(read_list(&path, None).unwrap(), vec!["Mr.", "e.g."]);
    }

    #[test]
    fn punctuation_flags_combine_with_config() {
        let config = Config {
            no_apostrophe: true,
            ..Config::default()
        };
        let args = PunctuationArgs {
            no_hyphen: true,
            no_apostrophe: false,
        };
        assert_eq!(
            args.resolve(&config),
            PunctuationConfig {
                hyphen: false,
                apostrophe: false
            }
        );
    }
}
