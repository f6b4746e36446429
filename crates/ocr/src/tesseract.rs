//! `tesseract` CLI engine.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use slidescribe_core::{Error, Result, SetupError, TextEngine};

const TOOL: &str = "tesseract";

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Clone)]
pub struct Tesseract {
    binary: PathBuf,
    language: String,

    /// Page segmentation mode (`--psm`); engine default when `None`.
    psm: Option<u8>,
}

impl Default for Tesseract {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(TOOL),
            language: DEFAULT_LANGUAGE.to_string(),
            psm: None,
        }
    }
}

impl Tesseract {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Language code(s) such as `eng` or `eng+deu`.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = Some(psm);
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl TextEngine for Tesseract {
    fn ensure_available(&self) -> Result<()> {
        match Command::new(&self.binary).arg("--version").output() {
            Ok(_) => Ok(()),
            Err(e) => {
                let reason = if e.kind() == io::ErrorKind::NotFound {
                    format!(
                        "{} not found. Install with: brew install tesseract (macOS) \
                         or apt install tesseract-ocr (Linux)",
                        self.binary.display()
                    )
                } else {
                    e.to_string()
                };
                Err(SetupError::MissingDependency {
                    tool: TOOL.to_string(),
                    reason,
                }
                .into())
            }
        }
    }

    fn recognize(&self, image: &Path) -> Result<String> {
        log::debug!("Running {} on {}", TOOL, image.display());

        let mut command = Command::new(&self.binary);
        command
            .arg(image.as_os_str())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language);
        if let Some(psm) = self.psm {
            command.arg("--psm").arg(psm.to_string());
        }

        let output = command.output().map_err(|e| Error::ToolFailed {
            tool: TOOL.to_string(),
            reason: format!("failed to run: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ToolFailed {
                tool: TOOL.to_string(),
                reason: stderr.trim().to_string(),
            });
        }

        if !output.stderr.is_empty() {
            log::debug!(
                "{} warnings for {}: {}",
                TOOL,
                image.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
