//! Speech adapter: dictation through an external recognizer command.
//!
//! The command captures one utterance and prints the transcript on stdout.
//! The session locale is passed in the `RXGUARD_SPEECH_LOCALE` environment
//! variable of the child process.

use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::ports::{SpeechCapability, SpeechError, SpeechRecognizer};

pub const LOCALE_ENV: &str = "RXGUARD_SPEECH_LOCALE";

/// Recognizer backed by a user-configured program.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// Parse a shell-style command line such as `whisper-listen --once`.
    ///
    /// # Errors
    /// Returns `SpeechError::InvalidCommand` for unbalanced quotes or an empty line.
    pub fn from_command_line(line: &str) -> Result<Self, SpeechError> {
        let mut words =
            shell_words::split(line).map_err(|e| SpeechError::InvalidCommand(e.to_string()))?;
        if words.is_empty() {
            return Err(SpeechError::InvalidCommand("empty command".to_string()));
        }
        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
        })
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn recognize_once(&self, locale: &str) -> Result<String, SpeechError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .env(LOCALE_ENV, locale)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| SpeechError::Launch(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Failed(format!(
                "{} ({})",
                output.status,
                stderr.trim()
            )));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            return Err(SpeechError::NoMatch);
        }
        Ok(transcript)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Build the dictation capability from configuration.
///
/// No configured command means dictation is unavailable.
///
/// # Errors
/// Returns an error if the configured command line cannot be parsed.
pub fn capability_from_config(config: &ClientConfig) -> crate::Result<SpeechCapability> {
    match config.speech_command.as_deref() {
        None => Ok(SpeechCapability::Unavailable),
        Some(line) => {
            let recognizer = CommandRecognizer::from_command_line(line)?;
            tracing::info!(engine = recognizer.name(), "Voice dictation enabled");
            Ok(SpeechCapability::Available(Arc::new(recognizer)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let r = CommandRecognizer::from_command_line(r#"listen --model "base en" --once"#).unwrap();
        assert_eq!(r.program, "listen");
        assert_eq!(r.args, vec!["--model", "base en", "--once"]);

        assert!(matches!(
            CommandRecognizer::from_command_line("  "),
            Err(SpeechError::InvalidCommand(_))
        ));
        assert!(matches!(
            CommandRecognizer::from_command_line("listen 'unterminated"),
            Err(SpeechError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_capability_from_config() {
        let config = ClientConfig::default();
        assert!(!capability_from_config(&config).unwrap().is_available());

        let config = ClientConfig {
            speech_command: Some("listen --once".to_string()),
            ..ClientConfig::default()
        };
        assert!(capability_from_config(&config).unwrap().is_available());

        let config = ClientConfig {
            speech_command: Some("listen \"oops".to_string()),
            ..ClientConfig::default()
        };
        assert!(capability_from_config(&config).is_err());
    }

    #[test]
    fn test_missing_program_fails_to_launch() {
        let r = CommandRecognizer::from_command_line("rxguard-no-such-recognizer-binary").unwrap();
        assert!(matches!(r.recognize_once("en-US"), Err(SpeechError::Launch(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_transcript_from_stdout_with_locale() {
        let r = CommandRecognizer::from_command_line(r#"sh -c 'echo "  take with food $RXGUARD_SPEECH_LOCALE "'"#)
            .unwrap();
        assert_eq!(r.recognize_once("en-GB").unwrap(), "take with food en-GB");
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_transcript_is_no_match() {
        let r = CommandRecognizer::from_command_line("sh -c 'printf \"\"'").unwrap();
        assert_eq!(r.recognize_once("en-US"), Err(SpeechError::NoMatch));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let r = CommandRecognizer::from_command_line("sh -c 'echo mic busy >&2; exit 3'").unwrap();
        match r.recognize_once("en-US") {
            Err(SpeechError::Failed(msg)) => assert!(msg.contains("mic busy")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
