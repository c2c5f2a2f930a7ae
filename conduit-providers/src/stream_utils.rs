//! Common streaming utilities for all providers

use conduit_core::Error;

/// Common error handling for stream parsing
pub fn handle_parse_error(error: serde_json::Error, context: &str) -> Error {
    Error::Serialization {
        message: format!("Failed to parse {context} stream frame: {error}"),
        source: Some(Box::new(error)),
    }
}

/// Buffer management for line-based streaming protocols
///
/// Network chunks may split a line, or a multi-byte character, anywhere;
/// only complete lines are handed out.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    /// Create a new line buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add data to buffer and return complete, non-blank lines
    pub fn add_data(&mut self, data: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(data);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw).trim().to_string();
            if !line.is_empty() {
                lines.push(line);
            }
        }

        lines
    }

    /// Get any remaining data in the buffer
    pub fn flush(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&rest).trim().to_string();
        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    }
}
