//! Scan-decode boundary
//!
//! The core treats barcode decoding as a black box that produces decoded
//! strings; any non-empty string is accepted as-is, with no format
//! validation. The shipped source reads line-per-code from standard input,
//! which is exactly how USB HID barcode scanners present themselves.

use std::io::BufRead;

use anyhow::Result;

/// A source of decoded barcode strings.
pub trait DecodeSource {
    /// Begin producing codes.
    fn start(&mut self) -> Result<()>;
    /// Next decoded code; `None` once the source is exhausted or stopped.
    fn poll(&mut self) -> Result<Option<String>>;
    /// Stop producing codes. Idempotent: stopping a source that is not
    /// running is a no-op, not an error.
    fn stop(&mut self) -> Result<()>;
}

/// Reads one barcode per line from standard input.
pub struct StdinScanner {
    running: bool,
}

impl StdinScanner {
    pub fn new() -> Self {
        Self { running: false }
    }
}

impl Default for StdinScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeSource for StdinScanner {
    fn start(&mut self) -> Result<()> {
        self.running = true;
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<String>> {
        if !self.running {
            return Ok(None);
        }

        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            // EOF ends the scanning session.
            if stdin.lock().read_line(&mut line)? == 0 {
                self.running = false;
                return Ok(None);
            }
            let code = line.trim();
            if !code.is_empty() {
                return Ok(Some(code.to_string()));
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        self.running = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_idempotent() {
        let mut scanner = StdinScanner::new();
        // Never started.
        scanner.stop().unwrap();
        scanner.stop().unwrap();

        scanner.start().unwrap();
        scanner.stop().unwrap();
        scanner.stop().unwrap();
    }

    #[test]
    fn poll_without_start_yields_nothing() {
        let mut scanner = StdinScanner::new();
        assert_eq!(scanner.poll().unwrap(), None);
    }
}
