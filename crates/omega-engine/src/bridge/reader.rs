use std::io::BufRead;

use crate::error::BridgeError;

use super::Record;

/// Iterator over the records of a line-delimited bridge stream.
///
/// Blank lines are skipped. A malformed line yields an error and iteration
/// continues with the next line.
pub struct Records<R> {
    input: R,
    line: String,
}

/// Reads bridge records from `input`, one JSON object per line.
pub fn read_records<R: BufRead>(input: R) -> Records<R> {
    Records {
        input,
        line: String::new(),
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record, BridgeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.input.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(serde_json::from_str(trimmed).map_err(BridgeError::from));
        }
    }
}
