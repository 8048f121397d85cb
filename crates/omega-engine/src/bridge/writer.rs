use std::io::{self, Write};

use crate::error::BridgeError;

use super::{Action, Record};

/// Writes bridge records as line-delimited JSON.
///
/// Every record is flushed as soon as it is written so a supervisor reading
/// the other end of a pipe sees it without delay.
pub struct CommandBridge<W: Write> {
    out: W,
    sent: u64,
}

impl CommandBridge<io::Stdout> {
    /// Bridge over the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CommandBridge<W> {
    pub fn new(out: W) -> Self {
        Self { out, sent: 0 }
    }

    /// Number of records written so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn send(&mut self, message: impl Into<String>) -> Result<(), BridgeError> {
        self.emit(&Record::message(message))
    }

    pub fn start(&mut self) -> Result<(), BridgeError> {
        self.command(Action::Start)
    }

    pub fn stop(&mut self) -> Result<(), BridgeError> {
        self.command(Action::Stop)
    }

    pub fn done(&mut self) -> Result<(), BridgeError> {
        self.command(Action::Done)
    }

    pub fn screenshot(&mut self) -> Result<(), BridgeError> {
        self.command(Action::Screenshot)
    }

    pub fn command(&mut self, action: Action) -> Result<(), BridgeError> {
        self.emit(&Record::command(action))
    }

    /// Writes one record followed by a newline.
    pub fn emit(&mut self, record: &Record) -> Result<(), BridgeError> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;

        self.sent += 1;
        log::trace!("bridge record #{}: {record:?}", self.sent);
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(bridge: CommandBridge<Vec<u8>>) -> Vec<String> {
        String::from_utf8(bridge.into_inner())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn one_record_per_line() {
        let mut bridge = CommandBridge::new(Vec::new());
        bridge.start().unwrap();
        bridge.send("halfway").unwrap();
        bridge.screenshot().unwrap();
        bridge.stop().unwrap();
        bridge.done().unwrap();
        assert_eq!(bridge.sent(), 5);

        assert_eq!(
            lines(bridge),
            vec![
                r#"{"type":"command","action":"start","message":"Start recording"}"#,
                r#"{"type":"message","message":"halfway"}"#,
                r#"{"type":"command","action":"screenshot","message":"Take screenshot"}"#,
                r#"{"type":"command","action":"stop","message":"Stop recording"}"#,
                r#"{"type":"command","action":"done","message":"Done"}"#,
            ]
        );
    }

    #[test]
    fn messages_are_escaped_onto_one_line() {
        let mut bridge = CommandBridge::new(Vec::new());
        bridge.send("two\nlines").unwrap();
        assert_eq!(lines(bridge), vec![r#"{"type":"message","message":"two\nlines"}"#]);
    }

    #[test]
    fn write_failures_surface_and_are_not_counted() {
        let mut bridge = CommandBridge::new(Broken);
        assert!(bridge.start().is_err());
        assert_eq!(bridge.sent(), 0);
    }
}
