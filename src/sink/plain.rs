use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Text,
    Escape,
    Sequence,
}

/// Forwards writes with ANSI escape sequences removed.
///
/// Wraps the log file so a coloured console line lands in the file as plain
/// text. Sequences split across writes are still removed.
#[derive(Debug)]
pub struct PlainText<W> {
    inner: W,
    state: EscapeState,
}

impl<W: Write> PlainText<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            state: EscapeState::Text,
        }
    }
}

impl<W: Write> Write for PlainText<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let mut plain = Vec::with_capacity(buf.len());
        for &byte in buf {
            self.state = match (self.state, byte) {
                (EscapeState::Text, 0x1b) => EscapeState::Escape,
                (EscapeState::Text, b) => {
                    plain.push(b);
                    EscapeState::Text
                }
                (EscapeState::Escape, b'[') => EscapeState::Sequence,
                (EscapeState::Escape, _) => EscapeState::Text,
                // CSI final byte
                (EscapeState::Sequence, 0x40..=0x7e) => EscapeState::Text,
                (EscapeState::Sequence, _) => EscapeState::Sequence,
            };
        }
        self.inner.write_all(&plain)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
