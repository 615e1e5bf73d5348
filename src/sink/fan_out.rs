use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

type Member = Box<dyn Write + Send>;

/// Composite sink that replicates every write to each member destination.
///
/// All members sit behind one lock. A guard obtained from [`MakeWriter`]
/// holds that lock for the whole record, so a line reaches every member
/// before another writer can start, and every member sees the same order.
///
/// Partial failure: each member is attempted regardless of earlier failures
/// and the first error is returned afterwards.
#[derive(Clone, Default)]
pub struct FanOutWriter {
    members: Arc<Mutex<Vec<Member>>>,
}

impl FanOutWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member<W>(self, member: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.members.lock().push(Box::new(member));
        self
    }

    pub fn len(&self) -> usize {
        self.members.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn lock(&self) -> FanOutGuard<'_> {
        FanOutGuard {
            members: self.members.lock(),
        }
    }

    pub fn flush_all(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl fmt::Debug for FanOutWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutWriter")
            .field("members", &self.len())
            .finish()
    }
}

/// Exclusive access to every member of a [`FanOutWriter`].
pub struct FanOutGuard<'a> {
    members: MutexGuard<'a, Vec<Member>>,
}

impl FanOutGuard<'_> {
    fn for_each_member<F>(&mut self, mut op: F) -> io::Result<()>
    where
        F: FnMut(&mut Member) -> io::Result<()>,
    {
        let mut first_error = None;
        for member in &mut *self.members {
            if let Err(e) = op(member)
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Write for FanOutGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.for_each_member(|member| member.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.for_each_member(|member| member.flush())
    }
}

impl<'a> MakeWriter<'a> for FanOutWriter {
    type Writer = FanOutGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.lock()
    }
}
