use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};
use t3match_value::{Object, Verdict};
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

enum Target {
    Stream(Box<dyn WriteColor + Send>),
    Buffer(Buffer),
}

impl Target {
    fn writer(&mut self) -> &mut dyn WriteColor {
        match self {
            Target::Stream(w) => w.as_mut(),
            Target::Buffer(b) => b,
        }
    }
}

/// Destination of the `log` builtin. Writes from concurrent callers are
/// serialized line by line.
pub struct LogSink {
    target: Mutex<Target>,
}

impl LogSink {
    pub fn new(writer: impl WriteColor + Send + 'static) -> Self {
        Self {
            target: Mutex::new(Target::Stream(Box::new(writer))),
        }
    }

    pub fn stdout(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stdout(color_choice))
    }

    /// An in-memory sink, read back with [`LogSink::contents`].
    pub fn buffer(color: bool) -> Self {
        let buffer = if color {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        };
        Self {
            target: Mutex::new(Target::Buffer(buffer)),
        }
    }

    /// Everything logged so far, for sinks created with [`LogSink::buffer`].
    pub fn contents(&self) -> Option<String> {
        match &*self.lock() {
            Target::Buffer(b) => Some(String::from_utf8_lossy(b.as_slice()).into_owned()),
            Target::Stream(_) => None,
        }
    }

    /// Writes the arguments on one line, separated by spaces.
    pub fn write_line(&self, args: &[Object]) -> io::Result<()> {
        let mut target = self.lock();
        let out = target.writer();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                write!(out, " ")?;
            }
            match arg {
                Object::Verdict(v) => write_verdict(out, *v)?,
                _ => write!(out, "{}", arg)?,
            }
        }
        writeln!(out)?;
        out.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Target> {
        // A panic while logging leaves the writer usable.
        self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn verdict_color(verdict: Verdict) -> Option<Color> {
    match verdict {
        Verdict::None => None,
        Verdict::Pass => Some(Color::Green),
        Verdict::Inconc => Some(Color::Yellow),
        Verdict::Fail | Verdict::Error => Some(Color::Red),
    }
}

fn write_verdict(out: &mut dyn WriteColor, verdict: Verdict) -> io::Result<()> {
    match verdict_color(verdict) {
        Some(color) => {
            out.set_color(ColorSpec::new().set_fg(Some(color)))?;
            write!(out, "{}", verdict)?;
            out.reset()
        }
        None => write!(out, "{}", verdict),
    }
}
