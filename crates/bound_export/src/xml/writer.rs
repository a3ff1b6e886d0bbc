//! Indentation-aware XML element writer

use std::borrow::Cow;
use std::fmt::Display;
use std::io::{self, Write};

use crate::foundation::math::{Quat, Vec3};

/// Streaming writer for the CodeWalker-style XML dialect
///
/// Elements opened with [`open`](Self::open) are closed in reverse order by
/// [`close`](Self::close); nesting drives indentation.
pub struct XmlWriter<W: Write> {
    out: W,
    open: Vec<String>,
}

impl<W: Write> XmlWriter<W> {
    /// Wrap a byte sink
    pub fn new(out: W) -> Self {
        Self {
            out,
            open: Vec::new(),
        }
    }

    /// Write the `<?xml ...?>` declaration
    pub fn declaration(&mut self) -> io::Result<()> {
        writeln!(self.out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")
    }

    /// Open an element without attributes
    pub fn open(&mut self, name: &str) -> io::Result<()> {
        self.open_with(name, &[])
    }

    /// Open an element with attributes
    pub fn open_with(&mut self, name: &str, attributes: &[(&str, String)]) -> io::Result<()> {
        self.indent()?;
        write!(self.out, "<{name}")?;
        self.attributes(attributes)?;
        writeln!(self.out, ">")?;
        self.open.push(name.to_string());
        Ok(())
    }

    /// Close the innermost open element
    pub fn close(&mut self) -> io::Result<()> {
        let Some(name) = self.open.pop() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no open XML element to close",
            ));
        };
        self.indent()?;
        writeln!(self.out, "</{name}>")
    }

    /// Self-closing element with attributes
    pub fn empty(&mut self, name: &str, attributes: &[(&str, String)]) -> io::Result<()> {
        self.indent()?;
        write!(self.out, "<{name}")?;
        self.attributes(attributes)?;
        writeln!(self.out, " />")
    }

    /// `<Name value="..." />`
    pub fn value(&mut self, name: &str, value: impl Display) -> io::Result<()> {
        self.empty(name, &[("value", value.to_string())])
    }

    /// `<Name x="..." y="..." z="..." />`
    pub fn vector(&mut self, name: &str, v: &Vec3) -> io::Result<()> {
        self.empty(
            name,
            &[("x", v.x.to_string()), ("y", v.y.to_string()), ("z", v.z.to_string())],
        )
    }

    /// `<Name x="..." y="..." z="..." w="..." />`
    pub fn quaternion(&mut self, name: &str, q: &Quat) -> io::Result<()> {
        self.empty(
            name,
            &[
                ("x", q.i.to_string()),
                ("y", q.j.to_string()),
                ("z", q.k.to_string()),
                ("w", q.w.to_string()),
            ],
        )
    }

    /// Inline text element, self-closing when `text` is empty
    pub fn text(&mut self, name: &str, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return self.empty(name, &[]);
        }
        self.indent()?;
        writeln!(self.out, "<{name}>{}</{name}>", escape(text))
    }

    /// Element holding one text row per line, self-closing when empty
    pub fn lines<I, S>(&mut self, name: &str, lines: I) -> io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter().peekable();
        if lines.peek().is_none() {
            return self.empty(name, &[]);
        }

        self.indent()?;
        writeln!(self.out, "<{name}>")?;
        for line in lines {
            self.write_indent(self.open.len() + 1)?;
            writeln!(self.out, "{}", escape(line.as_ref()))?;
        }
        self.indent()?;
        writeln!(self.out, "</{name}>")
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Flush and return the sink
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(name) = self.open.last() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("XML element <{name}> left open"),
            ));
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn attributes(&mut self, attributes: &[(&str, String)]) -> io::Result<()> {
        for (key, value) in attributes {
            write!(self.out, " {key}=\"{}\"", escape(value))?;
        }
        Ok(())
    }

    fn indent(&mut self) -> io::Result<()> {
        self.write_indent(self.open.len())
    }

    fn write_indent(&mut self, depth: usize) -> io::Result<()> {
        for _ in 0..depth {
            self.out.write_all(b"  ")?;
        }
        Ok(())
    }
}

/// Escape text for element content and attribute values
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
