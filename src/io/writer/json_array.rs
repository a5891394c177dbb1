//! Append-in-place JSON array writer.
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use super::WriterTrait;
use crate::error::Error;
use crate::pipelines::qa::QaRecord;

const INDENT: &[u8] = b"    ";

/// A seekable destination whose length can be cut back.
trait ArrayFile: Write + Seek {
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl ArrayFile for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Closing bytes of an array holding `nb_items` elements.
fn tail(nb_items: usize) -> &'static [u8] {
    if nb_items == 0 {
        b"]"
    } else {
        b"\n]"
    }
}

/// Pretty prints an array element, indented one level.
fn element<T: Serialize>(item: &T) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    item.serialize(&mut ser)?;

    let mut element = Vec::with_capacity(buf.len() + INDENT.len());
    for (idx, line) in buf.split(|b| *b == b'\n').enumerate() {
        if idx > 0 {
            element.push(b'\n');
        }
        element.extend_from_slice(INDENT);
        element.extend_from_slice(line);
    }
    Ok(element)
}

/// Bytes replacing the tail of an array of `nb_items` elements to append `items` to it.
fn elements<T: Serialize>(items: &[T], nb_items: usize) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 || nb_items > 0 {
            buf.push(b',');
        }
        buf.push(b'\n');
        buf.extend(element(item)?);
    }
    buf.extend_from_slice(b"\n]");
    Ok(buf)
}

fn write_from<F: ArrayFile>(file: &mut F, start: u64, bytes: &[u8]) -> io::Result<()> {
    file.seek(SeekFrom::Start(start))?;
    file.write_all(bytes)?;
    file.flush()
}

/// Overwrites the tail of an array of `nb_items` elements with `bytes`.
///
/// On failure, whatever got written is cut off and the previous tail is put back,
/// leaving the previous array untouched.
fn append_elements<F: ArrayFile>(file: &mut F, nb_items: usize, bytes: &[u8]) -> io::Result<()> {
    let tail = tail(nb_items);
    let end = file.seek(SeekFrom::End(0))?;
    let start = end.checked_sub(tail.len() as u64).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "array file shorter than its tail")
    })?;

    if let Err(e) = write_from(file, start, bytes) {
        file.truncate(start)?;
        write_from(file, start, tail)?;
        return Err(e);
    }
    Ok(())
}

/// Writes records in a pretty-printed JSON array.
///
/// Elements are appended by overwriting the closing bracket,
/// so existing content is never rewritten once the writer is opened.
/// A failed write is rolled back: the file stays a valid array holding every previously written record.
///
/// The file layout is the one of serde_json's pretty printer with a 4-space indent:
/// `[]` when empty, and a `\n]` ending otherwise.
pub struct JsonArrayWriter {
    dst: PathBuf,
    file: File,
    nb_items: usize,
}

impl JsonArrayWriter {
    /// Reads the existing content of the destination.
    /// Absent, empty or invalid files yield no items.
    fn load_existing(dst: &Path) -> Vec<Value> {
        let content = match fs::read_to_string(dst) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("{:?}: unreadable content, starting a new array ({})", dst, e);
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(values) => values,
            Err(e) => {
                warn!("{:?}: not a JSON array, starting a new one ({})", dst, e);
                Vec::new()
            }
        }
    }

    /// Creates (or truncates) `path` and writes `values` in it.
    fn create_with(path: &Path, values: &[Value]) -> Result<(), Error> {
        let mut file = File::create(path)?;
        file.write_all(b"[]")?;
        if !values.is_empty() {
            append_elements(&mut file, 0, &elements(values, 0)?)?;
        }
        file.sync_all()?;
        Ok(())
    }

    fn tmp_path(dst: &Path) -> PathBuf {
        let mut name = dst.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        dst.with_file_name(name)
    }

    fn append<T: Serialize>(&mut self, items: &[T]) -> Result<(), Error> {
        if items.is_empty() {
            return Ok(());
        }

        let bytes = elements(items, self.nb_items)?;
        if let Err(e) = append_elements(&mut self.file, self.nb_items, &bytes) {
            warn!(
                "{:?}: could not append {} records, file rolled back ({})",
                self.dst,
                items.len(),
                e
            );
            return Err(e.into());
        }

        self.nb_items += items.len();
        Ok(())
    }
}

impl WriterTrait for JsonArrayWriter {
    type Item = QaRecord;

    /// Opens `dst`, keeping the elements of an existing JSON array.
    ///
    /// Existing elements are written back in the writer's layout in a temporary file
    /// that replaces `dst` once complete, so that a failure leaves `dst` as it was.
    fn new(dst: &Path) -> Result<Self, Error> {
        let existing = Self::load_existing(dst);
        debug!("{:?}: {} existing records", dst, existing.len());

        if existing.is_empty() {
            Self::create_with(dst, &existing)?;
        } else {
            let tmp = Self::tmp_path(dst);
            if let Err(e) = Self::create_with(&tmp, &existing) {
                let _ = fs::remove_file(&tmp);
                return Err(e);
            }
            fs::rename(&tmp, dst)?;
        }

        let file = OpenOptions::new().write(true).open(dst)?;
        Ok(Self {
            dst: dst.to_path_buf(),
            file,
            nb_items: existing.len(),
        })
    }

    fn write(&mut self, vals: &[QaRecord]) -> Result<(), Error> {
        self.append(vals)
    }

    fn write_single(&mut self, val: &QaRecord) -> Result<(), Error> {
        self.append(std::slice::from_ref(val))
    }

    fn len(&self) -> usize {
        self.nb_items
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn record(i: usize) -> QaRecord {
        QaRecord {
            question: format!("question {i}?"),
            context: format!("context {i}"),
            answer: format!("answer {i}."),
        }
    }

    fn read_back(path: &Path) -> Vec<QaRecord> {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    /// In-memory file refusing to grow past `cap` bytes, after a partial write.
    struct Capped {
        inner: Cursor<Vec<u8>>,
        cap: u64,
    }

    impl Capped {
        fn new(cap: u64) -> Self {
            Self {
                inner: Cursor::new(b"[]".to_vec()),
                cap,
            }
        }
    }

    impl Write for Capped {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let pos = self.inner.position();
            if pos >= self.cap {
                return Err(io::Error::new(io::ErrorKind::Other, "file too large"));
            }
            let n = buf.len().min((self.cap - pos) as usize);
            self.inner.write(&buf[..n])
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for Capped {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    impl ArrayFile for Capped {
        fn truncate(&mut self, len: u64) -> io::Result<()> {
            self.inner.get_mut().truncate(len as usize);
            Ok(())
        }
    }

    #[test]
    fn new_file_is_empty_array() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("out.json");
        let w = JsonArrayWriter::new(&path).unwrap();
        assert!(w.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn valid_after_each_write() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("out.json");
        let mut w = JsonArrayWriter::new(&path).unwrap();

        w.write(&[record(0), record(1)]).unwrap();
        assert_eq!(read_back(&path), vec![record(0), record(1)]);

        w.write(&[]).unwrap();
        w.write_single(&record(2)).unwrap();
        assert_eq!(read_back(&path), vec![record(0), record(1), record(2)]);
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn matches_pretty_printer() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("out.json");
        let mut w = JsonArrayWriter::new(&path).unwrap();
        let records = vec![record(0), record(1)];
        w.write(&records[..1]).unwrap();
        w.write(&records[1..]).unwrap();

        let mut expected = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(
            &mut expected,
            PrettyFormatter::with_indent(INDENT),
        );
        records.serialize(&mut ser).unwrap();

        assert_eq!(fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn failed_append_is_rolled_back() {
        let mut f = Capped::new(512);
        append_elements(&mut f, 0, &elements(&[record(0)], 0).unwrap()).unwrap();

        let big = QaRecord {
            answer: "x".repeat(20_000),
            ..record(1)
        };
        assert!(append_elements(&mut f, 1, &elements(&[big], 1).unwrap()).is_err());
        let content: Vec<QaRecord> = serde_json::from_slice(f.inner.get_ref()).unwrap();
        assert_eq!(content, vec![record(0)]);

        // still appendable after the failure
        append_elements(&mut f, 1, &elements(&[record(2)], 1).unwrap()).unwrap();
        let content: Vec<QaRecord> = serde_json::from_slice(f.inner.get_ref()).unwrap();
        assert_eq!(content, vec![record(0), record(2)]);
    }

    #[test]
    fn failed_first_append_keeps_empty_array() {
        let mut f = Capped::new(16);
        assert!(append_elements(&mut f, 0, &elements(&[record(0)], 0).unwrap()).is_err());
        assert_eq!(f.inner.get_ref().as_slice(), b"[]");
    }

    #[test]
    fn keeps_existing_records() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("out.json");
        fs::write(&path, serde_json::to_string(&vec![record(0)]).unwrap()).unwrap();

        let mut w = JsonArrayWriter::new(&path).unwrap();
        assert_eq!(w.len(), 1);
        w.write(&[record(1)]).unwrap();
        assert_eq!(read_back(&path), vec![record(0), record(1)]);
        assert!(!JsonArrayWriter::tmp_path(&path).exists());
    }

    #[test]
    fn failed_reopen_keeps_existing_file() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("out.json");
        let content = serde_json::to_string(&vec![record(0), record(1)]).unwrap();
        fs::write(&path, &content).unwrap();

        // a directory in the way of the temporary file makes the rewrite fail
        fs::create_dir(JsonArrayWriter::tmp_path(&path)).unwrap();
        assert!(JsonArrayWriter::new(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn replaces_corrupt_content() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("out.json");
        fs::write(&path, "[{\"question\": \"trunc").unwrap();

        let mut w = JsonArrayWriter::new(&path).unwrap();
        assert!(w.is_empty());
        w.write(&[record(0)]).unwrap();
        assert_eq!(read_back(&path), vec![record(0)]);
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        let dst = tempfile::tempdir().unwrap();
        let path = dst.path().join("out.json");
        let mut w = JsonArrayWriter::new(&path).unwrap();
        let r = QaRecord {
            question: "बिल्ली क्या है?".to_string(),
            context: "Here is some information: बिल्ली।".to_string(),
            answer: "बिल्ली।".to_string(),
        };
        w.write_single(&r).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("बिल्ली क्या है?"));
    }
}
