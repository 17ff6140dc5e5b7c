// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::{Error, Writer, BGZF_EOF};

/// Records what the writer does to its sink
#[derive(Default)]
struct Journal {
    bytes: Vec<u8>,
    writes: usize,
    flushes: usize,
    drops: usize,
}

struct RecordingSink {
    journal: Rc<RefCell<Journal>>,
    fail_writes: bool,
}

impl RecordingSink {
    fn new(journal: &Rc<RefCell<Journal>>) -> Self {
        RecordingSink {
            journal: Rc::clone(journal),
            fail_writes: false,
        }
    }

    fn failing(journal: &Rc<RefCell<Journal>>) -> Self {
        RecordingSink {
            journal: Rc::clone(journal),
            fail_writes: true,
        }
    }
}

impl Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "disk full"));
        }
        let mut journal = self.journal.borrow_mut();
        journal.writes += 1;
        journal.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.journal.borrow_mut().flushes += 1;
        Ok(())
    }
}

impl Drop for RecordingSink {
    fn drop(&mut self) {
        self.journal.borrow_mut().drops += 1;
    }
}

#[test]
fn test_sink_released_on_close() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut writer = Writer::new(RecordingSink::new(&journal));
    writer.write_bytes(b"payload").unwrap();
    writer.close().unwrap();

    assert_eq!(journal.borrow().drops, 1);
    assert!(journal.borrow().bytes.ends_with(&BGZF_EOF));

    drop(writer);
    assert_eq!(journal.borrow().drops, 1);
}

#[test]
fn test_drop_closes_exactly_once() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    {
        let mut writer = Writer::new(RecordingSink::new(&journal));
        writer.write_bytes(b"payload").unwrap();
    }

    let journal = journal.borrow();
    assert_eq!(journal.drops, 1);
    assert!(journal.bytes.ends_with(&BGZF_EOF));
    let eof_count = journal
        .bytes
        .windows(BGZF_EOF.len())
        .filter(|w| *w == BGZF_EOF)
        .count();
    assert_eq!(eof_count, 1);
}

#[test]
fn test_drop_after_early_return() {
    fn write_then_fail(sink: RecordingSink) -> crate::Result<()> {
        let mut writer = Writer::new(sink);
        writer.write_text("partial record")?;
        Err(Error::InvalidInput("caller gave up".into()))
    }

    let journal = Rc::new(RefCell::new(Journal::default()));
    assert!(write_then_fail(RecordingSink::new(&journal)).is_err());
    let journal = journal.borrow();
    assert_eq!(journal.drops, 1);
    assert!(journal.bytes.ends_with(&BGZF_EOF));
}

#[test]
fn test_flush_reaches_sink() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut writer = Writer::new(RecordingSink::new(&journal));
    writer.flush().unwrap();
    assert_eq!(journal.borrow().flushes, 1);
    assert_eq!(writer.blocks_written(), 1);
}

#[test]
fn test_closed_writer_does_no_io() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut writer = Writer::new(RecordingSink::new(&journal));
    writer.close().unwrap();

    let (writes, flushes) = {
        let j = journal.borrow();
        (j.writes, j.flushes)
    };
    assert!(matches!(writer.write_bytes(b"late"), Err(Error::WriterClosed)));
    assert!(matches!(writer.write_text("late"), Err(Error::WriterClosed)));
    assert!(matches!(writer.flush(), Err(Error::WriterClosed)));

    let j = journal.borrow();
    assert_eq!(j.writes, writes);
    assert_eq!(j.flushes, flushes);
}

#[test]
fn test_io_error_propagates_unchanged() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut writer = Writer::new(RecordingSink::failing(&journal));
    writer.write_bytes(b"buffered only").unwrap();

    match writer.flush() {
        Err(Error::Io(e)) => {
            assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
            assert_eq!(e.to_string(), "disk full");
        }
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_failed_close_still_releases_sink() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut writer = Writer::new(RecordingSink::failing(&journal));
    assert!(matches!(writer.close(), Err(Error::Io(_))));
    assert!(writer.is_closed());
    assert_eq!(journal.borrow().drops, 1);
    assert!(matches!(writer.close(), Err(Error::AlreadyClosed)));
}

#[test]
fn test_io_write_maps_errors() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut writer = Writer::new(RecordingSink::new(&journal));
    writer.close().unwrap();
    let err = Write::write(&mut writer, b"x").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}
