// Scanner iteration contract: advance / current / last_error, and the
// clean-stop vs error-stop distinction.

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use recordio::{
        framing::{encode_frame, encode_uvarint},
        Reader, RecordError, Scanner, Writer,
    };

    fn encode_all(records: &[&[u8]]) -> Vec<u8> {
        let mut w = Writer::new(Vec::new());
        for r in records {
            w.write(r).unwrap();
        }
        w.into_inner()
    }

    /// Counts read calls so tests can assert an exhausted scanner stays idle.
    struct CountingReader {
        inner: Cursor<Vec<u8>>,
        reads: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read(buf)
        }
    }

// # ✅ 1. first / second / third

    #[test]
    fn scans_written_records_in_order() {
        let wire = encode_all(&[&b"first"[..], &b"second"[..], &b"third"[..]]);
        let mut s = Scanner::new(wire.as_slice());

        let mut seen = Vec::new();
        while s.advance() {
            seen.push(s.current().to_vec());
        }

        assert_eq!(seen, vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]);
        assert!(s.last_error().is_none());
        assert!(s.is_exhausted());
        assert_eq!(s.records_scanned(), 3);
    }

// # ✅ 2. State machine

    #[test]
    fn current_is_empty_before_first_advance() {
        let wire = encode_all(&[&b"data"[..]]);
        let s = Scanner::new(wire.as_slice());
        assert!(s.current().is_empty());
        assert!(s.last_error().is_none());
        assert!(!s.is_exhausted());
    }

    #[test]
    fn empty_stream_stops_cleanly() {
        let mut s = Scanner::new(io::empty());
        assert!(!s.advance());
        assert!(s.last_error().is_none());
        assert!(s.current().is_empty());
    }

    #[test]
    fn exhausted_scanner_does_not_touch_source() {
        let reads = std::rc::Rc::new(std::cell::Cell::new(0));
        let src = CountingReader {
            inner: Cursor::new(encode_all(&[&b"only"[..]])),
            reads: reads.clone(),
        };
        let mut s = Scanner::new(src);

        assert!(s.advance());
        assert!(!s.advance());
        let after_stop = reads.get();

        for _ in 0..3 {
            assert!(!s.advance());
        }
        assert_eq!(reads.get(), after_stop);
        assert!(s.current().is_empty());
    }

    #[test]
    fn empty_record_is_held_not_end() {
        let wire = encode_all(&[&b""[..], &b"x"[..]]);
        let mut s = Scanner::new(wire.as_slice());

        assert!(s.advance());
        assert!(s.current().is_empty());
        assert!(s.advance());
        assert_eq!(s.current(), b"x");
        assert!(!s.advance());
        assert!(s.last_error().is_none());
    }

// # ❌ 3. Error latching

    #[test]
    fn truncated_stream_latches_error() {
        let mut wire = encode_all(&[&b"good"[..]]);
        let mut bad = encode_frame(b"0123456789");
        bad.truncate(5);
        wire.extend_from_slice(&bad);

        let mut s = Scanner::new(wire.as_slice());
        assert!(s.advance());
        assert_eq!(s.current(), b"good");

        // loop ends exactly like a clean stop...
        assert!(!s.advance());
        // ...only the post-hoc query tells them apart
        assert!(matches!(
            s.last_error(),
            Some(RecordError::TruncatedRecord { expected: 10, actual: 4 })
        ));
        assert!(s.current().is_empty());

        // terminal: still false, same error
        assert!(!s.advance());
        assert!(s.last_error().is_some());
    }

    #[test]
    fn huge_declared_length_latches_truncation() {
        let mut wire = encode_all(&[&b"good"[..]]);
        wire.extend_from_slice(&encode_uvarint(1 << 50));
        wire.extend_from_slice(b"abc");

        let mut s = Scanner::new(wire.as_slice());
        assert!(s.advance());
        assert_eq!(s.current(), b"good");

        assert!(!s.advance());
        match s.last_error() {
            Some(RecordError::TruncatedRecord { expected, actual }) => {
                assert_eq!(*expected, 1 << 50);
                assert_eq!(*actual, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(s.is_exhausted());
    }

    #[test]
    fn malformed_varint_latches_error() {
        let wire = [0xffu8; 11];
        let mut s = Scanner::new(&wire[..]);
        assert!(!s.advance());
        assert!(matches!(s.last_error(), Some(RecordError::MalformedVarint { .. })));
    }

    #[test]
    fn io_error_latches() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let mut s = Scanner::new(Broken);
        assert!(!s.advance());
        match s.last_error() {
            Some(RecordError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected: {:?}", other),
        }
    }

// # ✅ 4. Construction variants

    #[test]
    fn continues_from_partially_read_reader() {
        let wire = encode_all(&[&b"a"[..], &b"b"[..], &b"c"[..]]);
        let mut r = Reader::new(wire.as_slice());
        assert_eq!(r.next().unwrap().unwrap(), b"a");

        let mut s = Scanner::from_reader(r);
        assert!(s.current().is_empty());
        let mut rest = Vec::new();
        while s.advance() {
            rest.push(s.current().to_vec());
        }
        assert_eq!(rest, vec![b"b".to_vec(), b"c".to_vec()]);
        assert_eq!(s.counters().records, 3);
    }

    #[test]
    fn buf_read_scanner_matches_buffered_scanner() {
        let big = vec![3u8; 5000];
        let wire = encode_all(&[&big[..], &b"tail"[..]]);

        let mut a = Scanner::new(wire.as_slice());
        let mut b = Scanner::from_buf_read(Cursor::new(wire.clone()));
        loop {
            let (x, y) = (a.advance(), b.advance());
            assert_eq!(x, y);
            if !x {
                break;
            }
            assert_eq!(a.current(), b.current());
        }
        assert!(a.last_error().is_none() && b.last_error().is_none());
    }
}
