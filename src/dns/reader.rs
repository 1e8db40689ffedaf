use bytes::Bytes;

use crate::error::{DnsError, Result};

/// Maximum encoded length of a name, labels and terminator included.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of a single label.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Sequential big-endian reader over an immutable message buffer.
///
/// A `Reader` sees a window `[pos, end)` of the whole message. Views made
/// with [`Reader::slice`] share the underlying buffer, so compression
/// pointers inside rdata still resolve against the full message.
#[derive(Clone, Debug)]
pub struct Reader {
    buf: Bytes,
    pos: usize,
    end: usize,
}

impl Reader {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        let buf = buf.into();
        let end = buf.len();
        Self { buf, pos: 0, end }
    }

    pub fn tell(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) -> Result<&mut Self> {
        if pos > self.end {
            return Err(DnsError::OutOfBounds { pos, len: self.end });
        }
        self.pos = pos;
        Ok(self)
    }

    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    /// Returns a view over the next `n` bytes and advances past them.
    pub fn slice(&mut self, n: usize) -> Result<Reader> {
        self.ensure(n)?;
        let view = Reader {
            buf: self.buf.clone(),
            pos: self.pos,
            end: self.pos + n,
        };
        self.pos += n;
        Ok(view)
    }

    pub fn byte(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let value = self.buf[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn short(&mut self) -> Result<u16> {
        let bytes = self.array::<2>()?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn long(&mut self) -> Result<u32> {
        let bytes = self.array::<4>()?;
        Ok(u32::from_be_bytes(bytes))
    }

    pub fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Reads `length` raw bytes without copying.
    pub fn bytes(&mut self, length: usize) -> Result<Bytes> {
        self.ensure(length)?;
        let out = self.buf.slice(self.pos..self.pos + length);
        self.pos += length;
        Ok(out)
    }

    pub fn string(&mut self, length: usize) -> Result<String> {
        let raw = self.bytes(length)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    /// Everything left in this view.
    pub fn rest(&mut self) -> Bytes {
        let out = self.buf.slice(self.pos..self.end);
        self.pos = self.end;
        out
    }

    /// Decodes a possibly compressed name starting at the cursor.
    ///
    /// The cursor ends up after the terminating zero byte, or after the
    /// first compression pointer. Each pointer must target an offset below
    /// the start of the label run that contains it, so every jump moves
    /// strictly backwards and decoding terminates.
    pub fn name(&mut self) -> Result<String> {
        let mut labels: Vec<String> = Vec::new();
        let mut encoded_len = 1;
        let mut cursor = self.pos;
        let mut limit = self.end;
        let mut segment_start = self.pos;
        let mut resume_at = None;

        loop {
            if cursor >= limit {
                return Err(self.truncated_at(cursor, 1, limit));
            }
            let len = self.buf[cursor];

            match len & 0xC0 {
                0x00 if len == 0 => {
                    cursor += 1;
                    break;
                }
                0x00 => {
                    let len = len as usize;
                    let start = cursor + 1;
                    if start + len > limit {
                        return Err(self.truncated_at(start, len, limit));
                    }
                    encoded_len += len + 1;
                    if encoded_len > MAX_NAME_LENGTH {
                        return Err(DnsError::MalformedName {
                            offset: cursor,
                            reason: "name exceeds 255 bytes",
                        });
                    }
                    labels.push(String::from_utf8_lossy(&self.buf[start..start + len]).into_owned());
                    cursor = start + len;
                }
                0xC0 => {
                    if cursor + 2 > limit {
                        return Err(self.truncated_at(cursor, 2, limit));
                    }
                    let target =
                        (u16::from_be_bytes([len & 0x3F, self.buf[cursor + 1]])) as usize;
                    if target >= segment_start {
                        return Err(DnsError::MalformedName {
                            offset: cursor,
                            reason: "compression pointer does not point backwards",
                        });
                    }
                    if resume_at.is_none() {
                        resume_at = Some(cursor + 2);
                    }
                    // Earlier names live outside a rdata view, so jumps
                    // resolve against the whole message.
                    limit = self.buf.len();
                    cursor = target;
                    segment_start = target;
                }
                _ => {
                    return Err(DnsError::MalformedName {
                        offset: cursor,
                        reason: "reserved label type",
                    });
                }
            }
        }

        self.pos = resume_at.unwrap_or(cursor);
        Ok(labels.join("."))
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(self.truncated_at(self.pos, n, self.end));
        }
        Ok(())
    }

    fn truncated_at(&self, offset: usize, need: usize, limit: usize) -> DnsError {
        DnsError::Truncated {
            offset,
            need,
            have: limit.saturating_sub(offset),
        }
    }
}

impl From<&[u8]> for Reader {
    fn from(buf: &[u8]) -> Self {
        Reader::new(Bytes::copy_from_slice(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_big_endian() {
        let mut reader = Reader::new(vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]);
        assert_eq!(reader.byte().unwrap(), 0x01);
        assert_eq!(reader.short().unwrap(), 0x0203);
        assert_eq!(reader.long().unwrap(), 0x04050607);
        assert!(reader.is_eof());
        assert!(matches!(reader.byte(), Err(DnsError::Truncated { .. })));
    }

    #[test]
    fn test_seek_bounds() {
        let mut reader = Reader::new(vec![0u8; 4]);
        assert!(reader.seek(4).is_ok());
        assert_eq!(
            reader.seek(5).unwrap_err(),
            DnsError::OutOfBounds { pos: 5, len: 4 }
        );
    }

    #[test]
    fn test_slice_limits_view() {
        let mut reader = Reader::new(vec![1, 2, 3, 4, 5]);
        let mut view = reader.slice(2).unwrap();
        assert_eq!(reader.tell(), 2);
        assert_eq!(view.short().unwrap(), 0x0102);
        assert!(view.is_eof());
        assert!(view.byte().is_err());
        assert!(reader.slice(4).is_err());
    }

    #[test]
    fn test_name_plain_and_root() {
        let mut reader = Reader::new(b"\x03www\x07example\x03com\x00\x00".to_vec());
        assert_eq!(reader.name().unwrap(), "www.example.com");
        assert_eq!(reader.tell(), 17);
        assert_eq!(reader.name().unwrap(), "");
        assert!(reader.is_eof());
    }

    #[test]
    fn test_name_pointer_stops_primary_cursor() {
        // "example.com" at 0, then "www" + pointer to 0
        let mut buf = b"\x07example\x03com\x00".to_vec();
        buf.extend_from_slice(b"\x03www\xC0\x00\xFF");
        let mut reader = Reader::new(buf);
        reader.seek(13).unwrap();
        assert_eq!(reader.name().unwrap(), "www.example.com");
        assert_eq!(reader.tell(), 19);
        assert_eq!(reader.byte().unwrap(), 0xFF);
    }

    #[test]
    fn test_name_rejects_self_pointer() {
        let mut reader = Reader::new(vec![0xC0, 0x00]);
        assert!(matches!(
            reader.name(),
            Err(DnsError::MalformedName { .. })
        ));
    }

    #[test]
    fn test_name_rejects_loop_through_labels() {
        // "a" then a pointer back to the start of the same name
        let mut reader = Reader::new(vec![0x01, b'a', 0xC0, 0x00]);
        assert!(matches!(
            reader.name(),
            Err(DnsError::MalformedName { .. })
        ));
    }

    #[test]
    fn test_name_rejects_reserved_label_type() {
        let mut reader = Reader::new(vec![0x40, 0x00]);
        assert!(matches!(
            reader.name(),
            Err(DnsError::MalformedName {
                reason: "reserved label type",
                ..
            })
        ));
    }

    #[test]
    fn test_name_too_long() {
        let mut buf = Vec::new();
        for _ in 0..5 {
            buf.push(63);
            buf.extend_from_slice(&[b'a'; 63]);
        }
        buf.push(0);
        let mut reader = Reader::new(buf);
        assert!(matches!(
            reader.name(),
            Err(DnsError::MalformedName { .. })
        ));
    }

    #[test]
    fn test_name_inside_slice_follows_pointer_outside() {
        let mut buf = b"\x03com\x00".to_vec();
        buf.extend_from_slice(b"\x03foo\xC0\x00");
        let mut reader = Reader::new(buf);
        reader.seek(5).unwrap();
        let mut view = reader.slice(6).unwrap();
        assert_eq!(view.name().unwrap(), "foo.com");
        assert!(view.is_eof());
    }

    #[test]
    fn test_name_truncated_label() {
        let mut reader = Reader::new(vec![0x05, b'a', b'b']);
        assert!(matches!(reader.name(), Err(DnsError::Truncated { .. })));
    }
}
