use bytes::{Bytes, BytesMut};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::reader::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use crate::error::{DnsError, Result};

/// Highest offset a 14-bit compression pointer can reach.
pub const MAX_POINTER_OFFSET: usize = 0x3FFF;

const DEFAULT_CAPACITY: usize = 512;

/// Growable big-endian writer with a name compression table.
///
/// The table maps every name suffix written so far to the offset it starts
/// at. It lives as long as the writer, i.e. one encoded message.
#[derive(Debug)]
pub struct Writer {
    buf: BytesMut,
    pos: usize,
    names: FxHashMap<String, u16>,
    compress: bool,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(size: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(size),
            pos: 0,
            names: FxHashMap::default(),
            compress: true,
        }
    }

    /// Enable or disable back-references for subsequent names.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    pub fn compression(&self) -> bool {
        self.compress
    }

    pub fn tell(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn seek(&mut self, pos: usize) -> Result<&mut Self> {
        if pos > self.buf.len() {
            return Err(DnsError::OutOfBounds {
                pos,
                len: self.buf.len(),
            });
        }
        self.pos = pos;
        Ok(self)
    }

    pub fn byte(&mut self, value: u8) -> &mut Self {
        self.put(&[value])
    }

    pub fn short(&mut self, value: u16) -> &mut Self {
        self.put(&value.to_be_bytes())
    }

    pub fn long(&mut self, value: u32) -> &mut Self {
        self.put(&value.to_be_bytes())
    }

    pub fn buffer(&mut self, value: &[u8]) -> &mut Self {
        self.put(value)
    }

    pub fn slice(&self, start: usize, end: usize) -> Result<&[u8]> {
        if start > end || end > self.buf.len() {
            return Err(DnsError::OutOfBounds {
                pos: end.max(start),
                len: self.buf.len(),
            });
        }
        Ok(&self.buf[start..end])
    }

    pub fn dump(self) -> Bytes {
        self.buf.freeze()
    }

    /// Offset at which `name` was recorded as a compression target.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .get(name.trim_end_matches('.'))
            .map(|offset| *offset as usize)
    }

    /// Writes `value` as a sequence of labels.
    ///
    /// The longest suffix already present in the table is replaced by a
    /// pointer; everything before it is written literally and recorded.
    pub fn name(&mut self, value: &str) -> Result<&mut Self> {
        let trimmed = value.strip_suffix('.').unwrap_or(value);
        let labels: SmallVec<[&str; 8]> = if trimmed.is_empty() {
            SmallVec::new()
        } else {
            trimmed.split('.').collect()
        };

        let mut encoded_len = 1;
        for label in &labels {
            if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
                return Err(DnsError::InvalidLabel(value.to_string()));
            }
            encoded_len += label.len() + 1;
        }
        if encoded_len > MAX_NAME_LENGTH {
            return Err(DnsError::NameTooLong(value.to_string()));
        }

        let pointer = if self.compress {
            (0..labels.len()).find_map(|i| {
                self.names
                    .get(&labels[i..].join("."))
                    .map(|offset| (i, *offset))
            })
        } else {
            None
        };
        let literal = pointer.map_or(labels.len(), |(i, _)| i);

        for i in 0..literal {
            let offset = self.pos;
            if self.compress && offset <= MAX_POINTER_OFFSET {
                self.names
                    .entry(labels[i..].join("."))
                    .or_insert(offset as u16);
            }
            self.byte(labels[i].len() as u8);
            self.buffer(labels[i].as_bytes());
        }

        match pointer {
            Some((_, offset)) => self.short(0xC000 | offset),
            None => self.byte(0),
        };
        Ok(self)
    }

    fn put(&mut self, bytes: &[u8]) -> &mut Self {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            let overlap = self.buf.len() - self.pos;
            self.buf[self.pos..].copy_from_slice(&bytes[..overlap]);
            self.buf.extend_from_slice(&bytes[overlap..]);
        } else {
            self.buf[self.pos..end].copy_from_slice(bytes);
        }
        self.pos = end;
        self
    }
}
