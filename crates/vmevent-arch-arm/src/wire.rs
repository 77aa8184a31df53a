//! On-wire form of [`RegisterSet`].
//!
//! The monitoring consumer may live in a separate address space with no
//! other way to learn the domain's execution width at capture time, so the
//! record is self-describing: a fixed header carrying a format version and
//! the width tag, followed by the raw bytes of the matching variant.
//! Historical ABI revisions are dispatched on the version field here, at
//! the transport boundary, rather than duplicated in the codec.

use std::mem::size_of;

use vmevent_core::VmeError;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Aarch32RegisterSet, Aarch64RegisterSet, RegisterSet};

/// The wire format version emitted by this implementation.
pub const WIRE_VERSION: u16 = 1;

const WIDTH_AARCH32: u16 = 0;
const WIDTH_AARCH64: u16 = 1;

#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
struct WireHeader {
    version: u16,
    width: u16,
    reserved: u32,
}

impl RegisterSet {
    /// Returns the encoded size of this snapshot in bytes.
    pub const fn wire_size(&self) -> usize {
        size_of::<WireHeader>()
            + match self {
                Self::Aarch32(_) => size_of::<Aarch32RegisterSet>(),
                Self::Aarch64(_) => size_of::<Aarch64RegisterSet>(),
            }
    }

    /// Encodes this snapshot into `buf`, returning the number of bytes
    /// written.
    ///
    /// Fails with [`VmeError::OutOfBounds`] if `buf` is too small; nothing
    /// is written in that case.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize, VmeError> {
        let size = self.wire_size();
        if buf.len() < size {
            return Err(VmeError::OutOfBounds);
        }

        let header = WireHeader {
            version: WIRE_VERSION,
            width: match self {
                Self::Aarch32(_) => WIDTH_AARCH32,
                Self::Aarch64(_) => WIDTH_AARCH64,
            },
            reserved: 0,
        };

        buf[..size_of::<WireHeader>()].copy_from_slice(header.as_bytes());

        let body = &mut buf[size_of::<WireHeader>()..size];
        match self {
            Self::Aarch32(set) => body.copy_from_slice(set.as_bytes()),
            Self::Aarch64(set) => body.copy_from_slice(set.as_bytes()),
        }

        Ok(size)
    }

    /// Decodes a snapshot from `buf`.
    ///
    /// A record with a version other than [`WIRE_VERSION`] fails with
    /// [`VmeError::UnsupportedWireVersion`]; a truncated record or an
    /// unknown width tag fails with [`VmeError::MalformedWireRecord`].
    pub fn read_from(buf: &[u8]) -> Result<Self, VmeError> {
        let (header, body) =
            WireHeader::read_from_prefix(buf).map_err(|_| VmeError::MalformedWireRecord)?;

        if header.version != WIRE_VERSION {
            return Err(VmeError::UnsupportedWireVersion(header.version));
        }

        match header.width {
            WIDTH_AARCH32 => {
                let (set, _) = Aarch32RegisterSet::read_from_prefix(body)
                    .map_err(|_| VmeError::MalformedWireRecord)?;
                Ok(Self::Aarch32(set))
            }
            WIDTH_AARCH64 => {
                let (set, _) = Aarch64RegisterSet::read_from_prefix(body)
                    .map_err(|_| VmeError::MalformedWireRecord)?;
                Ok(Self::Aarch64(set))
            }
            _ => Err(VmeError::MalformedWireRecord),
        }
    }
}
