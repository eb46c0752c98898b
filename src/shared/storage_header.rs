use crc32fast::Hasher as Crc32Hasher;
use std::io::{Read, Write};

/// Fixed-size header preceding every binary file written by the store.
/// Covers itself and the body with CRC32 so torn or foreign files are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryHeader {
    pub magic: [u8; 8],
    pub version: u16,
    pub body_len: u64,
    pub body_crc32: u32,
    pub header_crc32: u32,
}

impl BinaryHeader {
    pub const LEN_WITHOUT_CRC: usize = 8 + 2 + 8 + 4;
    pub const TOTAL_LEN: usize = Self::LEN_WITHOUT_CRC + 4;

    /// Build a header describing `body`.
    pub fn seal(magic: [u8; 8], version: u16, body: &[u8]) -> Self {
        let mut header = Self {
            magic,
            version,
            body_len: body.len() as u64,
            body_crc32: crc32fast::hash(body),
            header_crc32: 0,
        };
        header.header_crc32 = header.compute_crc32();
        header
    }

    fn compute_crc32(&self) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(&self.magic);
        hasher.update(&self.version.to_le_bytes());
        hasher.update(&self.body_len.to_le_bytes());
        hasher.update(&self.body_crc32.to_le_bytes());
        hasher.finalize()
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        w.write_all(&self.magic)?;
        w.write_all(&self.version.to_le_bytes())?;
        w.write_all(&self.body_len.to_le_bytes())?;
        w.write_all(&self.body_crc32.to_le_bytes())?;
        w.write_all(&self.header_crc32.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut r: R) -> std::io::Result<Self> {
        let mut magic = [0u8; 8];
        r.read_exact(&mut magic)?;

        let mut v = [0u8; 2];
        r.read_exact(&mut v)?;
        let version = u16::from_le_bytes(v);

        let mut len = [0u8; 8];
        r.read_exact(&mut len)?;
        let body_len = u64::from_le_bytes(len);

        let mut bc = [0u8; 4];
        r.read_exact(&mut bc)?;
        let body_crc32 = u32::from_le_bytes(bc);

        let mut c = [0u8; 4];
        r.read_exact(&mut c)?;
        let header_crc32 = u32::from_le_bytes(c);

        let hdr = Self {
            magic,
            version,
            body_len,
            body_crc32,
            header_crc32,
        };
        if hdr.compute_crc32() != header_crc32 {
            return Err(invalid_data("header CRC mismatch"));
        }
        Ok(hdr)
    }

    /// Check magic and version against what the caller expects to find.
    pub fn expect(&self, kind: FileKind, version: u16) -> std::io::Result<()> {
        if self.magic != kind.magic() {
            return Err(invalid_data("invalid magic"));
        }
        if self.version != version {
            return Err(invalid_data("unsupported version"));
        }
        Ok(())
    }

    pub fn verify_body(&self, body: &[u8]) -> std::io::Result<()> {
        if body.len() as u64 != self.body_len {
            return Err(invalid_data("body length mismatch"));
        }
        if crc32fast::hash(body) != self.body_crc32 {
            return Err(invalid_data("body CRC mismatch"));
        }
        Ok(())
    }
}

fn invalid_data(msg: &'static str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, msg)
}

pub enum FileKind {
    FactTable,
}

impl FileKind {
    pub const fn magic(&self) -> [u8; 8] {
        match self {
            FileKind::FactTable => *b"SPNFACT\0",
        }
    }
}
