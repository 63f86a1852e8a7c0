//! Record log framing.
//!
//! Each store operation appends one record:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes this field)
//! +------------------+
//! | Collection       | (length-prefixed string)
//! +------------------+
//! | Document ID      | (length-prefixed string)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Document Body    | (length-prefixed JSON bytes)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! The checksum covers every byte except itself. Multiple records may
//! exist for the same document; the latest one in file order wins, and a
//! tombstone marks the document deleted.

use std::io::{self, Read};

/// Smallest possible record: length + two empty strings + flag + empty body + checksum.
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 4 + 4 + 1 + 4 + 4;

fn checksum_of(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// One entry in the record log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Collection the document belongs to
    pub collection: String,
    /// Document identifier within the collection
    pub document_id: String,
    /// Whether this record deletes the document
    pub is_tombstone: bool,
    /// Serialized document body (empty for tombstones)
    pub body: Vec<u8>,
}

impl LogRecord {
    /// Record carrying a live document body
    pub fn document(
        collection: impl Into<String>,
        document_id: impl Into<String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            collection: collection.into(),
            document_id: document_id.into(),
            is_tombstone: false,
            body,
        }
    }

    /// Record marking a document as deleted
    pub fn tombstone(collection: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            document_id: document_id.into(),
            is_tombstone: true,
            body: Vec::new(),
        }
    }

    fn serialize_fields(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.extend_from_slice(&(self.collection.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.collection.as_bytes());

        buf.extend_from_slice(&(self.document_id.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.document_id.as_bytes());

        buf.push(if self.is_tombstone { 1 } else { 0 });

        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);

        buf
    }

    /// Serialize the complete record, checksum included.
    pub fn serialize(&self) -> Vec<u8> {
        let fields = self.serialize_fields();
        let record_length = (4 + fields.len() + 4) as u32;

        let mut checksum_data = Vec::with_capacity(4 + fields.len());
        checksum_data.extend_from_slice(&record_length.to_le_bytes());
        checksum_data.extend_from_slice(&fields);
        let checksum = checksum_of(&checksum_data);

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&fields);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize a record from bytes, verifying the checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed_checksum = checksum_of(&data[0..checksum_offset]);

        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let collection = read_string(&mut cursor)?;
        let document_id = read_string(&mut cursor)?;

        let mut flag = [0u8; 1];
        cursor.read_exact(&mut flag)?;
        let is_tombstone = flag[0] != 0;

        let body = read_bytes(&mut cursor)?;

        Ok((
            Self {
                collection,
                document_id,
                is_tombstone,
                body,
            },
            record_length,
        ))
    }
}

fn read_bytes<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    String::from_utf8(read_bytes(reader)?)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("invalid UTF-8: {}", e)))
}
