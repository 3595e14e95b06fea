use bytemuck::cast_slice_mut;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;

use crate::bitmap::container::Container;
use crate::bitmap::scratch::Scratch;
use crate::bitmap::store::{ArrayStore, BitmapStore, RunStore, Store, BITMAP_BYTES, BITMAP_WORDS};
use crate::CowBitmap;

pub const ARRAY_KIND: u8 = 0;
pub const BITMAP_KIND: u8 = 1;
pub const RUN_KIND: u8 = 2;

// key + kind + payload size
const RECORD_HEADER_BYTES: u64 = 7;

fn invalid_data(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

impl CowBitmap {
    /// Return the size in bytes of the serialized output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let rb1: CowBitmap = (1..4).collect();
    /// let mut bytes = Vec::with_capacity(rb1.serialized_size());
    /// rb1.serialize_into(&mut bytes).unwrap();
    /// let rb2 = CowBitmap::deserialize_from(&bytes[..]).unwrap();
    ///
    /// assert_eq!(rb1, rb2);
    /// ```
    pub fn serialized_size(&self) -> usize {
        let containers: u64 = self
            .containers
            .iter()
            .map(|container| RECORD_HEADER_BYTES + container.store.byte_size_serialized())
            .sum();
        (4 + containers) as usize
    }

    /// Serialize the bitmap, preserving the representation of every
    /// container exactly. Returns the number of bytes written.
    ///
    /// The format is `container_count: u32 le` followed by one record per
    /// container: `key: u16 le`, `kind: u8`, `payload_size: u32 le` and the
    /// payload as `u16 le` values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let rb1: CowBitmap = (1..4).collect();
    /// let mut bytes = vec![];
    /// rb1.serialize_into(&mut bytes).unwrap();
    /// let rb2 = CowBitmap::deserialize_from(&bytes[..]).unwrap();
    ///
    /// assert_eq!(rb1, rb2);
    /// ```
    pub fn serialize_into<W: io::Write>(&self, mut writer: W) -> io::Result<usize> {
        writer.write_u32::<LittleEndian>(self.containers.len() as u32)?;

        for container in &self.containers {
            writer.write_u16::<LittleEndian>(container.key)?;
            match &container.store {
                Store::Array(values) => {
                    writer.write_u8(ARRAY_KIND)?;
                    writer.write_u32::<LittleEndian>((values.len() * 2) as u32)?;
                    for &value in values.iter() {
                        writer.write_u16::<LittleEndian>(value)?;
                    }
                }
                Store::Bitmap(bits) => {
                    writer.write_u8(BITMAP_KIND)?;
                    writer.write_u32::<LittleEndian>(BITMAP_BYTES as u32)?;
                    for &word in bits.as_words() {
                        writer.write_u64::<LittleEndian>(word)?;
                    }
                }
                Store::Run(runs) => {
                    writer.write_u8(RUN_KIND)?;
                    writer.write_u32::<LittleEndian>((runs.run_count() * 4) as u32)?;
                    for interval in runs.intervals() {
                        writer.write_u16::<LittleEndian>(interval.start)?;
                        writer.write_u16::<LittleEndian>(interval.end)?;
                    }
                }
            }
        }

        Ok(self.serialized_size())
    }

    /// Deserialize a bitmap written by [`CowBitmap::serialize_into`]. Every
    /// container keeps the representation it was written with.
    ///
    /// Malformed streams fail with [`io::ErrorKind::InvalidData`];
    /// truncated streams surface the underlying read error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let rb1: CowBitmap = (1..4).collect();
    /// let mut bytes = vec![];
    /// rb1.serialize_into(&mut bytes).unwrap();
    /// let rb2 = CowBitmap::deserialize_from(&bytes[..]).unwrap();
    ///
    /// assert_eq!(rb1, rb2);
    /// ```
    pub fn deserialize_from<R: io::Read>(mut reader: R) -> io::Result<CowBitmap> {
        let count = reader.read_u32::<LittleEndian>()?;
        if count as u64 > u64::from(u16::MAX) + 1 {
            return Err(invalid_data("container count exceeds the key space"));
        }

        let mut containers = Vec::with_capacity(count as usize);
        let mut last_key = None;

        for _ in 0..count {
            let key = reader.read_u16::<LittleEndian>()?;
            if last_key.is_some_and(|last| last >= key) {
                return Err(invalid_data("container keys are not strictly ascending"));
            }
            last_key = Some(key);

            let kind = reader.read_u8()?;
            let payload_bytes = reader.read_u32::<LittleEndian>()?;

            let store = match kind {
                ARRAY_KIND => {
                    if payload_bytes == 0 || payload_bytes % 2 != 0 {
                        return Err(invalid_data("array payload must be a positive even size"));
                    }
                    if u64::from(payload_bytes) > 2 << 16 {
                        return Err(invalid_data("array payload exceeds the index space"));
                    }
                    let mut values = vec![0u16; (payload_bytes / 2) as usize];
                    reader.read_exact(cast_slice_mut(&mut values))?;
                    for value in values.iter_mut() {
                        *value = u16::from_le(*value);
                    }
                    let array = ArrayStore::try_from(values)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                    Store::Array(array)
                }
                BITMAP_KIND => {
                    if u64::from(payload_bytes) != BITMAP_BYTES {
                        return Err(invalid_data("bitmap payload must be exactly 8192 bytes"));
                    }
                    let mut words = [0u64; BITMAP_WORDS];
                    reader.read_exact(cast_slice_mut(&mut words[..]))?;
                    let mut len = 0u64;
                    for word in words.iter_mut() {
                        *word = u64::from_le(*word);
                        len += u64::from(word.count_ones());
                    }
                    if len == 0 {
                        return Err(invalid_data("bitmap container holds no values"));
                    }
                    Store::Bitmap(BitmapStore::from_words_unchecked(len, words))
                }
                RUN_KIND => {
                    if payload_bytes == 0 || payload_bytes % 4 != 0 {
                        return Err(invalid_data(
                            "run payload must be a positive multiple of four bytes",
                        ));
                    }
                    if u64::from(payload_bytes) > 2 << 16 {
                        return Err(invalid_data("run payload exceeds the index space"));
                    }
                    let mut values = vec![0u16; (payload_bytes / 2) as usize];
                    reader.read_exact(cast_slice_mut(&mut values))?;
                    for value in values.iter_mut() {
                        *value = u16::from_le(*value);
                    }
                    let runs = RunStore::try_from_interleaved(&values)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                    Store::Run(runs)
                }
                _ => return Err(invalid_data("unknown container kind")),
            };

            containers.push(Container { key, store });
        }

        Ok(CowBitmap { containers, scratch: Scratch::new() })
    }

    /// Serialize into a freshly allocated, exactly sized buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowbits::CowBitmap;
    ///
    /// let rb1: CowBitmap = (1..4).collect();
    /// let rb2 = CowBitmap::from_bytes(&rb1.to_bytes()).unwrap();
    ///
    /// assert_eq!(rb1, rb2);
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.serialized_size());
        self.serialize_into(&mut bytes).expect("writing to a Vec cannot fail");
        bytes
    }

    /// Deserialize a bitmap from a buffer produced by
    /// [`CowBitmap::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> io::Result<CowBitmap> {
        CowBitmap::deserialize_from(bytes)
    }
}

impl Store {
    /// Payload size in bytes of the serialized representation.
    fn byte_size_serialized(&self) -> u64 {
        match self {
            Store::Array(values) => values.len() * 2,
            Store::Bitmap(_) => BITMAP_BYTES,
            Store::Run(runs) => runs.run_count() * 4,
        }
    }
}
