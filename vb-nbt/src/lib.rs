//! Decoder for the gzipped NBT container used by `.schematic` files.
//!
//! The format is a self-describing tree: one type byte, a length-prefixed
//! name, then a payload whose shape depends on the type. There is no schema;
//! semantic validation is the caller's job.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbtError {
    #[error("unexpected end of tag data")]
    Eof,
    #[error("unknown tag type {0}")]
    UnknownTag(u8),
    #[error("tag string is not valid utf-8")]
    InvalidString,
    #[error("root tag is not a compound (got type {0})")]
    RootNotCompound(u8),
    #[error("io error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for NbtError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            NbtError::Eof
        } else {
            NbtError::Io(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    LongArray,
}

impl TagKind {
    pub fn from_byte(value: u8) -> Option<TagKind> {
        match value {
            0 => Some(TagKind::End),
            1 => Some(TagKind::Byte),
            2 => Some(TagKind::Short),
            3 => Some(TagKind::Int),
            4 => Some(TagKind::Long),
            5 => Some(TagKind::Float),
            6 => Some(TagKind::Double),
            7 => Some(TagKind::ByteArray),
            8 => Some(TagKind::String),
            9 => Some(TagKind::List),
            10 => Some(TagKind::Compound),
            11 => Some(TagKind::IntArray),
            12 => Some(TagKind::LongArray),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            TagKind::End => 0,
            TagKind::Byte => 1,
            TagKind::Short => 2,
            TagKind::Int => 3,
            TagKind::Long => 4,
            TagKind::Float => 5,
            TagKind::Double => 6,
            TagKind::ByteArray => 7,
            TagKind::String => 8,
            TagKind::List => 9,
            TagKind::Compound => 10,
            TagKind::IntArray => 11,
            TagKind::LongArray => 12,
        }
    }
}

/// One node of a decoded tag tree. The tree owns all of its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(TagKind, Vec<Tag>),
    Compound(Vec<(String, Tag)>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::End => TagKind::End,
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::String(_) => TagKind::String,
            Tag::List(_, _) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
            Tag::IntArray(_) => TagKind::IntArray,
            Tag::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Looks up an entry of a compound by name. First match wins; keys are
    /// unique in well-formed data.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        match self {
            Tag::Compound(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, tag)| tag),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Tag::Byte(v) => Some(v as i32),
            Tag::Short(v) => Some(v as i32),
            Tag::Int(v) => Some(v),
            Tag::Long(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Tag::Byte(v) => Some(v as i64),
            Tag::Short(v) => Some(v as i64),
            Tag::Int(v) => Some(v as i64),
            Tag::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Tag::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Tag::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Tag::List(_, items) => Some(items),
            _ => None,
        }
    }

    pub fn compound_entries(&self) -> Option<&[(String, Tag)]> {
        match self {
            Tag::Compound(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Reads the named root compound from a gzip-compressed file.
pub fn read_gzip(path: &Path) -> Result<(String, Tag), NbtError> {
    log::debug!("decoding gzipped tag data from {}", path.display());
    let file = File::open(path)?;
    let mut reader = GzDecoder::new(BufReader::new(file));
    read_root(&mut reader)
}

/// Reads one named root tag and requires it to be a compound.
pub fn read_root(reader: &mut impl Read) -> Result<(String, Tag), NbtError> {
    let (name, tag) = read_named_tag(reader)?;
    match tag {
        Tag::Compound(_) => Ok((name, tag)),
        other => Err(NbtError::RootNotCompound(other.kind().byte())),
    }
}

/// Reads a type byte, a name, and the payload for that type.
pub fn read_named_tag(reader: &mut impl Read) -> Result<(String, Tag), NbtError> {
    let type_byte = reader.read_u8()?;
    let kind = TagKind::from_byte(type_byte).ok_or(NbtError::UnknownTag(type_byte))?;
    if kind == TagKind::End {
        return Ok((String::new(), Tag::End));
    }
    let name = read_string(reader)?;
    let payload = read_payload(reader, kind)?;
    Ok((name, payload))
}

/// Decodes one payload of the given kind. Recursive for lists and compounds.
pub fn read_payload(reader: &mut impl Read, kind: TagKind) -> Result<Tag, NbtError> {
    match kind {
        TagKind::End => Ok(Tag::End),
        TagKind::Byte => Ok(Tag::Byte(reader.read_i8()?)),
        TagKind::Short => Ok(Tag::Short(reader.read_i16::<BigEndian>()?)),
        TagKind::Int => Ok(Tag::Int(reader.read_i32::<BigEndian>()?)),
        TagKind::Long => Ok(Tag::Long(reader.read_i64::<BigEndian>()?)),
        TagKind::Float => Ok(Tag::Float(reader.read_f32::<BigEndian>()?)),
        TagKind::Double => Ok(Tag::Double(reader.read_f64::<BigEndian>()?)),
        TagKind::ByteArray => {
            let len = read_len(reader)?;
            let mut raw = vec![0u8; len];
            reader.read_exact(&mut raw)?;
            Ok(Tag::ByteArray(raw.into_iter().map(|b| b as i8).collect()))
        }
        TagKind::String => Ok(Tag::String(read_string(reader)?)),
        TagKind::List => {
            let elem_byte = reader.read_u8()?;
            let elem_kind =
                TagKind::from_byte(elem_byte).ok_or(NbtError::UnknownTag(elem_byte))?;
            let len = read_len(reader)?;
            let mut items = Vec::with_capacity(len.min(1 << 16));
            for _ in 0..len {
                items.push(read_payload(reader, elem_kind)?);
            }
            Ok(Tag::List(elem_kind, items))
        }
        TagKind::Compound => {
            let mut entries = Vec::new();
            loop {
                let (name, tag) = read_named_tag(reader)?;
                if tag == Tag::End {
                    break;
                }
                entries.push((name, tag));
            }
            Ok(Tag::Compound(entries))
        }
        TagKind::IntArray => {
            let len = read_len(reader)?;
            let mut values = Vec::with_capacity(len.min(1 << 16));
            for _ in 0..len {
                values.push(reader.read_i32::<BigEndian>()?);
            }
            Ok(Tag::IntArray(values))
        }
        TagKind::LongArray => {
            let len = read_len(reader)?;
            let mut values = Vec::with_capacity(len.min(1 << 16));
            for _ in 0..len {
                values.push(reader.read_i64::<BigEndian>()?);
            }
            Ok(Tag::LongArray(values))
        }
    }
}

fn read_len(reader: &mut impl Read) -> Result<usize, NbtError> {
    let len = reader.read_i32::<BigEndian>()?;
    Ok(len.max(0) as usize)
}

fn read_string(reader: &mut impl Read) -> Result<String, NbtError> {
    let len = reader.read_u16::<BigEndian>()? as usize;
    if len == 0 {
        return Ok(String::new());
    }
    let mut raw = vec![0u8; len];
    reader.read_exact(&mut raw)?;
    String::from_utf8(raw).map_err(|_| NbtError::InvalidString)
}
