//! Schematic parsing and block enumeration.
//!
//! Two on-disk encodings are supported: the legacy dual-array form (numeric
//! block IDs plus 4-bit metadata) and the palette form (block-state string
//! to index mapping plus a flat index array). Both enumerate in Y-outer,
//! Z-middle, X-inner order, skipping air.

use serde_json::Value;
use thiserror::Error;
use vb_nbt::Tag;

pub mod registry;
pub mod rotation;

pub use registry::LegacyRegistry;
pub use rotation::{DEFAULT_ORIENTATION, derive_orientation};

#[derive(Debug, Error)]
pub enum SchematicError {
    #[error("schematic is missing required key {0}")]
    MissingKey(&'static str),
    #[error("schematic key {0} has the wrong type")]
    WrongType(&'static str),
    #[error("schematic block array length {found} does not match {expected} (W*H*L)")]
    LengthMismatch { expected: usize, found: usize },
}

/// Resolves a legacy numeric block ID plus metadata to a block name.
pub trait BlockLookup {
    fn block_name(&self, id: i32, data: u8) -> Option<String>;
}

/// Orientation-determining metadata carried by one placed block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockMeta {
    Legacy(u8),
    Props(Vec<(String, String)>),
}

impl BlockMeta {
    pub fn legacy_bits(&self) -> Option<u8> {
        match self {
            BlockMeta::Legacy(bits) => Some(*bits),
            BlockMeta::Props(_) => None,
        }
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        match self {
            BlockMeta::Legacy(_) => None,
            BlockMeta::Props(props) => props
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
        }
    }
}

/// One non-air block occurrence: schematic position, resolved name,
/// metadata, and the derived target-space orientation pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub name: String,
    pub meta: BlockMeta,
    pub orientation: (i8, i8),
}

#[derive(Debug, Clone)]
enum Encoding {
    Legacy { blocks: Vec<i32>, data: Vec<u8> },
    Palette { states: Vec<Option<BlockState>>, data: Vec<i32> },
}

/// A parsed block-state string: bare name plus ordered properties.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockState {
    pub name: String,
    pub props: Vec<(String, String)>,
}

/// Parses `namespace:name[prop=val,...]`; the namespace is stripped.
pub fn parse_block_state(state: &str) -> BlockState {
    let (head, props_part) = match state.split_once('[') {
        Some((head, rest)) => (head, rest.strip_suffix(']').unwrap_or(rest)),
        None => (state, ""),
    };
    let name = head
        .rsplit_once(':')
        .map(|(_, bare)| bare)
        .unwrap_or(head)
        .to_string();
    let props = props_part
        .split(',')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect();
    BlockState { name, props }
}

#[derive(Debug, Clone)]
pub struct Schematic {
    pub width: i32,
    pub height: i32,
    pub length: i32,
    encoding: Encoding,
}

impl Schematic {
    /// Builds a schematic from a decoded tag tree. The root either is the
    /// `Schematic` compound or contains it.
    pub fn from_tag(root: &Tag) -> Result<Schematic, SchematicError> {
        let schem = root.get("Schematic").unwrap_or(root);
        let width = require_i32(schem, "Width")?;
        let height = require_i32(schem, "Height")?;
        let length = require_i32(schem, "Length")?;

        let encoding = if let Some(palette) = schem.get("Palette") {
            let entries = palette
                .compound_entries()
                .ok_or(SchematicError::WrongType("Palette"))?;
            let pairs: Vec<(String, i32)> = entries
                .iter()
                .filter_map(|(state, tag)| tag.as_i32().map(|idx| (state.clone(), idx)))
                .collect();
            let data = match schem.get("Data").or_else(|| schem.get("BlockData")) {
                Some(Tag::ByteArray(bytes)) => bytes.iter().map(|b| *b as u8 as i32).collect(),
                Some(Tag::IntArray(ints)) => ints.clone(),
                Some(tag) => tag
                    .as_list()
                    .map(|items| items.iter().filter_map(Tag::as_i32).collect())
                    .ok_or(SchematicError::WrongType("Data"))?,
                None => return Err(SchematicError::MissingKey("Data")),
            };
            Encoding::Palette {
                states: build_palette(&pairs),
                data,
            }
        } else {
            let blocks = schem
                .get("Blocks")
                .and_then(Tag::as_byte_array)
                .ok_or(SchematicError::MissingKey("Blocks"))?;
            let data = schem
                .get("Data")
                .and_then(Tag::as_byte_array)
                .ok_or(SchematicError::MissingKey("Data"))?;
            Encoding::Legacy {
                blocks: blocks.iter().map(|b| *b as u8 as i32).collect(),
                data: data.iter().map(|b| *b as u8).collect(),
            }
        };

        let schematic = Schematic {
            width,
            height,
            length,
            encoding,
        };
        schematic.check_length()?;
        Ok(schematic)
    }

    /// Builds a schematic from the JSON produced by the NBT dump: the root
    /// carries `Schematic` directly or nested under an empty-string key.
    pub fn from_json(root: &Value) -> Result<Schematic, SchematicError> {
        let schem = locate_schematic(root).ok_or(SchematicError::MissingKey("Schematic"))?;
        let width = require_json_i32(schem, "Width")?;
        let height = require_json_i32(schem, "Height")?;
        let length = require_json_i32(schem, "Length")?;

        let blocks = schem
            .get("Blocks")
            .ok_or(SchematicError::MissingKey("Blocks"))?;
        let encoding = match blocks {
            Value::Array(ids) => {
                let data = schem
                    .get("Data")
                    .and_then(Value::as_array)
                    .ok_or(SchematicError::MissingKey("Data"))?;
                Encoding::Legacy {
                    blocks: ids
                        .iter()
                        .map(|v| v.as_i64().unwrap_or(0) as u8 as i32)
                        .collect(),
                    data: data.iter().map(|v| v.as_i64().unwrap_or(0) as u8).collect(),
                }
            }
            Value::Object(obj) => {
                let palette = obj
                    .get("Palette")
                    .and_then(Value::as_object)
                    .ok_or(SchematicError::MissingKey("Palette"))?;
                let pairs: Vec<(String, i32)> = palette
                    .iter()
                    .filter_map(|(state, idx)| idx.as_i64().map(|i| (state.clone(), i as i32)))
                    .collect();
                let data = obj
                    .get("Data")
                    .and_then(Value::as_array)
                    .ok_or(SchematicError::MissingKey("Data"))?;
                Encoding::Palette {
                    states: build_palette(&pairs),
                    data: data.iter().map(|v| v.as_i64().unwrap_or(-1) as i32).collect(),
                }
            }
            _ => return Err(SchematicError::WrongType("Blocks")),
        };

        let schematic = Schematic {
            width,
            height,
            length,
            encoding,
        };
        schematic.check_length()?;
        Ok(schematic)
    }

    fn check_length(&self) -> Result<(), SchematicError> {
        let expected = (self.width as usize) * (self.height as usize) * (self.length as usize);
        let lengths = match &self.encoding {
            // Blocks and Data are parallel arrays; both must span the volume.
            Encoding::Legacy { blocks, data } => vec![blocks.len(), data.len()],
            Encoding::Palette { data, .. } => vec![data.len()],
        };
        for found in lengths {
            if found != expected {
                return Err(SchematicError::LengthMismatch { expected, found });
            }
        }
        Ok(())
    }

    /// Enumerates non-air blocks in Y-outer, Z-middle, X-inner order.
    pub fn placed_blocks(&self, lookup: &dyn BlockLookup) -> Vec<PlacedBlock> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for z in 0..self.length {
                for x in 0..self.width {
                    let index = ((y * self.length + z) * self.width + x) as usize;
                    if let Some(block) = self.block_at(index, x, y, z, lookup) {
                        out.push(block);
                    }
                }
            }
        }
        out
    }

    fn block_at(
        &self,
        index: usize,
        x: i32,
        y: i32,
        z: i32,
        lookup: &dyn BlockLookup,
    ) -> Option<PlacedBlock> {
        let (name, meta) = match &self.encoding {
            Encoding::Legacy { blocks, data } => {
                let id = blocks[index];
                if id == 0 {
                    return None;
                }
                let data_value = data[index] & 0x0F;
                let name = lookup.block_name(id, data_value).unwrap_or_else(|| {
                    log::debug!("no name for legacy block id {id}:{data_value}");
                    format!("block_{id}")
                });
                (name, BlockMeta::Legacy(data_value))
            }
            Encoding::Palette { states, data } => {
                let palette_index = data[index];
                let state = usize::try_from(palette_index)
                    .ok()
                    .and_then(|i| states.get(i))
                    .and_then(|s| s.as_ref())?;
                if is_air(&state.name) {
                    return None;
                }
                (state.name.clone(), BlockMeta::Props(state.props.clone()))
            }
        };
        let orientation = derive_orientation(&name, &meta);
        Some(PlacedBlock {
            x,
            y,
            z,
            name,
            meta,
            orientation,
        })
    }
}

fn is_air(name: &str) -> bool {
    matches!(name, "air" | "cave_air" | "void_air")
}

fn build_palette(pairs: &[(String, i32)]) -> Vec<Option<BlockState>> {
    let size = pairs
        .iter()
        .filter_map(|(_, idx)| usize::try_from(*idx).ok())
        .map(|idx| idx + 1)
        .max()
        .unwrap_or(0);
    let mut states = vec![None; size];
    for (state, idx) in pairs {
        if let Ok(idx) = usize::try_from(*idx) {
            states[idx] = Some(parse_block_state(state));
        }
    }
    states
}

/// Converts a decoded tag tree to JSON. Byte arrays become arrays of
/// unsigned 0..=255 integers so the result feeds back into `from_json`.
pub fn tag_to_json(tag: &Tag) -> Value {
    match tag {
        Tag::End => Value::Null,
        Tag::Byte(v) => Value::from(*v),
        Tag::Short(v) => Value::from(*v),
        Tag::Int(v) => Value::from(*v),
        Tag::Long(v) => Value::from(*v),
        Tag::Float(v) => Value::from(*v),
        Tag::Double(v) => Value::from(*v),
        Tag::ByteArray(bytes) => Value::from(
            bytes.iter().map(|b| *b as u8 as i64).collect::<Vec<_>>(),
        ),
        Tag::String(s) => Value::from(s.clone()),
        Tag::List(_, items) => Value::from(items.iter().map(tag_to_json).collect::<Vec<_>>()),
        Tag::Compound(entries) => Value::Object(
            entries
                .iter()
                .map(|(name, value)| (name.clone(), tag_to_json(value)))
                .collect(),
        ),
        Tag::IntArray(ints) => Value::from(ints.clone()),
        Tag::LongArray(longs) => Value::from(longs.clone()),
    }
}

fn locate_schematic(root: &Value) -> Option<&Value> {
    if let Some(schem) = root.get("Schematic") {
        return Some(schem);
    }
    if let Some(inner) = root.get("") {
        if let Some(schem) = inner.get("Schematic") {
            return Some(schem);
        }
        if inner.get("Width").is_some() {
            return Some(inner);
        }
    }
    if root.get("Width").is_some() {
        return Some(root);
    }
    None
}

fn require_i32(tag: &Tag, key: &'static str) -> Result<i32, SchematicError> {
    tag.get(key)
        .ok_or(SchematicError::MissingKey(key))?
        .as_i32()
        .ok_or(SchematicError::WrongType(key))
}

fn require_json_i32(value: &Value, key: &'static str) -> Result<i32, SchematicError> {
    value
        .get(key)
        .ok_or(SchematicError::MissingKey(key))?
        .as_i64()
        .map(|v| v as i32)
        .ok_or(SchematicError::WrongType(key))
}

#[cfg(test)]
mod tests;
