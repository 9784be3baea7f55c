//! Orientation derivation for placed blocks.
//!
//! The target format encodes rotation as two signed axis codes: xaxis is
//! the block's "right" direction, zaxis its "up" direction, each one of
//! {±1, ±2, ±3} for ±X/±Y/±Z. Rules are an ordered list of
//! (predicate, rule) pairs evaluated top to bottom; the first matching name
//! wins and the default rule makes the mapping total.

use crate::BlockMeta;

pub const DEFAULT_ORIENTATION: (i8, i8) = (1, 3);

type Predicate = fn(&str) -> bool;
type Derive = fn(&BlockMeta) -> (i8, i8);

const RULES: &[(Predicate, Derive)] = &[
    (is_stairs, stairs),
    (is_log, log),
    (is_slab, slab),
    (is_torch, torch),
    (is_button_or_lever, button_or_lever),
    (is_gate_or_door, gate_or_door),
];

/// Total function: every (name, meta) pair yields some orientation.
pub fn derive_orientation(name: &str, meta: &BlockMeta) -> (i8, i8) {
    let lower = name.to_ascii_lowercase();
    for (matches, derive) in RULES {
        if matches(&lower) {
            return derive(meta);
        }
    }
    DEFAULT_ORIENTATION
}

fn is_stairs(name: &str) -> bool {
    name.contains("stairs")
}

fn is_log(name: &str) -> bool {
    name.contains("log") || name.contains("wood")
}

fn is_slab(name: &str) -> bool {
    name.contains("slab")
}

fn is_torch(name: &str) -> bool {
    name.contains("torch")
}

fn is_button_or_lever(name: &str) -> bool {
    name.contains("button") || name.contains("lever")
}

fn is_gate_or_door(name: &str) -> bool {
    name.contains("fence_gate") || name.contains("door")
}

fn facing_to_axes(facing: &str) -> Option<(i8, i8)> {
    match facing {
        "east" => Some((1, 3)),
        "west" => Some((-1, 3)),
        "south" => Some((3, 1)),
        "north" => Some((-3, 1)),
        _ => None,
    }
}

fn stairs(meta: &BlockMeta) -> (i8, i8) {
    let (mut xaxis, mut zaxis) = DEFAULT_ORIENTATION;
    let upside_down;
    match meta.legacy_bits() {
        Some(bits) => {
            // data & 0x3: 0=east 1=west 2=south 3=north; 0x4 = upside-down.
            (xaxis, zaxis) = match bits & 0x3 {
                0 => (1, 3),
                1 => (-1, 3),
                2 => (3, 1),
                _ => (-3, 1),
            };
            upside_down = bits & 0x4 != 0;
        }
        None => {
            if let Some(axes) = meta.prop("facing").and_then(facing_to_axes) {
                (xaxis, zaxis) = axes;
            }
            upside_down = meta.prop("half") == Some("top");
        }
    }
    if upside_down {
        zaxis = -zaxis;
    }
    (xaxis, zaxis)
}

fn log(meta: &BlockMeta) -> (i8, i8) {
    match meta.legacy_bits() {
        // data & 0xC: 0 = vertical, 4 = east-west, 8 = north-south.
        Some(bits) => match bits & 0xC {
            0x0 => (1, 2),
            0x4 => (2, 1),
            _ => (1, 3),
        },
        None => match meta.prop("axis") {
            Some("x") => (2, 1),
            Some("z") => (1, 3),
            _ => (1, 2),
        },
    }
}

fn slab(meta: &BlockMeta) -> (i8, i8) {
    let top = match meta.legacy_bits() {
        Some(bits) => bits & 0x8 != 0,
        None => meta.prop("type") == Some("top") || meta.prop("half") == Some("top"),
    };
    if top { (1, 2) } else { (1, -2) }
}

fn torch(meta: &BlockMeta) -> (i8, i8) {
    match meta.legacy_bits() {
        // 1=east 2=west 3=south 4=north wall, 5=standing.
        Some(1) => (1, 3),
        Some(2) => (-1, 3),
        Some(3) => (3, 1),
        Some(4) => (-3, 1),
        Some(5) => (1, 2),
        Some(_) => DEFAULT_ORIENTATION,
        None => meta
            .prop("facing")
            .and_then(facing_to_axes)
            .unwrap_or((1, 2)),
    }
}

fn button_or_lever(meta: &BlockMeta) -> (i8, i8) {
    match meta.legacy_bits() {
        Some(bits) => match bits & 0x7 {
            0 => (1, -2),
            1 => (1, 3),
            2 => (-1, 3),
            3 => (3, 1),
            4 => (-3, 1),
            5 => (1, 2),
            _ => DEFAULT_ORIENTATION,
        },
        None => match meta.prop("face") {
            Some("floor") => (1, 2),
            Some("ceiling") => (1, -2),
            _ => meta
                .prop("facing")
                .and_then(facing_to_axes)
                .unwrap_or(DEFAULT_ORIENTATION),
        },
    }
}

fn gate_or_door(meta: &BlockMeta) -> (i8, i8) {
    match meta.legacy_bits() {
        // data & 0x3: 0=south 1=west 2=north 3=east.
        Some(bits) => match bits & 0x3 {
            0 => (3, 1),
            1 => (-1, 3),
            2 => (-3, 1),
            _ => (1, 3),
        },
        None => meta
            .prop("facing")
            .and_then(facing_to_axes)
            .unwrap_or(DEFAULT_ORIENTATION),
    }
}
