//! Numeric block-ID registry for legacy schematics (1.8-era IDs).
//!
//! Metadata picks the variant where it changes the block's material, which
//! is what the unit-blueprint lookup keys on.

use crate::BlockLookup;

pub struct LegacyRegistry;

impl BlockLookup for LegacyRegistry {
    fn block_name(&self, id: i32, data: u8) -> Option<String> {
        block_name(id, data).map(str::to_string)
    }
}

fn wood_variant(meta: u8) -> &'static str {
    match meta & 0x7 {
        1 => "spruce",
        2 => "birch",
        3 => "jungle",
        4 => "acacia",
        5 => "dark_oak",
        _ => "oak",
    }
}

fn color_variant(meta: u8) -> &'static str {
    match meta & 0xF {
        0 => "white",
        1 => "orange",
        2 => "magenta",
        3 => "light_blue",
        4 => "yellow",
        5 => "lime",
        6 => "pink",
        7 => "gray",
        8 => "light_gray",
        9 => "cyan",
        10 => "purple",
        11 => "blue",
        12 => "brown",
        13 => "green",
        14 => "red",
        _ => "black",
    }
}

pub fn block_name(id: i32, meta: u8) -> Option<&'static str> {
    let name = match id {
        1 => match meta {
            1 => "granite",
            2 => "polished_granite",
            3 => "diorite",
            4 => "polished_diorite",
            5 => "andesite",
            6 => "polished_andesite",
            _ => "stone",
        },
        2 => "grass_block",
        3 => match meta {
            1 => "coarse_dirt",
            2 => "podzol",
            _ => "dirt",
        },
        4 => "cobblestone",
        5 => return Some(planks_name(meta)),
        6 => return Some(sapling_name(meta)),
        7 => "bedrock",
        8 | 9 => "water",
        10 | 11 => "lava",
        12 => {
            if meta & 1 == 1 {
                "red_sand"
            } else {
                "sand"
            }
        }
        13 => "gravel",
        14 => "gold_ore",
        15 => "iron_ore",
        16 => "coal_ore",
        17 => return Some(log_name(meta)),
        18 => return Some(leaves_name(meta)),
        19 => "sponge",
        20 => "glass",
        21 => "lapis_ore",
        22 => "lapis_block",
        24 => match meta & 0x3 {
            1 => "chiseled_sandstone",
            2 => "smooth_sandstone",
            _ => "sandstone",
        },
        25 => "note_block",
        35 => return Some(wool_name(meta)),
        41 => "gold_block",
        42 => "iron_block",
        43 | 44 => match meta & 0x7 {
            1 => "sandstone_slab",
            2 => "oak_slab",
            3 => "cobblestone_slab",
            4 => "brick_slab",
            5 => "stone_brick_slab",
            6 => "nether_brick_slab",
            7 => "quartz_slab",
            _ => "stone_slab",
        },
        45 => "bricks",
        46 => "tnt",
        47 => "bookshelf",
        48 => "mossy_cobblestone",
        49 => "obsidian",
        50 => "torch",
        53 => "oak_stairs",
        54 => "chest",
        56 => "diamond_ore",
        57 => "diamond_block",
        58 => "crafting_table",
        60 => "farmland",
        61 | 62 => "furnace",
        64 => "oak_door",
        65 => "ladder",
        67 => "cobblestone_stairs",
        69 => "lever",
        72 => "oak_pressure_plate",
        77 => "stone_button",
        78 => "snow_layer",
        79 => "ice",
        80 => "snow_block",
        81 => "cactus",
        82 => "clay",
        85 => "oak_fence",
        86 => "pumpkin",
        87 => "netherrack",
        88 => "soul_sand",
        89 => "glowstone",
        95 => return Some(stained_glass_name(meta)),
        97 => "stone",
        98 => match meta {
            1 => "mossy_stone_bricks",
            2 => "cracked_stone_bricks",
            3 => "chiseled_stone_bricks",
            _ => "stone_bricks",
        },
        102 => "glass_pane",
        103 => "melon",
        107 => "oak_fence_gate",
        108 => "brick_stairs",
        109 => "stone_brick_stairs",
        112 => "nether_bricks",
        114 => "nether_brick_stairs",
        121 => "end_stone",
        126 => return Some(wooden_slab_name(meta)),
        128 => "sandstone_stairs",
        133 => "emerald_block",
        134 => "spruce_stairs",
        135 => "birch_stairs",
        136 => "jungle_stairs",
        139 => {
            if meta == 1 {
                "mossy_cobblestone_wall"
            } else {
                "cobblestone_wall"
            }
        }
        143 => "oak_button",
        155 => "quartz_block",
        156 => "quartz_stairs",
        159 => return Some(terracotta_name(meta)),
        160 => return Some(stained_glass_pane_name(meta)),
        161 => {
            if meta & 0x1 == 1 {
                "dark_oak_leaves"
            } else {
                "acacia_leaves"
            }
        }
        162 => {
            if meta & 0x1 == 1 {
                "dark_oak_log"
            } else {
                "acacia_log"
            }
        }
        163 => "acacia_stairs",
        164 => "dark_oak_stairs",
        170 => "hay_block",
        171 => return Some(carpet_name(meta)),
        172 => "terracotta",
        173 => "coal_block",
        174 => "packed_ice",
        _ => return None,
    };
    Some(name)
}

macro_rules! variant_names {
    ($fn_name:ident, $variant:ident, $suffix:literal, [$($v:literal),+]) => {
        fn $fn_name(meta: u8) -> &'static str {
            match $variant(meta) {
                $($v => concat!($v, $suffix),)+
                _ => concat!("oak", $suffix),
            }
        }
    };
}

variant_names!(
    planks_name,
    wood_variant,
    "_planks",
    ["oak", "spruce", "birch", "jungle", "acacia", "dark_oak"]
);
variant_names!(
    sapling_name,
    wood_variant,
    "_sapling",
    ["oak", "spruce", "birch", "jungle", "acacia", "dark_oak"]
);
variant_names!(
    wooden_slab_name,
    wood_variant,
    "_slab",
    ["oak", "spruce", "birch", "jungle", "acacia", "dark_oak"]
);
variant_names!(
    wool_name,
    color_variant,
    "_wool",
    [
        "white",
        "orange",
        "magenta",
        "light_blue",
        "yellow",
        "lime",
        "pink",
        "gray",
        "light_gray",
        "cyan",
        "purple",
        "blue",
        "brown",
        "green",
        "red",
        "black"
    ]
);
variant_names!(
    carpet_name,
    color_variant,
    "_carpet",
    [
        "white",
        "orange",
        "magenta",
        "light_blue",
        "yellow",
        "lime",
        "pink",
        "gray",
        "light_gray",
        "cyan",
        "purple",
        "blue",
        "brown",
        "green",
        "red",
        "black"
    ]
);
variant_names!(
    stained_glass_name,
    color_variant,
    "_stained_glass",
    [
        "white",
        "orange",
        "magenta",
        "light_blue",
        "yellow",
        "lime",
        "pink",
        "gray",
        "light_gray",
        "cyan",
        "purple",
        "blue",
        "brown",
        "green",
        "red",
        "black"
    ]
);
variant_names!(
    stained_glass_pane_name,
    color_variant,
    "_stained_glass_pane",
    [
        "white",
        "orange",
        "magenta",
        "light_blue",
        "yellow",
        "lime",
        "pink",
        "gray",
        "light_gray",
        "cyan",
        "purple",
        "blue",
        "brown",
        "green",
        "red",
        "black"
    ]
);
variant_names!(
    terracotta_name,
    color_variant,
    "_terracotta",
    [
        "white",
        "orange",
        "magenta",
        "light_blue",
        "yellow",
        "lime",
        "pink",
        "gray",
        "light_gray",
        "cyan",
        "purple",
        "blue",
        "brown",
        "green",
        "red",
        "black"
    ]
);

fn log_name(meta: u8) -> &'static str {
    match meta & 0x3 {
        1 => "spruce_log",
        2 => "birch_log",
        3 => "jungle_log",
        _ => "oak_log",
    }
}

fn leaves_name(meta: u8) -> &'static str {
    match meta & 0x3 {
        1 => "spruce_leaves",
        2 => "birch_leaves",
        3 => "jungle_leaves",
        _ => "oak_leaves",
    }
}
