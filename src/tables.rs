//! Standard attribute tables, version 1.
//!
//! These lists are a frozen contract: a hash maps to a table index, so
//! reordering or removing an entry silently changes every entity ever
//! generated from it. Append only, and bump `CATALOG_VERSION` when a list
//! changes.

/// Version stamped on every record generated from these tables
pub const CATALOG_VERSION: u32 = 1;

pub const COLORS: &[&str] = &[
    "Crimson", "Azure", "Emerald", "Golden", "Violet", "Obsidian", "Ivory", "Amber", "Teal",
    "Rose", "Silver", "Copper", "Indigo", "Jade", "Scarlet", "Pearl",
];

pub const SIZES: &[&str] = &["Tiny", "Small", "Medium", "Large", "Huge", "Colossal"];

pub const CREATURE_TYPES: &[&str] = &[
    "Dragon", "Phoenix", "Griffin", "Unicorn", "Kitsune", "Serpent", "Wolf", "Owl", "Turtle",
    "Fox", "Cat", "Rabbit", "Golem", "Sprite", "Kraken", "Basilisk",
];

pub const ELEMENTS: &[&str] = &[
    "Fire", "Water", "Earth", "Air", "Lightning", "Ice", "Nature", "Shadow", "Light", "Cosmic",
];

pub const PERSONALITIES: &[&str] = &[
    "Brave",
    "Curious",
    "Gentle",
    "Mischievous",
    "Loyal",
    "Playful",
    "Wise",
    "Fierce",
    "Shy",
    "Proud",
    "Calm",
    "Energetic",
];

pub const HABITATS: &[&str] = &[
    "Forest", "Ocean", "Mountain", "Desert", "Volcano", "Tundra", "Swamp", "Cave", "Sky",
    "Meadow",
];

pub const PATTERNS: &[&str] = &[
    "Solid",
    "Striped",
    "Spotted",
    "Marbled",
    "Scaled",
    "Speckled",
    "Banded",
    "Iridescent",
    "Runic",
    "Gradient",
];

pub const AURAS: &[&str] = &[
    "Radiant",
    "Ember",
    "Frost",
    "Storm",
    "Verdant",
    "Umbral",
    "Celestial",
    "Prismatic",
];

pub const SPECIAL_FEATURES: &[&str] = &[
    "Crystal Horns",
    "Feathered Wings",
    "Glowing Eyes",
    "Twin Tails",
    "Armored Scales",
    "Flowing Mane",
    "Bioluminescent Spots",
    "Spiked Tail",
    "Third Eye",
    "Antlers of Light",
    "Ethereal Fins",
    "Starlit Fur",
    "Ember Claws",
    "Frost Vents",
    "Vine Tendrils",
    "Shadow Cloak",
    "Golden Halo",
    "Runic Markings",
    "Pearl Shell",
    "Prismatic Feathers",
];

pub const ABILITIES: &[&str] = &[
    "Flame Burst",
    "Tidal Wave",
    "Stone Skin",
    "Gust",
    "Thunder Strike",
    "Frost Nova",
    "Healing Bloom",
    "Shadow Step",
    "Radiant Beam",
    "Starfall",
    "Quick Dash",
    "Iron Guard",
    "Mind Read",
    "Lucky Find",
    "Regenerate",
    "Camouflage",
    "Echo Call",
    "Venom Bite",
    "Gravity Well",
    "Time Skip",
    "Barrier",
    "Howl",
    "Phase Shift",
    "Soul Link",
];

pub const ENCOUNTER_BEHAVIORS: &[&str] = &[
    "Aggressive",
    "Timid",
    "Territorial",
    "Curious",
    "Sleeping",
    "Hunting",
    "Playful",
    "Wary",
];

pub const ITEM_PREFIXES: &[&str] = &[
    "Ancient",
    "Blessed",
    "Cursed",
    "Gleaming",
    "Runed",
    "Enchanted",
    "Forgotten",
    "Royal",
    "Wild",
    "Hollow",
    "Storm-forged",
    "Whispering",
];

pub const ITEM_PROPERTIES: &[&str] = &[
    "Self-Repairing",
    "Featherweight",
    "Soulbound",
    "Resonant",
    "Thorned",
    "Warded",
    "Luminous",
    "Vampiric",
    "Swift",
    "Unbreakable",
    "Echoing",
    "Bountiful",
];

/// Equipment slots and their selection weights
pub const EQUIPMENT_SLOTS: &[(&str, u32)] = &[
    ("Weapon", 30),
    ("Armor", 25),
    ("Accessory", 20),
    ("Head", 15),
    ("Feet", 10),
];

/// Item categories that can fill each equipment slot
pub const SLOT_CATEGORIES: &[(&str, &[&str])] = &[
    ("Weapon", &["Sword", "Staff", "Bow", "Dagger", "Spear"]),
    ("Armor", &["Breastplate", "Robe", "Shield", "Cloak"]),
    ("Accessory", &["Amulet", "Ring", "Charm", "Talisman"]),
    ("Head", &["Helm", "Crown", "Hood"]),
    ("Feet", &["Boots", "Greaves", "Sandals"]),
];

/// Environment name, native elements, native materials
pub const ENVIRONMENTS: &[(&str, &[&str], &[&str])] = &[
    (
        "Forest",
        &["Nature", "Earth", "Air"],
        &["Oakwood", "Moss Silk", "Amberwood", "Thornvine"],
    ),
    (
        "Ocean",
        &["Water", "Ice", "Lightning"],
        &["Coral", "Pearl", "Driftwood", "Sea Glass"],
    ),
    (
        "Mountain",
        &["Earth", "Air", "Ice"],
        &["Granite", "Iron", "Mithril", "Quartz"],
    ),
    (
        "Desert",
        &["Fire", "Earth", "Light"],
        &["Sandstone", "Bronze", "Sunstone", "Bone"],
    ),
    (
        "Volcano",
        &["Fire", "Earth", "Shadow"],
        &["Obsidian", "Magma Glass", "Dragonsteel", "Basalt"],
    ),
    (
        "Tundra",
        &["Ice", "Water", "Air"],
        &["Frostsilver", "Whalebone", "Glacier Ice", "Fur"],
    ),
    (
        "Swamp",
        &["Water", "Nature", "Shadow"],
        &["Bogwood", "Reed", "Toadstone", "Peat Iron"],
    ),
    (
        "Cave",
        &["Shadow", "Earth", "Cosmic"],
        &["Geode", "Darksteel", "Glowstone", "Silver"],
    ),
    (
        "Sky",
        &["Air", "Lightning", "Light", "Cosmic"],
        &["Cloudsilk", "Stormglass", "Starmetal", "Feather"],
    ),
    (
        "Meadow",
        &["Nature", "Light", "Air"],
        &["Willow", "Linen", "Honeystone", "Copper"],
    ),
];

/// Creature name templates, indexed by the naming slot
pub const CREATURE_NAME_TEMPLATES: &[&str] = &[
    "{personality} {type}",
    "{element} {type}",
    "{rarity} {type}",
    "{color} {type}",
];

pub const ENCOUNTER_NAME_TEMPLATES: &[&str] = &[
    "Wild {element} {type}",
    "{behavior} {type}",
    "{size} {type} of the {environment}",
];

pub const ITEM_NAME_TEMPLATES: &[&str] = &[
    "{prefix} {material} {category}",
    "{material} {category} of {element}",
    "{rarity} {category}",
];
