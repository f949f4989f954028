use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const SUPER_EFFECTIVE: i32 = 5;
pub const NOT_VERY_EFFECTIVE: i32 = -3;
pub const NEUTRAL: i32 = 0;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ElementType {
    Normal,
    Electric,
    Water,
    Grass,
    Fire,
    Ground,
}

static ELEMENT_NAMES: phf::Map<&'static str, ElementType> = phf::phf_map! {
    "normal" => ElementType::Normal,
    "electric" => ElementType::Electric,
    "water" => ElementType::Water,
    "grass" => ElementType::Grass,
    "fire" => ElementType::Fire,
    "ground" => ElementType::Ground,
};

impl ElementType {
    pub const ALL: [ElementType; 6] = [
        ElementType::Normal,
        ElementType::Electric,
        ElementType::Water,
        ElementType::Grass,
        ElementType::Fire,
        ElementType::Ground,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Normal => "Normal",
            ElementType::Electric => "Electric",
            ElementType::Water => "Water",
            ElementType::Grass => "Grass",
            ElementType::Fire => "Fire",
            ElementType::Ground => "Ground",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown element type '{0}'")]
pub struct UnknownElementType(pub String);

impl FromStr for ElementType {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ELEMENT_NAMES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnknownElementType(s.to_string()))
    }
}

impl TryFrom<String> for ElementType {
    type Error = UnknownElementType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// Additive modifiers: attack type first, defender type second.
static TYPE_CHART: Lazy<HashMap<(ElementType, ElementType), i32>> = Lazy::new(|| {
    use ElementType::*;
    let mut chart = HashMap::new();
    for defender in ElementType::ALL {
        chart.insert((Normal, defender), NEUTRAL);
    }
    let mut add = |attack: ElementType, strong: &[ElementType], weak: &[ElementType]| {
        for &defender in strong {
            chart.insert((attack, defender), SUPER_EFFECTIVE);
        }
        for &defender in weak {
            chart.insert((attack, defender), NOT_VERY_EFFECTIVE);
        }
    };
    add(Electric, &[Water], &[Grass, Electric, Ground]);
    add(Water, &[Fire, Ground], &[Water, Grass]);
    add(Grass, &[Water, Ground], &[Fire, Grass]);
    add(Fire, &[Grass], &[Fire, Water]);
    add(Ground, &[Electric, Fire], &[Grass]);
    chart
});

/// Modifier added to a move's base damage when `attack` hits `defender`.
///
/// Pairs the chart does not list are neutral.
pub fn effectiveness(attack: ElementType, defender: ElementType) -> i32 {
    TYPE_CHART
        .get(&(attack, defender))
        .copied()
        .unwrap_or(NEUTRAL)
}

/// Same lookup keyed by type names. Names outside the chart are neutral.
pub fn effectiveness_by_name(attack: &str, defender: &str) -> i32 {
    match (attack.parse::<ElementType>(), defender.parse::<ElementType>()) {
        (Ok(attack), Ok(defender)) => effectiveness(attack, defender),
        _ => NEUTRAL,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effectiveness {
    Super,
    NotVery,
    Neutral,
}

impl Effectiveness {
    pub fn from_modifier(modifier: i32) -> Self {
        match modifier {
            SUPER_EFFECTIVE => Effectiveness::Super,
            NOT_VERY_EFFECTIVE => Effectiveness::NotVery,
            _ => Effectiveness::Neutral,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Effectiveness::Super => "It was super effective.",
            Effectiveness::NotVery => "It was not very effective.",
            Effectiveness::Neutral => "It was effective.",
        }
    }
}
