use serde::{Deserialize, Serialize};

/// A Pantone color of the year. `color` is a `#RRGGBB` hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub id: u64,
    pub name: String,
    pub year: u32,
    pub color: String,
    pub pantone_value: String,
}
