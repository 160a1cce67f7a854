use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Where a packed Lua fragment is delivered.
#[derive(Display, Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Scripts run against the full `UnitDefs` table
    #[display("tweakdefs")]
    TweakDefs,
    /// Lua tables merged into individual unit definitions
    #[display("tweakunits")]
    TweakUnits,
}

impl Category {
    /// Emission order of slot commands.
    pub const ALL: [Category; 2] = [Category::TweakDefs, Category::TweakUnits];

    pub fn from_name(name: &str) -> Option<Category> {
        match name {
            "tweakdefs" => Some(Category::TweakDefs),
            "tweakunits" => Some(Category::TweakUnits),
            _ => None,
        }
    }

    // Both categories carry Lua
    pub fn comment_prefix(&self) -> &'static str {
        "--"
    }

    pub fn line_terminator(&self) -> &'static str {
        "\n"
    }

    /// Option name for the given slot: `tweakdefs`, `tweakdefs1`, `tweakdefs2`, ...
    pub fn slot_name(&self, slot: usize) -> String {
        match slot {
            0 => self.to_string(),
            n => format!("{self}{n}"),
        }
    }
}
