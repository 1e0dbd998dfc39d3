use serde::Serialize;
use std::fmt;

/// Commodities the exchange publishes intraday charts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Commodity {
    Gold,
    Silver,
    Copper,
    Zinc,
    Crudeoil,
    Cardamom,
    Cotton,
    Lead,
}

impl Commodity {
    pub const ALL: [Commodity; 8] = [
        Commodity::Gold,
        Commodity::Silver,
        Commodity::Copper,
        Commodity::Zinc,
        Commodity::Crudeoil,
        Commodity::Cardamom,
        Commodity::Cotton,
        Commodity::Lead,
    ];

    /// Resolve a user supplied name, ignoring case.
    pub fn lookup(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Lowercase key accepted in requests.
    pub fn key(&self) -> &'static str {
        match self {
            Commodity::Gold => "gold",
            Commodity::Silver => "silver",
            Commodity::Copper => "copper",
            Commodity::Zinc => "zinc",
            Commodity::Crudeoil => "crudeoil",
            Commodity::Cardamom => "cardamom",
            Commodity::Cotton => "cotton",
            Commodity::Lead => "lead",
        }
    }

    /// Name the upstream chart endpoint expects.
    pub fn upstream_name(&self) -> &'static str {
        match self {
            Commodity::Gold => "Gold",
            Commodity::Silver => "Silver",
            Commodity::Copper => "Copper",
            Commodity::Zinc => "Zinc",
            Commodity::Crudeoil => "Crudeoil",
            Commodity::Cardamom => "Cardamom",
            Commodity::Cotton => "Cotton",
            Commodity::Lead => "Lead",
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.upstream_name())
    }
}
