//! Trivia prompts shown during the tilt game

use serde::{Deserialize, Serialize};

/// A single card: the item to guess plus a fact about it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prompt {
    pub name: String,
    pub hint: String,
}

impl Prompt {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }

    /// The built-in 30-card trash catalog
    pub fn default_catalog() -> Vec<Prompt> {
        DEFAULT_CATALOG
            .iter()
            .map(|(name, hint)| Prompt::new(*name, *hint))
            .collect()
    }
}

const DEFAULT_CATALOG: &[(&str, &str)] = &[
    ("PLASTIC BOTTLE", "600 billion dumped in oceans yearly. Takes 450 years to decompose."),
    ("ALUMINUM CAN", "2.7 million cans wasted every 30 minutes. Recycling saves 95% energy."),
    ("STYROFOAM CUP", "500+ year decomposition. Releases toxic styrene when burned."),
    ("CIGARETTE BUTT", "Trillions discarded annually. Contains arsenic and lead."),
    ("PLASTIC BAG", "Kills 100,000 marine animals yearly."),
    ("PAPER", "40% of global waste. Recycling saves trees."),
    ("PLASTIC STRAW", "500 million used daily in US. Rarely recycled."),
    ("FOOD WRAPPER", "23% of landfill waste. Often non-recyclable."),
    ("FAST FOOD CONTAINER", "Significant urban litter waste."),
    ("SODA CAN", "180 billion produced yearly. Recycling rate ~50%."),
    ("PLASTIC UTENSILS", "Decompose in 1000 years. 40 billion thrown away annually in US."),
    ("DISPOSABLE CUP", "50 billion paper cups discarded yearly (US)."),
    ("CHIP BAG", "Multi-layer mix, impossible to recycle."),
    ("COFFEE POD", "56 billion pods in landfills. 500 years to decompose."),
    ("PLASTIC BOTTLE CAP", "Top 5 ocean pollutants."),
    ("BROKEN GLASS", "1 million years to decompose."),
    ("OLD NEWSPAPER", "10 million tons wasted annually in US."),
    ("USED BATTERY", "Contains mercury/cadmium. 3 billion discarded yearly in US."),
    ("DISPOSABLE DIAPER", "20 billion in US landfills yearly. 500 years to decompose."),
    ("ELECTRONICS WASTE", "50 million tons globally. Only 20% recycled."),
    ("PLASTIC CUTLERY", "Deadly for sea turtles."),
    ("BEER BOTTLE", "28 billion thrown away annually."),
    ("PIZZA BOX", "50% unrecyclable due to grease."),
    ("GUM WRAPPER", "100,000 tons yearly waste."),
    ("PLASTIC TOY", "90% of toys are plastic."),
    ("PLASTIC HANGER", "8 billion produced annually worldwide."),
    ("BALLOON", "Kills 100,000 marine animals annually."),
    ("PLASTIC CUP", "16 billion used yearly. <1% recycled."),
    ("PLASTIC PACKAGING", "40% of plastic production for packaging, used once."),
    ("PLASTIC LIDS", "20 billion produced monthly."),
];
