//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions. The three chain effects
/// are emitted one at a time; each step's URL is only known once the
/// previous response arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the pokemon list (one request, no siblings)
    LoadRoster { limit: u32 },
    /// Chain step 1: details by 1-based list index
    LoadDetails { index: usize },
    /// Chain step 2: species resource referenced by the details
    LoadSpecies { index: usize, url: String },
    /// Chain step 3: evolution chain referenced by the species
    LoadEvolution { index: usize, url: String },
}
