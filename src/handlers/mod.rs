// handlers/mod.rs - two security tiers
//
// public:    no principal required (configured public prefixes)
// protected: bearer token required

pub mod protected;
pub mod public;
