/// Data layer: core types, loading, normalisation and filtering.
///
/// Architecture:
/// ```text
///  latest_laptops.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode file → RawListing rows
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  Ram / price / Memory / Cpu → Listing
///   └───────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingTable │  Vec<Listing>, option lists
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Criteria → top-N cheapest matches
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
