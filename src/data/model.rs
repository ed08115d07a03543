use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CpuFamily – coarse CPU classification
// ---------------------------------------------------------------------------

/// Coarse CPU label derived from the free-text `Cpu` column.
///
/// Variant order is the order option lists are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CpuFamily {
    I3,
    I5,
    I7,
    Ryzen5,
    Ryzen7,
    Other,
}

/// Substring rules checked top-to-bottom; first hit wins.
const CPU_RULES: [(&str, CpuFamily); 5] = [
    ("i7", CpuFamily::I7),
    ("i5", CpuFamily::I5),
    ("i3", CpuFamily::I3),
    ("Ryzen 7", CpuFamily::Ryzen7),
    ("Ryzen 5", CpuFamily::Ryzen5),
];

impl CpuFamily {
    /// Classify a CPU description, e.g. `"Intel Core i5 8250U 1.6GHz"` → `I5`.
    pub fn classify(cpu: &str) -> Self {
        CPU_RULES
            .iter()
            .find(|(needle, _)| cpu.contains(needle))
            .map(|(_, family)| *family)
            .unwrap_or(CpuFamily::Other)
    }

    /// Families considered capable enough for the coding usage rule.
    pub fn is_mid_range_or_better(self) -> bool {
        matches!(
            self,
            CpuFamily::I5 | CpuFamily::I7 | CpuFamily::Ryzen5 | CpuFamily::Ryzen7
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            CpuFamily::I3 => "i3",
            CpuFamily::I5 => "i5",
            CpuFamily::I7 => "i7",
            CpuFamily::Ryzen5 => "Ryzen 5",
            CpuFamily::Ryzen7 => "Ryzen 7",
            CpuFamily::Other => "Other",
        }
    }
}

impl fmt::Display for CpuFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Storage – first type/size pair of the `Memory` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storage {
    /// Storage technology, e.g. `SSD`, `HDD`, `Flash`.
    pub kind: Option<String>,
    /// Numeric size as written (unit not normalised: `1TB` → 1.0).
    pub size: Option<f64>,
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, self.size) {
            (Some(kind), Some(size)) => write!(f, "{size} {kind}"),
            (Some(kind), None) => write!(f, "{kind}"),
            (None, Some(size)) => write!(f, "{size}"),
            (None, None) => f.write_str("–"),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing – one normalised row
// ---------------------------------------------------------------------------

/// A single laptop (one row of the source table) after normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub company: String,
    /// `None` when the source cell is empty.
    pub product: Option<String>,
    pub ram_gb: u32,
    /// Price in the source currency.
    pub price_local_currency: f64,
    /// Price after applying the configured conversion rate, truncated.
    pub price_converted: i64,
    pub storage: Storage,
    pub cpu_text: String,
    pub cpu_family: CpuFamily,
    pub gpu_text: String,
    pub screen_inches: f64,
}

impl Listing {
    pub fn storage_type(&self) -> Option<&str> {
        self.storage.kind.as_deref()
    }

    pub fn storage_size(&self) -> Option<f64> {
        self.storage.size
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete loaded table
// ---------------------------------------------------------------------------

/// The full normalised table with pre-computed option lists.
///
/// Never mutated after construction; share it behind an `Arc` and replace
/// the whole handle on reload.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    pub listings: Vec<Listing>,
    /// Sorted unique brands.
    pub brands: Vec<String>,
    /// Sorted unique CPU families.
    pub cpu_families: Vec<CpuFamily>,
    /// Sorted unique RAM sizes.
    pub ram_sizes: Vec<u32>,
    /// Unique storage types in first-seen order.
    pub storage_types: Vec<String>,
    /// `(min, max)` screen size, `None` for an empty table.
    pub screen_bounds: Option<(f64, f64)>,
}

impl ListingTable {
    /// Build option indices from the normalised listings.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let brands: BTreeSet<&str> = listings.iter().map(|l| l.company.as_str()).collect();
        let cpu_families: BTreeSet<CpuFamily> = listings.iter().map(|l| l.cpu_family).collect();
        let ram_sizes: BTreeSet<u32> = listings.iter().map(|l| l.ram_gb).collect();

        let mut storage_types: Vec<String> = Vec::new();
        for kind in listings.iter().filter_map(|l| l.storage_type()) {
            if !storage_types.iter().any(|k| k == kind) {
                storage_types.push(kind.to_string());
            }
        }

        let screen_bounds = listings.iter().map(|l| l.screen_inches).fold(None, |acc, v| {
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (f64::min(lo, v), f64::max(hi, v)),
            })
        });

        ListingTable {
            brands: brands.into_iter().map(str::to_string).collect(),
            cpu_families: cpu_families.into_iter().collect(),
            ram_sizes: ram_sizes.into_iter().collect(),
            storage_types,
            screen_bounds,
            listings,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
