use std::collections::BTreeSet;
use std::fmt;

use super::model::{CpuFamily, Listing, ListingTable};

/// Default number of rows returned by [`select`].
pub const DEFAULT_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Usage – declared intended use
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Usage {
    Coding,
    Gaming,
    Design,
    #[default]
    General,
}

impl Usage {
    pub const ALL: [Usage; 4] = [Usage::Coding, Usage::Gaming, Usage::Design, Usage::General];

    /// Extra constraint layered on top of the explicit filters.
    pub fn admits(self, listing: &Listing) -> bool {
        let gpu = listing.gpu_text.as_str();
        match self {
            Usage::Coding => listing.cpu_family.is_mid_range_or_better(),
            Usage::Gaming => gpu.contains("NVIDIA") || gpu.contains("RTX"),
            Usage::Design => gpu.contains("NVIDIA") || gpu.contains("AMD") || gpu.contains("RTX"),
            Usage::General => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Usage::Coding => "coding",
            Usage::Gaming => "gaming",
            Usage::Design => "design",
            Usage::General => "general",
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Criteria – all user-selected filters for one run
// ---------------------------------------------------------------------------

/// Filter parameters.  Empty sets and an empty query mean "no constraint".
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub max_budget: i64,
    pub min_ram: u32,
    /// Inclusive `(low, high)` screen size range.
    pub screen_range: Option<(f64, f64)>,
    pub brands: BTreeSet<String>,
    pub cpu_families: BTreeSet<CpuFamily>,
    pub storage_types: BTreeSet<String>,
    pub product_query: String,
    pub usage: Usage,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            max_budget: 60_000,
            min_ram: 0,
            screen_range: None,
            brands: BTreeSet::new(),
            cpu_families: BTreeSet::new(),
            storage_types: BTreeSet::new(),
            product_query: String::new(),
            usage: Usage::General,
        }
    }
}

impl Criteria {
    /// Starting filters for a freshly loaded table: smallest RAM on offer,
    /// 13–17" screens, coding usage.
    pub fn initial_for(table: &ListingTable) -> Self {
        Self {
            min_ram: table.ram_sizes.first().copied().unwrap_or(0),
            screen_range: Some((13.0, 17.0)),
            usage: Usage::Coding,
            ..Self::default()
        }
    }

    /// Whether `listing` passes every active predicate.
    pub fn matches(&self, listing: &Listing) -> bool {
        if listing.price_converted > self.max_budget || listing.ram_gb < self.min_ram {
            return false;
        }

        if let Some((a, b)) = self.screen_range {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            if listing.screen_inches < low || listing.screen_inches > high {
                return false;
            }
        }

        if !self.brands.is_empty() && !self.brands.contains(&listing.company) {
            return false;
        }

        if !self.cpu_families.is_empty() && !self.cpu_families.contains(&listing.cpu_family) {
            return false;
        }

        if !self.storage_types.is_empty() {
            match listing.storage_type() {
                Some(kind) if self.storage_types.contains(kind) => {}
                _ => return false,
            }
        }

        let query = self.product_query.trim();
        if !query.is_empty() {
            let query = query.to_lowercase();
            match &listing.product {
                Some(product) if product.to_lowercase().contains(&query) => {}
                _ => return false,
            }
        }

        self.usage.admits(listing)
    }
}

// ---------------------------------------------------------------------------
// Selection – ranked result view
// ---------------------------------------------------------------------------

/// Top rows of a filter run, cheapest first.  Borrows from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub rows: Vec<&'a Listing>,
    /// Number of rows that matched before truncation.
    pub total_matches: usize,
}

impl Selection<'_> {
    /// The "no matches" state.  Not an error.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Filter, sort by converted price and keep the first [`DEFAULT_LIMIT`].
pub fn select<'a>(listings: &'a [Listing], criteria: &Criteria) -> Selection<'a> {
    select_with_limit(listings, criteria, DEFAULT_LIMIT)
}

/// [`select`] with an explicit row limit.
///
/// Ties on price keep their table order.
pub fn select_with_limit<'a>(
    listings: &'a [Listing],
    criteria: &Criteria,
    limit: usize,
) -> Selection<'a> {
    let mut rows: Vec<&Listing> = listings.iter().filter(|l| criteria.matches(l)).collect();
    rows.sort_by_key(|l| l.price_converted);

    let total_matches = rows.len();
    rows.truncate(limit);

    log::debug!("{total_matches} of {} listings match, showing {}", listings.len(), rows.len());

    Selection { rows, total_matches }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Storage;

    fn listing(product: &str, price: i64, ram: u32, cpu: &str, gpu: &str) -> Listing {
        Listing {
            company: "HP".to_string(),
            product: Some(product.to_string()),
            ram_gb: ram,
            price_local_currency: price as f64 / 90.0,
            price_converted: price,
            storage: Storage {
                kind: Some("SSD".to_string()),
                size: Some(256.0),
            },
            cpu_text: cpu.to_string(),
            cpu_family: CpuFamily::classify(cpu),
            gpu_text: gpu.to_string(),
            screen_inches: 15.6,
        }
    }

    fn i5_row() -> Listing {
        listing("250 G6", 45_000, 8, "Intel Core i5-8250U", "Intel UHD Graphics 620")
    }

    fn sample_table() -> Vec<Listing> {
        let mut rows = Vec::new();
        for i in 0..15 {
            let cpu = if i % 3 == 0 { "Intel Celeron" } else { "Intel Core i7" };
            let gpu = if i % 2 == 0 { "Nvidia GeForce RTX 2060" } else { "Intel HD 620" };
            let mut l = listing(&format!("Model {i}"), 100_000 - i * 5_000, 4 + (i as u32 % 3) * 4, cpu, gpu);
            l.company = ["HP", "Dell", "Asus"][i as usize % 3].to_string();
            l.screen_inches = 13.0 + (i as f64) * 0.3;
            rows.push(l);
        }
        rows
    }

    #[test]
    fn coding_usage_excludes_other_cpus() {
        let other = listing("Stream 14", 40_000, 8, "Intel Celeron N3060", "Intel HD Graphics 400");
        let table = vec![i5_row(), other];
        let criteria = Criteria {
            max_budget: 50_000,
            min_ram: 8,
            usage: Usage::Coding,
            ..Criteria::default()
        };

        let result = select(&table, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows[0].cpu_family, CpuFamily::I5);
    }

    #[test]
    fn gaming_requires_nvidia_or_rtx() {
        let table = vec![i5_row()];
        let criteria = Criteria {
            max_budget: i64::MAX,
            usage: Usage::Gaming,
            ..Criteria::default()
        };
        assert!(select(&table, &criteria).is_empty());

        let rtx = listing("Omen", 1_000, 8, "Intel Core i7", "RTX 3060");
        let nvidia = listing("Legion", 1_000, 8, "Intel Core i7", "NVIDIA GeForce GTX 1050");
        // Case-sensitive: "Nvidia" does not match "NVIDIA".
        let mixed = listing("Aspire", 1_000, 8, "Intel Core i7", "Nvidia GeForce MX150");
        assert!(Usage::Gaming.admits(&rtx));
        assert!(Usage::Gaming.admits(&nvidia));
        assert!(!Usage::Gaming.admits(&mixed));
    }

    #[test]
    fn design_accepts_amd_gpus() {
        let amd = listing("Envy", 1_000, 8, "AMD Ryzen 5", "AMD Radeon 530");
        assert!(Usage::Design.admits(&amd));
        assert!(!Usage::Gaming.admits(&amd));
        assert!(Usage::General.admits(&amd));
    }

    #[test]
    fn product_query_is_case_insensitive() {
        let table = vec![
            listing("HP Envy 13", 50_000, 8, "i5", ""),
            listing("Dell Inspiron", 40_000, 8, "i5", ""),
        ];
        for query in ["Envy", "envy", "  ENVY "] {
            let criteria = Criteria {
                product_query: query.to_string(),
                ..Criteria::default()
            };
            let result = select(&table, &criteria);
            assert_eq!(result.len(), 1, "query {query:?}");
            assert_eq!(result.rows[0].product.as_deref(), Some("HP Envy 13"));
        }
    }

    #[test]
    fn absent_product_never_matches_a_query() {
        let mut row = i5_row();
        row.product = None;
        let criteria = Criteria {
            product_query: "G6".to_string(),
            ..Criteria::default()
        };
        assert!(!criteria.matches(&row));
        assert!(Criteria::default().matches(&row));
    }

    #[test]
    fn storage_filter_drops_rows_without_type() {
        let mut untyped = i5_row();
        untyped.storage = Storage::default();
        let criteria = Criteria {
            storage_types: BTreeSet::from(["SSD".to_string()]),
            ..Criteria::default()
        };
        assert!(criteria.matches(&i5_row()));
        assert!(!criteria.matches(&untyped));
    }

    #[test]
    fn screen_range_is_inclusive_and_order_insensitive() {
        let row = i5_row();
        let mut criteria = Criteria {
            screen_range: Some((15.6, 17.0)),
            ..Criteria::default()
        };
        assert!(criteria.matches(&row));
        criteria.screen_range = Some((17.0, 15.6));
        assert!(criteria.matches(&row));
        criteria.screen_range = Some((13.0, 15.5));
        assert!(!criteria.matches(&row));
    }

    #[test]
    fn results_are_sorted_truncated_and_sound() {
        let table = sample_table();
        let criteria = Criteria {
            max_budget: i64::MAX,
            ..Criteria::default()
        };
        let result = select(&table, &criteria);
        assert_eq!(result.len(), DEFAULT_LIMIT);
        assert_eq!(result.total_matches, 15);
        assert!(result.rows.windows(2).all(|w| w[0].price_converted <= w[1].price_converted));

        let narrow = Criteria {
            max_budget: 80_000,
            min_ram: 8,
            brands: BTreeSet::from(["HP".to_string(), "Dell".to_string()]),
            cpu_families: BTreeSet::from([CpuFamily::I7]),
            screen_range: Some((13.0, 16.0)),
            usage: Usage::Design,
            ..Criteria::default()
        };
        let result = select(&table, &narrow);
        assert!(!result.is_empty());
        assert!(result.len() <= DEFAULT_LIMIT);
        for row in &result.rows {
            assert!(narrow.matches(row));
            assert!(row.price_converted <= 80_000);
            assert!(row.ram_gb >= 8);
            assert_eq!(row.cpu_family, CpuFamily::I7);
            assert!(row.company == "HP" || row.company == "Dell");
        }
    }

    #[test]
    fn ties_keep_table_order() {
        let table = vec![
            listing("first", 30_000, 8, "i5", ""),
            listing("second", 20_000, 8, "i5", ""),
            listing("third", 30_000, 8, "i5", ""),
        ];
        let result = select(&table, &Criteria::default());
        let names: Vec<_> = result.rows.iter().filter_map(|l| l.product.as_deref()).collect();
        assert_eq!(names, vec!["second", "first", "third"]);
    }

    #[test]
    fn reselecting_a_result_does_not_narrow_it() {
        let table = sample_table();
        let criteria = Criteria {
            max_budget: 90_000,
            usage: Usage::Gaming,
            ..Criteria::default()
        };
        let first: Vec<Listing> = select(&table, &criteria).rows.into_iter().cloned().collect();
        let second = select(&first, &criteria);
        assert_eq!(second.len(), first.len());
        assert!(second.rows.iter().zip(&first).all(|(a, b)| *a == b));
    }

    #[test]
    fn empty_table_gives_empty_selection() {
        let result = select(&[], &Criteria::default());
        assert!(result.is_empty());
        assert_eq!(result.total_matches, 0);
    }

    #[test]
    fn limit_is_configurable() {
        let table = sample_table();
        let criteria = Criteria {
            max_budget: i64::MAX,
            ..Criteria::default()
        };
        assert_eq!(select_with_limit(&table, &criteria, 3).len(), 3);
    }

    #[test]
    fn initial_criteria_follow_table() {
        let table = ListingTable::from_listings(sample_table());
        let criteria = Criteria::initial_for(&table);
        assert_eq!(criteria.min_ram, 4);
        assert_eq!(criteria.screen_range, Some((13.0, 17.0)));
        assert_eq!(criteria.usage, Usage::Coding);
        assert_eq!(criteria.max_budget, 60_000);
    }
}
