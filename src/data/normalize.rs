use std::sync::LazyLock;

use regex::Regex;

use super::error::MalformedField;
use super::model::{CpuFamily, Listing, Storage};

// ---------------------------------------------------------------------------
// Raw record – one source row before normalisation
// ---------------------------------------------------------------------------

/// The text cells of one source row, exactly as read from the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub company: String,
    pub product: String,
    pub ram: String,
    pub price: String,
    pub memory: String,
    pub cpu: String,
    pub gpu: String,
    pub inches: String,
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// `"8GB"` → `Some(8)`.  The trailing unit is stripped; no digits → `None`.
pub fn parse_ram(text: &str) -> Option<u32> {
    text.trim()
        .trim_end_matches(|c: char| !c.is_ascii_digit())
        .trim()
        .parse()
        .ok()
}

/// Apply the conversion rate and truncate to whole currency units.
pub fn convert_price(price: f64, rate: f64) -> i64 {
    (price * rate).trunc() as i64
}

/// `"<size>[unit] <Type>"`, e.g. `256GB SSD`, `1.0TB Hybrid`.
static SIZE_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s?(?:[KMGT]B)?\s*([A-Za-z]+)").expect("valid regex")
});

/// `"<Type> [size]"`, e.g. `SSD 256`, `Flash`.
static TYPE_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)\s?(\d+\.?\d*)?").expect("valid regex"));

/// Extract the first type/size pair from a `Memory` description.
///
/// Only the segment before the first `+` is examined, so
/// `"256GB SSD +  1TB HDD"` yields the SSD part alone.  Never fails: an
/// unrecognised description gives an empty [`Storage`].
pub fn parse_storage(memory: &str) -> Storage {
    let segment = memory.split('+').next().unwrap_or("");

    if let Some(caps) = SIZE_FIRST.captures(segment) {
        return Storage {
            kind: caps.get(2).map(|m| m.as_str().to_string()),
            size: caps.get(1).and_then(|m| m.as_str().parse().ok()),
        };
    }

    match TYPE_FIRST.captures(segment) {
        Some(caps) => Storage {
            kind: caps.get(1).map(|m| m.as_str().to_string()),
            size: caps.get(2).and_then(|m| m.as_str().parse().ok()),
        },
        None => Storage::default(),
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Normalisation
// ---------------------------------------------------------------------------

/// Normalise one raw row.  `row` is the 1-based data row, used for errors.
pub fn normalize_row(
    raw: &RawListing,
    row: usize,
    conversion_rate: f64,
) -> Result<Listing, MalformedField> {
    let ram_gb = parse_ram(&raw.ram)
        .ok_or_else(|| MalformedField::new(row, "Ram", &raw.ram, "no integer after removing unit"))?;

    let price_local_currency = parse_decimal(&raw.price)
        .filter(|p| *p >= 0.0)
        .ok_or_else(|| MalformedField::new(row, "Price", &raw.price, "not a non-negative number"))?;
    let price_converted = convert_price(price_local_currency, conversion_rate);

    let storage = parse_storage(&raw.memory);
    let cpu_family = CpuFamily::classify(&raw.cpu);

    let screen_inches = parse_decimal(&raw.inches)
        .ok_or_else(|| MalformedField::new(row, "Inches", &raw.inches, "not a number"))?;

    let product = raw.product.trim();

    Ok(Listing {
        company: raw.company.trim().to_string(),
        product: (!product.is_empty()).then(|| product.to_string()),
        ram_gb,
        price_local_currency,
        price_converted,
        storage,
        cpu_text: raw.cpu.trim().to_string(),
        cpu_family,
        gpu_text: raw.gpu.trim().to_string(),
        screen_inches,
    })
}

/// Normalise every row, keeping source order.
///
/// Malformed rows are dropped from the output and returned alongside it so
/// the caller can report them.
pub fn normalize(raw_rows: &[RawListing], conversion_rate: f64) -> (Vec<Listing>, Vec<MalformedField>) {
    let mut listings = Vec::with_capacity(raw_rows.len());
    let mut rejected = Vec::new();

    for (i, raw) in raw_rows.iter().enumerate() {
        match normalize_row(raw, i + 1, conversion_rate) {
            Ok(listing) => listings.push(listing),
            Err(e) => rejected.push(e),
        }
    }

    (listings, rejected)
}
