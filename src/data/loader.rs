use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ByteRecord;

use super::error::LoadError;
use super::model::ListingTable;
use super::normalize::{normalize, RawListing};
use crate::settings::{Settings, SourceEncoding};

/// Prefix of the source price column, e.g. `Price_euros`.
pub const PRICE_PREFIX: &str = "Price_";

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
    pub price_column: String,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the listings file at `path` and normalise every row.
///
/// Malformed rows are skipped with a warning; anything wrong with the file
/// itself is returned as a [`LoadError`].
pub fn load_and_normalize(
    path: &Path,
    settings: &Settings,
) -> Result<(ListingTable, LoadReport), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loading listings from {}", path.display());
    load_reader(file, settings)
}

/// Same as [`load_and_normalize`] for any byte source.
pub fn load_reader<R: Read>(
    reader: R,
    settings: &Settings,
) -> Result<(ListingTable, LoadReport), LoadError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| decode(h, settings.encoding).trim().to_string())
        .collect();

    let columns = ColumnIndex::locate(&headers, settings.price_column.as_deref())?;

    let mut raw_rows = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        raw_rows.push(columns.extract(&record, settings.encoding));
    }

    let (listings, rejected) = normalize(&raw_rows, settings.conversion_rate);
    for err in &rejected {
        log::warn!("Skipping {err}");
    }

    let report = LoadReport {
        loaded: listings.len(),
        skipped: rejected.len(),
        price_column: columns.price_name.clone(),
    };
    log::info!(
        "Loaded {} laptops ({} skipped), price column '{}'",
        report.loaded,
        report.skipped,
        report.price_column
    );

    Ok((ListingTable::from_listings(listings), report))
}

// ---------------------------------------------------------------------------
// Column lookup
// ---------------------------------------------------------------------------

struct ColumnIndex {
    company: usize,
    product: usize,
    ram: usize,
    memory: usize,
    cpu: usize,
    gpu: usize,
    inches: usize,
    price: usize,
    price_name: String,
}

impl ColumnIndex {
    fn locate(headers: &[String], price_column: Option<&str>) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let price = match price_column {
            Some(name) => find(name)?,
            None => headers
                .iter()
                .position(|h| h.starts_with(PRICE_PREFIX) && h.len() > PRICE_PREFIX.len())
                .ok_or(LoadError::NoPriceColumn)?,
        };

        Ok(ColumnIndex {
            company: find("Company")?,
            product: find("Product")?,
            ram: find("Ram")?,
            memory: find("Memory")?,
            cpu: find("Cpu")?,
            gpu: find("Gpu")?,
            inches: find("Inches")?,
            price,
            price_name: headers[price].clone(),
        })
    }

    fn extract(&self, record: &ByteRecord, encoding: SourceEncoding) -> RawListing {
        let cell = |idx: usize| record.get(idx).map(|b| decode(b, encoding)).unwrap_or_default();
        RawListing {
            company: cell(self.company),
            product: cell(self.product),
            ram: cell(self.ram),
            price: cell(self.price),
            memory: cell(self.memory),
            cpu: cell(self.cpu),
            gpu: cell(self.gpu),
            inches: cell(self.inches),
        }
    }
}

/// Decode one cell.  Latin-1 maps every byte to the code point of the same
/// value, so it cannot fail.
fn decode(bytes: &[u8], encoding: SourceEncoding) -> String {
    match encoding {
        SourceEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        SourceEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::CpuFamily;

    const HEADER: &str = "laptop_ID,Company,Product,TypeName,Inches,Cpu,Ram,Memory,Gpu,OpSys,Price_euros\n";

    fn load(csv: &str) -> Result<(ListingTable, LoadReport), LoadError> {
        load_reader(csv.as_bytes(), &Settings::default())
    }

    #[test]
    fn loads_and_normalizes_rows() {
        let csv = format!(
            "{HEADER}\
             1,HP,250 G6,Notebook,15.6,Intel Core i5 8250U 1.6GHz,8GB,256GB SSD,Intel UHD Graphics 620,Windows 10,500.0\n\
             2,Asus,ROG Strix,Gaming,17.3,Intel Core i7 7700HQ 2.8GHz,16GB,256GB SSD +  1TB HDD,Nvidia GeForce GTX 1070,Windows 10,1899\n"
        );
        let (table, report) = load(&csv).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.price_column, "Price_euros");

        let hp = &table.listings[0];
        assert_eq!(hp.company, "HP");
        assert_eq!(hp.price_converted, 45000);
        assert_eq!(hp.cpu_family, CpuFamily::I5);

        let asus = &table.listings[1];
        assert_eq!(asus.ram_gb, 16);
        assert_eq!(asus.storage_type(), Some("SSD"));
        assert_eq!(asus.price_converted, 170910);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv = format!(
            "{HEADER}\
             1,HP,250 G6,Notebook,15.6,Intel Core i5,GB,256GB SSD,Intel HD,Windows 10,500\n\
             2,Dell,Inspiron,Notebook,15.6,Intel Core i3,4GB,1TB HDD,Intel HD,Windows 10,400\n"
        );
        let (table, report) = load(&csv).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(table.listings[0].company, "Dell");
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Company,Product,Ram,Memory,Cpu,Inches,Price_euros\nHP,X,8GB,SSD,i5,15.6,100\n";
        match load(csv) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "Gpu"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_price_column_is_fatal() {
        let csv = "Company,Product,Ram,Memory,Cpu,Gpu,Inches\nHP,X,8GB,SSD,i5,Intel,15.6\n";
        assert!(matches!(load(csv), Err(LoadError::NoPriceColumn)));
    }

    #[test]
    fn explicit_price_column_is_used() {
        let csv = "Company,Product,Ram,Memory,Cpu,Gpu,Inches,Price_euros,Price_usd\n\
                   HP,X,8GB,SSD,i5,Intel,15.6,100,200\n";
        let settings = Settings {
            price_column: Some("Price_usd".into()),
            ..Settings::default()
        };
        let (table, report) = load_reader(csv.as_bytes(), &settings).unwrap();
        assert_eq!(report.price_column, "Price_usd");
        assert_eq!(table.listings[0].price_converted, 18000);
    }

    #[test]
    fn header_only_file_gives_empty_table() {
        let (table, report) = load(HEADER).unwrap();
        assert!(table.is_empty());
        assert_eq!(report.loaded, 0);
    }

    #[test]
    fn latin1_cells_are_decoded() {
        let mut bytes = b"Company,Product,Ram,Memory,Cpu,Gpu,Inches,Price_euros\n".to_vec();
        // "Café 14" with é as the single Latin-1 byte 0xE9.
        bytes.extend_from_slice(b"Acer,Caf\xe9 14,4GB,128GB SSD,Intel Celeron,Intel HD,14,250\n");
        let (table, _) = load_reader(bytes.as_slice(), &Settings::default()).unwrap();
        assert_eq!(table.listings[0].product.as_deref(), Some("Café 14"));
    }

    #[test]
    fn file_backed_load_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{HEADER}1,Lenovo,IdeaPad 320,Notebook,15.6,AMD Ryzen 5 2500U,8GB,1TB HDD,AMD Radeon Vega 8,Windows 10,600\n"
        )
        .unwrap();

        let (table, _) = load_and_normalize(file.path(), &Settings::default()).unwrap();
        assert_eq!(table.listings[0].cpu_family, CpuFamily::Ryzen5);
        assert_eq!(table.listings[0].storage_type(), Some("HDD"));

        let missing = file.path().with_extension("does-not-exist");
        assert!(matches!(
            load_and_normalize(&missing, &Settings::default()),
            Err(LoadError::Io { .. })
        ));
    }
}
