use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic laptop listings CSV in the `latest_laptops.csv` layout.
#[derive(Debug, Parser)]
struct Args {
    /// Output file.
    #[arg(default_value = "latest_laptops.csv")]
    out: PathBuf,

    /// Number of rows.
    #[arg(long, default_value_t = 300)]
    rows: usize,

    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One row in the raw source layout.
#[derive(Debug, Serialize)]
struct RawRow {
    #[serde(rename = "laptop_ID")]
    id: usize,
    #[serde(rename = "Company")]
    company: &'static str,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "TypeName")]
    type_name: &'static str,
    #[serde(rename = "Inches")]
    inches: f64,
    #[serde(rename = "Cpu")]
    cpu: &'static str,
    #[serde(rename = "Ram")]
    ram: String,
    #[serde(rename = "Memory")]
    memory: &'static str,
    #[serde(rename = "Gpu")]
    gpu: &'static str,
    #[serde(rename = "OpSys")]
    op_sys: &'static str,
    #[serde(rename = "Weight")]
    weight: String,
    #[serde(rename = "Price_euros")]
    price_euros: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Pick one entry of a non-empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

// (brand, model lines)
const BRANDS: [(&str, [&str; 3]); 6] = [
    ("HP", ["Envy", "Pavilion", "Omen"]),
    ("Dell", ["Inspiron", "XPS", "Latitude"]),
    ("Lenovo", ["IdeaPad", "ThinkPad", "Legion"]),
    ("Asus", ["VivoBook", "ZenBook", "ROG Strix"]),
    ("Acer", ["Aspire", "Swift", "Predator"]),
    ("Apple", ["MacBook Air", "MacBook Pro", "MacBook"]),
];

// (cpu, price weight)
const CPUS: [(&str, f64); 7] = [
    ("Intel Core i3 6006U 2GHz", 0.8),
    ("Intel Core i5 8250U 1.6GHz", 1.0),
    ("Intel Core i7 8550U 1.8GHz", 1.3),
    ("Intel Core i7 7700HQ 2.8GHz", 1.5),
    ("AMD Ryzen 5 2500U 2GHz", 0.95),
    ("AMD Ryzen 7 2700U 2.2GHz", 1.2),
    ("Intel Celeron Dual Core N3350 1.1GHz", 0.5),
];

// (gpu, price weight)
const GPUS: [(&str, f64); 6] = [
    ("Intel UHD Graphics 620", 1.0),
    ("Intel HD Graphics 500", 0.9),
    ("NVIDIA GeForce GTX 1050", 1.3),
    ("NVIDIA GeForce RTX 2060", 1.7),
    ("AMD Radeon 530", 1.15),
    ("AMD Radeon Vega 8", 1.05),
];

const MEMORY: [&str; 7] = [
    "128GB SSD",
    "256GB SSD",
    "512GB SSD",
    "1TB HDD",
    "256GB SSD +  1TB HDD",
    "64GB Flash Storage",
    "1.0TB Hybrid",
];

const RAM_GB: [u32; 5] = [4, 8, 8, 16, 32];
const INCHES: [f64; 5] = [11.6, 13.3, 14.0, 15.6, 17.3];
const TYPES: [&str; 4] = ["Notebook", "Ultrabook", "Gaming", "2 in 1 Convertible"];

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    for id in 1..=args.rows {
        let (company, lines) = *rng.pick(&BRANDS);
        let line = *rng.pick(&lines);
        let (cpu, cpu_weight) = *rng.pick(&CPUS);
        let (gpu, gpu_weight) = *rng.pick(&GPUS);
        let ram = *rng.pick(&RAM_GB);
        let inches = *rng.pick(&INCHES);

        let base = 250.0 + ram as f64 * 30.0;
        let noise = 0.85 + rng.next_f64() * 0.3;
        let price_euros = (base * cpu_weight * gpu_weight * noise * 100.0).round() / 100.0;

        let row = RawRow {
            id,
            company,
            product: format!("{line} {}", 10 + rng.next_u64() % 90),
            type_name: *rng.pick(&TYPES),
            inches,
            cpu,
            ram: format!("{ram}GB"),
            memory: *rng.pick(&MEMORY),
            gpu,
            op_sys: if company == "Apple" { "macOS" } else { "Windows 10" },
            weight: format!("{:.2}kg", 1.0 + inches / 10.0 + rng.next_f64() * 0.5),
            price_euros,
        };
        writer.serialize(&row).context("writing row")?;
    }

    writer.flush().context("flushing output")?;
    println!("Wrote {} laptops to {}", args.rows, args.out.display());
    Ok(())
}
