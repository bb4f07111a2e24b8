use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Days, NaiveDate};
use clap::Parser;

use sales_dash::SalesRecord;

/// Write a deterministic synthetic sales dataset (JSON or CSV by extension)
#[derive(Parser, Debug)]
#[command(name = "generate-sample", version, about)]
struct Args {
    /// Output file, `.json` or `.csv`
    #[arg(short, long, default_value = "sample_sales.json")]
    output: PathBuf,

    /// First day of the generated period
    #[arg(long, default_value = "2024-01-01")]
    start: String,

    /// Number of days to generate
    #[arg(long, default_value_t = 90)]
    days: u64,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Category → (base amount, spread).
const CATEGORIES: [(&str, f64, f64); 3] = [
    ("Electronics", 900.0, 350.0),
    ("Clothing", 300.0, 120.0),
    ("Furniture", 650.0, 250.0),
];

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn generate(start: NaiveDate, days: u64, rng: &mut SimpleRng) -> Vec<SalesRecord> {
    let mut records = Vec::new();
    for offset in 0..days {
        let Some(date) = start.checked_add_days(Days::new(offset)) else {
            break;
        };
        // 0–2 sales per day
        let count = rng.next_u64() % 3;
        for _ in 0..count {
            let &(category, base, spread) = rng.pick(&CATEGORIES);
            let region = *rng.pick(&REGIONS);
            // Round to cents and clamp at zero.
            let sales = (rng.gauss(base, spread).max(0.0) * 100.0).round() / 100.0;
            records.push(SalesRecord::new(date.to_string(), category, region, sales));
        }
    }
    records
}

fn main() -> Result<()> {
    let args = Args::parse();

    let start = NaiveDate::parse_from_str(&args.start, "%Y-%m-%d")
        .with_context(|| format!("invalid --start date {:?}", args.start))?;
    let mut rng = SimpleRng::new(args.seed);
    let records = generate(start, args.days, &mut rng);

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let create = || {
        File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))
    };

    match ext.as_str() {
        "json" => {
            serde_json::to_writer_pretty(BufWriter::new(create()?), &records)
                .context("writing JSON")?;
        }
        "csv" => {
            let mut writer = csv::Writer::from_writer(create()?);
            for record in &records {
                writer.serialize(record).context("writing CSV row")?;
            }
            writer.flush().context("flushing CSV")?;
        }
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!(
        "Wrote {} sales records ({} days from {start}) to {}",
        records.len(),
        args.days,
        args.output.display()
    );
    Ok(())
}
