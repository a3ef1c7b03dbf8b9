use std::path::Path;

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64() as usize % items.len()]
    }
}

/// (company, models, base price in rupees)
const CATALOGUE: &[(&str, &[&str], f64)] = &[
    (
        "Maruti",
        &[
            "Maruti Suzuki Swift",
            "Maruti Suzuki Alto",
            "Maruti Suzuki Wagon R",
            "Maruti Suzuki Ertiga",
        ],
        550_000.0,
    ),
    (
        "Hyundai",
        &["Hyundai i20 Sportz", "Hyundai Grand i10", "Hyundai Verna Fluidic", "Hyundai Creta 1.6"],
        750_000.0,
    ),
    ("Honda", &["Honda City 1.5", "Honda Amaze 1.2", "Honda Jazz VX"], 850_000.0),
    ("Toyota", &["Toyota Innova 2.5", "Toyota Corolla Altis", "Toyota Etios Liva"], 1_200_000.0),
    (
        "Mahindra",
        &["Mahindra XUV500 W8", "Mahindra Scorpio S10", "Mahindra Bolero DI"],
        1_000_000.0,
    ),
    ("Tata", &["Tata Nano Cx", "Tata Indica V2", "Tata Nexon XZ"], 450_000.0),
];

const FUEL_TYPES: &[&str] = &["Petrol", "Diesel", "LPG"];

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = Path::new("public/Cleaned_Car_data.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).expect("Failed to create output directory");
    }
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["", "name", "company", "year", "Price", "kms_driven", "fuel_type"])
        .expect("Failed to write header");

    let n_rows = 600;
    for id in 0..n_rows {
        let (company, models, base_price) = *rng.pick(CATALOGUE);
        let model = *rng.pick(models);
        let year = rng.range(2000, 2019);
        let fuel_type = *rng.pick(FUEL_TYPES);

        let age = (2020 - year) as f64;
        let kms_driven = rng.range(500, 15_000) * (age as u64).max(1);
        let depreciation = 0.88_f64.powf(age) * (1.0 - kms_driven as f64 / 2_000_000.0).max(0.3);
        let noise = 0.9 + 0.2 * rng.next_f64();
        let price = (base_price * depreciation * noise).round() as u64;

        writer
            .write_record([
                id.to_string(),
                model.to_string(),
                company.to_string(),
                year.to_string(),
                price.to_string(),
                kms_driven.to_string(),
                fuel_type.to_string(),
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush output");

    println!("Wrote {n_rows} vehicles to {}", output_path.display());
}
