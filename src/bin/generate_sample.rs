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

/// Vehicle class with its typical engine-size range and cylinder choices.
struct ClassProfile {
    name: &'static str,
    engine_range: (f64, f64),
    cylinders: &'static [i64],
    /// Baseline combined consumption (L/100 km) at the small end of the range.
    base_consumption: f64,
}

const CLASS_PROFILES: &[ClassProfile] = &[
    ClassProfile {
        name: "Compact",
        engine_range: (1.0, 2.4),
        cylinders: &[3, 4],
        base_consumption: 6.5,
    },
    ClassProfile {
        name: "Mid-size",
        engine_range: (1.8, 3.5),
        cylinders: &[4, 6],
        base_consumption: 7.8,
    },
    ClassProfile {
        name: "SUV - Small",
        engine_range: (2.0, 3.6),
        cylinders: &[4, 6],
        base_consumption: 9.2,
    },
    ClassProfile {
        name: "SUV - Standard",
        engine_range: (3.0, 5.7),
        cylinders: &[6, 8],
        base_consumption: 11.5,
    },
    ClassProfile {
        name: "Pickup truck - Standard",
        engine_range: (3.5, 6.2),
        cylinders: &[6, 8],
        base_consumption: 12.8,
    },
    ClassProfile {
        name: "Two-seater",
        engine_range: (2.0, 6.5),
        cylinders: &[4, 6, 8],
        base_consumption: 10.5,
    },
];

const FUEL_TYPES: &[(&str, f64)] = &[
    ("X", 1.0),  // regular gasoline
    ("Z", 1.03), // premium gasoline
    ("D", 0.85), // diesel
    ("E", 1.35), // ethanol (E85)
];

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 500;

    let output_path = "co2.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record([
            "Vehicle Class",
            "Engine Size(L)",
            "Cylinders",
            "Fuel Type",
            "Fuel Consumption Comb (L/100 km)",
            "CO2 Emissions(g/km)",
        ])
        .expect("Failed to write header");

    for _ in 0..n_rows {
        let profile = rng.pick(CLASS_PROFILES);
        let (lo, hi) = profile.engine_range;
        let engine = ((lo + rng.next_f64() * (hi - lo)) * 10.0).round() / 10.0;
        let engine = engine.min(hi);
        let cylinders = *rng.pick(profile.cylinders);
        let (fuel_type, fuel_factor) = *rng.pick(FUEL_TYPES);

        // Consumption scales with displacement above the class baseline,
        // plus per-vehicle noise.
        let displacement_factor = 1.0 + (engine - lo) / (hi - lo) * 0.45;
        let consumption = (profile.base_consumption * displacement_factor * fuel_factor
            + rng.gauss(0.0, 0.6))
        .max(3.5);
        let consumption = (consumption * 10.0).round() / 10.0;

        // Roughly 23.2 g CO2 per 0.1 L/100 km for gasoline; diesel a bit more.
        let co2_per_litre = if fuel_type == "D" { 26.5 } else { 23.2 };
        let co2 = (consumption * co2_per_litre + rng.gauss(0.0, 4.0)).round();

        writer
            .write_record([
                profile.name.to_string(),
                format!("{engine:.1}"),
                cylinders.to_string(),
                fuel_type.to_string(),
                format!("{consumption:.1}"),
                format!("{co2:.0}"),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} vehicle records to {output_path}");
}
