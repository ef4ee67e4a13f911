use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Shot zones: name, distance band in feet, make probability.
const ZONES: [(&str, f64, f64, f64); 4] = [
    ("Paint", 0.0, 8.0, 0.58),
    ("Mid-Range", 8.0, 22.0, 0.41),
    ("Corner Three", 22.0, 23.0, 0.39),
    ("Above the Break", 23.75, 28.0, 0.35),
];

/// Court-normalised basket position.
const BASKET: (f64, f64) = (0.5, 0.05);
const HALF_COURT_FT: f64 = 47.0;

struct Shot {
    game: String,
    quarter: i64,
    shot_type: &'static str,
    distance_ft: f64,
    location_x: f64,
    location_y: f64,
    made: bool,
}

fn generate_shots(rng: &mut SimpleRng, games: usize) -> Vec<Shot> {
    let mut shots = Vec::new();
    for game in 1..=games {
        for quarter in 1..=4 {
            let attempts = 12 + (rng.next_u64() % 10) as usize;
            for _ in 0..attempts {
                let zone = ZONES[(rng.next_u64() % ZONES.len() as u64) as usize];
                let (shot_type, near, far, make_pct) = zone;
                let distance_ft = rng.range(near, far);
                let angle = rng.range(0.0, std::f64::consts::PI);
                let r = distance_ft / HALF_COURT_FT;
                shots.push(Shot {
                    game: format!("Game {game}"),
                    quarter,
                    shot_type,
                    distance_ft: (distance_ft * 10.0).round() / 10.0,
                    location_x: (BASKET.0 + r * angle.cos()).clamp(0.0, 1.0),
                    location_y: (BASKET.1 + r * angle.sin()).clamp(0.0, 1.0),
                    made: rng.next_f64() < make_pct,
                });
            }
        }
    }
    shots
}

fn write_csv(path: &str, shots: &[Shot]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Game",
        "Quarter",
        "Shot_Type",
        "Distance_Ft",
        "Location_X",
        "Location_Y",
        "Made",
    ])?;
    for shot in shots {
        writer.write_record([
            shot.game.clone(),
            shot.quarter.to_string(),
            shot.shot_type.to_string(),
            shot.distance_ft.to_string(),
            format!("{:.4}", shot.location_x),
            format!("{:.4}", shot.location_y),
            i64::from(shot.made).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, shots: &[Shot]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Game", DataType::Utf8, false),
        Field::new("Quarter", DataType::Int64, false),
        Field::new("Shot_Type", DataType::Utf8, false),
        Field::new("Distance_Ft", DataType::Float64, false),
        Field::new("Location_X", DataType::Float64, false),
        Field::new("Location_Y", DataType::Float64, false),
        Field::new("Made", DataType::Boolean, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(shots.iter().map(|s| s.game.as_str()))),
            Arc::new(Int64Array::from_iter_values(shots.iter().map(|s| s.quarter))),
            Arc::new(StringArray::from_iter_values(shots.iter().map(|s| s.shot_type))),
            Arc::new(Float64Array::from_iter_values(shots.iter().map(|s| s.distance_ft))),
            Arc::new(Float64Array::from_iter_values(shots.iter().map(|s| s.location_x))),
            Arc::new(Float64Array::from_iter_values(shots.iter().map(|s| s.location_y))),
            Arc::new(BooleanArray::from(shots.iter().map(|s| s.made).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let shots = generate_shots(&mut rng, 6);

    write_csv("sample_shots.csv", &shots)?;
    write_parquet("sample_shots.parquet", &shots)?;

    let made = shots.iter().filter(|s| s.made).count();
    println!(
        "Wrote {} shots ({made} made) to sample_shots.csv and sample_shots.parquet",
        shots.len()
    );
    Ok(())
}
