//! Simulate a roll log and analyze it
//!
//! Charged rolls come from a die that favors 10; uncharged rolls come from a
//! fair die. Run with:
//!
//! ```text
//! cargo run --example simulate -p rollcheck
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rollcheck::{Roll, RollLog, RollcheckConfig, analyze, format_human_output};

fn main() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let log: RollLog = (0..500)
        .map(|i| {
            let charged = i % 2 == 0;
            let value = if charged && rng.gen_bool(0.15) {
                10
            } else {
                rng.gen_range(1..=10)
            };
            Roll { value, charged }
        })
        .collect();

    let mut config = RollcheckConfig::default();
    config.bootstrap.seed = Some(7);

    match analyze(&log, &config, Some("simulated")) {
        Ok(report) => print!("{}", format_human_output(&report)),
        Err(e) => eprintln!("analysis failed: {:#}", e),
    }
}
