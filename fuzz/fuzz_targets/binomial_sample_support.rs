#![no_main]

use ec_prob::{CountDistribution, SamplerConfig, make_binomial};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;

fuzz_target!(|data: &[u8]| {
    if data.len() < 18 {
        return;
    }

    // Keep n bounded so inversion in the fallback stays fast.
    let n = f64::from_le_bytes(data[0..8].try_into().unwrap()).abs() % 5_000.0;
    let p = (u32::from_le_bytes(data[8..12].try_into().unwrap()) as f64) / (u32::MAX as f64);
    let seed = u32::from_le_bytes(data[12..16].try_into().unwrap()) as u64;
    let max_iters = (data[16] % 4) as usize;
    let draws = data[17] as usize % 32 + 1;

    let Ok(d) = make_binomial(n, p) else {
        return;
    };
    let cfg = SamplerConfig::with_max_iters(max_iters);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    for _ in 0..draws {
        let k = d.sample_with(&mut rng, &cfg);
        assert!(k <= d.support_max());
        assert!(d.log_pmf(k as i64).is_finite());
    }
});
