use checkr_analyzer::{analyze, detect_overlaps, parse_all};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// 256 disjoint /24s under 10.0.0.0/16, plus the /16 itself and two /17 halves
fn campus_prefixes() -> Vec<String> {
    let mut prefixes: Vec<String> = (0..=255).map(|i| format!("10.0.{}.0/24", i)).collect();
    prefixes.push("10.0.0.0/16".to_string());
    prefixes.push("10.0.0.0/17".to_string());
    prefixes.push("10.0.128.0/17".to_string());
    prefixes
}

fn benchmark_detect(c: &mut Criterion) {
    let texts = campus_prefixes();
    let parsed = match parse_all(&texts) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Skipping benchmark: {}", e);
            return;
        }
    };

    c.bench_function("detect_overlaps_259", |b| {
        b.iter(|| detect_overlaps(black_box(&parsed)))
    });

    c.bench_function("analyze_259", |b| b.iter(|| analyze(black_box(&texts))));
}

criterion_group!(benches, benchmark_detect);
criterion_main!(benches);
