use earthmover::*;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        marshalling_json_query,
        computing_transport_distance,
        spilling_transport_flows,
}

/// Evenly weighted cloud of `n` random coordinates.
fn cloud(n: usize) -> Cloud {
    Cloud {
        features: (0..n).map(|_| rand::random::<Feature>()).collect(),
        weights: (0..n).map(|_| 1. / n as Mass).collect(),
    }
}

fn marshalling_json_query(c: &mut criterion::Criterion) {
    let p = cloud(32);
    let q = cloud(32);
    let feature1 = serde_json::json!(p.features);
    let feature2 = serde_json::json!(q.features);
    let weight1 = serde_json::json!(p.weights);
    let weight2 = serde_json::json!(q.weights);
    c.bench_function("marshal and solve a JSON query", |b| {
        b.iter(|| {
            Query {
                feature1: &feature1,
                feature2: &feature2,
                weight1: &weight1,
                weight2: &weight2,
                return_flows: false,
            }
            .resolve()
        })
    });
}

fn computing_transport_distance(c: &mut criterion::Criterion) {
    let p = cloud(64);
    let q = cloud(64);
    let ref ground = Absolute;
    c.bench_function("solve a 64x64 transport problem", |b| {
        b.iter(|| {
            Simplex::from((p.signature(), q.signature(), ground))
                .minimize()
                .cost()
        })
    });
}

fn spilling_transport_flows(c: &mut criterion::Criterion) {
    let p = cloud(64);
    let q = cloud(64);
    let ref ground = Absolute;
    let plan = Simplex::from((p.signature(), q.signature(), ground)).minimize();
    c.bench_function("spill flows from a solved plan", |b| {
        b.iter(|| {
            let mut sink = Vec::with_capacity(capacity(p.n(), q.n()));
            plan.spill(&mut sink);
            sink
        })
    });
}
