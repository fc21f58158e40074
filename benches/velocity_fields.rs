use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ncollide2d::na::Point2;

use potential_flow_rs::airfoil::generate_naca4;
use potential_flow_rs::elementary::{ElementarySolution, FlowElement, Freestream};
use potential_flow_rs::field::evaluate_all;
use potential_flow_rs::grid::build_grid;
use potential_flow_rs::stagnation::find_stagnation_points;

fn benchmark(c: &mut Criterion) {
    let grid = build_grid(10.0, 5.0, None, None, Some(400)).unwrap();
    let elements: Vec<FlowElement> = vec![
        Freestream::new(1.0, 5.0).unwrap().into(),
        ElementarySolution::source_sink(Point2::new(-1.0, 0.0), 5.0).into(),
        ElementarySolution::source_sink(Point2::new(1.0, 0.0), -5.0).into(),
        ElementarySolution::vortex(Point2::new(0.0, 1.5), 2.0).into(),
        ElementarySolution::doublet(Point2::new(3.0, -1.0), 1.0).into(),
    ];

    c.bench_function("Rankine Composition 400x400", |b| {
        b.iter(|| evaluate_all(black_box(&elements), black_box(&grid)))
    });

    let field = evaluate_all(&elements, &grid).unwrap();
    c.bench_function("Stagnation Search 400x400", |b| {
        b.iter(|| find_stagnation_points(black_box(&field), 1e-3))
    });

    c.bench_function("NACA 2412 Outline", |b| {
        b.iter(|| generate_naca4(black_box("2412"), 200, false, true))
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
