//! Criterion benchmarks for timetable generation.
//!
//! Uses synthetic schools of increasing size: every class takes every
//! subject, every teacher covers two subjects and is always available.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::feasibility::count_violations;
use u_timetable::ga::{GaConfig, GaProblem, GaRunner};
use u_timetable::models::{Calendar, Class, Course, Room, Teacher};
use u_timetable::problem::TimetableProblem;
use u_timetable::random::create_rng;

const SUBJECTS: [&str; 6] = ["Math", "Physics", "Chemistry", "History", "Art", "Music"];

fn school(n_classes: usize) -> TimetableProblem {
    let calendar = Calendar::default();
    let classes = (0..n_classes)
        .map(|i| {
            SUBJECTS
                .iter()
                .fold(Class::new(format!("C{i}")), |c, s| c.with_subject(*s))
        })
        .collect();
    let teachers = (0..n_classes.max(1) * 2)
        .map(|i| {
            Teacher::new(format!("T{i}"))
                .with_subject(SUBJECTS[i % SUBJECTS.len()])
                .with_subject(SUBJECTS[(i + 1) % SUBJECTS.len()])
                .with_full_availability(&calendar)
        })
        .collect();
    let rooms = (0..n_classes + 1).map(|i| Room::new(format!("R{i}"))).collect();
    let courses = SUBJECTS
        .iter()
        .enumerate()
        .map(|(i, s)| Course::new(format!("c{i}"), *s, 2 + (i % 3) as u32))
        .collect();
    TimetableProblem::new(classes, teachers, rooms, courses, calendar)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_generate_candidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_candidate");

    for n in [4usize, 12, 24] {
        let problem = school(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &problem, |b, p| {
            let mut rng = create_rng(42);
            b.iter(|| black_box(p.create_individual(&mut rng)))
        });
    }
    group.finish();
}

fn bench_count_violations(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_violations");

    for n in [4usize, 12, 24] {
        let problem = school(n);
        let schedule = problem.create_individual(&mut create_rng(7));
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(problem, schedule),
            |b, (p, s)| b.iter(|| black_box(count_violations(s, &p.teachers, &p.calendar))),
        );
    }
    group.finish();
}

fn bench_ga_school(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_school");
    group.sample_size(10);

    for (n, pop, gen) in [(4usize, 50usize, 50usize), (12, 50, 30), (24, 30, 20)] {
        let problem = school(n);
        let config = GaConfig::default()
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("c{}_p{}_g{}", n, pop, gen), n),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(p), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate_candidate,
    bench_count_violations,
    bench_ga_school
);
criterion_main!(benches);
