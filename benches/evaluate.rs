//! This bench test evaluates a full specialist transcript against every
//! program rule, and rebuilds the prerequisite graph for a synthetic
//! department-sized catalog.

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion};
use degree_audit::{
    audit::evaluate,
    domain::{Catalog, Config, Course, CourseCode, CreditWeight, Grade, Record, Student, StudentNumber},
    graph,
    policy::{DegreeType, ProgramId},
};
use non_empty_string::NonEmptyString;

/// Generates a department-sized catalog where each course requires the two
/// below it, producing a dense prerequisite graph.
fn synthetic_catalog(size: u32) -> Catalog {
    (0..size)
        .map(|i| {
            let code = format!("CSC{:03}H1", 100 + i);
            let mut course = Course::new(CourseCode::new(&code).unwrap(), code.clone());
            if i > 1 {
                course = course.with_prerequisites([
                    format!("CSC{:03}H1", 100 + i - 1),
                    format!("CSC{:03}H1", 100 + i - 2),
                ]);
            }
            course
        })
        .collect()
}

fn specialist_transcript() -> Student {
    let mut student = Student::new(
        StudentNumber::new("1008735229").unwrap(),
        NonEmptyString::new("Bench Student".to_string()).unwrap(),
    );
    let codes = [
        "CSC110Y1", "CSC111H1", "MAT137Y1", "CSC207H1", "CSC209H1", "CSC236H1", "CSC258H1",
        "CSC263H1", "MAT235Y1", "STA247H1", "CSC301H1", "CSC309H1", "CSC343H1", "CSC369H1",
        "CSC373H1", "CSC401H1", "CSC409H1", "CSC443H1", "CSC469H1",
    ];
    for code in codes {
        let weight = if code.contains('Y') {
            CreditWeight::Full
        } else {
            CreditWeight::Half
        };
        student.record_completion(Record::new(
            CourseCode::new(code).unwrap(),
            Grade::new(78).unwrap(),
            weight,
        ));
    }
    student
}

fn evaluate_programs(c: &mut Criterion) {
    let student = specialist_transcript();
    c.bench_function("evaluate all programs", |b| {
        b.iter(|| {
            for program in ProgramId::ALL {
                for degree in [DegreeType::Major, DegreeType::Specialist] {
                    std::hint::black_box(evaluate(program, degree, &student));
                }
            }
        });
    });
}

fn build_graph(c: &mut Criterion) {
    let catalog = synthetic_catalog(200);
    let student = specialist_transcript();
    let config = Config::default();
    c.bench_function("build prerequisite graph", |b| {
        b.iter(|| std::hint::black_box(graph::build(&catalog, &student, &config)));
    });
}

criterion_group!(benches, evaluate_programs, build_graph);
criterion_main!(benches);
