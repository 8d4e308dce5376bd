//! Performance benchmarks for the Punch Payroll Engine.
//!
//! Measures the tier allocator on its own and a full payroll run over
//! documents of increasing size.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use punch_payroll::calculation::{TierAllocator, TierPolicy, run_payroll};
use punch_payroll::diagnostics::DiagnosticBuffer;
use punch_payroll::models::{EmployeeRecord, JobRate, PayrollDocument, Punch};

const JOBS: [&str; 3] = ["Hospital - Painter", "Hospital - Laundry", "Hospital - Nurse"];

/// Two weeks of 10 hour days on rotating jobs: enough to reach doubletime.
fn create_employee(index: usize) -> EmployeeRecord {
    let punches = (1..=14)
        .map(|day| {
            Punch::new(
                JOBS[(index + day) % JOBS.len()],
                format!("2022-02-{day:02} 08:00:00"),
                format!("2022-02-{day:02} 18:00:00"),
            )
        })
        .collect();

    EmployeeRecord::new(format!("emp_{index:04}"), punches)
}

fn create_document(employees: usize) -> PayrollDocument {
    PayrollDocument {
        job_meta: vec![
            JobRate::new(JOBS[0], Decimal::new(3125, 2), Decimal::ONE),
            JobRate::new(JOBS[1], Decimal::new(20, 0), Decimal::new(5, 1)),
            JobRate::new(JOBS[2], Decimal::new(4550, 2), Decimal::new(175, 2)),
        ],
        employee_data: (0..employees).map(create_employee).collect(),
    }
}

fn bench_allocator(c: &mut Criterion) {
    let job = JobRate::new("A", Decimal::new(3125, 2), Decimal::ONE);
    let hours = Decimal::new(75, 1);

    c.bench_function("allocator_14_punches", |b| {
        b.iter(|| {
            let mut allocator = TierAllocator::new(TierPolicy::default());
            for _ in 0..14 {
                allocator
                    .apply(black_box(hours), &job)
                    .expect("allocation fits in a decimal");
            }
            allocator.finish()
        })
    });
}

fn bench_payroll_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("payroll_run");
    let policy = TierPolicy::default();

    for employees in [1usize, 100, 1000] {
        let document = create_document(employees);
        group.throughput(Throughput::Elements(employees as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(employees),
            &document,
            |b, document| {
                b.iter(|| {
                    let sink = DiagnosticBuffer::new();
                    run_payroll(black_box(document), &policy, &sink)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_allocator, bench_payroll_run);
criterion_main!(benches);
