use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use subcalc_invoicing::{calculate, CalcMethod, CsvLinesMode, InvoiceInput};

fn invoice(gross: Decimal, method: CalcMethod) -> InvoiceInput {
    InvoiceInput {
        supplier: "Bench Scaffolding Ltd".to_string(),
        invoice_number: "BENCH-1".to_string(),
        invoice_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        gross,
        description: "Scaffold hire".to_string(),
        retention_rate: dec!(0.05),
        discount_rate: dec!(0.025),
        method,
        csv_lines: CsvLinesMode::Split,
        invoice_pdf: None,
        lines: Vec::new(),
    }
}

fn bench_single_calculation(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");

    for method in CalcMethod::ALL {
        let inv = invoice(dec!(123456.78), method);
        group.bench_with_input(BenchmarkId::from_parameter(method), &inv, |b, inv| {
            b.iter(|| calculate(black_box(inv)).unwrap());
        });
    }

    group.finish();
}

fn bench_batch_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_batch");

    for size in [100usize, 1_000, 10_000] {
        // Gross amounts spread across pence so rounding paths vary.
        let invoices: Vec<InvoiceInput> = (0..size)
            .map(|i| {
                let method = if i % 2 == 0 { CalcMethod::Gross } else { CalcMethod::Sequential };
                invoice(Decimal::new(100_000 + i as i64 * 37, 2), method)
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &invoices, |b, invoices| {
            b.iter(|| {
                let mut net = Decimal::ZERO;
                for inv in invoices {
                    net += calculate(inv).unwrap().net();
                }
                black_box(net)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_calculation, bench_batch_throughput);
criterion_main!(benches);
