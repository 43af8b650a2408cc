//! Benchmarks for colstore import/export

use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use colstore::pipeline::{self, RowSource};
use colstore::{Codec, Column, ColumnType, Config, Result, Table};

struct BenchRowSource {
    rows: Vec<Vec<Vec<u8>>>,
    pos: Option<usize>,
}

impl RowSource for BenchRowSource {
    fn begin(&mut self) -> Result<()> {
        self.pos = None;
        Ok(())
    }

    fn next_row(&mut self) -> Result<bool> {
        let next = self.pos.map_or(0, |p| p + 1);
        self.pos = (next < self.rows.len()).then_some(next);
        Ok(self.pos.is_some())
    }

    fn value_for(&self, column: &Column) -> Option<&[u8]> {
        self.rows[self.pos?]
            .get(column.column_id as usize)
            .map(|v| v.as_slice())
    }

    fn end(&mut self) -> Result<()> {
        Ok(())
    }
}

fn bench_rows(n: usize) -> Vec<Vec<Vec<u8>>> {
    (0..n)
        .map(|i| {
            vec![
                format!("{}", i).into_bytes(),
                format!("payload-{:08}", i).into_bytes(),
            ]
        })
        .collect()
}

fn bench_table() -> Table {
    let mut table = Table::new("bench", 0);
    table.add_column(Column::new("id", 0, ColumnType::String));
    table.add_column(Column::new("payload", 1, ColumnType::String));
    table
}

fn pipeline_benchmarks(c: &mut Criterion) {
    let rows = bench_rows(10_000);

    for codec in [Codec::Lz4, Codec::Snappy, Codec::Zstd] {
        let config = Config::builder().codec(codec).build();

        c.bench_function(&format!("import_10k_{}", codec), |b| {
            b.iter(|| {
                let temp = TempDir::new().unwrap();
                let mut source = BenchRowSource {
                    rows: rows.clone(),
                    pos: None,
                };
                pipeline::import(
                    &temp.path().join("bench.col"),
                    bench_table(),
                    &mut source,
                    &config,
                )
                .unwrap();
            })
        });

        let temp = TempDir::new().unwrap();
        let store = temp.path().join("bench.col");
        let mut source = BenchRowSource {
            rows: rows.clone(),
            pos: None,
        };
        pipeline::import(&store, bench_table(), &mut source, &config).unwrap();

        c.bench_function(&format!("export_10k_{}", codec), |b| {
            b.iter(|| {
                pipeline::export(&store, &temp.path().join("bench.csv"), &config).unwrap();
            })
        });
    }
}

criterion_group!(benches, pipeline_benchmarks);
criterion_main!(benches);
