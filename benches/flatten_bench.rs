use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phonetools::regions::{flatten_rows, RegionTree, Row};

/// World -> 5 continents -> 4 sub-regions each -> 12 countries each, listed
/// children first so every parent starts out as a placeholder.
fn setup_rows() -> Vec<Row> {
    let mut rows = Vec::new();
    for continent in 0..5 {
        for sub_region in 0..4 {
            let sub_region_id = format!("{continent}.{sub_region}");
            for country in 0..12 {
                rows.push(Row {
                    id: Some(format!("{sub_region_id}.{country}")),
                    parent_id: Some(sub_region_id.clone()),
                    name: format!("Country {sub_region_id}.{country}"),
                    country_code: Some(format!(
                        "{}{}",
                        (b'A' + continent as u8) as char,
                        (b'A' + country as u8) as char
                    )),
                });
            }
            rows.push(Row {
                id: Some(sub_region_id.clone()),
                parent_id: Some(continent.to_string()),
                name: format!("Sub-region {sub_region_id}"),
                country_code: None,
            });
        }
        rows.push(Row {
            id: Some(continent.to_string()),
            parent_id: Some("world".to_string()),
            name: format!("Continent {continent}"),
            country_code: None,
        });
    }
    rows.push(Row {
        id: Some("world".to_string()),
        parent_id: None,
        name: "World".to_string(),
        country_code: None,
    });
    rows
}

fn flatten_benchmark(c: &mut Criterion) {
    let rows = setup_rows();

    let mut group = c.benchmark_group("Region hierarchy");

    group.bench_function("build tree", |b| {
        b.iter(|| RegionTree::from_rows(black_box(rows.clone())))
    });

    group.bench_function("build and flatten", |b| {
        b.iter(|| flatten_rows(black_box(rows.clone())).unwrap())
    });

    group.finish();
}

criterion_group!(benches, flatten_benchmark);
criterion_main!(benches);
