// Criterion benchmarks for Restaurant Poll

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use restaurant_poll::config::MapSettings;
use restaurant_poll::core::{extract_place_label, LocationResolver};
use restaurant_poll::maps::{MapBoard, WidgetSpecRenderer};
use restaurant_poll::models::MapPlaceholder;
use restaurant_poll::ui::extract_results_panel;

const URLS: [(&str, &str); 6] = [
    (
        "place_with_data",
        "https://www.google.com/maps/place/JIJOS+DEL+MAR/@22.1604222,-100.9988385,17z/data=!3m1!4b1!4m6!3m5!1s0x842a9fcf5f1a2427:0x88d8bfcfc0aa15ca!8m2!3d22.1604173!4d-100.9962636?entry=ttu",
    ),
    ("ll_param", "https://maps.google.com/maps?ll=22.15,-101.01&z=16"),
    ("q_coords", "https://maps.google.com/maps?q=22.15,-101.01"),
    ("short_link", "https://maps.app.goo.gl/XyZ123"),
    ("search_text", "https://maps.google.com/maps?hl=es&q=Bristol+Pub"),
    ("unresolved", "https://example.com/restaurants/42"),
];

fn bench_resolve(c: &mut Criterion) {
    let resolver = LocationResolver::with_default_hosts();
    let mut group = c.benchmark_group("resolve");

    for (name, url) in URLS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &url, |b, url| {
            b.iter(|| resolver.resolve(black_box(url)))
        });
    }

    group.finish();
}

fn bench_label(c: &mut Criterion) {
    c.bench_function("extract_place_label", |b| {
        b.iter(|| extract_place_label(black_box(URLS[0].1)))
    });
}

fn bench_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("init_maps");

    for size in [5usize, 25, 100].iter() {
        let placeholders: Vec<MapPlaceholder> = (0..*size)
            .map(|i| MapPlaceholder::option_map(i, URLS[i % URLS.len()].1))
            .chain((0..*size).map(MapPlaceholder::mini_map))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &placeholders, |b, placeholders| {
            b.iter(|| {
                let mut board = MapBoard::new(
                    WidgetSpecRenderer::new(),
                    LocationResolver::with_default_hosts(),
                    MapSettings::default(),
                );
                board.init_maps(black_box(placeholders))
            })
        });
    }

    group.finish();
}

fn bench_results_panel(c: &mut Criterion) {
    let bars: String = (0..20)
        .map(|i| format!(r#"<div class="progress"><div class="progress-bar" style="width: {}%">{}</div></div>"#, i * 5, i))
        .collect();
    let page = format!(
        r#"<html><body><div class="card"><div class="card-body">form</div></div><div class="card"><div class="card-body">{}</div></div></body></html>"#,
        bars
    );

    c.bench_function("extract_results_panel", |b| {
        b.iter(|| extract_results_panel(black_box(&page)))
    });
}

criterion_group!(benches, bench_resolve, bench_label, bench_board, bench_results_panel);
criterion_main!(benches);
