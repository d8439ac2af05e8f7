use criterion::{criterion_group, criterion_main, Criterion};
use shortcut_hud::catalog::{ShortcutCatalog, ShortcutCategory, ShortcutItem};
use shortcut_hud::filter::filter_catalog;

fn bench_filter(c: &mut Criterion) {
    let catalog = ShortcutCatalog {
        categories: (0..100)
            .map(|i| ShortcutCategory {
                name: format!("Category {i}"),
                items: (0..100)
                    .map(|j| ShortcutItem {
                        name: format!("Action {i}-{j}"),
                        keys: format!("Ctrl+Shift+{j}"),
                        note: String::new(),
                    })
                    .collect(),
            })
            .collect(),
    };
    c.bench_function("filter_10k", |b| b.iter(|| filter_catalog(&catalog, "action 99-99")));
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
