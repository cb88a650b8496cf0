//! Performance benchmarks for Sitetree core operations
//!
//! Run with: `cargo bench -p sitetree-core`
//!
//! These benchmarks measure critical path performance:
//! - Raw path decomposition
//! - Inherited property lookup through a deep page chain
//! - Navigation tree construction over a wide site

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sitetree_core::path::decompose;
use sitetree_core::{ContentTree, MemoryStore, NavigationOptions, PropertyMap, TreeConfig};
use std::sync::Arc;

/// Chain of `depth` nested pages under `/content`, the top one defining `brand`
fn deep_site(depth: usize) -> ContentTree {
    let mut store = MemoryStore::new().with_internal_root("/content");
    store
        .insert("/content", "sling:Folder", PropertyMap::new())
        .unwrap();

    let mut path = "/content".to_string();
    for level in 0..depth {
        path = format!("{}/level{}", path, level);
        store.insert(&path, "cq:Page", PropertyMap::new()).unwrap();

        let mut properties = PropertyMap::new().with("jcr:title", format!("Level {}", level));
        if level == 0 {
            properties.insert("brand", "Example");
        }
        store
            .insert(&format!("{}/jcr:content", path), "site/components/page", properties)
            .unwrap();
    }

    ContentTree::new(Arc::new(store))
}

/// Site with `width` child pages per level, `levels` levels deep
fn wide_site(width: usize, levels: usize) -> ContentTree {
    fn add_level(store: &mut MemoryStore, parent: &str, width: usize, remaining: usize) {
        if remaining == 0 {
            return;
        }
        for i in 0..width {
            let path = format!("{}/page{}", parent, i);
            store.insert(&path, "cq:Page", PropertyMap::new()).unwrap();
            store
                .insert(
                    &format!("{}/jcr:content", path),
                    "site/components/page",
                    PropertyMap::new().with("jcr:title", format!("Page {}", i)),
                )
                .unwrap();
            add_level(store, &path, width, remaining - 1);
        }
    }

    let mut store = MemoryStore::new();
    store
        .insert("/content", "sling:Folder", PropertyMap::new())
        .unwrap();
    store.insert("/content/site", "cq:Page", PropertyMap::new()).unwrap();
    store
        .insert(
            "/content/site/jcr:content",
            "site/components/page",
            PropertyMap::new().with("jcr:title", "Site"),
        )
        .unwrap();
    add_level(&mut store, "/content/site", width, levels);

    ContentTree::new(Arc::new(store))
}

fn bench_decompose(c: &mut Criterion) {
    let config = TreeConfig::default();
    let raw = "/content/site/en/products/widgets.teaser.mobile.html/suffix/path?x=1&y=2";

    c.bench_function("decompose_raw_path", |b| {
        b.iter(|| decompose(black_box(raw), &config).unwrap())
    });
}

fn bench_inheritance(c: &mut Criterion) {
    let mut group = c.benchmark_group("inherited_property");

    for depth in [2usize, 8, 32] {
        let tree = deep_site(depth);
        let leaf_path = (0..depth).fold("/content".to_string(), |path, level| {
            format!("{}/level{}", path, level)
        });

        group.bench_with_input(BenchmarkId::from_parameter(depth), &leaf_path, |b, leaf| {
            b.iter(|| {
                let page = tree.page(leaf).unwrap();
                let brand: Option<String> = page.get_inherited_typed(black_box("brand"));
                brand
            })
        });
    }

    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let tree = wide_site(8, 3);
    let site = tree.page("/content/site").unwrap();

    c.bench_function("navigation_tree_8x3", |b| {
        let options = NavigationOptions::default().with_depth(3);
        b.iter(|| site.navigation_tree(black_box(&options)))
    });
}

criterion_group!(benches, bench_decompose, bench_inheritance, bench_navigation);
criterion_main!(benches);
