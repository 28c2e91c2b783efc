// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use lens_i18n::component::{ComponentOptions, ComponentTree};
use lens_i18n::diagnostics::Timeline;
use lens_i18n::domain::component::RenderMode;
use lens_i18n::domain::diagnostics::TimelineCapacity;
use lens_i18n::i18n::{InlineBlock, LocalizationOptions, MessageTree, MessageValue, Params};
use lens_i18n::plugin::I18n;
use std::hint::black_box;
use std::rc::Rc;

fn messages() -> MessageTree {
    MessageTree::from([
        ("hello".to_string(), MessageValue::from("Hello { $name }")),
        ("apples".to_string(), MessageValue::from("no apples | one apple | { $count } apples")),
    ])
}

fn binding_lifecycle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("binding_lifecycle");

    let i18n = I18n::with_timeline(
        LocalizationOptions::new()
            .with_locale("en")
            .with_messages("en", messages()),
        Some(Timeline::new(TimelineCapacity::default())),
    );
    let local = ComponentOptions::named("local")
        .with_blocks(vec![InlineBlock::for_locale("en", messages())]);

    group.bench_function("create_mount_unmount_subtree", |b| {
        b.iter(|| {
            let mut tree = ComponentTree::new(RenderMode::Interactive);
            tree.register_hooks(Rc::new(i18n.mixin()));
            let root = tree.create(None, ComponentOptions::named("app")).unwrap();
            for _ in 0..16 {
                let child = tree.create(Some(root), local.clone()).unwrap();
                tree.mount(child).unwrap();
            }
            tree.mount(root).unwrap();
            tree.unmount(black_box(root)).unwrap();
        });
    });

    let params = Params::new().with("name", "Ada");
    group.bench_function("translate_through_local_instance", |b| {
        let mut tree = ComponentTree::new(RenderMode::Interactive);
        tree.register_hooks(Rc::new(i18n.mixin()));
        let root = tree.create(None, ComponentOptions::named("app")).unwrap();
        let child = tree.create(Some(root), local.clone()).unwrap();
        let api = tree.node(child).and_then(|node| node.i18n_api()).unwrap().clone();
        b.iter(|| {
            let _ = black_box(api.t("hello", &params));
            let _ = black_box(api.tc("apples", 3, &params));
        });
    });

    group.finish();
}

criterion_group!(benches, binding_lifecycle_benchmark);
criterion_main!(benches);
