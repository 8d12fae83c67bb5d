use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;

use flowtui::domain::collections::EntitySet;
use flowtui::domain::entity::{Post, PostId, UserId};

fn post(id: usize) -> Post {
    Post {
        id: PostId::from(format!("post-{id}").as_str()),
        author: UserId::from("u1"),
        author_handle: "alice".to_owned(),
        content: format!("post number {id}"),
        created_at: Utc.timestamp_opt(1_700_000_000, 0).single().expect("ts"),
        attachments: vec![],
        poll: None,
        event: None,
        location: None,
        like_count: 0,
        comment_count: 0,
        liked: false,
        saved: false,
    }
}

fn existing_set(len: usize) -> EntitySet<Post> {
    (0..len).map(post).collect()
}

/// Merging one page into a long scrollback, with and without overlap.
fn bench_merge_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_page");

    for existing_len in [100usize, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("no_overlap", existing_len),
            &existing_len,
            |b, &len| {
                b.iter_batched(
                    || {
                        let set = existing_set(len);
                        let page: Vec<Post> = (len..len + 20).map(post).collect();
                        (set, page)
                    },
                    |(mut set, page)| black_box(set.merge_page(page)),
                    BatchSize::SmallInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("half_overlap", existing_len),
            &existing_len,
            |b, &len| {
                b.iter_batched(
                    || {
                        let set = existing_set(len);
                        let page: Vec<Post> = (len - 10..len + 10).map(post).collect();
                        (set, page)
                    },
                    |(mut set, page)| black_box(set.merge_page(page)),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_merge_page);
criterion_main!(benches);
