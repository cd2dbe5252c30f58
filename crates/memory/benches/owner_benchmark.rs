use criterion::{Criterion, black_box, criterion_group, criterion_main};
use solo_memory::{Owned, create, create_slice, uninit};
use std::mem::MaybeUninit;

#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

trait Counter {
    fn bump(&mut self) -> u64;
}

struct Ticks(u64);

impl Counter for Ticks {
    fn bump(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

impl solo_memory::Construct<(u64,)> for Ticks {
    fn construct((start,): (u64,)) -> Self {
        Self(start)
    }
}

solo_memory::upcast!(Ticks => dyn Counter);

pub fn owner_benchmark(c: &mut Criterion) {
    c.bench_function("create_and_drop", |b| {
        b.iter(|| {
            let owner = create::<u64, _>((black_box(42),));
            black_box(owner);
        })
    });
    c.bench_function("box_and_drop", |b| {
        b.iter(|| {
            let boxed = Box::new(black_box(42u64));
            black_box(boxed);
        })
    });
    c.bench_function("convert_to_trait_object", |b| {
        b.iter(|| {
            let mut counter: Owned<dyn Counter> = create::<Ticks, _>((black_box(1),)).convert();
            black_box(counter.bump());
        })
    });
    c.bench_function("move_chain", |b| {
        b.iter(|| {
            let mut owner = create::<u64, _>((1,));
            for _ in 0..16 {
                let next = owner;
                owner = black_box(next);
            }
            black_box(owner);
        })
    });
    c.bench_function("create_slice_1024", |b| {
        b.iter(|| {
            let elements = create_slice::<u32>(black_box(1024));
            black_box(elements);
        })
    });
    c.bench_function("move_construct_1024", |b| {
        let mut source: Vec<String> = (0..1024).map(|i| i.to_string()).collect();
        let mut destination: Vec<MaybeUninit<String>> =
            (0..1024).map(|_| MaybeUninit::uninit()).collect();
        b.iter(|| {
            let moved = uninit::move_construct(&mut source, &mut destination);
            // Move the values back so that every iteration moves the same data
            for (value, target) in moved.iter_mut().zip(source.iter_mut()) {
                std::mem::swap(value, target);
            }
            unsafe { uninit::destroy_slice(&mut destination) };
        })
    });
}

criterion_group!(benches, owner_benchmark);
criterion_main!(benches);
