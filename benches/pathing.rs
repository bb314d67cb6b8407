use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use mazesolver::animation::{self, Colour, DrawSurface, Immediate};
use mazesolver::cells::Cartesian2DCoordinate;
use mazesolver::errors::Result;
use mazesolver::generators;
use mazesolver::grid::Grid;
use mazesolver::pathing::{self, SearchStrategy};
use mazesolver::units::{Height, Width};
use rand::{rngs::StdRng, SeedableRng};

fn large_maze() -> Grid {
    let mut rng = StdRng::seed_from_u64(350);
    generators::prim_with_rng(Width(320), Height(320), &mut rng).unwrap()
}

struct NullSurface;

impl DrawSurface for NullSurface {
    fn set_cell(&mut self, _: Cartesian2DCoordinate, _: Colour) {}

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

fn bench_depth_first(c: &mut Criterion) {
    c.bench_function("depth_first", |b| {
        let g = large_maze();
        let goal = g.size() - 1;
        b.iter(|| pathing::depth_first(&g, 0, goal))
    });
}

fn bench_breadth_first(c: &mut Criterion) {
    c.bench_function("breadth_first", |b| {
        let g = large_maze();
        let goal = g.size() - 1;
        b.iter(|| pathing::breadth_first(&g, 0, goal))
    });
}

fn bench_animation_replay(c: &mut Criterion) {
    c.bench_function("animation_replay", |b| {
        let g = large_maze();
        let solution = SearchStrategy::BreadthFirst.solve(&g, 0, g.size() - 1).unwrap();
        let options = animation::AnimationOptions::default();
        b.iter(|| animation::animate_solution(&g, &solution, &mut NullSurface, &mut Immediate, options))
    });
}

criterion_group!(benches,
    bench_depth_first,
    bench_breadth_first,
    bench_animation_replay
);
criterion_main!(benches);
