use grid_astar::scenario::RandomScenario;
use grid_astar::{AstarSolver, Point, Search, SearchEvent};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

// Animates a search on a random 12x12 map in the terminal. Run with
//   cargo run --example stepped -- <seed> <delay in ms>
// and RUST_LOG=trace to also see every expansion logged.
//
// - # obstacle, S start, G goal
// - @ the cell expanded in this step
// - x closed, o open
// - * the final path

fn render(search: &Search, path: &[Point]) -> String {
    let grid = search.grid();
    let mut out = String::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            let c = if p == search.start() {
                'S'
            } else if p == search.goal() {
                'G'
            } else if path.contains(&p) {
                '*'
            } else if search.current() == Some(p) {
                '@'
            } else if search.is_closed(p) {
                'x'
            } else if search.is_open(p) {
                'o'
            } else if grid.is_traversable(p).unwrap_or(false) {
                '.'
            } else {
                '#'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

fn main() {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let delay = args.next().and_then(|s| s.parse().ok()).unwrap_or(150);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut scenario = RandomScenario::new(12, 12).generate(&mut rng).unwrap();
    let solver = AstarSolver::new();
    let mut search = scenario.search(&solver).unwrap();

    while let Some(event) = search.step() {
        match event {
            SearchEvent::Visited(visit) => {
                println!("{}", render(&search, &[]));
                println!(
                    "visited ({}, {}): g = {:.1}, h = {:.2}, f = {:.2}\n",
                    visit.point.x, visit.point.y, visit.g_cost, visit.h_cost, visit.f_cost
                );
            }
            SearchEvent::PathFound(path) => {
                println!("{}", render(&search, path.points()));
                println!("{}", path);
            }
            SearchEvent::NoPath => println!("No path after {} expansions", search.expansions()),
        }
        std::thread::sleep(Duration::from_millis(delay));
    }
}
