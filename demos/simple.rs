use grid_astar::{find_path, Grid, Point};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood

fn main() {
    let mut grid = Grid::with_obstacles(3, 3, [Point::new(1, 1)]).unwrap();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    match find_path(&mut grid, start, end).unwrap().into_path() {
        Some(path) => {
            println!("Path with cost {}:", path.cost());
            for p in path.iter() {
                println!("{:?}", p);
            }
        }
        None => println!("No path from {:?} to {:?}", start, end),
    }
}
