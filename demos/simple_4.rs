use grid_astar::{find_path, Cell, PathingGrid};

// In this example a path is found on a 4x4 grid with shape
//  ____
// |S   |
// | ## |
// |    |
// | # E|
//  ____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() -> Result<(), grid_astar::GridError> {
    let grid = [[0, 0, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 1, 0, 0]];
    println!("{}", PathingGrid::from_rows(&grid)?);
    match find_path(&grid, Cell::new(0, 0), Cell::new(3, 3))? {
        Some(path) => {
            for p in path {
                println!("Path: {}", p);
            }
        }
        None => println!("No path found!"),
    }
    Ok(())
}
