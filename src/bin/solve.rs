use anyhow::{Context, Result};
use clap::Parser;
use maze_solver::{CLIArgs, SolveResult};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let map = maze_solver::read_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read maze from given file({}).",
            args.input_path.display()
        )
    })?;

    match map.solve() {
        SolveResult::PathFound(witness) => {
            println!("Path found!");
            print!("{}", map.render(&witness));
        }
        SolveResult::NoPathFound => println!("No path found."),
        SolveResult::NoStartFound => println!("No start position 'S' found."),
    }

    Ok(())
}
