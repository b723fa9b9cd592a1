use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InconsistentRow(usize, usize),
    EmptyGrid,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} column(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::EmptyGrid => write!(f, "Given maze has no cells."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[arg(default_value = "maze.txt")]
    pub input_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn search_order() -> &'static [Direction] {
        static SEARCH_ORDER: [Direction; 4] = [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ];

        &SEARCH_ORDER
    }

    pub fn backtrack_order() -> &'static [Direction] {
        static BACKTRACK_ORDER: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];

        &BACKTRACK_ORDER
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn c(&self) -> usize {
        self.c
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::Right => Some(Self::new(self.r, self.c + 1)),
            Direction::Down => Some(Self::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    Start,
    Goal,
}

/// Exploration record of a successful solve: the mask of every cell pushed
/// onto the search frontier, and the path backtracked from the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathWitness {
    explored: Vec<bool>,
    path: Vec<Position>,
    goal_pos: Position,
}

impl PathWitness {
    /// Backtracked path, goal first. Ends at the start position unless
    /// backtracking dead-ended, in which case the path is partial.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn goal_pos(&self) -> &Position {
        &self.goal_pos
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    PathFound(PathWitness),
    NoPathFound,
    NoStartFound,
}

#[derive(Debug)]
pub struct Map {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
    start_pos: Option<Position>,
}

impl Map {
    /// Depth-first search from the start position to the first goal reached.
    /// Neighbors are pushed in the fixed order left, right, up, down, so the
    /// discovered path is deterministic for a given map.
    pub fn solve(&self) -> SolveResult {
        let Some(start_pos) = self.start_pos.as_ref() else {
            return SolveResult::NoStartFound;
        };

        let mut frontier = vec![start_pos.clone()];
        let mut visited = vec![false; self.tiles.len()];
        let mut explored = vec![false; self.tiles.len()];
        if let Some(start_ind) = self.pos_to_ind(start_pos) {
            explored[start_ind] = true;
        }

        let mut goal_pos = None;
        while let Some(cur_pos) = frontier.pop() {
            let Some(cur_ind) = self.pos_to_ind(&cur_pos) else {
                continue;
            };
            if visited[cur_ind] {
                continue;
            }
            visited[cur_ind] = true;

            if self.tile(&cur_pos).is_some_and(|tile| *tile == Tile::Goal) {
                goal_pos = Some(cur_pos);
                break;
            }

            for next_pos in Direction::search_order()
                .iter()
                .filter_map(|dir| cur_pos.neighbor(*dir))
            {
                if let Some(next_ind) = self.pos_to_ind(&next_pos) {
                    if !visited[next_ind] && self.tiles[next_ind] != Tile::Wall {
                        explored[next_ind] = true;
                        frontier.push(next_pos);
                    }
                }
            }
        }

        match goal_pos {
            Some(goal_pos) => {
                let path = self.backtrack(&explored, &goal_pos);
                SolveResult::PathFound(PathWitness {
                    explored,
                    path,
                    goal_pos,
                })
            }
            None => SolveResult::NoPathFound,
        }
    }

    /// Overlay of the exploration on the grid: start and goal markers are kept,
    /// every explored cell becomes '*', everything else becomes '.'. Walls the
    /// search never pushed are indistinguishable from unexplored floor here;
    /// the original layout stays in the map itself.
    pub fn render(&self, witness: &PathWitness) -> String {
        let mut text = String::with_capacity((self.col_n + 1) * self.row_n);
        for r in 0..self.row_n {
            for c in 0..self.col_n {
                let ind = r * self.col_n + c;
                text.push(match self.tiles[ind] {
                    Tile::Start => 'S',
                    Tile::Goal => 'E',
                    _ if witness.explored[ind] => '*',
                    _ => '.',
                });
            }
            text.push('\n');
        }

        text
    }

    pub fn tile(&self, pos: &Position) -> Option<&Tile> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get(ind))
    }

    pub fn start_pos(&self) -> Option<&Position> {
        self.start_pos.as_ref()
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    // Walks from the goal back toward the start, stepping onto the first
    // explored neighbor (in the fixed order up, down, left, right) not already
    // on the path. A dead end leaves the path partial rather than failing.
    fn backtrack(&self, explored: &[bool], goal_pos: &Position) -> Vec<Position> {
        let mut path = vec![goal_pos.clone()];
        let mut on_path = vec![false; self.tiles.len()];
        if let Some(goal_ind) = self.pos_to_ind(goal_pos) {
            on_path[goal_ind] = true;
        }

        let mut cur_pos = goal_pos.clone();
        while !self.tile(&cur_pos).is_some_and(|tile| *tile == Tile::Start) {
            let Some(prev_pos) = Direction::backtrack_order()
                .iter()
                .filter_map(|dir| cur_pos.neighbor(*dir))
                .find(|pos| {
                    self.pos_to_ind(pos)
                        .map(|ind| explored[ind] && !on_path[ind])
                        .unwrap_or(false)
                })
            else {
                break;
            };

            if let Some(prev_ind) = self.pos_to_ind(&prev_pos) {
                on_path[prev_ind] = true;
            }
            path.push(prev_pos.clone());
            cur_pos = prev_pos;
        }

        path
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.r < self.row_n && pos.c < self.col_n {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }
}

impl TryFrom<&str> for Map {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut builder = MapBuilder::new();
        for line in value.lines() {
            builder.add_row(line)?;
        }

        builder.build()
    }
}

#[derive(Debug)]
struct MapBuilder {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: Option<usize>,
    start_pos: Option<Position>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
            start_pos: None,
        }
    }

    pub fn add_row(&mut self, text: &str) -> std::result::Result<(), Error> {
        let this_col_n = text.chars().count();
        if *self.col_n.get_or_insert(this_col_n) != this_col_n {
            return Err(Error::InconsistentRow(self.col_n.unwrap(), this_col_n));
        }

        for (ind, c) in text.chars().enumerate() {
            self.tiles.push(match c {
                'S' => {
                    // The first start in scan order is the search origin; any
                    // later 'S' stays a walkable start marker.
                    let pos = Position::new(self.row_n, ind);
                    self.start_pos.get_or_insert(pos);
                    Tile::Start
                }
                'E' => Tile::Goal,
                '#' => Tile::Wall,
                _ => Tile::Open,
            });
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> std::result::Result<Map, Error> {
        if self.row_n == 0 || self.col_n.map_or(true, |col_n| col_n == 0) {
            return Err(Error::EmptyGrid);
        }

        Ok(Map {
            tiles: self.tiles,
            row_n: self.row_n,
            col_n: self.col_n.unwrap_or(0),
            start_pos: self.start_pos,
        })
    }
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<Map> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = MapBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder.add_row(line.as_str())?
    }

    Ok(builder.build()?)
}
