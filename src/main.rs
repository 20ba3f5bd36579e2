use argparse::{ArgumentParser, List, Store, StoreOption, StoreTrue};
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs::File;
use std::io;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use sudoku_engine::grid::Grid;
use sudoku_engine::{checker, generator, pdf, solver, SudokuError};

fn main() {
    let mut debug_mode = false;
    let mut command = String::new();
    let mut args: Vec<String> = Vec::new();
    {
        // this block limits scope of borrows by ap.refer() method
        let mut ap = ArgumentParser::new();
        ap.set_description("Solve, check, and generate 9x9 Sudoku puzzles");
        ap.refer(&mut debug_mode)
            .add_option(&["--debug"], StoreTrue, "Enable debug logging");
        ap.refer(&mut command).required().add_argument(
            "command",
            Store,
            "Command to run: solve, check, or gen",
        );
        ap.refer(&mut args)
            .add_argument("arguments", List, "Arguments for the command");
        ap.stop_on_first_argument(true);
        ap.parse_args_or_exit();
    }

    let default_level = if debug_mode { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    args.insert(0, format!("sudoku_engine {}", command));

    let code = match command.as_str() {
        "solve" => solve_command(args),
        "check" => check_command(args),
        "gen" => gen_command(args),
        other => {
            eprintln!("Unknown command '{}'; expected solve, check, or gen", other);
            2
        }
    };

    process::exit(code);
}

fn solve_command(args: Vec<String>) -> i32 {
    let mut filename = String::new();
    let mut format = "pretty".to_string();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Solve a Sudoku puzzle read from a file");
        ap.refer(&mut format).add_option(
            &["--format"],
            Store,
            "Input format: pretty, raw, csv, or auto",
        );
        ap.refer(&mut filename)
            .required()
            .add_argument("filename", Store, "Path to the puzzle file");
        if let Err(code) = ap.parse(args, &mut io::stdout(), &mut io::stderr()) {
            return code;
        }
    }

    let mut grid = match read_grid(&filename, &format) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error while reading grid: {}", e);
            return 1;
        }
    };

    if !solver::solve(&mut grid) {
        eprintln!("No solution found");
    }
    print!("{}", grid);
    0
}

fn check_command(args: Vec<String>) -> i32 {
    let mut filename = String::new();
    let mut format = "pretty".to_string();
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Check a Sudoku grid for rule violations");
        ap.refer(&mut format).add_option(
            &["--format"],
            Store,
            "Input format: pretty, raw, csv, or auto",
        );
        ap.refer(&mut filename)
            .required()
            .add_argument("filename", Store, "Path to the puzzle file");
        if let Err(code) = ap.parse(args, &mut io::stdout(), &mut io::stderr()) {
            return code;
        }
    }

    let grid = match read_grid(&filename, &format) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error while reading grid: {}", e);
            return 1;
        }
    };

    println!("{}", checker::grid_is_valid(&grid));
    0
}

fn gen_command(args: Vec<String>) -> i32 {
    let mut keep_count: usize = 30;
    let mut seed: Option<u64> = None;
    let mut csv_out: Option<String> = None;
    let mut pdf_out: Option<String> = None;
    {
        let mut ap = ArgumentParser::new();
        ap.set_description("Generate a new Sudoku puzzle");
        ap.refer(&mut seed).add_option(
            &["--seed"],
            StoreOption,
            "Seed for puzzle generation; defaults to the current time",
        );
        ap.refer(&mut csv_out).add_option(
            &["--out"],
            StoreOption,
            "Also save the puzzle to this CSV file",
        );
        ap.refer(&mut pdf_out).add_option(
            &["--pdf"],
            StoreOption,
            "Also save the puzzle to this printable PDF file",
        );
        ap.refer(&mut keep_count).required().add_argument(
            "cells",
            Store,
            "Number of filled cells to keep, 0 to 81",
        );
        if let Err(code) = ap.parse(args, &mut io::stdout(), &mut io::stderr()) {
            return code;
        }
    }

    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_secs()
    });
    debug!("using seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let puzzle = match generator::random_puzzle(keep_count, &mut rng) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    print!("{}", puzzle);

    if let Some(path) = csv_out {
        let result = File::create(&path)
            .map_err(SudokuError::from)
            .and_then(|file| puzzle.write_csv(file));
        match result {
            Ok(()) => println!("Puzzle saved to {}", path),
            Err(e) => {
                eprintln!("Error while saving {}: {}", path, e);
                return 1;
            }
        }
    }

    if let Some(path) = pdf_out {
        match pdf::save_pdf(&puzzle, &path) {
            Ok(()) => println!("Puzzle saved to {}", path),
            Err(e) => {
                eprintln!("Error while saving {}: {}", path, e);
                return 1;
            }
        }
    }

    0
}

fn read_grid(filename: &str, format: &str) -> sudoku_engine::Result<Grid> {
    match format {
        "csv" => Grid::parse_csv(File::open(filename)?),
        "raw" => Ok(Grid::parse_raw(&std::fs::read_to_string(filename)?)),
        "pretty" => Grid::parse_pretty(&std::fs::read_to_string(filename)?),
        "auto" => Grid::parse_auto(&std::fs::read_to_string(filename)?),
        other => Err(SudokuError::Parse(format!(
            "unknown input format '{}'",
            other
        ))),
    }
}
