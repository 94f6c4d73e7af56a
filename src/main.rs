use std::env;
use std::process;
use std::time::Instant;

use log::info;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: km <input-file>");
        process::exit(2);
    }

    let now = Instant::now();
    match kmmatching::solve_file(&args[1]) {
        Ok(assignment) => {
            info!("Elapsed time: {:?}", now.elapsed());
            print!("{}", assignment);
        }
        Err(err) => {
            eprintln!("error: {}: {}", args[1], err);
            process::exit(1);
        }
    }
}
