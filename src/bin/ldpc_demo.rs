use ldpc_demo::ecc::{Direction, Session};
use std::process;

const USAGE: &str = "usage: ldpc_demo [<variable>+ | <variable>-]...";

fn parse_adjustment(arg: &str) -> Option<(usize, Direction)> {
    let (index, direction) = if let Some(index) = arg.strip_suffix('+') {
        (index, Direction::Increase)
    } else if let Some(index) = arg.strip_suffix('-') {
        (index, Direction::Decrease)
    } else {
        return None;
    };
    index.parse().ok().map(|v| (v, direction))
}

fn main() {
    let mut session = match Session::reference() {
        Ok(session) => session,
        Err(err) => {
            eprintln!("ldpc_demo: {}", err);
            process::exit(1);
        }
    };

    for arg in std::env::args().skip(1) {
        let Some((v, direction)) = parse_adjustment(&arg) else {
            eprintln!("ldpc_demo: bad adjustment '{}'\n{}", arg, USAGE);
            process::exit(2);
        };
        if let Err(err) = session.adjust_probability(v, direction) {
            eprintln!("ldpc_demo: {}", err);
            process::exit(2);
        }
    }

    for k in 0..session.iterations() {
        match session.render_page(k) {
            Ok(page) => println!("{}", page),
            Err(err) => {
                eprintln!("ldpc_demo: {}", err);
                process::exit(1);
            }
        }
    }
}
