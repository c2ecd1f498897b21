use grawlix::{Censor, ForbiddenWords};
use std::env::args;
use std::io::{self, Read};
use std::{fs, process};

pub fn main() {
    env_logger::init();

    let mut args = args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: censor <words-file> [text...]");
            process::exit(2);
        }
    };

    let words = match fs::read_to_string(&path) {
        Ok(list) => ForbiddenWords::from_list(&list),
        Err(e) => {
            eprintln!("cannot read {}: {}", path, e);
            process::exit(1);
        }
    };

    let mut input = args.collect::<Vec<_>>().join(" ");
    let from_args = !input.is_empty();
    if !from_args {
        if let Err(e) = io::stdin().read_to_string(&mut input) {
            eprintln!("cannot read stdin: {}", e);
            process::exit(1);
        }
    }

    let censor = Censor::new(&words);
    let spans = censor.spans(&input);
    log::info!("{} forbidden word(s) from {} in input", spans.len(), path);
    let censored = censor.censor(&input);
    if from_args {
        println!("{}", censored);
    } else {
        print!("{}", censored);
    }
}
