use std::{env, process};

fn main() {
    let opts = wclip::cli::parse(env::args());

    process::exit(wclip::run(opts));
}
