use std::process::ExitCode;

use hhlint_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    hhlint_driver::run(&argument)
}
