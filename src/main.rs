use std::env;

use float_conv::num::convert::{
    DoubleToStringConverter, DtoaError, StringBuilder, StringToDoubleConverter,
};
use tracing::Level;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_target(false)
        .init();

    let mut parser = StringToDoubleConverter::new();
    parser
        .allow_hex(true)
        .allow_leading_spaces(true)
        .allow_trailing_spaces(true)
        .allow_trailing_junk(false)
        .allow_case_insensitivity(true)
        .infinity_symbol(Some("inf"))
        .nan_symbol(Some("nan"));
    let printer = DoubleToStringConverter::new();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        println!("Usage: float-conv <number>...");
        return;
    }

    for arg in args {
        println!("\n[{arg}]\n");

        let mut input = arg.as_bytes();
        let value = match parser.string_to_double(&mut input) {
            Ok(value) => value,
            Err(e) => {
                println!("{e}");
                continue;
            },
        };
        let mut input = arg.as_bytes();
        let single = parser.string_to_float(&mut input);

        print("shortest", |b| printer.to_shortest(value, b));
        print("fixed(6)", |b| printer.to_fixed(value, 6, b));
        print("exponential", |b| printer.to_exponential(value, None, b));
        print("exponential(3)", |b| printer.to_exponential(value, Some(3), b));
        print("precision(17)", |b| printer.to_precision(value, 17, b));
        if let Ok(single) = single {
            print("shortest single", |b| printer.to_shortest_single(single, b));
        }
    }
}

fn print(name: &str, convert: impl FnOnce(&mut StringBuilder) -> Result<(), DtoaError>) {
    let mut buffer = [0_u8; 256];
    let mut builder = StringBuilder::new(&mut buffer);
    match convert(&mut builder) {
        Ok(()) => println!("{name:>16}: {builder}"),
        Err(e) => println!("{name:>16}: {e}"),
    }
}
