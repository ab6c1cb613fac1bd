
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs;
use std::process;

use assembler::ast::Program;
use assembler::lexer::OPCODES;
use assembler::Error;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tPrint Tokens: {}\n\tInfile: {}",
        match args.occurrences_of("verbose") {
            0 => log::LevelFilter::Error.to_string(),
            1 => log::LevelFilter::Warn.to_string(),
            2 => log::LevelFilter::Info.to_string(),
            3 | _ => log::LevelFilter::Debug.to_string(),
        },
        args.is_present("tokens"),
        args.value_of("INPUT").unwrap()
    );

    let ipath = args.value_of("INPUT").unwrap();

    // Read the whole source up front; any I/O failure kills the run
    // before tokenization starts.
    let source = match fs::read_to_string(ipath) {
        Err(err) => {
            let err = Error::UnreadableSource {
                path: ipath.to_string(),
                source: err,
            };
            error!("fatal: {}", err);
            process::exit(1);
        },
        Ok(text) => text,
    };

    let tokens = assembler::lexer::tokenize(&source);

    if args.is_present("tokens") {
        for token in tokens.iter() {
            println!("{:?}", token);
        }
        println!("--------------------");
    }

    let mut program = match assembler::parser::Parser::new(tokens).run() {
        Err(err) => {
            error!("fatal: {}", err);
            process::exit(1);
        },
        Ok(program) => program,
    };

    assembler::resolver::resolve(&mut program);

    print_program(&program);
}

/// Renders the resolved program for inspection: one grid for the
/// instruction list, one for the variable table. The trailing column
/// of the instruction grid is the mnemonic's byte code from the
/// opcode table.
fn print_program(program: &Program) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, ins) in program.instructions.iter().enumerate() {
        grid.add(Cell::from(format!("0x{:02X}:", idx)));
        grid.add(Cell::from(ins.opcode.clone()));
        grid.add(Cell::from(match &ins.operand {
            Some(operand) => operand.clone(),
            None => "--".to_string(),
        }));
        grid.add(Cell::from(format!("=> 0x{:02X}", OPCODES[ins.opcode.as_str()])));
    }

    println!("Instructions:");
    println!("{}", grid.fit_into_columns(4));

    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for variable in program.variables.values() {
        grid.add(Cell::from(variable.name.clone()));
        grid.add(Cell::from(variable.kind.keyword().to_string()));
        grid.add(Cell::from(format!("0x{:02X}", variable.value)));
    }

    println!("Variables:");
    println!("{}", grid.fit_into_columns(3));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap())
        .version(option_env!("CARGO_PKG_VERSION").unwrap())
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("tokens")
            .short("t")
            .long("tokens")
            .takes_value(false)
            .help("prints the classified token stream to STDOUT before parsing"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 | _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stdout())
        .apply().ok();
}
