use std::path::{Path, PathBuf};
use std::process;

extern crate clap;
use clap::{App, Arg, ArgMatches};

use log::{debug, error};
use ouidb::{parse_mac, HardwareAddr, OuiDb};

const DATABASE_ENV: &str = "OUIDB_DATABASE";
const UNKNOWN_VENDOR: &str = "(unknown)";

/// Exit status when an address could not be parsed.
const EXIT_BAD_ADDRESS: i32 = 1;
/// Exit status when the vendor list could not be loaded.
const EXIT_BAD_DATABASE: i32 = 2;

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("ouidb-lookup")
        .version("0.1.0")
        .about("Resolves hardware addresses to the organization owning their vendor prefix")
        .arg(
            Arg::with_name("database")
                .short("d")
                .long("database")
                .value_name("OUI_FILE")
                .help("Tab-separated vendor prefix list")
                .takes_value(true)
                .env(DATABASE_ENV)
                .required(true)
                .validator(|d| {
                    if Path::new(&d).is_file() {
                        Ok(())
                    } else {
                        Err(format!("Path {} is not a regular file", d))
                    }
                }),
        )
        .arg(
            Arg::with_name("longest")
                .long("longest")
                .help("Pick the most specific matching prefix instead of the first one loaded"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Raise log verbosity, may be repeated"),
        )
        .arg(
            Arg::with_name("address")
                .value_name("ADDRESS")
                .help("Hardware address, e.g. 60:03:08:a0:ec:a6 or 6003.08a0.eca6")
                .multiple(true)
                .required(true),
        )
}

fn init_logging(verbosity: u64) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn get_pathbuf_arg(arg_matches: &ArgMatches, name: &str) -> PathBuf {
    Path::new(arg_matches.value_of(name).unwrap_or_default()).to_path_buf()
}

/// One output line: the canonical address and its vendor.
fn describe(db: &OuiDb, address: &HardwareAddr, longest: bool) -> String {
    let block = if longest {
        db.lookup_longest(address)
    } else {
        db.lookup(address)
    };
    match block {
        Some(block) => format!("{}\t{}", address, block.organization),
        None => format!("{}\t{}", address, UNKNOWN_VENDOR),
    }
}

fn main() {
    let matches = app().get_matches();
    init_logging(matches.occurrences_of("verbose"));

    let database_path = get_pathbuf_arg(&matches, "database");
    let db = match OuiDb::load(&database_path) {
        Ok(db) => db,
        Err(err) => {
            error!("{}: {}", database_path.display(), err);
            process::exit(EXIT_BAD_DATABASE);
        }
    };
    debug!("{} address blocks available", db.len());

    let longest = matches.is_present("longest");
    let mut failed = false;
    for text in matches.values_of("address").into_iter().flatten() {
        match parse_mac(text) {
            Ok(address) => println!("{}", describe(&db, &address, longest)),
            Err(err) => {
                eprintln!("{}", err);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(EXIT_BAD_ADDRESS);
    }
}
