use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::time::Instant;

use ansi_term::Colour;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use stride_fib::parse::{self, format_addr, parse_addr};
use stride_fib::{
    ForwardingTable, LinearTable, Prefix, RouteEntry, StrideConfig,
};

const HISTORY_FILE: &str = "/tmp/stride-fib-history.txt";

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Route table to load, in `show ip route` format
    #[arg(required = true)]
    routes: PathBuf,

    /// Read ROUTES as CSV rows of `prefix_addr,len,next_hop` instead, without
    /// a header row
    #[arg(long, default_value_t = false)]
    csv: bool,

    /// Stride division of the trie, e.g. `16,4,4,8`
    #[arg(short, long, default_value_t = StrideConfig::default())]
    strides: StrideConfig,

    /// Resolve these addresses and print their next-hops
    #[arg(short, long)]
    lookup: Vec<String>,

    /// Replay this many random addresses through the table and report the
    /// time it took
    #[arg(short, long, default_value_t = 0)]
    random: usize,

    /// Seed for the random addresses
    #[arg(long)]
    seed: Option<u64>,

    /// Check every random lookup against a sequential scan of the routes
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// Print the trie statistics as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Read addresses from the terminal and resolve them
    #[arg(short, long, default_value_t = false)]
    interactive: bool,
}

// The rows carry no header, every row is a route.
fn load_csv<R: Read>(input: R) -> Result<Vec<RouteEntry>, Box<dyn Error>> {
    let mut routes = vec![];

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(input);
    for result in rdr.records() {
        let record = result?;
        let (addr, len, next_hop) =
            match (record.get(0), record.get(1), record.get(2)) {
                (Some(addr), Some(len), Some(next_hop)) => {
                    (addr, len, next_hop)
                }
                _ => return Err(format!("short record {:?}", record).into()),
            };
        let prefix = Prefix::new(parse_addr(addr)?, len.trim().parse()?)?;
        routes.push(RouteEntry::new(prefix, parse_addr(next_hop)?));
    }
    Ok(routes)
}

fn load_routes(args: &Cli) -> Result<Vec<RouteEntry>, Box<dyn Error>> {
    if args.csv {
        load_csv(File::open(&args.routes)?)
    } else {
        let file = File::open(&args.routes)?;
        Ok(parse::read_routes(BufReader::new(file))?)
    }
}

fn print_resolved(table: &ForwardingTable, addr: u32) {
    match table.longest_match(addr) {
        Some(m) => println!(
            "{} -> {} (/{} at level {})",
            format_addr(addr),
            Colour::Green.paint(format_addr(m.next_hop)),
            m.prefix_len,
            m.level
        ),
        None => println!(
            "{} -> {}",
            format_addr(addr),
            Colour::Red.paint("no route")
        ),
    }
}

fn replay_random(
    table: &ForwardingTable,
    routes: &[RouteEntry],
    args: &Cli,
) -> Result<(), Box<dyn Error>> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let addrs: Vec<u32> = (0..args.random).map(|_| rng.random()).collect();

    let start = Instant::now();
    let mut found = 0_usize;
    for addr in addrs.iter() {
        if std::hint::black_box(table.resolve(*addr)) != 0 {
            found += 1;
        }
    }
    let elapsed = start.elapsed();
    println!(
        "{} lookups in {} msecs ({:.2} Mlookups/s), {} resolved",
        addrs.len(),
        elapsed.as_millis(),
        addrs.len() as f64 / elapsed.as_secs_f64().max(1e-9) / 1_000_000.0,
        found
    );

    if args.verify {
        let reference: LinearTable = routes.iter().copied().collect();
        let mut mismatches = 0_usize;
        for addr in addrs.iter() {
            let expected = reference.resolve(*addr);
            let got = table.resolve(*addr);
            if expected != got {
                mismatches += 1;
                eprintln!(
                    "{} resolved to {}, expected {}",
                    format_addr(*addr),
                    format_addr(got),
                    format_addr(expected)
                );
            }
        }
        if mismatches > 0 {
            return Err(format!("{} lookups failed verification", mismatches)
                .into());
        }
        println!("{}", Colour::Green.paint("all lookups verified"));
    }
    Ok(())
}

fn interactive(table: &ForwardingTable) -> Result<(), Box<dyn Error>> {
    let mut rl = DefaultEditor::new()?;
    if rl.load_history(HISTORY_FILE).is_err() {
        println!("No previous history.");
    }
    loop {
        match rl.readline("(stride-fib)> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;
                match line {
                    "q" | "quit" => break,
                    "s" | "stats" => println!("{}", table.trie()),
                    _ => match parse_addr(line) {
                        Ok(addr) => print_resolved(table, addr),
                        Err(err) => println!("{}", err),
                    },
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    rl.save_history(HISTORY_FILE)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Cli::parse();

    let t_load = Instant::now();
    let routes = load_routes(&args)?;
    println!(
        "finished loading {} routes in {} msecs",
        routes.len(),
        t_load.elapsed().as_millis()
    );

    let t_build = Instant::now();
    let table = ForwardingTable::build_with_strides(
        args.strides.clone(),
        routes.iter().copied(),
    );
    println!(
        "finished building trie in {} msecs",
        t_build.elapsed().as_millis()
    );
    info!("{:?}", table.trie().stats());

    if args.json {
        println!("{}", serde_json::to_string_pretty(table.trie().stats())?);
    } else {
        println!("{}", table.trie());
    }

    for addr in args.lookup.iter() {
        print_resolved(&table, parse_addr(addr)?);
    }

    if args.random > 0 {
        replay_random(&table, &routes, &args)?;
    }

    if args.interactive {
        interactive(&table)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_csv_keeps_first_row() -> Result<(), Box<dyn Error>> {
        let input = "10.0.0.0,8,10.255.0.1\n11.0.0.0,8,10.255.0.2\n";
        let routes = load_csv(input.as_bytes())?;
        assert_eq!(
            routes,
            vec![
                RouteEntry::new(Prefix::new(0x0a00_0000, 8)?, 0x0aff_0001),
                RouteEntry::new(Prefix::new(0x0b00_0000, 8)?, 0x0aff_0002),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_load_csv_rejects_short_rows() {
        assert!(load_csv("10.0.0.0,8\n".as_bytes()).is_err());
    }
}
