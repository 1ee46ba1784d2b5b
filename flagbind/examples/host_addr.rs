//! Minimal host program: two flags, then parse-or-exit.
//!
//! ```bash
//! cargo run --example host_addr -- --ipaddress 10.0.0.7 --max-date 2024-06-01
//! cargo run --example host_addr -- -?
//! ```

use std::net::{IpAddr, Ipv4Addr};

use chrono::Utc;
use flagbind::Registry;

fn main() {
    let mut flags = Registry::new("host_addr")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_about("Prints the parsed host address and cutoff date");

    let address = flags.ip_addr(
        "--ipaddress",
        IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        "The IP address of the host",
    );
    let max_date = flags.datetime("--max-date", Utc::now().naive_utc(), "The date to use");

    if let Err(err) = flags.parse_or_exit(std::env::args()) {
        eprintln!("{err}");
        std::process::exit(1);
    }

    println!("address:  {}", address.get());
    println!("max date: {}", max_date.get());
    for (index, arg) in flags.args().iter().enumerate() {
        println!("arg[{index}]:   {arg}");
    }
}
