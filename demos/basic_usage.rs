//! Basic usage example for dc-address-parser.
//!
//! Parses a handful of hand-typed addresses, prints their components and
//! canonical forms, and optionally verifies them against the DC Master
//! Address Repository.
//!
//! Run with: cargo run --example basic_usage
//! Add `-- --lookup` to query the lookup service (needs network access).

use dc_address_parser::{AddressFields, AddressParser, Error};

const SAMPLES: &[&str] = &[
    "1600 Pennsylvania ave n.w.",
    "REAR OF 123-125 M.L. King JR. Ave SE",
    "123 N. Capitol St NW APT 100; side door",
    "450 e st sw",
    "Pennsylvania Avenue NW",
];

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    println!("dc-address-parser Basic Usage Example");
    println!("=====================================\n");

    let parser = AddressParser::new();

    println!("1. Parsing free-form addresses");
    println!("------------------------------");
    for input in SAMPLES {
        println!("Input: {input}");
        match parser.parse(input) {
            Ok(address) => {
                for (field, value) in address.to_field_map().entries() {
                    if let Some(value) = value {
                        println!("  {field}: {value}");
                    }
                }
                println!("  canonical: {}", address.to_canonical_string(true));
            }
            Err(e) => println!("  error: {e}"),
        }
        println!();
    }

    println!("2. Parsing discrete fields");
    println!("--------------------------");
    let fields = AddressFields::new()
        .with_number("1600")
        .with_street_name("pennsylvania")
        .with_street_type("ave")
        .with_quadrant("n.w.");
    let address = parser.parse_fields(&fields)?;
    println!("{fields:?}\n  -> {address}\n");

    #[cfg(feature = "lookup")]
    if std::env::args().any(|arg| arg == "--lookup") {
        use dc_address_parser::{LookupClient, LookupConfig};

        println!("3. Verifying against the lookup service");
        println!("---------------------------------------");
        let client = LookupClient::with_config(LookupConfig::from_env()?)?;
        match address.lookup(&client).await {
            Ok(location) => {
                println!("  matched: {}", location.address());
                if let Some((lat, lon)) = location.coordinates() {
                    println!("  coordinates: {lat}, {lon}");
                }
            }
            Err(e) => println!("  lookup failed: {e}"),
        }
    }

    Ok(())
}
