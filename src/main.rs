//! POL designer entry point — CLI wiring and config-driven computation.

use std::path::Path;
use std::process;

use pol_designer::budget::bom::BomLine;
use pol_designer::budget::{compute_budget, generate_bom};
use pol_designer::config::DesignConfig;
use pol_designer::devices::{CatalogStore, InMemoryCatalog};
use pol_designer::io::export::export_csv;
use pol_designer::params;

/// Parsed CLI arguments.
struct CliArgs {
    design_path: Option<String>,
    preset: Option<String>,
    catalog_path: Option<String>,
    bom_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("pol-designer — Passive Optical LAN deployment designer");
    eprintln!();
    eprintln!("Usage: pol-designer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --design <path>          Load design scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline)");
    eprintln!("  --catalog <path>         Load device catalog from TOML file");
    eprintln!("  --bom-out <path>         Export the bill of materials to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after computing");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --design or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        design_path: None,
        preset: None,
        catalog_path: None,
        bom_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--design" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --design requires a path argument");
                    process::exit(1);
                }
                cli.design_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--catalog" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --catalog requires a path argument");
                    process::exit(1);
                }
                cli.catalog_path = Some(args[i].clone());
            }
            "--bom-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --bom-out requires a path argument");
                    process::exit(1);
                }
                cli.bom_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Prints the BOM as an aligned two-column table.
fn print_bom(lines: &[BomLine]) {
    println!("--- Bill of Materials ---");
    let width = lines.iter().map(|l| l.name.len()).max().unwrap_or(0);
    for line in lines {
        println!("{:<width$}  {:>10}", line.name, line.quantity.to_string());
    }
}

fn main() {
    let cli = parse_args();

    // Load config: --design takes priority, then --preset, then baseline default
    let design = if let Some(ref path) = cli.design_path {
        match DesignConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match DesignConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        DesignConfig::baseline()
    };

    // Load catalog: --catalog file or the built-in seed
    let catalog = if let Some(ref path) = cli.catalog_path {
        match InMemoryCatalog::from_toml_file(Path::new(path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        InMemoryCatalog::with_defaults()
    };

    // Validate field constraints, then catalog resolution
    let errors = design.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let parameters = design.to_parameters(&catalog);
    let errors = params::validate(&parameters, &catalog);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let Some(olt) = catalog.olt(&parameters.olt_id) else {
        eprintln!("error: OLT \"{}\" is not in the catalog", parameters.olt_id);
        process::exit(1);
    };
    let Some(ont) = catalog.ont(&parameters.ont_id) else {
        eprintln!("error: ONT \"{}\" is not in the catalog", parameters.ont_id);
        process::exit(1);
    };

    let tx_power = olt.tx_power_for(&parameters.sfp_selection);
    let budget = compute_budget(&parameters, tx_power, ont.rx_sensitivity_dbm);
    let bom = generate_bom(&parameters, Some(olt), Some(ont));

    println!(
        "{} -> {} via {} ({} PON ports, {} ONTs/port)",
        olt.model, ont.model, parameters.sfp_selection, parameters.pon_ports,
        parameters.onts_per_pon_port
    );
    println!("OLT TX power:     {tx_power:.1} dBm");
    println!("ONT sensitivity:  {:.1} dBm", ont.rx_sensitivity_dbm);
    println!("{budget}");
    println!();
    print_bom(&bom);
    println!();
    println!("Total PON ports utilized: {}", parameters.pon_ports);
    println!("Total ONTs deployed:      {}", parameters.total_onts());

    // Export CSV if requested
    if let Some(ref path) = cli.bom_out {
        if let Err(e) = export_csv(&bom, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("BOM written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(pol_designer::api::AppState::from_design(catalog, parameters));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(pol_designer::api::serve(state, addr));
    }
}
