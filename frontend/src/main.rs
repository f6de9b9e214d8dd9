use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use breadbox_core::core::machine::Machine;
use breadbox_machines::prg::Prg;
use breadbox_machines::registry;
use breadbox_machines::rom_loader::RomImages;

mod emulator;
mod input;
mod video;

#[derive(Parser)]
#[command(name = "breadbox", about = "Commodore 64 emulator", version)]
struct Args {
    /// PRG program to load into memory after reset
    prg: Option<PathBuf>,

    /// Machine variant to run (see --list-machines)
    #[arg(long, default_value = "c64")]
    machine: String,

    /// Directory containing kernal.bin, basic.bin, and chargen.bin
    #[arg(long, default_value = "rom")]
    roms: PathBuf,

    /// Window scale factor
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// List the available machine variants and exit
    #[arg(long)]
    list_machines: bool,

    /// Enable debug-level logging
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if args.list_machines {
        for entry in registry::all() {
            println!("{:<12} {}", entry.name, entry.description);
        }
        return ExitCode::SUCCESS;
    }

    let Some(entry) = registry::find(&args.machine) else {
        eprintln!("Unknown machine: {}", args.machine);
        eprintln!("Available: use --list-machines");
        return ExitCode::FAILURE;
    };

    let roms = match RomImages::from_directory(&args.roms) {
        Ok(roms) => roms,
        Err(e) => {
            eprintln!("Failed to load ROMs from {}: {e}", args.roms.display());
            return ExitCode::FAILURE;
        }
    };

    let mut machine = (entry.create)(&roms);
    machine.reset();

    if let Some(path) = &args.prg {
        let prg = match Prg::from_file(path) {
            Ok(prg) => prg,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        };
        if !machine.load_program(prg.load_address, &prg.data) {
            eprintln!("{} does not accept PRG programs", entry.name);
            return ExitCode::FAILURE;
        }
    }

    let key_map = input::default_key_map(machine.input_map());
    match emulator::run(machine.as_mut(), &key_map, args.scale) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Emulation stopped: {e}");
            ExitCode::from(2)
        }
    }
}
