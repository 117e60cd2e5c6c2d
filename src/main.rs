//! Command line front end.
//!
//! Usage: `bvm [FILE] [-e CODE] [--initmem N] [--maxmem N] [--buffered] [--step-limit N]
//!             [--bytecode | --assembly] [--emit-bytecode OUT] [--disassemble] [--dump]`
//!
//! The program is read from FILE, from `-e`, or from stdin if neither is given. A running
//! program reads its input from stdin and writes to stdout. Diagnostics go to stderr and are
//! controlled with `RUST_LOG`.

use std::fs;
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use bvm::{compile, disassemble, parse_assembly, Bytecode, ExecOptions, VmConfig, BVM};

#[derive(Parser, Debug)]
#[command(name = "bvm")]
#[command(about = "Compile and run programs on the byte-tape virtual machine")]
struct Args {
  /// Program file. Read from stdin if neither this nor `-e` is given.
  #[arg(conflicts_with = "execute")]
  file: Option<PathBuf>,

  /// Program text given on the command line
  #[arg(short = 'e', long = "execute")]
  execute: Option<String>,

  /// Cells on the tape before any growth
  #[arg(long = "initmem", default_value_t = 3000)]
  initial_memory: usize,

  /// Largest the tape may grow to; unbounded if omitted
  #[arg(long = "maxmem")]
  max_memory: Option<usize>,

  /// Flush output once at the end instead of after every character
  #[arg(long)]
  buffered: bool,

  /// Abort after this many instructions
  #[arg(long = "step-limit")]
  step_limit: Option<u64>,

  /// The program is compiled bytecode rather than source
  #[arg(long, conflicts_with = "assembly")]
  bytecode: bool,

  /// The program is assembly rather than source
  #[arg(long)]
  assembly: bool,

  /// Write the compiled bytecode to this file instead of running it
  #[arg(long = "emit-bytecode")]
  emit_bytecode: Option<PathBuf>,

  /// Print the program as assembly instead of running it
  #[arg(long)]
  disassemble: bool,

  /// Print the tape around the data pointer to stderr after running
  #[arg(long)]
  dump: bool,
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(io::stderr)
    .init();
}

fn read_program(args: &Args) -> io::Result<Vec<u8>> {
  if let Some(text) = &args.execute {
    return Ok(text.as_bytes().to_vec());
  }
  if let Some(path) = &args.file {
    return fs::read(path);
  }
  let mut buffer = Vec::new();
  io::stdin().read_to_end(&mut buffer)?;
  Ok(buffer)
}

fn main() {
  init_logging();

  let args = Args::parse();

  let raw = match read_program(&args) {
    Ok(raw) => raw,
    Err(e)  => {
      error!("Failed to read program: {}", e);
      process::exit(1);
    }
  };

  let code = if args.bytecode {
    Bytecode::from_bytes(raw)
  } else if args.assembly {
    match parse_assembly(&String::from_utf8_lossy(&raw)) {
      Ok(code) => code,
      Err(e)   => {
        error!("{}", e);
        process::exit(1);
      }
    }
  } else {
    compile(&String::from_utf8_lossy(&raw))
  };

  if let Some(path) = &args.emit_bytecode {
    if let Err(e) = fs::write(path, code.as_bytes()) {
      error!("Failed to write {}: {}", path.display(), e);
      process::exit(1);
    }
    info!("Wrote {} bytes of bytecode to {}", code.len(), path.display());
    return;
  }

  if args.disassemble {
    print!("{}", disassemble(&code));
    return;
  }

  let config = VmConfig {
    initial_memory : args.initial_memory,
    max_memory     : args.max_memory,
  };
  let options = ExecOptions {
    instant_flush : !args.buffered,
    step_limit    : args.step_limit,
  };

  let mut vm     = BVM::with_config(config);
  let stdin      = io::stdin();
  let mut stdout = BufWriter::new(io::stdout().lock());

  let result = vm.exec_compiled(&code, options, stdin.lock(), &mut stdout);

  if args.dump {
    eprintln!("{}", vm);
  }

  match result {
    Ok(steps) => info!("Executed {} instructions", steps),
    Err(e)    => {
      error!("{}", e);
      process::exit(1);
    }
  }
}
