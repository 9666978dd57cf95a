use clap::Parser;
use std::path::PathBuf;
use std::process;

use nesium_core::config::{DumpRange, RunnerConfig};
use nesium_core::cpu::{Cpu, FLAG_B, FLAG_B2, FLAG_C, FLAG_D, FLAG_I, FLAG_N, FLAG_V, FLAG_Z};
use nesium_core::memory::PROGRAM_ORIGIN;
use nesium_core::trace::trace_line;

#[derive(Parser)]
#[command(name = "nesium-run")]
#[command(about = "Run a raw 6502 program image on the Nesium CPU core")]
struct Args {
    /// Path to the program image (loaded at $0600)
    program: PathBuf,

    /// Runner configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many instructions (0 = no limit)
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print a trace line before every instruction
    #[arg(long)]
    trace: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Hex-dump memory after the run, e.g. --dump 0200:40
    #[arg(long, value_name = "START:LEN")]
    dump: Vec<DumpRange>,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var("RUST_LOG").is_err() {
        builder.filter_level(log_level);
    }
    builder.init();

    let mut config = match RunnerConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }
    config.trace |= args.trace;
    config.dump.extend(args.dump);

    let program = match std::fs::read(&args.program) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.program.display(), e);
            process::exit(1);
        }
    };
    println!(
        "Loading program: {} ({} bytes at ${:04X})",
        args.program.display(),
        program.len(),
        PROGRAM_ORIGIN
    );

    let mut cpu = Cpu::new();
    cpu.load(&program);
    cpu.reset();

    let mut steps: u64 = 0;
    let mut hit_limit = false;
    let result = cpu.run_with_callback(|cpu, _, op| {
        if config.max_steps != 0 && steps >= config.max_steps {
            hit_limit = true;
            cpu.halt();
            return Ok(());
        }
        if config.trace {
            println!("{}", trace_line(cpu, op));
        }
        steps += 1;
        Ok(())
    });

    if hit_limit {
        log::warn!("Step limit reached after {} instructions", steps);
    }

    print_state(&cpu, steps);
    for range in &config.dump {
        print_dump(&cpu, *range);
    }

    if let Err(e) = result {
        eprintln!("Execution failed: {}", e);
        process::exit(1);
    }
}

fn print_state(cpu: &Cpu, steps: u64) {
    let flags: String = [
        (FLAG_N, 'N'),
        (FLAG_V, 'V'),
        (FLAG_B2, 'U'),
        (FLAG_B, 'B'),
        (FLAG_D, 'D'),
        (FLAG_I, 'I'),
        (FLAG_Z, 'Z'),
        (FLAG_C, 'C'),
    ]
    .iter()
    .map(|&(flag, c)| if cpu.flag(flag) { c } else { '-' })
    .collect();

    println!("Executed {} instructions", steps);
    println!(
        "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{:02X} [{}]",
        cpu.pc,
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.sp,
        cpu.status(),
        flags
    );
}

fn print_dump(cpu: &Cpu, range: DumpRange) {
    let bytes = cpu.memory().slice(range.start, range.len as usize);
    for (i, row) in bytes.chunks(16).enumerate() {
        let hex: Vec<String> = row.iter().map(|b| format!("{:02X}", b)).collect();
        println!("{:04X}: {}", range.start as usize + i * 16, hex.join(" "));
    }
}
