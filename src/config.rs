use getopts::Options;
use log::LevelFilter;
use std::path::PathBuf;

/// behaviours that differ between CHIP-8 dialects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8xy6/8xyE shift Vy into Vx (COSMAC VIP) instead of shifting Vx in place
    pub shift_vy: bool,
}

/// Knobs for the interpreter and the host loop around it
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// instruction cycles (and frames) per second
    pub tick_rate_hz: f64,
    /// terminals only report key-down, so a press is held for this many frames
    pub key_hold_frames: u8,
    /// how long the beeper sounds once the sound timer runs out
    pub beep_frames: u8,
    pub mute: bool,
    /// fixed seed for Cxkk; random when None
    pub seed: Option<u64>,
    /// stop after this many frames; run until quit when None
    pub max_frames: Option<u64>,
    pub quirks: Quirks,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tick_rate_hz: 60.0,
            key_hold_frames: 6,
            beep_frames: 4,
            mute: false,
            seed: None,
            max_frames: None,
            quirks: Quirks::default(),
            log_level: LevelFilter::Warn,
        }
    }
}

/// what the command line asked for
#[derive(Debug, PartialEq)]
pub enum Invocation {
    Run { rom: PathBuf, config: Config },
    Help(String),
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt("r", "rate", "instructions per second (default 60)", "HZ");
    opts.optopt("s", "seed", "seed the random number generator", "SEED");
    opts.optopt("f", "frames", "stop after this many frames", "N");
    opts.optflag("m", "mute", "don't beep");
    opts.optflag("", "shift-vy", "8xy6/8xyE shift Vy into Vx");
    opts.optflagmulti("v", "verbose", "more logging; repeat for more");
    opts.optflag("h", "help", "print this help");
    opts
}

fn usage(program: &str) -> String {
    let brief = format!("Usage: {} [options] ROM", program);
    options().usage(&brief)
}

fn parse_number<T: std::str::FromStr>(name: &str, value: Option<String>) -> Result<Option<T>, String> {
    match value {
        None => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("invalid value for --{}: {}", name, v)),
    }
}

/// parse argv (including the program name) into an invocation
pub fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let program = args.first().map(String::as_str).unwrap_or("chip8");
    let matches = options()
        .parse(args.iter().skip(1))
        .map_err(|f| f.to_string())?;

    if matches.opt_present("h") {
        return Ok(Invocation::Help(usage(program)));
    }

    let mut config = Config::default();
    if let Some(rate) = parse_number::<f64>("rate", matches.opt_str("r"))? {
        if rate.is_nan() || rate <= 0.0 {
            return Err(format!("invalid value for --rate: {}", rate));
        }
        config.tick_rate_hz = rate;
    }
    config.seed = parse_number("seed", matches.opt_str("s"))?;
    config.max_frames = parse_number("frames", matches.opt_str("f"))?;
    config.mute = matches.opt_present("m");
    config.quirks.shift_vy = matches.opt_present("shift-vy");
    config.log_level = match matches.opt_count("v") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let rom = match matches.free.as_slice() {
        [rom] => PathBuf::from(rom),
        [] => return Err(format!("no ROM given\n\n{}", usage(program))),
        _ => return Err(format!("only one ROM, please\n\n{}", usage(program))),
    };
    Ok(Invocation::Run { rom, config })
}
