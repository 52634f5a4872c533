use log::info;
use std::env;
use std::error::Error;
use std::fs::File;
use std::process;

use chip8::config::{parse_args, Invocation};
use chip8::display::MonoTermDisplay;
use chip8::environment::Environment;
use chip8::input::StdinInput;
use chip8::interpreter::Chip8Interpreter;
use chip8::sound::{Mute, SimpleBeep, Sound};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let (rom, config) = match parse_args(&args) {
        Ok(Invocation::Run { rom, config }) => (rom, config),
        Ok(Invocation::Help(usage)) => {
            print!("{}", usage);
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(2);
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    // load a program
    let mut interpreter = Chip8Interpreter::with_config(&config);
    let mut f = File::open(&rom)?;
    let size = interpreter.load_program_from(&mut f)?;
    info!("loaded {} ({} bytes)", rom.display(), size);

    // initialise
    let mut sound: Box<dyn Sound> = if config.mute {
        Box::new(Mute::new())
    } else {
        Box::new(SimpleBeep::new())
    };
    let mut input = StdinInput::new(config.key_hold_frames)?;
    let mut display = MonoTermDisplay::new()?;
    let frames = {
        let mut environment = Environment::new(
            interpreter,
            &mut display,
            &mut input,
            sound.as_mut(),
            &config,
        );
        environment.main_loop(config.max_frames)
    };

    // put the terminal back before saying anything
    drop(display);
    drop(input);
    let frames = frames?;
    info!("ran {} frames", frames);

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..2 {
        println!();
    }
    Ok(())
}
