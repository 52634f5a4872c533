use std::error::Error;
use std::io;

/// the program image doesn't fit between 0x200 and the top of RAM
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("program image is {size} bytes, at most {max} bytes fit above 0x200")]
pub struct ImageTooLarge {
    pub size: usize,
    pub max: usize,
}

/// Faults raised by one instruction cycle.
///
/// Everything except `UnknownInstruction` stops the machine. Unknown opcodes
/// come out of the decoder; the cycle logs them and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineFault {
    #[error("address {0:#05x} is outside addressable memory")]
    AddressOutOfRange(u16),
    #[error("unknown instruction {0:#06x}")]
    UnknownInstruction(u16),
    #[error("call stack overflow")]
    StackOverflow,
    #[error("return with an empty call stack")]
    StackUnderflow,
}

/// anything that can stop the host loop
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Engine(#[from] EngineFault),
    #[error("sound device failed")]
    Sound(#[source] Box<dyn Error>),
}
