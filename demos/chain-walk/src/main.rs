//! Chain Walk Example
//!
//! Drives a two-register chain through console-backed HAL implementations
//! and walks a single lit output from bit 0 to the end of the chain.
//!
//! Usage: `cargo run -p chain-walk [chain_len_bytes]`

use std::env;
use std::process;

use spi_shift_chain::hal::{GpioPin, HalResult, Level, PinMode, SpiConfig, SpiMaster};
use spi_shift_chain::{ChainConfig, ChainResult, ShiftRegisterChain};

/// SPI master that prints what it would put on the wire
struct ConsoleSpi {
    line: Vec<String>,
}

impl SpiMaster for ConsoleSpi {
    fn begin_transaction(&mut self, config: &SpiConfig) -> HalResult<()> {
        self.line.clear();
        self.line.push(format!(
            "[{} Hz {:?} {:?}]",
            config.frequency, config.mode, config.bit_order
        ));
        Ok(())
    }

    fn transfer(&mut self, byte: u8) -> HalResult<u8> {
        self.line.push(format!("{:08b}", byte));
        Ok(0)
    }

    fn end_transaction(&mut self) -> HalResult<()> {
        println!("{}", self.line.join(" "));
        Ok(())
    }
}

/// Latch line that prints every level change
struct ConsoleLatch {
    number: u32,
    level: Option<Level>,
}

impl GpioPin for ConsoleLatch {
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()> {
        println!("pin {}: {:?}", self.number, mode);
        Ok(())
    }

    fn write(&mut self, level: Level) -> HalResult<()> {
        if self.level != Some(level) {
            println!("pin {}: {:?}", self.number, level);
        }
        self.level = Some(level);
        Ok(())
    }

    fn pin_number(&self) -> u32 {
        self.number
    }
}

fn walk(chain_len_bytes: usize) -> ChainResult<()> {
    let spi = ConsoleSpi { line: Vec::new() };
    let latch = ConsoleLatch {
        number: 5,
        level: None,
    };
    let mut chain: ShiftRegisterChain<_, _> = ShiftRegisterChain::with_config(
        spi,
        latch,
        ChainConfig::new(chain_len_bytes).flush_on_write(false),
    )?;

    for bit in 0..chain.bit_count() {
        if bit > 0 {
            chain.set_bit_off(bit - 1)?;
        }
        chain.set_bit_on(bit)?;
        chain.flush()?;
    }

    chain.reset_all_bits();
    chain.flush()
}

fn main() {
    let chain_len_bytes = match env::args().nth(1).map(|arg| arg.parse::<usize>()) {
        None => 2,
        Some(Ok(len)) => len,
        Some(Err(err)) => {
            eprintln!("invalid chain length: {}", err);
            process::exit(2);
        }
    };

    if let Err(err) = walk(chain_len_bytes) {
        eprintln!("chain walk failed: {}", err);
        process::exit(1);
    }
}
