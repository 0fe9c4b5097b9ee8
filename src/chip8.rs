use std::time::Duration;

use log::{debug, error, info, trace};

use crate::constants::{CLOCK_HZ, MAX_CLOCK_HZ, TIMER_HZ};
use crate::diagnostics::{self, Line, Snapshot};
use crate::error::Fault;
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::io::{Buzzer, Io};
use crate::operations::{execute, Flow};
use crate::state::State;

/// Longest stretch of wall-clock time a single `advance` will catch up on
const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Suspended by `Fx0A` until a key press is stored in the register
    AwaitingKey { register: u8 },
    /// Terminal
    Halted,
}

/// Clock rates the scheduler runs at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions per second
    pub clock_hz: u32,
    /// Delay and sound timer decrements per second
    pub timer_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_hz: CLOCK_HZ,
            timer_hz: TIMER_HZ,
        }
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - whether it is running, waiting on a key or halted
///  - how far behind wall-clock time the instruction and timer clocks are
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - advancing both by an amount of elapsed wall-clock time
/// - inspecting its state and frame buffer
pub struct Chip8 {
    state: State,
    config: Config,
    run_state: RunState,
    rom_len: usize,
    tone: bool,
    cycle_lag: Duration,
    timer_lag: Duration,
    crash_report: Option<Snapshot>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8 {
            state: State::new(),
            config,
            run_state: RunState::Running,
            rom_len: 0,
            tone: false,
            cycle_lag: Duration::ZERO,
            timer_lag: Duration::ZERO,
            crash_report: None,
        }
    }

    /// Makes `Cxkk` produce the same sequence on every run
    pub fn reseed(&mut self, seed: u64) {
        self.state.reseed(seed);
    }

    /// Copy a rom into memory starting at 0x200
    ///
    /// # Arguments
    /// * `rom` raw big-endian instruction words, no header
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Fault> {
        if let Err(fault) = self.state.memory.load_rom(rom) {
            return Err(self.fault(fault));
        }
        self.rom_len = rom.len();
        info!("loaded {} byte rom", rom.len());
        Ok(())
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_halted(&self) -> bool {
        self.run_state == RunState::Halted
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Length of the loaded rom; program memory is 0x200 .. 0x200 + rom_len
    pub fn rom_len(&self) -> usize {
        self.rom_len
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// The state captured when a fault halted the engine
    pub fn crash_report(&self) -> Option<&Snapshot> {
        self.crash_report.as_ref()
    }

    pub fn disassemble(&self) -> Vec<Line> {
        diagnostics::disassemble(&self.state.memory, self.rom_len)
    }

    pub fn halt(&mut self) {
        if self.run_state != RunState::Halted {
            info!("halted at {:#05X}", self.state.registers.pc);
            self.run_state = RunState::Halted;
        }
    }

    /// Advances the CPU by a single cycle
    /// - stops if the input asks to quit
    /// - polls for a key instead of fetching while `Fx0A` is waiting
    /// - otherwise gets, decodes and executes the next opcode
    ///
    /// Timers are left alone; see `tick_timers` and `advance`.
    pub fn step(&mut self, io: &mut Io) -> Result<(), Fault> {
        if self.is_halted() {
            return Ok(());
        }
        if io.input.request_quit() {
            info!("quit requested");
            self.halt();
            return Ok(());
        }

        if let RunState::AwaitingKey { register } = self.run_state {
            if let Some(key) = io.input.poll_any_key() {
                debug!("key {:X} stored in V{:X}", key, register);
                if let Err(fault) = self.state.registers.set(register, key & 0xF) {
                    return Err(self.fault(fault));
                }
                self.run_state = RunState::Running;
            }
            return Ok(());
        }

        let address = self.state.registers.pc;
        let op = self.state.fetch();
        let instruction = match Instruction::decode(op) {
            Some(instruction) => instruction,
            None => return Err(self.fault(Fault::UnsupportedOpcode { opcode: op, address })),
        };
        trace!("{:03X}: {:04X}  {}", address, op, instruction);

        self.state.registers.advance_pc(0x2);
        match execute(instruction, &mut self.state, &*io.input) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Redraw) => io.renderer.present(&self.state.frame_buffer),
            Ok(Flow::AwaitKey(register)) => {
                // only presses that happen from here on count
                io.input.poll_any_key();
                debug!("waiting for a key for V{:X}", register);
                self.run_state = RunState::AwaitingKey { register };
            }
            Err(fault) => {
                self.state.registers.jump(address);
                return Err(self.fault(fault));
            }
        }
        self.sync_buzzer(&mut *io.buzzer);
        Ok(())
    }

    /// Decrements the delay and sound timers once
    /// - the buzzer starts when the sound timer becomes non-zero and stops when it reaches zero
    pub fn tick_timers(&mut self, buzzer: &mut dyn Buzzer) {
        if self.is_halted() {
            return;
        }
        self.state.timers.tick();
        self.sync_buzzer(buzzer);
    }

    /// Runs the instructions and timer ticks that fall due in `elapsed`
    /// wall-clock time, in the order they come due.
    ///
    /// Leftover time is carried into the next call. `elapsed` is capped at
    /// 250ms so a stalled host doesn't trigger a burst of catch-up work.
    pub fn advance(&mut self, elapsed: Duration, io: &mut Io) -> Result<(), Fault> {
        if self.is_halted() {
            return Ok(());
        }
        let elapsed = elapsed.min(MAX_FRAME_TIME);
        let cycle_period = period(self.config.clock_hz);
        let timer_period = period(self.config.timer_hz);
        if cycle_period.is_some() {
            self.cycle_lag += elapsed;
        }
        if timer_period.is_some() {
            self.timer_lag += elapsed;
        }

        while !self.is_halted() {
            let cycle_over = overdue(self.cycle_lag, cycle_period);
            let timer_over = overdue(self.timer_lag, timer_period);
            match (cycle_over, timer_over) {
                (None, None) => break,
                // whichever fell due first has the larger overshoot
                (Some(cycle), Some(timer)) if timer > cycle => self.timer_tick_due(io),
                (Some(cycle), _) => {
                    self.cycle_lag = cycle;
                    self.step(io)?;
                }
                (None, Some(_)) => self.timer_tick_due(io),
            }
        }
        Ok(())
    }

    fn timer_tick_due(&mut self, io: &mut Io) {
        if let Some(timer) = overdue(self.timer_lag, period(self.config.timer_hz)) {
            self.timer_lag = timer;
            self.tick_timers(&mut *io.buzzer);
        }
    }

    fn sync_buzzer(&mut self, buzzer: &mut dyn Buzzer) {
        let active = self.state.timers.sound_active();
        if active != self.tone {
            if active {
                buzzer.start();
            } else {
                buzzer.stop();
            }
            self.tone = active;
        }
    }

    /// Reports a fault and halts
    fn fault(&mut self, fault: Fault) -> Fault {
        let snapshot = self.snapshot();
        error!("{}\n{}", fault, snapshot);
        self.crash_report = Some(snapshot);
        self.halt();
        fault
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

/// `None` for a stopped clock. Rates above `MAX_CLOCK_HZ` are capped so a
/// period never rounds down to zero.
fn period(hz: u32) -> Option<Duration> {
    if hz == 0 {
        None
    } else {
        Some(Duration::from_secs(1) / hz.min(MAX_CLOCK_HZ))
    }
}

/// The lag left after one period, if a whole period has built up
fn overdue(lag: Duration, period: Option<Duration>) -> Option<Duration> {
    period.and_then(|period| lag.checked_sub(period))
}
