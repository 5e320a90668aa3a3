//! Famicom emulator binary: minifb window frontend, or headless runs
//! for timing checks and CI.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use minifb::{Key, Scale, Window, WindowOptions};

use emu_famicom::{button, Famicom, Framebuffer, InputSource};
use ppu_2c02::{ColorTable, PixelSink, Rgb, VISIBLE_HEIGHT, VISIBLE_WIDTH};

#[derive(Parser)]
#[command(name = "emu-famicom", about = "Cycle-accurate NES/Famicom emulator")]
struct Args {
    /// iNES ROM image (.nes)
    rom: PathBuf,

    /// 192-byte RGB palette file replacing the built-in colours
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode
    #[arg(long, default_value_t = 60)]
    frames: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("emu-famicom: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let rom = fs::read(&args.rom)?;
    let colors = match &args.palette {
        Some(path) => {
            let bytes = fs::read(path)?;
            ColorTable::from_pal(&bytes)
                .ok_or("palette file must hold 192 bytes of RGB triples")?
        }
        None => ColorTable::default(),
    };

    if args.headless {
        run_headless(&rom, colors, args.frames)
    } else {
        run_window(&rom, colors)
    }
}

fn run_headless(rom: &[u8], colors: ColorTable, frames: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut famicom = Famicom::new(rom, Framebuffer::new())?;
    famicom.set_color_table(colors);
    for _ in 0..frames {
        famicom.run_frame()?;
    }
    println!(
        "{} frames, {} CPU cycles, {} PPU dots",
        famicom.frames(),
        famicom.cpu_cycles(),
        famicom.ppu_dots()
    );
    Ok(())
}

/// Window surface: pixel sink on one side, keyboard input on the other.
struct WindowDisplay {
    window: Window,
    buffer: Vec<u32>,
}

impl WindowDisplay {
    fn new() -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "emu-famicom",
            VISIBLE_WIDTH as usize,
            VISIBLE_HEIGHT as usize,
            WindowOptions {
                scale: Scale::X2,
                ..WindowOptions::default()
            },
        )?;
        window.set_target_fps(60);
        Ok(Self {
            window,
            buffer: vec![0; (VISIBLE_WIDTH * VISIBLE_HEIGHT) as usize],
        })
    }
}

impl PixelSink for WindowDisplay {
    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let [r, g, b] = color;
        self.buffer[(y * VISIBLE_WIDTH + x) as usize] =
            u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b);
    }

    fn present(&mut self) {
        if let Err(e) = self.window.update_with_buffer(
            &self.buffer,
            VISIBLE_WIDTH as usize,
            VISIBLE_HEIGHT as usize,
        ) {
            log::warn!("window update failed: {e}");
        }
    }
}

impl InputSource for WindowDisplay {
    fn buttons(&mut self) -> u8 {
        let mut mask = 0;
        let pairs = [
            (Key::S, button::A),
            (Key::A, button::B),
            (Key::Q, button::SELECT),
            (Key::W, button::START),
            (Key::Up, button::UP),
            (Key::Down, button::DOWN),
            (Key::Left, button::LEFT),
            (Key::Right, button::RIGHT),
        ];
        for (key, bit) in pairs {
            if self.window.is_key_down(key) {
                mask |= bit;
            }
        }
        mask
    }
}

fn run_window(rom: &[u8], colors: ColorTable) -> Result<(), Box<dyn std::error::Error>> {
    let display = WindowDisplay::new()?;
    let mut famicom = Famicom::new(rom, display)?;
    famicom.set_color_table(colors);

    while famicom.video().window.is_open() && !famicom.video().window.is_key_down(Key::Escape) {
        let mask = famicom.video_mut().buttons();
        famicom.set_buttons(mask);
        famicom.run_frame()?;
        famicom.video_mut().present();
    }
    Ok(())
}
