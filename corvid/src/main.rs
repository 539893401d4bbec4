//! Worked example wiring `corvid_vte::Vte` to `corvid_screen::Terminal`: reads
//! a byte stream from stdin, feeds it through the parser and command
//! interpreter, and prints the resulting screen contents.

use std::io::{self, Read, Write};

use corvid_screen::event::{Event, EventListener};
use corvid_screen::grid::{Dimensions, Position};
use corvid_screen::Terminal;
use corvid_vte::ansi::Vte;

struct NoopListener;

impl EventListener for NoopListener {
    fn on_event(&self, _event: Event) {}
}

fn main() -> io::Result<()> {
    env_logger::init();

    let input = io::stdin();
    let mut handle = input.lock();

    let mut buf = Vec::new();
    handle.read_to_end(&mut buf)?;

    let terminal = Terminal::new(Dimensions::default(), NoopListener);
    let mut vte = Vte::new(terminal, |bytes: &[u8]| {
        let _ = io::stdout().write_all(bytes);
    });

    vte.input(&buf);

    let grid = vte.handler().grid();

    for line in 0..grid.height() {
        let mut row = String::with_capacity(grid.width());

        for column in 0..grid.width() {
            let cell = &grid[Position { line, column }];
            row.push(cell.char.unwrap_or(' '));
        }

        println!("{}", row.trim_end());
    }

    Ok(())
}
