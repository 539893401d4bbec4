//! A minimal reference implementation of the `Handler` screen contract,
//! used by `corvid_vte`'s integration tests and by the `corvid` example
//! binary. Deliberately thin: no scrollback, no wide-character reservation
//! beyond single-width placement, no rendering.

use std::mem;

use corvid_vte::ansi::handler::{
    Attribute, Direction, Handler, LineClearMode, Mode, Position, PrivateMode, ScreenClearMode,
    TabClearMode,
};
use event::{Event, EventListener};
use grid::cell::Cell;
use grid::{Dimensions, Grid};
use unicode_width::UnicodeWidthChar;

pub mod event;
pub mod grid;

#[derive(Clone, Copy)]
struct TerminalMode {
    insert: bool,
    line_feed_new_line: bool,
    origin: bool,
    auto_wrap: bool,
    reverse_video: bool,
}

impl Default for TerminalMode {
    fn default() -> Self {
        Self {
            insert: false,
            line_feed_new_line: false,
            origin: false,
            auto_wrap: true,
            reverse_video: false,
        }
    }
}

pub struct Terminal<E: EventListener> {
    grid: Grid,
    alt_grid: Grid,
    alt_screen: bool,

    mode: TerminalMode,
    /// Set when the cursor sits past the last column after a printed
    /// character; the next `put_char` wraps before drawing instead of this
    /// one, matching real terminals' deferred-wrap behavior.
    wrap_pending: bool,

    event_listener: E,
}

impl<E: EventListener> Terminal<E> {
    pub fn new(dimensions: Dimensions, event_listener: E) -> Self {
        Self {
            grid: Grid::with_dimensions(dimensions),
            alt_grid: Grid::with_dimensions(dimensions),
            alt_screen: false,
            mode: TerminalMode::default(),
            wrap_pending: false,
            event_listener,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.active_grid()
    }

    pub fn resize(&mut self, dimensions: Dimensions) {
        self.grid.resize(dimensions);
        self.alt_grid.resize(dimensions);
    }

    fn active_grid(&self) -> &Grid {
        if self.alt_screen {
            &self.alt_grid
        } else {
            &self.grid
        }
    }

    fn active_grid_mut(&mut self) -> &mut Grid {
        if self.alt_screen {
            &mut self.alt_grid
        } else {
            &mut self.grid
        }
    }

    fn damage(&self) {
        self.event_listener.on_event(Event::Damage);
    }

    /// Resolve a cursor line argument into an absolute screen line: relative
    /// to the scrolling region's top margin under DECOM (origin mode),
    /// relative to the whole screen otherwise.
    fn resolve_line(&self, line: usize) -> usize {
        let grid = self.active_grid();

        if self.mode.origin {
            let (top, bottom) = grid.margins();
            (top + line).min(bottom)
        } else {
            line.min(grid.height() - 1)
        }
    }
}

impl<E: EventListener> Handler for Terminal<E> {
    fn move_cursor(&mut self, direction: Direction, count: usize, reset_column: bool) {
        self.wrap_pending = false;

        let grid = self.active_grid_mut();
        let width = grid.width();

        match direction {
            Direction::Up => {
                grid.cursor.position.line = grid.cursor.position.line.saturating_sub(count);
            }
            Direction::Down => {
                let max = grid.height() - 1;
                grid.cursor.position.line = (grid.cursor.position.line + count).min(max);
            }
            Direction::Right => {
                grid.cursor.position.column = (grid.cursor.position.column + count).min(width - 1);
            }
            Direction::Left => {
                grid.cursor.position.column = grid.cursor.position.column.saturating_sub(count);
            }
        }

        if reset_column {
            grid.cursor.position.column = 0;
        }
    }

    fn put_char(&mut self, c: char) {
        // Combining-character folding belongs to a real cell store, not this
        // reference screen (out of scope); zero-width marks are dropped.
        if c.width() == Some(0) {
            return;
        }

        if mem::take(&mut self.wrap_pending) {
            self.linefeed();
            self.carriage_return();
        }

        if self.mode.insert {
            self.active_grid_mut().insert_blank_chars(1);
        }

        let grid = self.active_grid_mut();
        let template = grid.cursor.template;
        let cell = grid.cell_at_cursor_mut();
        cell.char = Some(c);
        cell.apply_template(&template);

        let last_column = grid.width() - 1;
        if grid.cursor.position.column < last_column {
            grid.cursor.position.column += 1;
        } else if self.mode.auto_wrap {
            self.wrap_pending = true;
        }

        self.damage();
    }

    fn newline(&mut self) {
        self.linefeed();
        self.carriage_return();
    }

    fn carriage_return(&mut self) {
        self.wrap_pending = false;
        self.active_grid_mut().cursor.position.column = 0;
    }

    fn linefeed(&mut self) {
        self.wrap_pending = false;

        let grid = self.active_grid_mut();
        let (_, bottom) = grid.margins();

        if grid.cursor.position.line == bottom {
            grid.scroll_up(1);
        } else if grid.cursor.position.line < grid.height() - 1 {
            grid.cursor.position.line += 1;
        }

        self.damage();
    }

    fn cursor_position(&self) -> Position {
        self.active_grid().cursor.position
    }

    fn set_cursor_position(&mut self, position: Position) {
        self.wrap_pending = false;

        let line = self.resolve_line(position.line);
        let grid = self.active_grid_mut();
        let column = position.column.min(grid.width() - 1);

        grid.cursor.position = Position { line, column };
    }

    fn set_cursor_line(&mut self, line: usize) {
        let column = self.active_grid().cursor.position.column;
        self.set_cursor_position(Position { line, column });
    }

    fn set_cursor_column(&mut self, column: usize) {
        self.wrap_pending = false;

        let grid = self.active_grid_mut();
        let width = grid.width();
        grid.cursor.position.column = column.min(width - 1);
    }

    fn set_mode(&mut self, mode: Mode, enabled: bool) {
        match mode {
            Mode::Insert => self.mode.insert = enabled,
            Mode::LineFeedNewLine => self.mode.line_feed_new_line = enabled,
            Mode::KeyboardAction | Mode::SendReceive | Mode::Unknown(_) => {}
        }
    }

    fn set_private_mode(&mut self, mode: PrivateMode, enabled: bool) {
        match mode {
            PrivateMode::Origin => self.mode.origin = enabled,
            PrivateMode::AutoWrap => self.mode.auto_wrap = enabled,
            PrivateMode::ReverseVideo => self.mode.reverse_video = enabled,
            PrivateMode::AlternateScreen
            | PrivateMode::AlternateScreenSaveCursor
            | PrivateMode::SwapScreenAndSetRestoreCursor => {
                self.alt_screen = enabled;
            }
            PrivateMode::CursorKeys
            | PrivateMode::ColumnMode
            | PrivateMode::AutoRepeat
            | PrivateMode::BlinkingCursor
            | PrivateMode::ShowCursor
            | PrivateMode::SaveCursor
            | PrivateMode::TiteInhibit
            | PrivateMode::Unknown(_) => {}
        }
    }

    fn set_attribute(&mut self, attribute: Attribute) {
        let template = &mut self.active_grid_mut().cursor.template;

        match attribute {
            Attribute::Reset => *template = Cell::default(),
            Attribute::Bold => template.bold = true,
            Attribute::CancelBold | Attribute::CancelBoldDim => {
                template.bold = false;
                template.dim = false;
            }
            Attribute::Dim => template.dim = true,
            Attribute::Italic => template.italic = true,
            Attribute::CancelItalic => template.italic = false,
            Attribute::Underline => template.underline = true,
            Attribute::DoubleUnderline => template.double_underline = true,
            Attribute::CancelUnderline => {
                template.underline = false;
                template.double_underline = false;
            }
            Attribute::BlinkSlow | Attribute::BlinkFast => template.blink = true,
            Attribute::CancelBlink => template.blink = false,
            Attribute::Reverse => template.inverse = true,
            Attribute::CancelReverse => template.inverse = false,
            Attribute::Hidden => template.hidden = true,
            Attribute::CancelHidden => template.hidden = false,
            Attribute::Strikeout => template.strikeout = true,
            Attribute::CancelStrikeout => template.strikeout = false,
            Attribute::Foreground(color) => template.foreground = color,
            Attribute::Background(color) => template.background = color,
            Attribute::UnderlineColor(_) => {}
        }
    }

    fn reset_state(&mut self) {
        self.active_grid_mut().cursor.template = Cell::default();
    }

    fn set_scrolling_region(&mut self, top: usize, bottom: Option<usize>) {
        self.active_grid_mut().set_margins(top, bottom);
    }

    fn scroll_up(&mut self, count: usize) {
        self.active_grid_mut().scroll_up(count);
        self.damage();
    }

    fn scroll_down(&mut self, count: usize) {
        self.active_grid_mut().scroll_down(count);
        self.damage();
    }

    fn insert_blank_lines(&mut self, count: usize) {
        self.active_grid_mut().insert_blank_lines(count);
        self.damage();
    }

    fn delete_lines(&mut self, count: usize) {
        self.active_grid_mut().delete_lines(count);
        self.damage();
    }

    fn insert_blank_chars(&mut self, count: usize) {
        self.active_grid_mut().insert_blank_chars(count);
        self.damage();
    }

    fn delete_chars(&mut self, count: usize) {
        self.active_grid_mut().delete_chars(count);
        self.damage();
    }

    fn erase_chars(&mut self, count: usize) {
        self.active_grid_mut().erase_chars(count);
        self.damage();
    }

    fn put_tab(&mut self, count: usize) {
        let grid = self.active_grid_mut();
        let column = grid.cursor.position.column;
        grid.cursor.position.column = grid.next_tab_stop(column, count);
    }

    fn back_tab(&mut self, count: usize) {
        let grid = self.active_grid_mut();
        let column = grid.cursor.position.column;
        grid.cursor.position.column = grid.prev_tab_stop(column, count);
    }

    fn set_tab_stop(&mut self) {
        let grid = self.active_grid_mut();
        let column = grid.cursor.position.column;
        grid.set_tab_stop(column);
    }

    fn clear_tab_stop(&mut self, mode: TabClearMode) {
        let grid = self.active_grid_mut();

        match mode {
            TabClearMode::Current => {
                let column = grid.cursor.position.column;
                grid.clear_tab_stop(column);
            }
            TabClearMode::All => grid.clear_all_tab_stops(),
        }
    }

    fn clear_screen(&mut self, mode: ScreenClearMode, selective: bool) {
        let grid = self.active_grid_mut();
        let height = grid.height();
        let width = grid.width();
        let line = grid.cursor.position.line;
        let column = grid.cursor.position.column;

        match mode {
            ScreenClearMode::Below => {
                grid.clear_line_range(line, column..width, selective);
                grid.clear_lines((line + 1)..height, selective);
            }
            ScreenClearMode::Above => {
                grid.clear_line_range(line, 0..(column + 1).min(width), selective);
                grid.clear_lines(0..line, selective);
            }
            ScreenClearMode::All | ScreenClearMode::Saved => {
                grid.clear_lines(0..height, selective);
            }
        }

        self.damage();
    }

    fn clear_line(&mut self, mode: LineClearMode, selective: bool) {
        let grid = self.active_grid_mut();
        let width = grid.width();
        let line = grid.cursor.position.line;
        let column = grid.cursor.position.column;

        let range = match mode {
            LineClearMode::Right => column..width,
            LineClearMode::Left => 0..(column + 1).min(width),
            LineClearMode::All => 0..width,
        };

        grid.clear_line_range(line, range, selective);
        self.damage();
    }

    fn unhandled_csi(&mut self, _params: &corvid_vte::param::Params, intermediates: &[u8], action: char) {
        log::debug!("[screen] unhandled csi intermediates={intermediates:?} action={action}");
    }

    fn unhandled_esc(&mut self, intermediates: &[u8], byte: u8) {
        log::debug!("[screen] unhandled esc intermediates={intermediates:?} byte={byte:02x}");
    }

    // `set_charset`/`invoke_charset_gl`/`invoke_charset_gr`/`single_shift` are
    // left at their no-op `Handler` defaults: charset translation happens
    // entirely in `corvid_vte::ansi::charset::CharsetState` before `put_char`
    // ever sees the character, so this screen has nothing to track.
}
