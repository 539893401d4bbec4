pub mod ansi;
pub mod param;

mod table;
mod utf8;

use arrayvec::ArrayVec;
use param::{Param, Params, PARAM_SEPARATOR};
use std::mem::MaybeUninit;
use table::{Action, State};

/// X3.64 doesn't place any limit on the number of intermediate characters allowed before a final character,
/// although it doesn't define any control sequences with more than one.
/// Digital defined escape sequences with two intermediate characters,
/// and control sequences and device control strings with one.
const MAX_INTERMEDIATES: usize = 2;

/// There is no limit to the number of characters in a parameter string,
/// although a maximum of 16 parameters need be stored.
const MAX_OSC_PARAMS: usize = 16;

/// OSC strings are bounded well below what xterm itself allows: anything
/// past this is almost always a misbehaving or malicious sender, and
/// every receiver of a truncated OSC still gets a syntactically valid
/// dispatch out of it.
const MAX_OSC_RAW: usize = 128;

pub trait Executor {
    /// Draw a character to the screen.
    fn print(&mut self, c: char);

    /// Execute C0 or C1 control function
    fn execute(&mut self, byte: u8);

    /// Pass bytes as part of a device control string to the handle chosen in `hook`. C0 controls
    /// will also be passed to the handler.
    fn put(&mut self, byte: u8);

    /// Invoked when a final character arrives in first part of device control string.
    ///
    /// The control function should be determined from the private marker, final character, and
    /// execute with a parameter list. A handler should be selected for remaining characters in the
    /// string; the handler function should subsequently be called by `put` for every character in
    /// the control string.
    ///
    /// The `ignore` flag indicates that more than two intermediates arrived and
    /// subsequent characters were ignored.
    fn hook(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char);

    /// Called when a device control string is terminated.
    ///
    /// The previously selected handler should be notified that the DCS has
    /// terminated.
    fn unhook(&mut self);

    /// Dispatch an operating system command.
    fn osc_dispatch(&mut self, params: &[&[u8]], bell_terminated: bool);

    /// The final character of an escape sequence has arrived.
    ///
    /// The `ignore` flag indicates that more than two intermediates arrived and
    /// subsequent characters were ignored.
    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8);

    /// A final character has arrived for a CSI sequence
    ///
    /// The `ignore` flag indicates that either more than two intermediates arrived
    /// or the number of parameters exceeded the maximum supported length,
    /// and subsequent characters were ignored.
    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char);
}

#[derive(Default)]
pub struct Intermediates {
    array: [u8; MAX_INTERMEDIATES],
    index: usize,
}

impl Intermediates {
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.array[..self.index]
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.index == MAX_INTERMEDIATES
    }

    pub const fn push(&mut self, byte: u8) {
        self.array[self.index] = byte;
        self.index += 1;
    }

    #[inline]
    pub const fn clear(&mut self) {
        self.index = 0
    }
}

#[derive(Default)]
pub struct OscHandler {
    params: [(usize, usize); MAX_OSC_PARAMS],
    params_num: usize,
    raw: ArrayVec<u8, MAX_OSC_RAW>,
}

impl OscHandler {
    pub fn start(&mut self) {
        self.raw.clear();
        self.params_num = 0;
    }

    pub fn put(&mut self, byte: u8) {
        let idx = self.raw.len();

        if byte == PARAM_SEPARATOR {
            let param_idx = self.params_num;

            match param_idx {
                // Only process up to MAX_OSC_PARAMS
                MAX_OSC_PARAMS => return,

                // First param is special - 0 to current byte index
                0 => {
                    self.params[param_idx] = (0, idx);
                }

                // All other params depend on previous indexing
                _ => {
                    let prev = self.params[param_idx - 1];
                    let begin = prev.1;
                    self.params[param_idx] = (begin, idx);
                }
            }

            self.params_num += 1;
        } else {
            let _ = self.raw.try_push(byte);
        }
    }

    pub fn end(&mut self, executor: &mut impl Executor, byte: u8) {
        let param_idx = self.params_num;
        let idx = self.raw.len();

        match param_idx {
            // Finish last parameter if not already maxed
            MAX_OSC_PARAMS => (),

            // First param is special - 0 to current byte index
            0 => {
                self.params[param_idx] = (0, idx);
                self.params_num += 1;
            }

            // All other params depend on previous indexing
            _ => {
                let prev = self.params[param_idx - 1];
                let begin = prev.1;
                self.params[param_idx] = (begin, idx);
                self.params_num += 1;
            }
        }

        self.dispatch(executor, byte);
    }

    pub fn dispatch(&self, executor: &mut impl Executor, byte: u8) {
        let mut slices: [MaybeUninit<&[u8]>; MAX_OSC_PARAMS] =
            unsafe { MaybeUninit::uninit().assume_init() };

        for (i, slice) in slices.iter_mut().enumerate().take(self.params_num) {
            let indices = self.params[i];
            *slice = MaybeUninit::new(&self.raw[indices.0..indices.1]);
        }

        unsafe {
            let num_params = self.params_num;
            let params = &slices[..num_params] as *const [MaybeUninit<&[u8]>] as *const [&[u8]];
            executor.osc_dispatch(&*params, byte == 0x07);
        }
    }
}

#[derive(Default)]
pub struct Parser {
    state: State,

    osc_handler: OscHandler,

    params: Params,

    intermediate_handler: Intermediates,

    ignoring: bool,

    utf8: utf8::Decoder,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, executor: &mut impl Executor, bytes: &[u8]) {
        for &byte in bytes {
            if self.in_escape_sequence() || byte <= 0x1F || byte == 0x7F {
                self.advance_sequence(executor, byte);
            } else {
                self.advance_utf8(executor, byte);
            }
        }
    }

    fn advance_utf8(&mut self, executor: &mut impl Executor, byte: u8) {
        if let Some(c) = self.utf8.decode(byte) {
            executor.print(c);
        }
    }

    fn advance_sequence(&mut self, executor: &mut impl Executor, byte: u8) {
        let change = table::change_state(State::Anywhere, byte)
            .or_else(|| table::change_state(self.state, byte));

        let Some((state, action)) = change else {
            return;
        };

        self.state_change(executor, state, action, byte);
    }

    #[inline]
    fn in_escape_sequence(&self) -> bool {
        self.state != State::Ground
    }

    fn state_change<E: Executor>(
        &mut self,
        executor: &mut E,
        state: State,
        action: Option<Action>,
        byte: u8,
    ) {
        // moving to Anywhere means executing current action right away
        match state {
            State::Anywhere => {
                let Some(action) = action else {
                    return;
                };

                self.execute_action(executor, action, byte);
            }
            state => {
                self.execute_state_exit_action(executor, byte);

                // transition
                if let Some(action) = action {
                    self.execute_action(executor, action, byte);
                }

                self.state = state;

                self.execute_state_entry_action(executor, byte);
            }
        }
    }

    fn execute_state_entry_action(&mut self, executor: &mut impl Executor, byte: u8) {
        match self.state {
            State::CsiEntry | State::DcsEntry | State::Escape => {
                self.execute_action(executor, Action::Clear, byte);
            }
            State::OscString => {
                self.execute_action(executor, Action::OscStart, byte);
            }
            State::DcsPassthrough => {
                self.execute_action(executor, Action::Hook, byte);
            }
            _ => (),
        }
    }

    fn execute_state_exit_action(&mut self, executor: &mut impl Executor, byte: u8) {
        match self.state {
            State::DcsPassthrough => {
                self.execute_action(executor, Action::Unhook, byte);
            }
            State::OscString => {
                self.execute_action(executor, Action::OscEnd, byte);
            }
            _ => {}
        }
    }

    fn execute_action(&mut self, executor: &mut impl Executor, action: Action, byte: u8) {
        use Action::*;

        match action {
            Print => executor.print(byte as char),
            Put => executor.put(byte),
            Execute => executor.execute(byte),
            OscStart => self.osc_handler.start(),
            OscPut => self.osc_handler.put(byte),
            OscEnd => self.osc_handler.end(executor, byte),
            Hook => {
                executor.hook(
                    &self.params,
                    self.intermediate_handler.as_slice(),
                    self.ignoring,
                    byte as char,
                );
            }
            Unhook => executor.unhook(),
            Param => match byte {
                param::PARAM_SEPARATOR => {
                    if self.params.is_full() {
                        self.ignoring = true;
                    } else {
                        self.params.next_param();
                    }
                }
                byte => {
                    if !self.ignoring {
                        self.params.push_digit(byte - b'0');
                    }
                }
            },
            CsiDispatch => {
                executor.csi_dispatch(
                    &self.params,
                    self.intermediate_handler.as_slice(),
                    self.ignoring,
                    byte as char,
                );
            }
            Collect => {
                if self.intermediate_handler.is_full() {
                    self.ignoring = true
                } else {
                    self.intermediate_handler.push(byte);
                }
            }
            EscDispatch => {
                executor.esc_dispatch(self.intermediate_handler.as_slice(), self.ignoring, byte);
            }
            Clear => {
                self.params.clear();

                self.ignoring = false;

                self.intermediate_handler.clear();
            }
            Ignore => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Dispatcher {
        dispatched: Vec<Sequence>,
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Sequence {
        Osc(Vec<Vec<u8>>, bool),
        Csi(Vec<Param>, Vec<u8>, bool, char),
        Esc(Vec<u8>, bool, u8),
        DcsHook(Vec<Param>, Vec<u8>, bool, char),
        DcsPut(u8),
        DcsUnhook,
        Execute(u8),
        Print(char),
    }

    impl Executor for Dispatcher {
        fn print(&mut self, c: char) {
            self.dispatched.push(Sequence::Print(c));
        }

        fn execute(&mut self, byte: u8) {
            self.dispatched.push(Sequence::Execute(byte))
        }

        fn put(&mut self, byte: u8) {
            self.dispatched.push(Sequence::DcsPut(byte));
        }

        fn hook(&mut self, params: &Params, intermediates: &[u8], ignore: bool, c: char) {
            let params = params.as_slice().to_vec();

            let intermediates = intermediates.to_vec();

            self.dispatched
                .push(Sequence::DcsHook(params, intermediates, ignore, c));
        }

        fn unhook(&mut self) {
            self.dispatched.push(Sequence::DcsUnhook);
        }

        fn osc_dispatch(&mut self, params: &[&[u8]], bell_terminated: bool) {
            let params = params.iter().map(|p| p.to_vec()).collect();

            self.dispatched.push(Sequence::Osc(params, bell_terminated));
        }

        fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8) {
            let intermediates = intermediates.to_vec();

            self.dispatched
                .push(Sequence::Esc(intermediates, ignore, byte));
        }

        fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, c: char) {
            let params = params.as_slice().to_vec();

            let intermediates = intermediates.to_vec();

            self.dispatched
                .push(Sequence::Csi(params, intermediates, ignore, c));
        }
    }

    mod c0_or_c1 {
        use super::*;

        #[test]
        fn all() {
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, b"\x07\x08\x00");

            assert_eq!(
                dispatcher.dispatched,
                vec![
                    Sequence::Execute(0x07),
                    Sequence::Execute(0x08),
                    Sequence::Execute(0x00),
                ]
            )
        }
    }

    mod osc {
        use super::*;

        static OSC_BYTES: &[u8] = &[
            0x1b, 0x5d, // Begin OSC
            b'2', b';', b'j', b'w', b'i', b'l', b'm', b'@', b'j', b'w', b'i', b'l', b'm', b'-',
            b'd', b'e', b's', b'k', b':', b' ', b'~', b'/', b'c', b'o', b'd', b'e', b'/', b's',
            b'a', b'i', b'g', b'a', 0x9c, // End OSC
        ];

        #[test]
        fn parse() {
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, OSC_BYTES);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Osc(params, _) => {
                    assert_eq!(params.len(), 2);
                    assert_eq!(params[0], &OSC_BYTES[2..3]);
                    assert_eq!(params[1], &OSC_BYTES[4..(OSC_BYTES.len() - 1)]);
                }
                _ => panic!("expected osc sequence"),
            }
        }

        #[test]
        fn parse_empty() {
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, &[0x1b, 0x5d, 0x07]);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Osc(..) => (),
                _ => panic!("expected osc sequence"),
            }
        }

        #[test]
        fn parse_max_params() {
            let params = ";".repeat(param::MAX_PARAMS + 1);
            let input = format!("\x1b]{}\x1b", &params[..]).into_bytes();
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, input.as_slice());

            assert_eq!(dispatcher.dispatched.len(), 1);

            match &dispatcher.dispatched[0] {
                Sequence::Osc(params, _) => {
                    assert_eq!(params.len(), MAX_OSC_PARAMS);
                    assert!(params.iter().all(Vec::is_empty));
                }
                _ => panic!("expected osc sequence"),
            }
        }

        #[test]
        fn exceed_max_buffer_size() {
            static NUM_BYTES: usize = MAX_OSC_PARAMS + 100;
            static INPUT_START: &[u8] = &[0x1b, b']', b'5', b'2', b';', b's'];
            static INPUT_END: &[u8] = b"\x07";

            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            // Create valid OSC escape
            parser.advance(&mut dispatcher, INPUT_START);

            // Exceed max buffer size
            parser.advance(&mut dispatcher, [b'a'].repeat(NUM_BYTES).as_slice());

            // Terminate escape for dispatch
            parser.advance(&mut dispatcher, INPUT_END);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Osc(params, _) => {
                    assert_eq!(params.len(), 2);
                    assert_eq!(params[0], b"52");
                    assert_eq!(params[1].len(), MAX_OSC_RAW - b"52".len());
                }
                _ => panic!("expected osc sequence"),
            }
        }

        #[test]
        fn bell_terminated() {
            static INPUT: &[u8] = b"\x1b]11;ff/00/ff\x07";
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, INPUT);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Osc(_, true) => (),
                _ => panic!("expected osc with bell terminator"),
            }
        }
    }

    mod csi {
        use super::*;

        #[test]
        fn parse_max_params() {
            // This will build a list of repeating '1;'s
            // The length is MAX_PARAMS - 1 because the last semicolon is interpreted
            // as an implicit empty param, making the total number of parameters MAX_PARAMS
            let params = "1;".repeat(param::MAX_PARAMS - 1);
            let input = format!("\x1b[{}p", &params[..]).into_bytes();

            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, &input);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Csi(params, _, ignore, _) => {
                    assert_eq!(params.len(), param::MAX_PARAMS);
                    assert!(!ignore);
                }
                _ => panic!("expected csi sequence"),
            }
        }

        #[test]
        fn parse_params_ignore_long_params() {
            let params = "1;".repeat(param::MAX_PARAMS);
            let input = format!("\x1b[{}p", &params[..]).into_bytes();

            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, &input);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Csi(params, _, ignore, _) => {
                    assert_eq!(params.len(), param::MAX_PARAMS);
                    assert!(ignore);
                }
                _ => panic!("expected csi sequence"),
            }
        }

        #[test]
        fn parse_params_seventeenth_param_does_not_corrupt_sixteenth() {
            // 15 single-digit params, then a 16th worth "16", then a 17th
            // ("17") that must be dropped wholesale rather than having its
            // digits appended onto the 16th parameter's slot.
            let params = format!("{}16;17", "1;".repeat(param::MAX_PARAMS - 1));
            let input = format!("\x1b[{}m", &params[..]).into_bytes();

            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, &input);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Csi(params, _, ignore, _) => {
                    assert_eq!(params.len(), param::MAX_PARAMS);
                    assert_eq!(params.last(), Some(&Some(16)));
                    assert!(ignore);
                }
                _ => panic!("expected csi sequence"),
            }
        }

        #[test]
        fn parse_params_trailing_semicolon() {
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, b"\x1b[4;m");

            assert_eq!(dispatcher.dispatched.len(), 1);

            match &dispatcher.dispatched[0] {
                Sequence::Csi(params, ..) => assert_eq!(params, &[Some(4), None]),
                _ => panic!("expected csi sequence"),
            }
        }

        #[test]
        fn parse_params_leading_semicolon() {
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, b"\x1b[;4m");

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Csi(params, ..) => assert_eq!(params, &[None, Some(4)]),
                _ => panic!("expected csi sequence"),
            }
        }

        #[test]
        fn parse_long_param() {
            // The important part is the parameter, which is (i64::MAX + 1)
            static INPUT: &[u8] = b"\x1b[9223372036854775808m";

            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, INPUT);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Csi(params, ..) => assert_eq!(params, &[Some(u16::MAX)]),
                _ => panic!("expected csi sequence"),
            }
        }

        #[test]
        fn reset() {
            static INPUT: &[u8] = b"\x1b[3;1\x1b[?1049h";

            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, INPUT);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Csi(params, intermediates, ignore, _) => {
                    assert_eq!(intermediates, b"?");
                    assert_eq!(params, &[Some(1049)]);
                    assert!(!ignore);
                }
                _ => panic!("expected csi sequence"),
            }
        }

        /// A colon is not a valid parameter separator; the sequence must be
        /// ignored wholesale rather than parsed as a subparameter.
        #[test]
        fn colon_forces_ignore() {
            static INPUT: &[u8] = b"\x1b[38:2:255:0:255;1m";

            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, INPUT);

            assert_eq!(dispatcher.dispatched.len(), 1);

            match &dispatcher.dispatched[0] {
                Sequence::Csi(_, intermediates, ignore, action) => {
                    assert_eq!(intermediates, &[]);
                    assert_eq!(*action, 'm');
                    assert!(ignore);
                }
                _ => panic!("expected csi sequence"),
            }
        }

        #[test]
        fn params_buffer_filled() {
            let params = "1;".repeat(param::MAX_PARAMS + 2);
            let input = format!("\x1b[{}x", &params[..]).into_bytes();

            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, &input);

            assert_eq!(dispatcher.dispatched.len(), 1);

            match &dispatcher.dispatched[0] {
                Sequence::Csi(params, intermediates, ignore, c) => {
                    assert_eq!(intermediates, &[]);
                    assert_eq!(params.len(), param::MAX_PARAMS);
                    assert!(params.iter().all(|p| p == &Some(1)));
                    assert_eq!(c, &'x');
                    assert!(ignore);
                }
                _ => panic!("expected csi sequence"),
            }
        }
    }

    mod dcs {
        use super::*;

        #[test]
        fn parse_max_params() {
            let params = "1;".repeat(param::MAX_PARAMS + 1);
            let input = format!("\x1bP{}p", &params[..]).into_bytes();
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, &input);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::DcsHook(params, _, ignore, _) => {
                    assert_eq!(params.len(), param::MAX_PARAMS);
                    assert!(params.iter().all(|param| param == &Some(1)));
                    assert!(ignore);
                }
                _ => panic!("expected dcs sequence"),
            }
        }

        #[test]
        fn reset() {
            static INPUT: &[u8] = b"\x1b[3;1\x1bP1$tx\x9c";
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, INPUT);

            assert_eq!(dispatcher.dispatched.len(), 3);

            match &dispatcher.dispatched[0] {
                Sequence::DcsHook(params, intermediates, ignore, _) => {
                    assert_eq!(intermediates, b"$");
                    assert_eq!(params, &[Some(1)]);
                    assert!(!ignore);
                }
                _ => panic!("expected dcs sequence"),
            }

            assert_eq!(dispatcher.dispatched[1], Sequence::DcsPut(b'x'));
            assert_eq!(dispatcher.dispatched[2], Sequence::DcsUnhook);
        }

        #[test]
        fn parse() {
            static INPUT: &[u8] = b"\x1bP0;1|17/ab\x9c";
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, INPUT);

            assert_eq!(dispatcher.dispatched.len(), 7);

            match &dispatcher.dispatched[0] {
                Sequence::DcsHook(params, _, _, c) => {
                    assert_eq!(params, &[Some(0), Some(1)]);
                    assert_eq!(c, &'|');
                }
                _ => panic!("expected dcs sequence"),
            }

            for (i, byte) in b"17/ab".iter().enumerate() {
                assert_eq!(dispatcher.dispatched[1 + i], Sequence::DcsPut(*byte));
            }

            assert_eq!(dispatcher.dispatched[6], Sequence::DcsUnhook);
        }

        #[test]
        fn intermediate_reset_on_exit() {
            static INPUT: &[u8] = b"\x1bP=1sZZZ\x1b+\x5c";
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, INPUT);

            assert_eq!(dispatcher.dispatched.len(), 6);
            match &dispatcher.dispatched[5] {
                Sequence::Esc(intermediates, ..) => assert_eq!(intermediates, b"+"),
                _ => panic!("expected esc sequence"),
            }
        }
    }

    mod esc {
        use super::*;

        #[test]
        fn reset() {
            static INPUT: &[u8] = b"\x1b[3;1\x1b(A";
            let mut dispatcher = Dispatcher::default();
            let mut parser = Parser::new();

            parser.advance(&mut dispatcher, INPUT);

            assert_eq!(dispatcher.dispatched.len(), 1);
            match &dispatcher.dispatched[0] {
                Sequence::Esc(intermediates, ignore, byte) => {
                    assert_eq!(intermediates, b"(");
                    assert_eq!(*byte, b'A');
                    assert!(!ignore);
                }
                _ => panic!("expected esc sequence"),
            }
        }
    }

    mod utf8 {
        use super::*;

        #[test]
        fn process_mixed() {
            let mut parser = Parser::new();
            let mut dispatcher = Dispatcher::default();

            parser.advance(&mut dispatcher, b"hello\x07\x1b[38;2;255;0;255;1m");
            parser.advance(&mut dispatcher, &[0xD0]);
            parser.advance(&mut dispatcher, &[0x96]);
            parser.advance(&mut dispatcher, &[0xE6, 0xBC, 0xA2]);
            parser.advance(&mut dispatcher, &[0xE6, 0xBC, 0x1B]); // abort utf8 sequence

            assert_eq!(
                dispatcher.dispatched,
                vec![
                    Sequence::Print('h'),
                    Sequence::Print('e'),
                    Sequence::Print('l'),
                    Sequence::Print('l'),
                    Sequence::Print('o'),
                    Sequence::Execute(0x07),
                    Sequence::Csi(
                        vec![Some(38), Some(2), Some(255), Some(0), Some(255), Some(1)],
                        vec![],
                        false,
                        'm',
                    ),
                    Sequence::Print('Ж'),
                    Sequence::Print('漢'),
                    Sequence::Print(char::REPLACEMENT_CHARACTER),
                ]
            );
        }
    }
}
