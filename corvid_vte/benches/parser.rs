use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};

#[derive(Default)]
struct NopExecutor {}

impl corvid_vte::Executor for NopExecutor {
    fn print(&mut self, _c: char) {}

    fn execute(&mut self, _byte: u8) {}

    fn put(&mut self, _byte: u8) {}

    fn hook(
        &mut self,
        _params: &corvid_vte::param::Params,
        _intermediates: &[u8],
        _ignore: bool,
        _action: char,
    ) {
    }

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}

    fn csi_dispatch(
        &mut self,
        _params: &corvid_vte::param::Params,
        _intermediates: &[u8],
        _ignore: bool,
        _action: char,
    ) {
    }
}

impl vte::Perform for NopExecutor {
    fn print(&mut self, _c: char) {}

    fn execute(&mut self, _byte: u8) {}

    fn put(&mut self, _byte: u8) {}

    fn hook(&mut self, _params: &vte::Params, _intermediates: &[u8], _ignore: bool, _action: char) {
    }

    fn unhook(&mut self) {}

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {}

    fn csi_dispatch(
        &mut self,
        _params: &vte::Params,
        _intermediates: &[u8],
        _ignore: bool,
        _action: char,
    ) {
    }
}

const BAT_OUTPUT: &[u8] = b"\x1b[38;5;231mfn\x1b[0m \x1b[38;5;81mmain\x1b[0m() {\r\n    \x1b[38;5;203mprintln!\x1b[0m(\"hello, world\");\r\n}\r\n\x1b[2J\x1b[H";
const BIG_UTF8: &[u8] = "旅ロ京青利セムレ弱改フヨス波府かばぼ意送でぼ調掲察たス日西重ケアナ住橋ユムミク順待ふかんぼ人奨貯鏡すびそ。Лорем ипсум долор сит амет, пер цлита поссит ех.".as_bytes();

fn alacritty_vte(c: &mut Criterion) {
    let mut parser = vte::Parser::new();
    let mut performer = NopExecutor::default();

    let mut group = c.benchmark_group("alacritty parser advance");

    group.bench_function("batch", |b| {
        b.iter(|| {
            parser.advance(&mut performer, black_box(BAT_OUTPUT));
        });
    });

    group.bench_function("batch utf8", |b| {
        b.iter(|| {
            parser.advance(&mut performer, black_box(BIG_UTF8));
        });
    });

    group.finish()
}

fn parser_advance(c: &mut Criterion) {
    let mut parser = corvid_vte::Parser::new();
    let mut performer = NopExecutor::default();

    let mut group = c.benchmark_group("corvid parser advance");

    group.bench_function("batch", |b| {
        b.iter(|| {
            parser.advance(&mut performer, black_box(BAT_OUTPUT));
        });
    });

    group.bench_function("batch utf8", |b| {
        b.iter(|| {
            parser.advance(&mut performer, black_box(BIG_UTF8));
        });
    });

    group.finish()
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10)).with_profiler(PProfProfiler::new(50_000, Output::Flamegraph(None)));
    targets = parser_advance, alacritty_vte
}

criterion_main!(benches);
