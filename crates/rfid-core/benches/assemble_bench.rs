//! Criterion benchmarks for key translation and identifier assembly.
//!
//! Measures the per-event cost of the hot path the session loop runs for
//! every key press: table lookup, append, and flush-and-encode on ENTER.
//!
//! Run with:
//! ```bash
//! cargo bench --package rfid-core --bench assemble_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rfid_core::keymap::{KeyTranslator, Translation, KEY_ENTER};
use rfid_core::{IdentifierAssembler, KeyEvent, ServerMessage};

/// Key codes for a typical 10-digit tag: "0004512345".
const TAG_CODES: &[u16] = &[11, 11, 11, 5, 6, 2, 3, 4, 5, 6];

fn bench_translate(c: &mut Criterion) {
    let translator = KeyTranslator::default();
    let mut group = c.benchmark_group("translate");
    for (label, event) in [
        ("press_digit", KeyEvent::press(2)),
        ("press_enter", KeyEvent::press(KEY_ENTER)),
        ("release", KeyEvent::release(2)),
        ("out_of_range", KeyEvent::press(700)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &event, |b, ev| {
            b.iter(|| translator.translate(black_box(ev)))
        });
    }
    group.finish();
}

fn bench_assemble_tag(c: &mut Criterion) {
    let translator = KeyTranslator::default();
    let mut events: Vec<KeyEvent> = Vec::new();
    for &code in TAG_CODES {
        events.push(KeyEvent::press(code));
        events.push(KeyEvent::release(code));
    }
    events.push(KeyEvent::press(KEY_ENTER));
    events.push(KeyEvent::release(KEY_ENTER));

    c.bench_function("assemble_tag_line", |b| {
        let mut assembler = IdentifierAssembler::default();
        b.iter(|| {
            let mut line = String::new();
            for event in black_box(&events) {
                match translator.translate(event) {
                    Translation::Text(text) => {
                        assembler.append(text);
                    }
                    Translation::Terminator => {
                        line = ServerMessage::Identifier(assembler.flush()).encode();
                    }
                    Translation::Ignored => {}
                }
            }
            line
        })
    });
}

criterion_group!(benches, bench_translate, bench_assemble_tag);
criterion_main!(benches);
