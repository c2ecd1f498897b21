#![no_main]
use grawlix::{Censor, ForbiddenWords, Grawlix, Literal};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if !data.is_empty() {
        let flags = data[0];
        let input = &data[1..];

        if let Ok(text) = std::str::from_utf8(input) {
            // The first line doubles as the dictionary, so that matches actually happen.
            let words: ForbiddenWords = text
                .lines()
                .next()
                .unwrap_or_default()
                .split_whitespace()
                .collect();

            let mut censor = Censor::new(&words);
            censor.with_grawlix(Grawlix::new(if flag(flags, 0) { "$1" } else { "***" }).unwrap());
            if flag(flags, 1) {
                censor.with_normalizer(&Literal);
            }

            let censored = censor.censor(text);
            for span in censor.spans(text) {
                assert!(text.is_char_boundary(span.start) && text.is_char_boundary(span.end));
            }
            if censor.is_clean(text) {
                assert_eq!(censored, text);
            }
        }
    }
});

fn flag(flags: u8, index: u8) -> bool {
    ((flags >> index) & 1) == 1
}
